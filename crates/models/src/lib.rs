pub mod form_errors;
pub mod forms;
pub mod pagination;
pub mod permission;
