pub mod common;
pub mod course;
pub mod instructor;
pub mod reference;
pub mod registration;
pub mod section;
pub mod semester;
pub mod student;
