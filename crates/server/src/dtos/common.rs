use database::services::Deletion;
use models::form_errors::FormErrors;
use serde::Serialize;
use utoipa::ToSchema;

/// A related row, identified and labelled for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowRef {
    pub id: i32,
    pub label: String,
}

/// Rows that can be summarised as a [`RowRef`]
pub trait Labeled {
    fn row_ref(&self) -> RowRef;
}

/// Outcome of a delete check, or of a delete that was refused
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub object: RowRef,
    /// False when other rows still reference `object`
    pub deletable: bool,
    /// Every row that prevents the delete
    pub dependents: Vec<RowRef>,
}

impl DeleteResponse {
    pub fn confirm(object: &impl Labeled) -> Self {
        Self {
            object: object.row_ref(),
            deletable: true,
            dependents: vec![],
        }
    }
}

impl<T: Labeled, D: Labeled> From<&Deletion<T, D>> for DeleteResponse {
    fn from(deletion: &Deletion<T, D>) -> Self {
        match deletion {
            Deletion::Allowed(object) => Self::confirm(object),
            Deletion::Blocked { object, dependents } => Self {
                object: object.row_ref(),
                deletable: false,
                dependents: dependents.iter().map(Labeled::row_ref).collect(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormErrorResponse {
    /// Messages by field name; `__all__` holds errors about the whole form
    pub errors: FormErrors,
}
