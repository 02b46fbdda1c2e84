use models::{
    form_errors::{FormErrors, NON_FIELD_ERRORS},
    forms::INVALID_CHOICE,
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,
    #[error("invalid form: {0}")]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Maps a constraint violation raised by an insert or update to a form error.
    ///
    /// `unique_message` is reported when a unique index rejects the row.
    pub(crate) fn from_write(err: DbErr, unique_message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Invalid(FormErrors::single(NON_FIELD_ERRORS, unique_message))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Invalid(FormErrors::single(NON_FIELD_ERRORS, INVALID_CHOICE))
            }
            _ => Self::Database(err),
        }
    }
}
