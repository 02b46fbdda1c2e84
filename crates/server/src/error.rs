use crate::dtos::common::{ErrorResponse, FormErrorResponse};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use models::{form_errors::FormErrors, permission::Permission};
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,
    #[error("missing permission {0}")]
    Forbidden(Permission),
    #[error("not found")]
    NotFound,
    #[error("invalid form")]
    Invalid(FormErrors),
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),
    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => Self::NotFound,
            ServiceError::Invalid(errors) => Self::Invalid(errors),
            ServiceError::Database(err) => Self::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
            Self::Forbidden(_) => {
                (StatusCode::FORBIDDEN, Json(ErrorResponse { error: message })).into_response()
            }
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
            }
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FormErrorResponse { errors }),
            )
                .into_response(),
            Self::MalformedBody(rejection) => rejection.into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
