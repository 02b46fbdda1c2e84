use crate::dtos::common::DeleteResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub mod course;
pub mod health;
pub mod instructor;
pub mod reference;
pub mod registration;
pub mod section;
pub mod semester;
pub mod student;

/// Answers a delete check: 200 asks for confirmation, 409 lists what blocks the delete
pub(crate) fn delete_check_response(outcome: DeleteResponse) -> Response {
    let status = if outcome.deletable {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    };
    (status, Json(outcome)).into_response()
}

/// Answers a delete commit: back to `list_path` on success, 409 when refused
pub(crate) fn delete_commit_response(outcome: DeleteResponse, list_path: &str) -> Response {
    if outcome.deletable {
        return Redirect::to(list_path).into_response();
    }
    (StatusCode::CONFLICT, Json(outcome)).into_response()
}

/// `Location` of a newly created row
pub(crate) fn location(list_path: &str, id: i32) -> String {
    format!("{list_path}/{id}")
}
