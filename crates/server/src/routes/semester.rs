use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        semester::{SemesterDetailResponse, SemesterResponse},
    },
    error::AppError,
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use database::services::semester::SemesterService;
use models::{
    forms::SemesterForm,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/semesters";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_semesters).post(create_semester))
        .route("/semesters/{id}", get(get_semester).put(update_semester))
        .route(
            "/semesters/{id}/delete",
            get(check_delete_semester).post(delete_semester),
        )
}

/// Get all semesters in calendar order
#[utoipa::path(
    get,
    path = "/semesters",
    responses(
        (status = 200, description = "List of semesters", body = Vec<SemesterResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_semester", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn list_semesters(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<SemesterResponse>>, AppError> {
    auth.require(Permission::view(Resource::Semester))?;

    let semesters = SemesterService::list(&state.db).await?;
    Ok(Json(semesters.into_iter().map(Into::into).collect()))
}

/// Get a semester with the sections offered in it
#[utoipa::path(
    get,
    path = "/semesters/{id}",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester found", body = SemesterDetailResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn get_semester(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<SemesterDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Semester))?;

    let detail = SemesterService::detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Create a semester
#[utoipa::path(
    post,
    path = "/semesters",
    request_body = SemesterForm,
    responses(
        (status = 201, description = "Semester created", body = SemesterResponse),
        (status = 403, description = "Missing courseInfo.add_semester", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn create_semester(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<SemesterForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Semester))?;
    let Json(form) = body?;

    let semester = SemesterService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, semester.semester.id))],
        Json(SemesterResponse::from(semester)),
    )
        .into_response())
}

/// Replace a semester's year and period
#[utoipa::path(
    put,
    path = "/semesters/{id}",
    params(("id" = i32, Path, description = "Semester ID")),
    request_body = SemesterForm,
    responses(
        (status = 200, description = "Semester updated", body = SemesterResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn update_semester(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<SemesterForm>, JsonRejection>,
) -> Result<Json<SemesterResponse>, AppError> {
    auth.require(Permission::change(Resource::Semester))?;
    let Json(form) = body?;

    let semester = SemesterService::update(&state.db, id, form).await?;
    Ok(Json(semester.into()))
}

/// Check whether a semester can be deleted
#[utoipa::path(
    get,
    path = "/semesters/{id}/delete",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester can be deleted", body = DeleteResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 409, description = "Semester still has sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn check_delete_semester(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Semester))?;

    let deletion = SemesterService::check_delete(&state.db, id).await?;
    Ok(delete_check_response((&deletion).into()))
}

/// Delete a semester with no sections
#[utoipa::path(
    post,
    path = "/semesters/{id}/delete",
    params(("id" = i32, Path, description = "Semester ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the semester list"),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 409, description = "Semester still has sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn delete_semester(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Semester))?;

    let deletion = SemesterService::delete(&state.db, id).await?;
    Ok(delete_commit_response((&deletion).into(), LIST_PATH))
}
