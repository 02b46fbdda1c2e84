use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        instructor::{InstructorDetailResponse, InstructorPageResponse, InstructorResponse},
    },
    error::AppError,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use database::services::instructor::InstructorService;
use models::{
    forms::InstructorForm,
    pagination::PageQuery,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/instructors";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_instructors).post(create_instructor))
        .route(
            "/instructors/{id}",
            get(get_instructor).put(update_instructor),
        )
        .route(
            "/instructors/{id}/delete",
            get(check_delete_instructor).post(delete_instructor),
        )
}

/// Get one page of instructors, ordered by last then first name
#[utoipa::path(
    get,
    path = "/instructors",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of instructors", body = InstructorPageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_instructor", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn list_instructors(
    State(state): State<AppState>,
    auth: Authorized,
    Query(query): Query<PageQuery>,
) -> Result<Json<InstructorPageResponse>, AppError> {
    auth.require(Permission::view(Resource::Instructor))?;
    let request = query.request().ok_or(AppError::NotFound)?;

    let page = InstructorService::list_page(&state.db, request).await?;
    Ok(Json(page.into()))
}

/// Get an instructor with the sections they teach
#[utoipa::path(
    get,
    path = "/instructors/{id}",
    params(("id" = i32, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor found", body = InstructorDetailResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn get_instructor(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<InstructorDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Instructor))?;

    let detail = InstructorService::detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Create an instructor
#[utoipa::path(
    post,
    path = "/instructors",
    request_body = InstructorForm,
    responses(
        (status = 201, description = "Instructor created", body = InstructorResponse),
        (status = 403, description = "Missing courseInfo.add_instructor", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn create_instructor(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<InstructorForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Instructor))?;
    let Json(form) = body?;

    let instructor = InstructorService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, instructor.id))],
        Json(InstructorResponse::from(instructor)),
    )
        .into_response())
}

/// Replace an instructor's names
#[utoipa::path(
    put,
    path = "/instructors/{id}",
    params(("id" = i32, Path, description = "Instructor ID")),
    request_body = InstructorForm,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn update_instructor(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<InstructorForm>, JsonRejection>,
) -> Result<Json<InstructorResponse>, AppError> {
    auth.require(Permission::change(Resource::Instructor))?;
    let Json(form) = body?;

    let instructor = InstructorService::update(&state.db, id, form).await?;
    Ok(Json(instructor.into()))
}

/// Check whether an instructor can be deleted
#[utoipa::path(
    get,
    path = "/instructors/{id}/delete",
    params(("id" = i32, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor can be deleted", body = DeleteResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Instructor still teaches sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn check_delete_instructor(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Instructor))?;

    let deletion = InstructorService::check_delete(&state.db, id).await?;
    Ok(delete_check_response((&deletion).into()))
}

/// Delete an instructor who teaches no sections
#[utoipa::path(
    post,
    path = "/instructors/{id}/delete",
    params(("id" = i32, Path, description = "Instructor ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the instructor list"),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Instructor still teaches sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Instructors"
)]
pub async fn delete_instructor(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Instructor))?;

    let deletion = InstructorService::delete(&state.db, id).await?;
    Ok(delete_commit_response((&deletion).into(), LIST_PATH))
}
