use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        student::{StudentDetailResponse, StudentPageResponse, StudentResponse},
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
use database::services::student::StudentService;
use models::{
    forms::StudentForm,
    pagination::PageQuery,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/students";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_students).post(create_student))
        .route("/students/{id}", get(get_student).put(update_student))
        .route(
            "/students/{id}/delete",
            get(check_delete_student).post(delete_student),
        )
}

/// Get one page of students, ordered by last name, first name and nickname
#[utoipa::path(
    get,
    path = "/students",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of students", body = StudentPageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_student", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    auth: Authorized,
    Query(query): Query<PageQuery>,
) -> Result<Json<StudentPageResponse>, AppError> {
    auth.require(Permission::view(Resource::Student))?;
    let request = query.request().ok_or(AppError::NotFound)?;

    let page = StudentService::list_page(&state.db, request).await?;
    Ok(Json(page.into()))
}

/// Get a student with their registrations
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentDetailResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<StudentDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Student))?;

    let detail = StudentService::detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentForm,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 403, description = "Missing courseInfo.add_student", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<StudentForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Student))?;
    let Json(form) = body?;

    let student = StudentService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, student.id))],
        Json(StudentResponse::from(student)),
    )
        .into_response())
}

/// Replace a student's names and nickname
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentForm,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<StudentForm>, JsonRejection>,
) -> Result<Json<StudentResponse>, AppError> {
    auth.require(Permission::change(Resource::Student))?;
    let Json(form) = body?;

    let student = StudentService::update(&state.db, id, form).await?;
    Ok(Json(student.into()))
}

/// Check whether a student can be deleted
#[utoipa::path(
    get,
    path = "/students/{id}/delete",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student can be deleted", body = DeleteResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student has registrations", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn check_delete_student(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Student))?;

    let deletion = StudentService::check_delete(&state.db, id).await?;
    Ok(delete_check_response((&deletion).into()))
}

/// Delete a student with no registrations
#[utoipa::path(
    post,
    path = "/students/{id}/delete",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the student list"),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student has registrations", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Student))?;

    let deletion = StudentService::delete(&state.db, id).await?;
    Ok(delete_commit_response((&deletion).into(), LIST_PATH))
}
