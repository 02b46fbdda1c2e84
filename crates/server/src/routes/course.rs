use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        course::{CourseDetailResponse, CourseResponse},
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
use database::services::course::CourseService;
use models::{
    forms::CourseForm,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/courses";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course).put(update_course))
        .route(
            "/courses/{id}/delete",
            get(check_delete_course).post(delete_course),
        )
}

/// Get all courses, ordered by number then name
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "List of courses", body = Vec<CourseResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_course", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    auth.require(Permission::view(Resource::Course))?;

    let courses = CourseService::list(&state.db).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course with its sections
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Course))?;

    let detail = CourseService::detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseForm,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 403, description = "Missing courseInfo.add_course", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<CourseForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Course))?;
    let Json(form) = body?;

    let course = CourseService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, course.id))],
        Json(CourseResponse::from(course)),
    )
        .into_response())
}

/// Replace a course's number and name
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = CourseForm,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<CourseForm>, JsonRejection>,
) -> Result<Json<CourseResponse>, AppError> {
    auth.require(Permission::change(Resource::Course))?;
    let Json(form) = body?;

    let course = CourseService::update(&state.db, id, form).await?;
    Ok(Json(course.into()))
}

/// Check whether a course can be deleted
#[utoipa::path(
    get,
    path = "/courses/{id}/delete",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course can be deleted", body = DeleteResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course still has sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn check_delete_course(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Course))?;

    let deletion = CourseService::check_delete(&state.db, id).await?;
    Ok(delete_check_response((&deletion).into()))
}

/// Delete a course that has no sections
#[utoipa::path(
    post,
    path = "/courses/{id}/delete",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the course list"),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course still has sections", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Course))?;

    let deletion = CourseService::delete(&state.db, id).await?;
    Ok(delete_commit_response((&deletion).into(), LIST_PATH))
}
