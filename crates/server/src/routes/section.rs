use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        section::{SectionDetailResponse, SectionResponse},
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
use database::services::section::SectionService;
use models::{
    forms::SectionForm,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/sections";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_sections).post(create_section))
        .route("/sections/{id}", get(get_section).put(update_section))
        .route(
            "/sections/{id}/delete",
            get(check_delete_section).post(delete_section),
        )
}

/// Get all sections, ordered by course number, section name and semester
#[utoipa::path(
    get,
    path = "/sections",
    responses(
        (status = 200, description = "List of sections", body = Vec<SectionResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_section", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn list_sections(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    auth.require(Permission::view(Resource::Section))?;

    let sections = SectionService::list(&state.db).await?;
    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

/// Get a section with its course, semester, instructor and registrations
#[utoipa::path(
    get,
    path = "/sections/{id}",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section found", body = SectionDetailResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn get_section(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<SectionDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Section))?;

    let detail = SectionService::detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Create a section
#[utoipa::path(
    post,
    path = "/sections",
    request_body = SectionForm,
    responses(
        (status = 201, description = "Section created", body = SectionResponse),
        (status = 403, description = "Missing courseInfo.add_section", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn create_section(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<SectionForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Section))?;
    let Json(form) = body?;

    let section = SectionService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, section.section.id))],
        Json(SectionResponse::from(section)),
    )
        .into_response())
}

/// Replace a section's name and references
#[utoipa::path(
    put,
    path = "/sections/{id}",
    params(("id" = i32, Path, description = "Section ID")),
    request_body = SectionForm,
    responses(
        (status = 200, description = "Section updated", body = SectionResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn update_section(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<SectionForm>, JsonRejection>,
) -> Result<Json<SectionResponse>, AppError> {
    auth.require(Permission::change(Resource::Section))?;
    let Json(form) = body?;

    let section = SectionService::update(&state.db, id, form).await?;
    Ok(Json(section.into()))
}

/// Check whether a section can be deleted
#[utoipa::path(
    get,
    path = "/sections/{id}/delete",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section can be deleted", body = DeleteResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 409, description = "Section has registrations", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn check_delete_section(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Section))?;

    let deletion = SectionService::check_delete(&state.db, id).await?;
    Ok(delete_check_response((&deletion).into()))
}

/// Delete a section nobody is registered in
#[utoipa::path(
    post,
    path = "/sections/{id}/delete",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the section list"),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 409, description = "Section has registrations", body = DeleteResponse)
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn delete_section(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Section))?;

    let deletion = SectionService::delete(&state.db, id).await?;
    Ok(delete_commit_response((&deletion).into(), LIST_PATH))
}
