use super::{delete_check_response, delete_commit_response, location};
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{DeleteResponse, ErrorResponse, FormErrorResponse},
        registration::{RegistrationDetailResponse, RegistrationResponse},
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
use database::services::registration::RegistrationService;
use models::{
    forms::RegistrationForm,
    permission::{Permission, Resource},
};

const LIST_PATH: &str = "/registrations";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(list_registrations).post(create_registration))
        .route(
            "/registrations/{id}",
            get(get_registration).put(update_registration),
        )
        .route(
            "/registrations/{id}/delete",
            get(check_delete_registration).post(delete_registration),
        )
}

/// Get all registrations, ordered by section then student
#[utoipa::path(
    get,
    path = "/registrations",
    responses(
        (status = 200, description = "List of registrations", body = Vec<RegistrationResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing courseInfo.view_registration", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    auth.require(Permission::view(Resource::Registration))?;

    let registrations = RegistrationService::list(&state.db).await?;
    Ok(Json(registrations.into_iter().map(Into::into).collect()))
}

/// Get a registration with its student and section
#[utoipa::path(
    get,
    path = "/registrations/{id}",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration found", body = RegistrationDetailResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn get_registration(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Json<RegistrationDetailResponse>, AppError> {
    auth.require(Permission::view(Resource::Registration))?;

    let registration = RegistrationService::get(&state.db, id).await?;
    Ok(Json(registration.into()))
}

/// Register a student in a section
#[utoipa::path(
    post,
    path = "/registrations",
    request_body = RegistrationForm,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 403, description = "Missing courseInfo.add_registration", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn create_registration(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Registration))?;
    let Json(form) = body?;

    let registration = RegistrationService::create(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(LIST_PATH, registration.registration.id))],
        Json(RegistrationResponse::from(registration)),
    )
        .into_response())
}

/// Replace a registration's student and section
#[utoipa::path(
    put,
    path = "/registrations/{id}",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn update_registration(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
    body: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<Json<RegistrationResponse>, AppError> {
    auth.require(Permission::change(Resource::Registration))?;
    let Json(form) = body?;

    let registration = RegistrationService::update(&state.db, id, form).await?;
    Ok(Json(registration.into()))
}

/// Confirm deleting a registration
#[utoipa::path(
    get,
    path = "/registrations/{id}/delete",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration can be deleted", body = DeleteResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn check_delete_registration(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Registration))?;

    let registration = RegistrationService::check_delete(&state.db, id).await?;
    Ok(delete_check_response(DeleteResponse::confirm(&registration)))
}

/// Delete a registration
#[utoipa::path(
    post,
    path = "/registrations/{id}/delete",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the registration list"),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Registrations"
)]
pub async fn delete_registration(
    State(state): State<AppState>,
    auth: Authorized,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    auth.require(Permission::delete(Resource::Registration))?;

    let registration = RegistrationService::delete(&state.db, id).await?;
    Ok(delete_commit_response(
        DeleteResponse::confirm(&registration),
        LIST_PATH,
    ))
}
