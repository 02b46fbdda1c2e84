use super::location;
use crate::{
    AppState,
    auth::Authorized,
    dtos::{
        common::{ErrorResponse, FormErrorResponse},
        reference::{PeriodResponse, YearResponse},
    },
    error::AppError,
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use database::services::reference::ReferenceService;
use models::{
    forms::YearForm,
    permission::{Permission, Resource},
};

const YEARS_PATH: &str = "/years";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(YEARS_PATH, get(list_years).post(create_year))
        .route("/periods", get(list_periods))
}

/// Get all years in ascending order
#[utoipa::path(
    get,
    path = "/years",
    responses(
        (status = 200, description = "List of years", body = Vec<YearResponse>),
        (status = 403, description = "Missing courseInfo.view_year", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Reference"
)]
pub async fn list_years(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<YearResponse>>, AppError> {
    auth.require(Permission::view(Resource::Year))?;

    let years = ReferenceService::list_years(&state.db).await?;
    Ok(Json(years.into_iter().map(Into::into).collect()))
}

/// Add a calendar year that semesters can be scheduled in
#[utoipa::path(
    post,
    path = "/years",
    request_body = YearForm,
    responses(
        (status = 201, description = "Year created", body = YearResponse),
        (status = 403, description = "Missing courseInfo.add_year", body = ErrorResponse),
        (status = 422, description = "Invalid form", body = FormErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Reference"
)]
pub async fn create_year(
    State(state): State<AppState>,
    auth: Authorized,
    body: Result<Json<YearForm>, JsonRejection>,
) -> Result<Response, AppError> {
    auth.require(Permission::add(Resource::Year))?;
    let Json(form) = body?;

    let year = ReferenceService::create_year(&state.db, form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(YEARS_PATH, year.id))],
        Json(YearResponse::from(year)),
    )
        .into_response())
}

/// Get the periods of the academic year in sequence order
#[utoipa::path(
    get,
    path = "/periods",
    responses(
        (status = 200, description = "List of periods", body = Vec<PeriodResponse>),
        (status = 403, description = "Missing courseInfo.view_period", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Reference"
)]
pub async fn list_periods(
    State(state): State<AppState>,
    auth: Authorized,
) -> Result<Json<Vec<PeriodResponse>>, AppError> {
    auth.require(Permission::view(Resource::Period))?;

    let periods = ReferenceService::list_periods(&state.db).await?;
    Ok(Json(periods.into_iter().map(Into::into).collect()))
}
