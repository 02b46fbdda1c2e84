//! HTTP API for course registration records.

use axum::Router;
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Routes that require validated claims
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::reference::routes())
        .merge(routes::course::routes())
        .merge(routes::instructor::routes())
        .merge(routes::student::routes())
        .merge(routes::semester::routes())
        .merge(routes::section::routes())
        .merge(routes::registration::routes())
        .with_state(state)
}

/// Routes served without a token: health and the API documentation
pub fn public_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .with_state(state)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::ApiDoc::openapi()),
        )
}
