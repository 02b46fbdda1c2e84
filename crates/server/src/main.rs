use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use server::{AppState, api_router, auth::Claims, config::Config, public_router};
use std::error::Error;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");

    let oauth2_resource_server = <OAuth2ResourceServer<Claims>>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .map_err(|err| format!("Failed to build OAuth2ResourceServer: {err:?}"))?;

    let state = AppState { db };
    let app = api_router(state.clone())
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()))
        .merge(public_router(state))
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::utils::shutdown::shutdown_signal())
        .await?;

    Ok(())
}
