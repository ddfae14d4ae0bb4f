mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{
    auth::AccessClaims, config::Config, doc::ApiDoc, routes::health, state::AppState,
    utils::shutdown::shutdown_signal,
};
use anyhow::Context;
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let oauth2_resource_server = <OAuth2ResourceServer<AccessClaims>>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build OAuth2ResourceServer: {e:?}"))?;

    let (public, mut api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .split_for_parts();

    let (protected, protected_api) = routes::protected_router().split_for_parts();
    api.merge(protected_api);

    let protected =
        protected.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = public
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .with_state(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
