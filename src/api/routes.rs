use anyhow::{Context, Result};
use axum::{http::HeaderValue, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::users::{users_routes, UsersAppState};
use crate::config::AppConfig;
use crate::services::UserRecordService;

pub fn create_routes(db: SqlitePool, config: &AppConfig) -> Result<Router> {
    let service = UserRecordService::new(db);

    let health = Router::new()
        .route("/health", get(health_check))
        .with_state(UsersAppState {
            service: service.clone(),
        });

    Ok(Router::new()
        .merge(users_routes(service))
        .merge(health)
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Credentials are allowed, so methods and headers are mirrored instead of `*`.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {:?}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
