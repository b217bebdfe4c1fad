use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{catalog::CatalogController, health, tts::TtsController};
use crate::domain::tts::TtsService;
use crate::error::AppError;
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{api_cors_layer, preflight_middleware, request_id_middleware};

/// Build the application router with all routes configured
pub fn create_router(
    tts_service: Arc<TtsService>,
    tts_controller: Arc<TtsController>,
    catalog_controller: Arc<CatalogController>,
) -> Router {
    // Generation routes: POST only, everything else is a 405 before the body is read
    let tts_routes = Router::new()
        .route(
            "/api/tts",
            post(TtsController::generate).fallback(TtsController::method_not_allowed),
        )
        .route(
            "/api/generate-voice",
            post(TtsController::generate_encoded).fallback(TtsController::method_not_allowed),
        )
        .with_state(tts_controller)
        .layer(api_cors_layer());

    // Catalog routes (public, read-only)
    let catalog_routes = Router::new()
        .route("/api/voices", get(CatalogController::list_voices))
        .route("/api/models", get(CatalogController::list_models))
        .with_state(catalog_controller)
        .layer(api_cors_layer());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(tts_service)
        .merge(tts_routes)
        .merge(catalog_routes)
        .fallback(|| async { AppError::NotFound })
        .layer(middleware::from_fn(preflight_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(config: &Config, app: Router) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
