use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxgate_backend::app::build_app;
use voxgate_backend::domain::catalog::StaticCatalog;
use voxgate_backend::infrastructure::config::{Config, LogFormat};
use voxgate_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Voxgate Backend on {}:{}",
        config.host,
        config.port
    );

    // Log credential presence only, never its value
    tracing::info!(
        has_provider_api_key = config.has_provider_credential(),
        provider_base_url = %config.provider_base_url,
        fetch_provider_voices = config.fetch_provider_voices,
        "Synthesis provider configuration"
    );

    // Static voices and models, loaded once and shared read-only
    let catalog = StaticCatalog::load(config.static_catalog_path.as_deref())
        .context("Failed to load static catalog")?;
    tracing::info!(
        voices = catalog.voices().len(),
        models = catalog.models().len(),
        source = %config
            .static_catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "Static catalog loaded"
    );

    let app = build_app(&config, Arc::new(catalog));

    start_http_server(&config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voxgate_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voxgate_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
