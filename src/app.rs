use axum::Router;
use std::sync::Arc;

use crate::controllers::{catalog::CatalogController, tts::TtsController};
use crate::domain::catalog::StaticCatalog;
use crate::domain::tts::TtsService;
use crate::domain::voice::VoiceResolver;
use crate::infrastructure::config::Config;
use crate::infrastructure::http::create_router;
use crate::infrastructure::repositories::{
    ElevenLabsRepository, TtsRepository, VoiceCatalogRepository,
};

/// Wire repositories, services and controllers into the application router
pub fn build_app(config: &Config, catalog: Arc<StaticCatalog>) -> Router {
    // === DEPENDENCY INJECTION SETUP ===
    // 1. Provider repository; only exists when the server holds a credential
    let provider_repo = config.provider_api_key.clone().map(|credential| {
        Arc::new(ElevenLabsRepository::new(
            reqwest::Client::new(),
            &config.provider_base_url,
            credential,
        ))
    });

    if provider_repo.is_none() {
        tracing::warn!(
            error_kind = "server_misconfiguration",
            "No provider credential configured; generation requests will fail"
        );
    }

    let tts_repo = provider_repo
        .clone()
        .map(|repo| repo as Arc<dyn TtsRepository>);
    let voice_catalog_repo = provider_repo
        .filter(|_| config.fetch_provider_voices)
        .map(|repo| repo as Arc<dyn VoiceCatalogRepository>);

    // 2. Services
    let tts_service = Arc::new(TtsService::new(tts_repo));
    let voice_resolver = Arc::new(VoiceResolver::new(catalog.clone(), voice_catalog_repo));

    // 3. Controllers
    let tts_controller = Arc::new(TtsController::new(tts_service.clone()));
    let catalog_controller = Arc::new(CatalogController::new(voice_resolver, catalog));

    create_router(tts_service, tts_controller, catalog_controller)
}
