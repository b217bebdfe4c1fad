use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{
    catalog::{Model, StaticCatalog},
    voice::{ResolvedVoices, VoiceResolver},
};

/// Response for GET /api/models
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<Model>,
}

pub struct CatalogController {
    voice_resolver: Arc<VoiceResolver>,
    catalog: Arc<StaticCatalog>,
}

impl CatalogController {
    pub fn new(voice_resolver: Arc<VoiceResolver>, catalog: Arc<StaticCatalog>) -> Self {
        Self {
            voice_resolver,
            catalog,
        }
    }

    /// GET /api/voices - Configured voices merged with the provider's
    pub async fn list_voices(
        State(controller): State<Arc<CatalogController>>,
    ) -> Json<ResolvedVoices> {
        Json(controller.voice_resolver.resolve_voices().await)
    }

    /// GET /api/models
    pub async fn list_models(
        State(controller): State<Arc<CatalogController>>,
    ) -> Json<ModelsResponse> {
        Json(ModelsResponse {
            models: controller.catalog.models().to_vec(),
        })
    }
}
