use crate::domain::catalog::{StaticCatalog, Voice};
use crate::infrastructure::repositories::VoiceCatalogRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Response for GET /api/voices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVoices {
    pub voices: Vec<Voice>,
    pub success: bool,
}

impl ResolvedVoices {
    fn from_voices(voices: Vec<Voice>) -> Self {
        let success = !voices.is_empty();
        Self { voices, success }
    }
}

pub struct VoiceResolver {
    catalog: Arc<StaticCatalog>,
    provider_catalog: Option<Arc<dyn VoiceCatalogRepository>>,
}

impl VoiceResolver {
    pub fn new(
        catalog: Arc<StaticCatalog>,
        provider_catalog: Option<Arc<dyn VoiceCatalogRepository>>,
    ) -> Self {
        Self {
            catalog,
            provider_catalog,
        }
    }

    /// Voices a client may choose from.
    ///
    /// Never fails: any provider problem degrades to the configured voices.
    pub async fn resolve_voices(&self) -> ResolvedVoices {
        let configured = self.catalog.voices();

        let Some(provider_catalog) = &self.provider_catalog else {
            return ResolvedVoices::from_voices(configured.to_vec());
        };

        match provider_catalog.fetch_voices().await {
            Ok(fetched) => ResolvedVoices::from_voices(merge_voices(fetched, configured)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    configured_voices = configured.len(),
                    "Could not fetch provider voices, using configured voices"
                );
                ResolvedVoices::from_voices(configured.to_vec())
            }
        }
    }
}

/// Merge keyed by voice id, configured entries applied last.
///
/// Fetched order is kept; an overridden entry stays at its fetched position and
/// configured voices with new ids are appended in configured order.
pub fn merge_voices(fetched: Vec<Voice>, configured: &[Voice]) -> Vec<Voice> {
    let mut merged: Vec<Voice> = Vec::with_capacity(fetched.len() + configured.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for voice in fetched.into_iter().chain(configured.iter().cloned()) {
        match positions.get(&voice.id) {
            Some(&index) => merged[index] = voice,
            None => {
                positions.insert(voice.id.clone(), merged.len());
                merged.push(voice);
            }
        }
    }

    merged
}
