use super::tts_repository::ProviderError;
use crate::domain::catalog::Voice;
use async_trait::async_trait;

/// Source of provider-side voices
#[async_trait]
pub trait VoiceCatalogRepository: Send + Sync {
    /// Fetch the provider's voice list in the order the provider returns it
    async fn fetch_voices(&self) -> Result<Vec<Voice>, ProviderError>;
}
