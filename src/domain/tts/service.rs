use super::dto::GenerationRequest;
use super::error::TtsServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct TtsService {
    /// Present only when the server holds a provider credential
    tts_repo: Option<Arc<dyn TtsRepository>>,
}

impl TtsService {
    pub fn new(tts_repo: Option<Arc<dyn TtsRepository>>) -> Self {
        Self { tts_repo }
    }

    pub fn is_configured(&self) -> bool {
        self.tts_repo.is_some()
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Generate speech audio for a client request
    ///
    /// This operation:
    /// - Validates that text, voice and model are all present
    /// - Checks that a provider credential is configured
    /// - Makes exactly one provider call, with no retry
    ///
    /// Returns the provider's audio bytes, never empty
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<u8>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<u8>, TtsServiceError> {
        let synthesis = request
            .into_synthesis()
            .ok_or(TtsServiceError::MissingParameters)?;

        let tts_repo = self
            .tts_repo
            .as_ref()
            .ok_or(TtsServiceError::MissingCredential)?;

        tracing::info!(
            voice_id = %synthesis.voice_id,
            model_id = %synthesis.model_id,
            text_length = synthesis.text.len(),
            "TTS generation request"
        );

        let audio_data = tts_repo.synthesize(&synthesis).await?;

        if audio_data.is_empty() {
            tracing::error!(
                error_kind = "empty_result",
                voice_id = %synthesis.voice_id,
                "Received empty audio buffer from provider"
            );
            return Err(TtsServiceError::EmptyAudio);
        }

        tracing::info!(
            audio_size = audio_data.len(),
            "Successfully generated audio"
        );

        Ok(audio_data)
    }
}
