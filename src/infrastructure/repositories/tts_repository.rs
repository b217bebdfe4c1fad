use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;

/// Failure talking to the synthesis provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// Provider answered with a non-success status
    #[error("provider returned {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    /// Provider could not be reached or the response could not be read
    #[error("transport failure: {0}")]
    Transport(String),
    /// Provider answered successfully with a body we could not interpret
    #[error("invalid provider payload: {0}")]
    InvalidPayload(String),
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider.
///
/// Implementations own the provider credential; callers never see it.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize the request's text with its voice and model.
    ///
    /// Makes exactly one provider call and returns the raw audio bytes (MP3),
    /// which may be empty if the provider produced nothing.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError>;
}
