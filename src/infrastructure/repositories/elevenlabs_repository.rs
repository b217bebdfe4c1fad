use super::tts_repository::{ProviderError, TtsRepository};
use super::voice_catalog_repository::VoiceCatalogRepository;
use crate::domain::catalog::Voice;
use crate::domain::tts::{SynthesisRequest, VoiceSettings, AUDIO_CONTENT_TYPE};
use crate::infrastructure::config::ProviderCredential;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

const TEXT_TO_SPEECH_PATH: &str = "/v1/text-to-speech";
const VOICES_PATH: &str = "/v1/voices";

/// Header carrying the provider credential
pub const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

#[derive(Debug, Deserialize)]
struct VoicesPayload {
    voices: Vec<Voice>,
}

/// ElevenLabs implementation of the synthesis and voice catalog repositories
pub struct ElevenLabsRepository {
    http_client: reqwest::Client,
    base_url: String,
    credential: ProviderCredential,
}

impl ElevenLabsRepository {
    pub fn new(http_client: reqwest::Client, base_url: &str, credential: ProviderCredential) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    fn synthesis_url(&self, voice_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            TEXT_TO_SPEECH_PATH,
            urlencoding::encode(voice_id)
        )
    }

    /// Turn a non-success response into a status error, keeping the provider's detail text
    async fn status_error(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        ProviderError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail: parse_error_detail(&body),
        }
    }
}

/// Extract `detail` from a provider error body.
///
/// The provider sends either `{"detail": "..."}` or `{"detail": {"message": "...", ...}}`.
pub fn parse_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => other
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| Some(other.to_string())),
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    // the URL carries the voice id; keep it out of error text
    ProviderError::Transport(err.without_url().to_string())
}

#[async_trait]
impl TtsRepository for ElevenLabsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = %request.voice_id,
            model_id = %request.model_id,
            text_length = request.text.len(),
            "Calling ElevenLabs text-to-speech API"
        );

        let body = TextToSpeechBody {
            text: &request.text,
            model_id: &request.model_id,
            voice_settings: &request.voice_settings,
        };

        let response = self
            .http_client
            .post(self.synthesis_url(&request.voice_id))
            .header(API_KEY_HEADER, self.credential.expose())
            .header(ACCEPT, AUDIO_CONTENT_TYPE)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error_kind = "transport",
                    voice_id = %request.voice_id,
                    "ElevenLabs text-to-speech API unreachable"
                );
                transport_error(e)
            })?;

        if !response.status().is_success() {
            let error = Self::status_error(response).await;
            tracing::error!(
                error_kind = "upstream",
                error = %error,
                voice_id = %request.voice_id,
                model_id = %request.model_id,
                "ElevenLabs text-to-speech API returned an error"
            );
            return Err(error);
        }

        let audio_bytes = response.bytes().await.map_err(transport_error)?.to_vec();

        tracing::info!(
            provider = "elevenlabs",
            model_id = %request.model_id,
            voice_id = %request.voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl VoiceCatalogRepository for ElevenLabsRepository {
    async fn fetch_voices(&self) -> Result<Vec<Voice>, ProviderError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, VOICES_PATH))
            .header(API_KEY_HEADER, self.credential.expose())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let payload = response
            .json::<VoicesPayload>()
            .await
            .map_err(|e| ProviderError::InvalidPayload(e.without_url().to_string()))?;

        tracing::debug!(voice_count = payload.voices.len(), "Fetched provider voices");

        Ok(payload.voices)
    }
}
