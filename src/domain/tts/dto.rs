use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::AUDIO_CONTENT_TYPE;

/// Request for POST /api/tts and POST /api/generate-voice.
///
/// Fields are optional so an absent field is reported as missing rather than as a parse failure.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl GenerationRequest {
    /// All three fields present and non-empty
    pub fn into_synthesis(self) -> Option<SynthesisRequest> {
        let text = self.text.filter(|s| !s.is_empty())?;
        let voice_id = self.voice_id.filter(|s| !s.is_empty())?;
        let model_id = self.model_id.filter(|s| !s.is_empty())?;

        Some(SynthesisRequest {
            text,
            voice_id,
            model_id,
            voice_settings: VoiceSettings::default(),
        })
    }
}

/// Voice-shaping parameters sent with every synthesis call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

/// A validated request, ready to forward to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

/// Audio wrapped for transports that can only carry text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedAudio {
    pub content_type: String,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl EncodedAudio {
    pub fn from_audio(audio: &[u8]) -> Self {
        Self {
            content_type: AUDIO_CONTENT_TYPE.to_string(),
            body: STANDARD.encode(audio),
            is_base64_encoded: true,
        }
    }

    /// Recover the original bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        if self.is_base64_encoded {
            STANDARD.decode(&self.body)
        } else {
            Ok(self.body.as_bytes().to_vec())
        }
    }
}
