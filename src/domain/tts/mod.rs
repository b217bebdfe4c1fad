pub mod dto;
pub mod error;
pub mod service;

pub use dto::{EncodedAudio, GenerationRequest, SynthesisRequest, VoiceSettings};
pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi};

/// Content type of every audio payload the provider returns
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
