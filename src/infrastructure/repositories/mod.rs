pub mod elevenlabs_repository;
pub mod tts_repository;
pub mod voice_catalog_repository;

pub use elevenlabs_repository::{ElevenLabsRepository, API_KEY_HEADER};
pub use tts_repository::{ProviderError, TtsRepository};
pub use voice_catalog_repository::VoiceCatalogRepository;
