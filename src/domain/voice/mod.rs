pub mod resolver;

pub use resolver::{merge_voices, ResolvedVoices, VoiceResolver};
