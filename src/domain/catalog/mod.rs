pub mod model;

pub use model::{Model, Voice};

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Voices and models fixed at deployment.
///
/// Loaded once at startup and shared read-only (`Arc<StaticCatalog>`).
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCatalog {
    voices: Vec<Voice>,
    models: Vec<Model>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    voices: Vec<Voice>,
    models: Option<Vec<Model>>,
}

impl StaticCatalog {
    pub fn new(voices: Vec<Voice>, models: Vec<Model>) -> Self {
        Self { voices, models }
    }

    /// Catalog used when no file is configured
    pub fn builtin() -> Self {
        Self::new(
            vec![Voice::new("pNInz6obpgDQGcFmaJgB", "Adam").with_description("Adam (Legacy)")],
            builtin_models(),
        )
    }

    /// Parse `{ "voices": [...], "models": [...] }`; a missing `models` key keeps the built-in models
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Ok(Self::new(
            file.voices,
            file.models.unwrap_or_else(builtin_models),
        ))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load from `path` when given, else the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }
}

fn builtin_models() -> Vec<Model> {
    vec![
        Model::new(
            "eleven_multilingual_v2",
            "Eleven Multilingual v2",
            "High-fidelity multilingual model",
        ),
        Model::new(
            "eleven_turbo_v2",
            "Eleven Flash v2.5",
            "Low-latency model",
        ),
    ]
}
