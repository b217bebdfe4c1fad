use anyhow::Context;
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Synthesis provider
    pub provider_api_key: Option<ProviderCredential>,
    pub provider_base_url: String,
    pub fetch_provider_voices: bool,
    // Static voices and models
    pub static_catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Secret key for the synthesis provider.
///
/// Only the provider repository reads the raw value; `Debug` never prints it.
#[derive(Clone)]
pub struct ProviderCredential(String);

impl ProviderCredential {
    /// Returns `None` for blank values so an empty variable counts as unset
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderCredential(<redacted>)")
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let config = Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            // Production defaults to JSON logs unless LOG_FORMAT says otherwise
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                Some("pretty") => LogFormat::Pretty,
                _ if environment == Environment::Production => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            environment,
            provider_api_key: lookup("ELEVENLABS_API_KEY")
                .and_then(ProviderCredential::new)
                .or_else(|| lookup("VITE_ELEVENLABS_API_KEY").and_then(ProviderCredential::new)),
            provider_base_url: lookup("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string()),
            fetch_provider_voices: lookup("FETCH_PROVIDER_VOICES")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            static_catalog_path: lookup("STATIC_CATALOG_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        Ok(config)
    }

    pub fn has_provider_credential(&self) -> bool {
        self.provider_api_key.is_some()
    }
}
