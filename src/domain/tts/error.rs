use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Missing API key";
pub const UNPARSABLE_DETAIL: &str = "Could not parse error response";

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("missing required parameters")]
    MissingParameters,
    #[error("provider credential not configured")]
    MissingCredential,
    #[error("provider returned {status} {reason}")]
    Upstream {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    #[error("provider unreachable: {0}")]
    Transport(String),
    #[error("provider returned empty audio")]
    EmptyAudio,
}

impl From<ProviderError> for TtsServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status {
                status,
                reason,
                detail,
            } => TtsServiceError::Upstream {
                status,
                reason,
                detail,
            },
            ProviderError::Transport(msg) | ProviderError::InvalidPayload(msg) => {
                TtsServiceError::Transport(msg)
            }
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::MissingParameters => AppError::MissingParameters,
            TtsServiceError::MissingCredential => {
                AppError::Misconfigured(MISSING_CREDENTIAL_MESSAGE.to_string())
            }
            TtsServiceError::Upstream {
                status,
                reason,
                detail,
            } => AppError::Upstream {
                status,
                reason,
                detail: detail.unwrap_or_else(|| UNPARSABLE_DETAIL.to_string()),
            },
            TtsServiceError::Transport(msg) => AppError::Transport(msg),
            TtsServiceError::EmptyAudio => AppError::EmptyAudio,
        }
    }
}
