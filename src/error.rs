use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::shared::error_dto::ErrorResponse;

pub const TRANSPORT_FAILURE_DETAIL: &str = "Could not reach synthesis provider";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    /// Body did not parse; the inner value is the parser message, kept for logs only
    #[error("Invalid request body")]
    MalformedRequest(String),

    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Server configuration error: {0}")]
    Misconfigured(String),

    #[error("Voice generation failed: {status} {reason}")]
    Upstream {
        status: u16,
        reason: String,
        detail: String,
    },

    /// Provider unreachable; the inner value is the transport error, kept for logs only
    #[error("Voice generation failed: provider unreachable")]
    Transport(String),

    #[error("Received empty audio from synthesis provider")]
    EmptyAudio,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedRequest(_) | Self::MissingParameters => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Misconfigured(_) | Self::Transport(_) | Self::EmptyAudio => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable label used in logs so operators can tell failure modes apart
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotFound => "not_found",
            Self::MalformedRequest(_) => "malformed_request",
            Self::MissingParameters => "missing_parameters",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Misconfigured(_) => "server_misconfiguration",
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::EmptyAudio => "empty_result",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self {
            Self::Upstream { detail, .. } => Some(detail.clone()),
            Self::Transport(_) => Some(TRANSPORT_FAILURE_DETAIL.to_string()),
            _ => None,
        };

        ErrorResponse {
            error: self.to_string(),
            detail,
        }
    }

    fn cause(&self) -> Option<&str> {
        match self {
            Self::MalformedRequest(cause) | Self::Transport(cause) => Some(cause.as_str()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let cause = self.cause().unwrap_or("");

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_kind = self.kind(),
                cause = cause,
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                error_kind = self.kind(),
                cause = cause,
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
