//! Webhook errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use codeagent_core::DomainError;
use thiserror::Error;

use crate::event_type::EventType;

/// Webhook error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Error while parsing webhook event {event_type}: {source}")]
    EventParseError {
        event_type: EventType,
        source: serde_json::Error,
    },

    #[error("Missing webhook signature.")]
    MissingWebhookSignature,

    #[error("Invalid webhook signature.")]
    InvalidWebhookSignature,

    #[error("Missing event type header.")]
    MissingEventType,

    #[error("Unreadable webhook payload.")]
    BadPayload,

    #[error("I/O error: {source}")]
    IoError { source: std::io::Error },

    #[error("Domain error: {source}")]
    DomainError { source: DomainError },
}

impl From<DomainError> for ServerError {
    fn from(source: DomainError) -> Self {
        Self::DomainError { source }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::MissingWebhookSignature | ServerError::InvalidWebhookSignature => {
                StatusCode::UNAUTHORIZED
            }
            ServerError::MissingEventType | ServerError::BadPayload => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
