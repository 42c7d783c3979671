//! AI backend errors.

use thiserror::Error;

/// AI backend error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Could not start AI backend process '{program}': {source}")]
    ProcessSpawnError {
        program: String,
        source: std::io::Error,
    },

    #[error("AI backend process failed with status {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("AI backend did not answer within {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("AI backend returned an empty output")]
    EmptyOutput,

    #[error("AI backend returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Operation '{operation}' is not supported by this AI backend")]
    UnsupportedOperation { operation: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `AiError`.
pub type Result<T, E = AiError> = core::result::Result<T, E>;
