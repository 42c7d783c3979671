//! API errors.

use thiserror::Error;

/// API error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub API returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("A pull request already exists for branch '{head}'")]
    PullRequestAlreadyExists { head: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `ApiError`.
pub type Result<T, E = ApiError> = core::result::Result<T, E>;
