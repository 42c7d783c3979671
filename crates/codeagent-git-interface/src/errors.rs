//! Git errors.

use thiserror::Error;

/// Git error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Could not start git for '{command}': {source}")]
    SpawnError {
        command: String,
        source: std::io::Error,
    },

    #[error("git {command} failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("git {command} timed out after {seconds} seconds")]
    Timeout { command: String, seconds: u64 },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `GitError`.
pub type Result<T, E = GitError> = core::result::Result<T, E>;
