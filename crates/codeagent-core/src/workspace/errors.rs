//! Workspace errors.

use std::{path::PathBuf, time::Duration};

use codeagent_git_interface::GitError;
use thiserror::Error;

/// Workspace error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Repository {url} was cloned too recently, retry in {} seconds", retry_after.as_secs())]
    RateLimited { url: String, retry_after: Duration },

    #[error("Git error: {source}")]
    GitError { source: GitError },

    #[error("File {path} is too large ({size} bytes, max {max_size})")]
    FileTooLarge {
        path: String,
        size: u64,
        max_size: u64,
    },

    #[error("Path {path} escapes the workspace")]
    InvalidPath { path: String },

    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: ignore::Error,
    },
}

impl WorkspaceError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::IoError { path, source }
    }
}

impl From<GitError> for WorkspaceError {
    fn from(e: GitError) -> Self {
        Self::GitError { source: e }
    }
}

/// Result alias for `WorkspaceError`.
pub type Result<T, E = WorkspaceError> = core::result::Result<T, E>;
