//! Domain errors.

use thiserror::Error;

use crate::{bot_commands::CommandError, workspace::WorkspaceError};

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Wraps [`codeagent_ghapi_interface::ApiError`].
    #[error("API error: {source}")]
    ApiError {
        source: codeagent_ghapi_interface::ApiError,
    },

    /// Wraps [`codeagent_ai_interface::AiError`].
    #[error("AI backend error: {source}")]
    AiError {
        source: codeagent_ai_interface::AiError,
    },

    /// Wraps [`codeagent_git_interface::GitError`].
    #[error("Git error: {source}")]
    GitError {
        source: codeagent_git_interface::GitError,
    },

    #[error("Workspace error: {source}")]
    WorkspaceError { source: WorkspaceError },

    #[error("Command error: {source}")]
    CommandError { source: CommandError },

    #[error("No issue or pull request to reply to")]
    MissingReplyTarget,

    #[error("Could not parse modification plan: {reason}")]
    PlanParseError { reason: String },

    #[error("No modification from the plan could be applied")]
    NoModificationsApplied,
}

impl From<codeagent_ghapi_interface::ApiError> for DomainError {
    fn from(e: codeagent_ghapi_interface::ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

impl From<codeagent_ai_interface::AiError> for DomainError {
    fn from(e: codeagent_ai_interface::AiError) -> Self {
        Self::AiError { source: e }
    }
}

impl From<codeagent_git_interface::GitError> for DomainError {
    fn from(e: codeagent_git_interface::GitError) -> Self {
        Self::GitError { source: e }
    }
}

impl From<WorkspaceError> for DomainError {
    fn from(e: WorkspaceError) -> Self {
        Self::WorkspaceError { source: e }
    }
}

impl From<CommandError> for DomainError {
    fn from(e: CommandError) -> Self {
        Self::CommandError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
