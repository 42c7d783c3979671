use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Git operations on local working copies.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GitService: Send + Sync {
    /// Shallow, single-branch clone of `url` at `branch` into `destination`.
    async fn clone_repository(&self, url: &str, branch: &str, destination: &Path) -> Result<()>;
    /// Set the committer name and email for the repository.
    async fn configure_identity(&self, repository: &Path, name: &str, email: &str) -> Result<()>;
    /// Create and switch to a new branch.
    async fn create_branch(&self, repository: &Path, branch: &str) -> Result<()>;
    /// Stage paths, relative to the repository root.
    async fn stage(&self, repository: &Path, paths: &[String]) -> Result<()>;
    /// List staged files.
    async fn staged_files(&self, repository: &Path) -> Result<Vec<String>>;
    /// Check if something is staged.
    async fn has_staged_changes(&self, repository: &Path) -> Result<bool> {
        Ok(!self.staged_files(repository).await?.is_empty())
    }
    /// Commit staged changes.
    async fn commit(&self, repository: &Path, message: &str) -> Result<()>;
    /// Push a branch to `origin` with upstream tracking.
    async fn push(&self, repository: &Path, branch: &str) -> Result<()>;
    /// Fetch a remote branch into `refs/remotes/origin/<branch>`.
    async fn fetch(&self, repository: &Path, branch: &str) -> Result<()>;
    /// Three-dot diff between two references.
    async fn diff(&self, repository: &Path, base: &str, head: &str) -> Result<String>;
    /// Short log with file stats of the latest commits.
    async fn recent_log(&self, repository: &Path, count: usize) -> Result<String>;
}
