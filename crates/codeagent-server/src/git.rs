//! Git wrappers.

use std::path::Path;

use async_trait::async_trait;
use codeagent_config::GitConfig;
use codeagent_git_interface::{GitService, Result};
use codeagent_git_process::ProcessGitService;

use crate::metrics::GIT_CLONES;

/// Git service counting clones.
pub struct MetricsGitService {
    inner: ProcessGitService,
}

impl MetricsGitService {
    /// Creates a new service.
    pub fn new(config: &GitConfig) -> Self {
        Self {
            inner: ProcessGitService::new(config),
        }
    }
}

#[async_trait]
impl GitService for MetricsGitService {
    async fn clone_repository(&self, url: &str, branch: &str, destination: &Path) -> Result<()> {
        GIT_CLONES.inc();
        self.inner.clone_repository(url, branch, destination).await
    }

    async fn configure_identity(&self, repository: &Path, name: &str, email: &str) -> Result<()> {
        self.inner.configure_identity(repository, name, email).await
    }

    async fn create_branch(&self, repository: &Path, branch: &str) -> Result<()> {
        self.inner.create_branch(repository, branch).await
    }

    async fn stage(&self, repository: &Path, paths: &[String]) -> Result<()> {
        self.inner.stage(repository, paths).await
    }

    async fn staged_files(&self, repository: &Path) -> Result<Vec<String>> {
        self.inner.staged_files(repository).await
    }

    async fn has_staged_changes(&self, repository: &Path) -> Result<bool> {
        self.inner.has_staged_changes(repository).await
    }

    async fn commit(&self, repository: &Path, message: &str) -> Result<()> {
        self.inner.commit(repository, message).await
    }

    async fn push(&self, repository: &Path, branch: &str) -> Result<()> {
        self.inner.push(repository, branch).await
    }

    async fn fetch(&self, repository: &Path, branch: &str) -> Result<()> {
        self.inner.fetch(repository, branch).await
    }

    async fn diff(&self, repository: &Path, base: &str, head: &str) -> Result<String> {
        self.inner.diff(repository, base, head).await
    }

    async fn recent_log(&self, repository: &Path, count: usize) -> Result<String> {
        self.inner.recent_log(repository, count).await
    }
}
