//! GitHub Api wrappers.

use async_trait::async_trait;
use codeagent_config::Config;
use codeagent_ghapi_github::GithubApiService;
use codeagent_ghapi_interface::{
    types::{GhCreatedPullRequest, GhIssue, GhPullRequest, GhPullRequestCreation, GhRepository},
    ApiService, Result,
};

use crate::metrics::GITHUB_API_CALLS;

/// GitHub Api Service with metrics.
pub struct MetricsApiService {
    inner: GithubApiService,
}

impl MetricsApiService {
    /// Creates a new service.
    pub fn new(config: Config) -> Self {
        Self {
            inner: GithubApiService::new(config),
        }
    }
}

#[async_trait]
impl ApiService for MetricsApiService {
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<u64> {
        GITHUB_API_CALLS.inc();
        self.inner
            .comments_post(owner, name, issue_number, body)
            .await
    }

    async fn issues_get(&self, owner: &str, name: &str, issue_number: u64) -> Result<GhIssue> {
        GITHUB_API_CALLS.inc();
        self.inner.issues_get(owner, name, issue_number).await
    }

    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest> {
        GITHUB_API_CALLS.inc();
        self.inner.pulls_get(owner, name, pr_number).await
    }

    async fn pulls_create(
        &self,
        owner: &str,
        name: &str,
        creation: &GhPullRequestCreation,
    ) -> Result<GhCreatedPullRequest> {
        GITHUB_API_CALLS.inc();
        self.inner.pulls_create(owner, name, creation).await
    }

    async fn repositories_get(&self, owner: &str, name: &str) -> Result<GhRepository> {
        GITHUB_API_CALLS.inc();
        self.inner.repositories_get(owner, name).await
    }
}
