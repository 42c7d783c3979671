use async_trait::async_trait;

use crate::{
    types::{
        GhCreatedPullRequest, GhIssue, GhPullRequest, GhPullRequestCreation, GhRepository,
    },
    Result,
};

/// GitHub API Adapter interface
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Post a comment on an issue or a pull request.
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<u64>;
    /// Get an issue.
    async fn issues_get(&self, owner: &str, name: &str, issue_number: u64) -> Result<GhIssue>;
    /// Get a pull request.
    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest>;
    /// Create a pull request.
    async fn pulls_create(
        &self,
        owner: &str,
        name: &str,
        creation: &GhPullRequestCreation,
    ) -> Result<GhCreatedPullRequest>;
    /// Get a repository.
    async fn repositories_get(&self, owner: &str, name: &str) -> Result<GhRepository>;
}
