//! Null driver for GH API.
//!
//! Logs every call and returns empty values, for local runs without a token.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use codeagent_ghapi_interface::{
    types::{
        GhCreatedPullRequest, GhIssue, GhPullRequest, GhPullRequestCreation, GhRepository, GhUser,
    },
    ApiService, Result,
};

/// Null API service.
#[derive(Clone, Default)]
pub struct NullApiService {
    _private: (),
}

impl NullApiService {
    /// Build a null API service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ApiService for NullApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<u64> {
        Ok(0)
    }

    #[tracing::instrument(skip(self))]
    async fn issues_get(&self, owner: &str, name: &str, issue_number: u64) -> Result<GhIssue> {
        Ok(GhIssue {
            number: issue_number,
            ..Default::default()
        })
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest> {
        Ok(GhPullRequest {
            number: pr_number,
            ..Default::default()
        })
    }

    #[tracing::instrument(skip(self), ret)]
    async fn pulls_create(
        &self,
        owner: &str,
        name: &str,
        creation: &GhPullRequestCreation,
    ) -> Result<GhCreatedPullRequest> {
        Ok(GhCreatedPullRequest::default())
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_get(&self, owner: &str, name: &str) -> Result<GhRepository> {
        Ok(GhRepository {
            name: name.into(),
            full_name: format!("{owner}/{name}"),
            owner: GhUser {
                login: owner.into(),
            },
            ..Default::default()
        })
    }
}
