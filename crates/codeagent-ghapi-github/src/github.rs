//! GitHub adapter

use async_trait::async_trait;
use codeagent_config::Config;
use codeagent_ghapi_interface::{
    types::{
        GhCreatedPullRequest, GhIssue, GhPullRequest, GhPullRequestCreation, GhRepository,
    },
    ApiError, ApiService, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{build_github_url, get_authenticated_client_builder},
    errors::{check_status, GitHubError},
};

/// GitHub API adapter implementation.
#[derive(Clone)]
pub struct GithubApiService {
    config: Config,
}

impl GithubApiService {
    /// Creates new GitHub API adapter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn get_client(&self) -> Result<Client, GitHubError> {
        Ok(get_authenticated_client_builder(&self.config)?.build()?)
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: String) -> Result<T, GitHubError> {
        let response = self.get_client()?.get(self.build_url(path)).send().await?;
        Ok(check_status(response).await?.json::<T>().await?)
    }
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self, body), ret)]
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<u64> {
        #[derive(Serialize)]
        struct Request<'a> {
            body: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            id: u64,
        }

        let response = self
            .get_client()?
            .post(self.build_url(format!(
                "/repos/{owner}/{name}/issues/{issue_number}/comments"
            )))
            .json(&Request { body })
            .send()
            .await
            .map_err(GitHubError::from)?;

        Ok(check_status(response)
            .await?
            .json::<Response>()
            .await
            .map_err(GitHubError::from)?
            .id)
    }

    #[tracing::instrument(skip(self))]
    async fn issues_get(&self, owner: &str, name: &str, issue_number: u64) -> Result<GhIssue> {
        Ok(self
            .get_json(format!("/repos/{owner}/{name}/issues/{issue_number}"))
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest> {
        Ok(self
            .get_json(format!("/repos/{owner}/{name}/pulls/{pr_number}"))
            .await?)
    }

    #[tracing::instrument(skip(self, creation), fields(head = %creation.head, base = %creation.base), ret)]
    async fn pulls_create(
        &self,
        owner: &str,
        name: &str,
        creation: &GhPullRequestCreation,
    ) -> Result<GhCreatedPullRequest> {
        let response = self
            .get_client()?
            .post(self.build_url(format!("/repos/{owner}/{name}/pulls")))
            .json(creation)
            .send()
            .await
            .map_err(GitHubError::from)?;

        match check_status(response).await {
            Ok(response) => Ok(response
                .json::<GhCreatedPullRequest>()
                .await
                .map_err(GitHubError::from)?),
            Err(e) if e.is_pull_request_already_exists() => {
                Err(ApiError::PullRequestAlreadyExists {
                    head: creation.head.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_get(&self, owner: &str, name: &str) -> Result<GhRepository> {
        Ok(self.get_json(format!("/repos/{owner}/{name}")).await?)
    }
}
