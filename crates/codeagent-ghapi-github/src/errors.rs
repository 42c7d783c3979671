use codeagent_ghapi_interface::ApiError;

const PULL_REQUEST_ALREADY_EXISTS: &str = "A pull request already exists";

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("GitHub API returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("GitHub token contains invalid header characters")]
    InvalidToken,
}

impl GitHubError {
    /// Check if the error is GitHub refusing a duplicate pull request.
    pub fn is_pull_request_already_exists(&self) -> bool {
        matches!(self, Self::StatusError { status: 422, body } if body.contains(PULL_REQUEST_ALREADY_EXISTS))
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::StatusError { status, body } => ApiError::HttpStatus {
                status,
                message: body,
            },
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}

/// Turn a non-2xx response into a [`GitHubError::StatusError`] carrying the body.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GitHubError::StatusError {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn success_passes_through() {
        let response = check_status(response(201, "{}")).await.unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn error_carries_status() {
        let err = check_status(response(404, r#"{"message":"Not Found"}"#))
            .await
            .unwrap_err();

        assert!(!err.is_pull_request_already_exists());
        assert!(matches!(
            ApiError::from(err),
            ApiError::HttpStatus { status: 404, message } if message.contains("Not Found")
        ));
    }

    #[tokio::test]
    async fn duplicate_pull_request() {
        let err = check_status(response(
            422,
            r#"{"message":"Validation Failed","errors":[{"message":"A pull request already exists for owner:branch."}]}"#,
        ))
        .await
        .unwrap_err();

        assert!(err.is_pull_request_already_exists());
    }
}
