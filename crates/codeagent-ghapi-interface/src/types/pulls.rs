use std::fmt::Display;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::{GhBranch, GhLabel, GhRepository, GhUser};

/// GitHub Pull request state.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestState {
    /// Open.
    #[default]
    Open,
    /// Closed.
    Closed,
}

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// State.
    pub state: GhPullRequestState,
    /// Title.
    pub title: String,
    /// User.
    pub user: GhUser,
    /// Body.
    pub body: Option<String>,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
    /// Created at.
    #[default(OffsetDateTime::now_utc())]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Updated at.
    #[default(OffsetDateTime::now_utc())]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<GhLabel>,
    /// Draft.
    #[serde(default)]
    pub draft: bool,
    /// Head branch.
    pub head: GhBranch,
    /// Base branch.
    pub base: GhBranch,
    /// Merged?
    pub merged: Option<bool>,
}

/// GitHub Pull request action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestAction {
    /// Opened.
    #[default]
    Opened,
    /// Synchronize.
    Synchronize,
    /// Closed.
    Closed,
    /// Reopened.
    Reopened,
    /// Edited.
    Edited,
    /// Ready for review.
    ReadyForReview,
    /// Any other action.
    #[serde(other)]
    Unknown,
}

impl Display for GhPullRequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_plain::to_string(&self).map_err(|_| std::fmt::Error)?)
    }
}

/// GitHub Pull request event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequestEvent {
    /// Action.
    pub action: GhPullRequestAction,
    /// Number.
    pub number: u64,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}

/// Pull request creation request.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequestCreation {
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Source branch.
    pub head: String,
    /// Target branch.
    pub base: String,
}

/// Created pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhCreatedPullRequest {
    /// Number.
    pub number: u64,
    /// Web URL.
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_payload() {
        let creation = GhPullRequestCreation {
            title: "Title".into(),
            body: "Body".into(),
            head: "auto-fix-issue-1".into(),
            base: "main".into(),
        };

        assert_eq!(
            serde_json::to_string(&creation).unwrap(),
            r#"{"title":"Title","body":"Body","head":"auto-fix-issue-1","base":"main"}"#
        );
    }
}
