use std::fmt::Display;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::{GhLabel, GhRepository, GhUser};

/// GitHub Issue state.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhIssueState {
    /// Open.
    #[default]
    Open,
    /// Closed.
    Closed,
}

/// Link to the pull request behind an issue.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssuePullRequestLink {
    /// API URL.
    #[serde(default)]
    pub url: String,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
}

/// GitHub Issue.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, SmartDefault)]
pub struct GhIssue {
    /// Number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// User.
    pub user: GhUser,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<GhLabel>,
    /// State.
    pub state: GhIssueState,
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
    /// Body.
    pub body: Option<String>,
    /// Set when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<GhIssuePullRequestLink>,
}

impl GhIssue {
    /// Check if this issue is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// GitHub Issue comment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, SmartDefault)]
pub struct GhIssueComment {
    /// ID.
    pub id: u64,
    /// User.
    pub user: GhUser,
    /// Body.
    pub body: String,
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
}

/// GitHub Issues action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhIssuesAction {
    /// Opened.
    #[default]
    Opened,
    /// Edited.
    Edited,
    /// Closed.
    Closed,
    /// Reopened.
    Reopened,
    /// Labeled.
    Labeled,
    /// Unlabeled.
    Unlabeled,
    /// Assigned.
    Assigned,
    /// Any other action.
    #[serde(other)]
    Unknown,
}

impl Display for GhIssuesAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_plain::to_string(&self).map_err(|_| std::fmt::Error)?)
    }
}

/// GitHub Issues event.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GhIssuesEvent {
    /// Action.
    pub action: GhIssuesAction,
    /// Issue.
    pub issue: GhIssue,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}

/// GitHub Issue comment action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhIssueCommentAction {
    /// Created.
    #[default]
    Created,
    /// Edited.
    Edited,
    /// Deleted.
    Deleted,
    /// Any other action.
    #[serde(other)]
    Unknown,
}

/// GitHub Issue comment event.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GhIssueCommentEvent {
    /// Action.
    pub action: GhIssueCommentAction,
    /// Issue.
    pub issue: GhIssue,
    /// Comment.
    pub comment: GhIssueComment,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_action_decodes() {
        let action: GhIssuesAction = serde_json::from_str(r#""transferred""#).unwrap();
        assert_eq!(action, GhIssuesAction::Unknown);
        assert_eq!(GhIssuesAction::Opened.to_string(), "opened");
    }

    #[test]
    fn pull_request_link() {
        let issue: GhIssue = serde_json::from_str(
            r#"{
                "number": 3,
                "title": "Title",
                "user": {"login": "me"},
                "state": "open",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "body": null,
                "pull_request": {"url": "https://api.github.com/repos/o/n/pulls/3"}
            }"#,
        )
        .unwrap();

        assert!(issue.is_pull_request());
        assert!(issue.labels.is_empty());
        assert_eq!(issue.body, None);
    }
}
