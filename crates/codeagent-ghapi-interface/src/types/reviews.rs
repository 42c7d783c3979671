use std::fmt::Display;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::{GhPullRequest, GhRepository, GhUser};

/// GitHub Review state.
#[derive(Debug, Deserialize, Serialize, PartialEq, Default, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GhReviewState {
    /// Approved.
    #[serde(alias = "APPROVED")]
    Approved,
    /// Changes requested.
    #[serde(alias = "CHANGES_REQUESTED")]
    ChangesRequested,
    /// Commented.
    #[default]
    #[serde(alias = "COMMENTED")]
    Commented,
    /// Dismissed.
    #[serde(alias = "DISMISSED")]
    Dismissed,
    /// Pending.
    #[serde(alias = "PENDING")]
    Pending,
}

impl Display for GhReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_plain::to_string(&self).map_err(|_| std::fmt::Error)?)
    }
}

/// GitHub Review.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhReview {
    /// ID.
    #[serde(default)]
    pub id: u64,
    /// User.
    pub user: GhUser,
    /// Body.
    pub body: Option<String>,
    /// Submitted at.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
    /// State.
    pub state: GhReviewState,
}

/// GitHub Review action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhReviewAction {
    /// Submitted.
    #[default]
    Submitted,
    /// Edited.
    Edited,
    /// Dismissed.
    Dismissed,
    /// Any other action.
    #[serde(other)]
    Unknown,
}

/// GitHub Review event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhReviewEvent {
    /// Action.
    pub action: GhReviewAction,
    /// Review.
    pub review: GhReview,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}

/// GitHub Review comment, attached to a diff line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, SmartDefault)]
pub struct GhReviewComment {
    /// ID.
    pub id: u64,
    /// User.
    pub user: GhUser,
    /// Body.
    pub body: String,
    /// File path.
    #[serde(default)]
    pub path: String,
    /// Diff hunk.
    #[serde(default)]
    pub diff_hunk: String,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
    /// Created at.
    #[default(OffsetDateTime::now_utc())]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// GitHub Review comment action.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GhReviewCommentAction {
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

/// GitHub Review comment event.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhReviewCommentEvent {
    /// Action.
    pub action: GhReviewCommentAction,
    /// Comment.
    pub comment: GhReviewComment,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}
