//! Event types.

/// Event type, from the `X-GitHub-Event` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Issues event.
    Issues,
    /// Issue comment event.
    IssueComment,
    /// Ping event.
    Ping,
    /// Pull request event.
    PullRequest,
    /// Pull request review event.
    PullRequestReview,
    /// Pull request review comment event.
    PullRequestReviewComment,
    /// Any other event, ignored.
    Unknown,
}

impl EventType {
    /// Convert event type to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "issues" => Self::Issues,
            "issue_comment" => Self::IssueComment,
            "ping" => Self::Ping,
            "pull_request" => Self::PullRequest,
            "pull_request_review" => Self::PullRequestReview,
            "pull_request_review_comment" => Self::PullRequestReviewComment,
            _ => Self::Unknown,
        }
    }
}

impl From<EventType> for &'static str {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Issues => "issues",
            EventType::IssueComment => "issue_comment",
            EventType::Ping => "ping",
            EventType::PullRequest => "pull_request",
            EventType::PullRequestReview => "pull_request_review",
            EventType::PullRequestReviewComment => "pull_request_review_comment",
            EventType::Unknown => "unknown",
        }
    }
}
