pub(crate) mod handle_issue_comment_event;
pub(crate) mod handle_review_comment_event;

pub use handle_issue_comment_event::HandleIssueCommentEventInterface;
#[cfg(any(test, feature = "testkit"))]
pub use handle_issue_comment_event::MockHandleIssueCommentEventInterface;
pub use handle_review_comment_event::HandleReviewCommentEventInterface;
#[cfg(any(test, feature = "testkit"))]
pub use handle_review_comment_event::MockHandleReviewCommentEventInterface;
