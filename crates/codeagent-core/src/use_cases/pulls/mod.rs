pub(crate) mod handle_pull_request_event;

pub use handle_pull_request_event::HandlePullRequestEventInterface;
#[cfg(any(test, feature = "testkit"))]
pub use handle_pull_request_event::MockHandlePullRequestEventInterface;
