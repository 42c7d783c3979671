pub(crate) mod handle_issues_event;

pub use handle_issues_event::HandleIssuesEventInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::handle_issues_event::MockHandleIssuesEventInterface;
