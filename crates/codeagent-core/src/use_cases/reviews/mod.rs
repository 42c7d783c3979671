pub(crate) mod handle_review_event;

pub use handle_review_event::{HandleReviewEventInterface, CHANGES_REQUESTED_FOCUS};
#[cfg(any(test, feature = "testkit"))]
pub use handle_review_event::MockHandleReviewEventInterface;
