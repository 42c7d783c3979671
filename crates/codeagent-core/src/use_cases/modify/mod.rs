pub(crate) mod auto_modify_issue;
pub mod plan;

pub use auto_modify_issue::{
    AppliedModification, AutoModifyIssueInterface, ModificationOutcome, ModificationRequest,
    PullRequestOutcome,
};
#[cfg(any(test, feature = "testkit"))]
pub use self::auto_modify_issue::MockAutoModifyIssueInterface;
