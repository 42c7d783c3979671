//! Git interface.

mod errors;
mod interface;

pub use errors::{GitError, Result};
pub use interface::GitService;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockGitService;
