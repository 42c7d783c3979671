//! AI backend interface.

mod errors;
mod interface;

pub use errors::{AiError, Result};
pub use interface::AiService;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockAiService;
