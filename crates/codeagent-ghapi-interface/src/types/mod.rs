//! GitHub payload types.

mod common;
mod issues;
mod ping;
mod pulls;
mod reviews;

pub use common::*;
pub use issues::*;
pub use ping::*;
pub use pulls::*;
pub use reviews::*;
