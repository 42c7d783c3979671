//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ai;
pub mod constants;
pub mod errors;
mod event_type;
pub mod ghapi;
pub mod git;
mod health;
mod metrics;
pub mod middlewares;
pub mod server;
mod webhook;

pub use errors::{Result, ServerError};
pub use event_type::EventType;
pub use webhook::WebhookResponse;
