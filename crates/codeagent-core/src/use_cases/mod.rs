pub mod comments;
pub mod issues;
pub mod modify;
pub mod pulls;
pub mod reviews;
