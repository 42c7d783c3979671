use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Code generation backend.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AiService: Send + Sync {
    /// Backend name, for logs and replies.
    fn name(&self) -> String;
    /// Whether the backend can edit files in a directory by itself.
    fn can_write_files(&self) -> bool;
    /// Send a prompt and get the text answer.
    async fn generate(&self, prompt: &str) -> Result<String>;
    /// Run a prompt inside a working directory, letting the backend edit files there.
    async fn generate_in_directory(&self, prompt: &str, directory: &Path) -> Result<String>;
    /// Check that the backend is reachable, returning a short description.
    async fn health_check(&self) -> Result<String>;
}
