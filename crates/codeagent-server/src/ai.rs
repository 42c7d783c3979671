//! AI backend wrappers.

use std::path::Path;

use async_trait::async_trait;
use codeagent_ai_claude::{ClaudeApiService, ClaudeCliService};
use codeagent_ai_interface::{AiService, Result};
use codeagent_config::{AiConfig, AiDriver};

use crate::metrics::AI_BACKEND_CALLS;

/// AI backend with metrics, built from the configured driver.
pub struct MetricsAiService {
    inner: Box<dyn AiService>,
}

impl MetricsAiService {
    /// Creates a new service.
    pub fn new(config: &AiConfig) -> Self {
        let inner: Box<dyn AiService> = match config.driver {
            AiDriver::ClaudeCli => Box::new(ClaudeCliService::new(config)),
            AiDriver::ClaudeApi => Box::new(ClaudeApiService::new(config)),
        };

        Self { inner }
    }
}

#[async_trait]
impl AiService for MetricsAiService {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn can_write_files(&self) -> bool {
        self.inner.can_write_files()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        AI_BACKEND_CALLS.inc();
        self.inner.generate(prompt).await
    }

    async fn generate_in_directory(&self, prompt: &str, directory: &Path) -> Result<String> {
        AI_BACKEND_CALLS.inc();
        self.inner.generate_in_directory(prompt, directory).await
    }

    async fn health_check(&self) -> Result<String> {
        self.inner.health_check().await
    }
}
