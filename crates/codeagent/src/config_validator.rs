//! Validation utilities.

use std::fmt::Write;

use codeagent_config::{AiDriver, ApiDriver, Config};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        // Writing into a String cannot fail.
        let _ = write!(error, "  - Missing env. var.: {}", name);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "BOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "BOT_SERVER_BIND_PORT");
    }
    if config.name.is_empty() {
        _missing(&mut error, "BOT_NAME");
    }

    // Check API credentials
    if config.api.driver == ApiDriver::GitHub && config.api.github.token.is_empty() {
        _missing(&mut error, "BOT_API_GITHUB_TOKEN");
    }

    // Check AI backend credentials
    if config.ai.driver == AiDriver::ClaudeApi && config.ai.api_key.is_empty() {
        _missing(&mut error, "BOT_AI_API_KEY");
    }

    // Check workspaces
    if config.git.work_dir.is_empty() {
        _missing(&mut error, "BOT_GIT_WORK_DIR");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
