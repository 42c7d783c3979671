use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid driver kind for {variable}: {kind}")]
    InvalidDriverKind { variable: String, kind: String },
}

impl DriverError {
    fn invalid(variable: &str, kind: &str) -> Self {
        Self::InvalidDriverKind {
            variable: variable.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDriver {
    Null,
    GitHub,
}

impl FromStr for ApiDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "null" => Ok(Self::Null),
            "github" => Ok(Self::GitHub),
            _ => Err(DriverError::invalid("BOT_API_DRIVER", s)),
        }
    }
}

/// AI backend driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDriver {
    /// Claude Code command line, can write files in a directory.
    ClaudeCli,
    /// Claude Messages HTTP API, text only.
    ClaudeApi,
}

impl FromStr for AiDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "claude-cli" => Ok(Self::ClaudeCli),
            "claude-api" => Ok(Self::ClaudeApi),
            _ => Err(DriverError::invalid("BOT_AI_DRIVER", s)),
        }
    }
}

/// Code generation strategy for the `code` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    /// Use `Direct` when the backend writes files, `Plan` otherwise.
    Auto,
    /// The backend edits files in the workspace itself.
    Direct,
    /// The backend returns a JSON modification plan applied by the bot.
    Plan,
}

impl FromStr for GenerationStrategy {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "auto" => Ok(Self::Auto),
            "direct" => Ok(Self::Direct),
            "plan" => Ok(Self::Plan),
            _ => Err(DriverError::invalid("BOT_AI_STRATEGY", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drivers() {
        assert_eq!(ApiDriver::from_str("GitHub").unwrap(), ApiDriver::GitHub);
        assert_eq!(ApiDriver::from_str("null").unwrap(), ApiDriver::Null);
        assert_eq!(AiDriver::from_str("claude-api").unwrap(), AiDriver::ClaudeApi);
        assert_eq!(
            GenerationStrategy::from_str("PLAN").unwrap(),
            GenerationStrategy::Plan
        );

        assert!(matches!(
            AiDriver::from_str("gpt"),
            Err(DriverError::InvalidDriverKind { variable, kind }) if variable == "BOT_AI_DRIVER" && kind == "gpt"
        ));
    }
}
