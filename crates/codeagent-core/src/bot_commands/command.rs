use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Command error.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Unknown command.
    #[error("Unknown command '{command}'.")]
    UnknownCommand { command: String },
}

/// Command result.
pub type CommandResult<T> = core::result::Result<T, CommandError>;

/// Command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    /// Generate and commit code.
    Code,
    /// Continue development.
    Continue,
    /// Fix a described problem.
    Fix,
    /// Show help message.
    Help,
    /// Review a pull request or a project.
    Review,
    /// Summarize a project.
    Summary,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Continue => "continue",
            Self::Fix => "fix",
            Self::Help => "help",
            Self::Review => "review",
            Self::Summary => "summary",
        }
    }
}

impl FromStr for CommandName {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "code" => Self::Code,
            "continue" => Self::Continue,
            "fix" => Self::Fix,
            "help" => Self::Help,
            "review" => Self::Review,
            "summary" => Self::Summary,
            unknown => {
                return Err(CommandError::UnknownCommand {
                    command: unknown.to_string(),
                })
            }
        })
    }
}

impl Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name.
    pub name: CommandName,
    /// Free text following the command.
    pub args: String,
}

impl Command {
    pub fn new(name: CommandName, args: impl Into<String>) -> Self {
        Self {
            name,
            args: args.into(),
        }
    }

    /// Create a command from its name and arguments.
    pub fn from_parts(name: &str, args: &str) -> CommandResult<Self> {
        Ok(Self::new(name.parse()?, args.trim()))
    }

    /// Slash-command form, as typed by users.
    pub fn to_command_string(&self) -> String {
        if self.args.is_empty() {
            format!("/{}", self.name)
        } else {
            format!("/{} {}", self.name, self.args)
        }
    }
}

/// Command execution result.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandExecutionResult {
    /// Actions.
    pub result_actions: Vec<ResultAction>,
}

impl CommandExecutionResult {
    /// Create builder instance.
    pub fn builder() -> CommandExecutionResultBuilder {
        CommandExecutionResultBuilder::default()
    }
}

/// Command execution result builder.
#[derive(Debug, Default)]
pub struct CommandExecutionResultBuilder {
    result_actions: Vec<ResultAction>,
}

impl CommandExecutionResultBuilder {
    /// Add result action.
    pub fn with_action(mut self, action: ResultAction) -> Self {
        self.result_actions.push(action);
        self
    }

    /// Build execution result.
    pub fn build(self) -> CommandExecutionResult {
        CommandExecutionResult {
            result_actions: self.result_actions,
        }
    }
}

/// Result action.
#[derive(Debug, PartialEq, Eq)]
pub enum ResultAction {
    /// Post comment on the reply target.
    PostComment(String),
}
