use async_trait::async_trait;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    replies, Result,
};

pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BotCommand for HelpCommand {
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(replies::help(&ctx.config.name)))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot_commands::CommandContextTest;

    #[tokio::test]
    async fn test_command() -> Result<()> {
        let ctx = CommandContextTest::new();
        let cmd = HelpCommand::new();

        let result = cmd.handle(&ctx.as_context()).await?;
        assert_eq!(result.result_actions.len(), 1);
        let ResultAction::PostComment(comment) = &result.result_actions[0];
        for command in ["/code", "/continue", "/fix", "/help", "/review", "/summary"] {
            assert!(comment.contains(command), "{command} is missing");
        }

        Ok(())
    }
}
