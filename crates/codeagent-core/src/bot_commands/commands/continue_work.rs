use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    prompts, replies, Result,
};

pub struct ContinueCommand {
    instruction: String,
}

impl ContinueCommand {
    pub fn new(instruction: String) -> Self {
        Self { instruction }
    }
}

#[async_trait]
impl BotCommand for ContinueCommand {
    #[tracing::instrument(skip_all, fields(instruction = %self.instruction))]
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        let context = prompts::project_context(ctx);
        let output = ctx
            .ai_service
            .generate(&prompts::continue_development(&self.instruction, &context))
            .await?;

        let comment =
            replies::continue_report(&self.instruction, &output, OffsetDateTime::now_utc());
        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(comment))
            .build())
    }
}
