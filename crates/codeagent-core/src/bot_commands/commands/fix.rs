use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    prompts, replies, Result,
};

pub struct FixCommand {
    problem: String,
}

impl FixCommand {
    pub fn new(problem: String) -> Self {
        Self { problem }
    }
}

#[async_trait]
impl BotCommand for FixCommand {
    #[tracing::instrument(skip_all, fields(problem = %self.problem))]
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        let context = prompts::project_context(ctx);
        let output = ctx
            .ai_service
            .generate(&prompts::fix_problem(&self.problem, &context))
            .await?;

        let comment = replies::fix_report(&self.problem, &output, OffsetDateTime::now_utc());
        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(comment))
            .build())
    }
}
