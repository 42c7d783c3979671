use async_trait::async_trait;
use tracing::warn;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    prompts, replies,
    workspace::{files, AcquireMode, WorkspaceManager},
    Result,
};

pub struct SummaryCommand {
    focus: String,
}

impl SummaryCommand {
    pub fn new(focus: String) -> Self {
        Self { focus }
    }
}

#[async_trait]
impl BotCommand for SummaryCommand {
    #[tracing::instrument(skip_all, fields(focus = %self.focus))]
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        let core_ctx = ctx.as_core_context();
        let manager = WorkspaceManager::from_context(&core_ctx);
        let workspace = manager
            .acquire(
                &ctx.repository.clone_url,
                ctx.default_branch(),
                AcquireMode::Shared,
            )
            .await?;

        let tree = files::file_tree(workspace.path());
        let context = prompts::project_context(ctx);
        let output = ctx
            .ai_service
            .generate(&prompts::summarize_project(&context, &tree, &self.focus))
            .await;

        if let Err(e) = workspace.release().await {
            warn!(error = %e, "Could not release workspace");
        }

        let comment = replies::summary_report(&ctx.repository.full_name, &output?);
        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(comment))
            .build())
    }
}
