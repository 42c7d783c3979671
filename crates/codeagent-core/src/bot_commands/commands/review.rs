use async_trait::async_trait;
use codeagent_ghapi_interface::types::GhPullRequest;
use tracing::warn;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    prompts, replies,
    workspace::{files, AcquireMode, Workspace, WorkspaceManager},
    Result,
};

pub struct ReviewCommand {
    focus: String,
}

impl ReviewCommand {
    pub fn new(focus: String) -> Self {
        Self { focus }
    }

    async fn review_pull_request(
        &self,
        ctx: &CommandContext<'_>,
        manager: &WorkspaceManager<'_>,
        workspace: &Workspace,
        pr: &GhPullRequest,
    ) -> Result<String> {
        let diff = manager
            .pull_request_diff(workspace, &pr.base.reference, &pr.head.reference)
            .await;
        let context = prompts::project_context(ctx);

        Ok(ctx
            .ai_service
            .generate(&prompts::review_pull_request(
                pr,
                &diff,
                &self.focus,
                &context,
            ))
            .await?)
    }

    async fn review_project(&self, ctx: &CommandContext<'_>, workspace: &Workspace) -> Result<String> {
        let tree = files::file_tree(workspace.path());
        let context = prompts::project_context(ctx);

        Ok(ctx
            .ai_service
            .generate(&prompts::review_project(&tree, &self.focus, &context))
            .await?)
    }
}

#[async_trait]
impl BotCommand for ReviewCommand {
    #[tracing::instrument(skip_all, fields(focus = %self.focus))]
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        let core_ctx = ctx.as_core_context();
        let manager = WorkspaceManager::from_context(&core_ctx);
        let url = &ctx.repository.clone_url;

        let (workspace, output) = match ctx.pull_request {
            Some(pr) => {
                // Fetching the head rewrites refs, so cached copies are not used here.
                let workspace = manager
                    .acquire(url, ctx.source_branch(), AcquireMode::Exclusive)
                    .await?;
                let output = self.review_pull_request(ctx, &manager, &workspace, pr).await;
                (workspace, output)
            }
            None => {
                let workspace = manager
                    .acquire(url, ctx.default_branch(), AcquireMode::Shared)
                    .await?;
                let output = self.review_project(ctx, &workspace).await;
                (workspace, output)
            }
        };

        if let Err(e) = workspace.release().await {
            warn!(error = %e, "Could not release workspace");
        }

        let comment = replies::review_report(ctx.pull_request.map(|pr| pr.number), &output?);
        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(comment))
            .build())
    }
}
