use async_trait::async_trait;
use codeagent_ghapi_interface::types::GhIssue;
use shaku::HasComponent;
use time::OffsetDateTime;

use crate::{
    bot_commands::{
        command::{CommandExecutionResult, ResultAction},
        BotCommand, CommandContext,
    },
    replies,
    use_cases::modify::{AutoModifyIssueInterface, ModificationOutcome, ModificationRequest},
    DomainError, Result,
};

pub struct CodeCommand {
    request: String,
}

impl CodeCommand {
    pub fn new(request: String) -> Self {
        Self { request }
    }

    /// Issue carrying both the original text and the requested change.
    fn combined_issue(&self, ctx: &CommandContext) -> Result<GhIssue> {
        let mut issue = match (ctx.issue, ctx.pull_request) {
            (Some(issue), _) => issue.clone(),
            (None, Some(pr)) => GhIssue {
                number: pr.number,
                title: pr.title.clone(),
                body: pr.body.clone(),
                html_url: pr.html_url.clone(),
                ..Default::default()
            },
            (None, None) => return Err(DomainError::MissingReplyTarget),
        };

        let original = issue.body.take().unwrap_or_default();
        issue.body = Some(format!(
            "**Original issue:**\n{original}\n\n**Requested change:**\n{}",
            self.request
        ));
        if !self.request.is_empty() {
            issue.title = self.request.clone();
        }

        Ok(issue)
    }
}

#[async_trait]
impl BotCommand for CodeCommand {
    #[tracing::instrument(skip_all, fields(request = %self.request))]
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult> {
        let request = ModificationRequest {
            repository: ctx.repository.clone(),
            issue: self.combined_issue(ctx)?,
            source_branch: ctx.source_branch().to_string(),
        };

        let auto_modify_issue: &dyn AutoModifyIssueInterface = ctx.core_module.resolve_ref();
        let outcome = auto_modify_issue
            .run(&ctx.as_core_context(), &request)
            .await?;

        let now = OffsetDateTime::now_utc();
        let comment = match &outcome {
            ModificationOutcome::NoChanges { branch } => {
                replies::no_changes(&request.issue, branch, now)
            }
            ModificationOutcome::Applied(applied) => {
                replies::code_success(&request.issue, applied, now)
            }
        };

        Ok(CommandExecutionResult::builder()
            .with_action(ResultAction::PostComment(comment))
            .build())
    }
}
