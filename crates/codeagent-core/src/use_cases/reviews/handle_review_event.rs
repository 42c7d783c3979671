use async_trait::async_trait;
use codeagent_ghapi_interface::types::{GhReviewAction, GhReviewEvent, GhReviewState};
use shaku::{Component, HasComponent, Interface};
use tracing::{debug, info, warn};

use crate::{
    bot_commands::{Command, CommandContext, CommandExecutorInterface, CommandName, CommandParser},
    CoreContext, Result,
};

/// Focus given to the review run when a reviewer requests changes.
pub const CHANGES_REQUESTED_FOCUS: &str = "Focus on the changes requested by the reviewer";

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleReviewEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhReviewEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandleReviewEventInterface)]
pub(crate) struct HandleReviewEvent;

#[async_trait]
impl HandleReviewEventInterface for HandleReviewEvent {
    #[tracing::instrument(
        skip_all,
        fields(
            repo_owner = event.repository.owner.login,
            repo_name = event.repository.name,
            pr_number = event.pull_request.number,
            reviewer = event.review.user.login,
            state = ?event.review.state
        )
    )]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhReviewEvent) -> Result<()> {
        if event.action != GhReviewAction::Submitted {
            debug!("Ignoring review action");
            return Ok(());
        }

        if CommandParser::is_bot_author(&ctx.config.name, &event.review.user.login) {
            debug!("Ignoring review from a bot");
            return Ok(());
        }

        let body = event.review.body.as_deref().unwrap_or_default();
        let mut commands = Vec::new();

        let explicit = CommandParser::extract(body);
        let explicit_review = matches!(&explicit, Some(c) if c.name == CommandName::Review);
        commands.extend(explicit);

        if event.review.state == GhReviewState::ChangesRequested
            && !body.trim().is_empty()
            && !explicit_review
        {
            info!("Changes requested, running an automatic review");
            commands.push(Command::new(CommandName::Review, CHANGES_REQUESTED_FOCUS));
        }

        if commands.is_empty() {
            return Ok(());
        }

        let command_ctx = CommandContext::new(ctx, &event.repository, &event.sender)
            .with_pull_request(&event.pull_request)
            .with_comment(body);

        // A failing explicit command does not prevent the automatic review.
        let command_executor: &dyn CommandExecutorInterface = ctx.core_module.resolve_ref();
        let mut first_error = None;
        for command in commands {
            if let Err(e) = command_executor.execute(&command_ctx, command).await {
                if first_error.is_some() {
                    warn!(error = %e, message = "Command failed after a previous failure");
                } else {
                    first_error = Some(e);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
