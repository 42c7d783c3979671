use async_trait::async_trait;
use codeagent_ghapi_interface::types::{GhReviewCommentAction, GhReviewCommentEvent};
use shaku::{Component, HasComponent, Interface};
use tracing::debug;

use crate::{
    bot_commands::{CommandContext, CommandExecutorInterface, CommandParser},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleReviewCommentEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhReviewCommentEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandleReviewCommentEventInterface)]
pub(crate) struct HandleReviewCommentEvent;

#[async_trait]
impl HandleReviewCommentEventInterface for HandleReviewCommentEvent {
    #[tracing::instrument(skip(self, ctx), fields(
        action = ?event.action,
        repo_owner = event.repository.owner.login,
        repo_name = event.repository.name,
        pr_number = event.pull_request.number,
        path = event.comment.path
    ))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhReviewCommentEvent) -> Result<()> {
        if event.action != GhReviewCommentAction::Created {
            debug!("Ignoring review comment action");
            return Ok(());
        }

        if CommandParser::is_bot_author(&ctx.config.name, &event.comment.user.login) {
            debug!("Ignoring review comment from a bot");
            return Ok(());
        }

        let Some(command) = CommandParser::extract(&event.comment.body) else {
            return Ok(());
        };

        let command_ctx = CommandContext::new(ctx, &event.repository, &event.sender)
            .with_pull_request(&event.pull_request)
            .with_comment(&event.comment.body);

        let command_executor: &dyn CommandExecutorInterface = ctx.core_module.resolve_ref();
        command_executor.execute(&command_ctx, command).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use codeagent_ghapi_interface::types::{GhPullRequest, GhReviewComment, GhUser};

    use super::*;
    use crate::{
        bot_commands::{CommandExecutionResult, CommandName, MockCommandExecutorInterface},
        context::tests::CoreContextTest,
        CoreModule,
    };

    fn event(action: GhReviewCommentAction) -> GhReviewCommentEvent {
        GhReviewCommentEvent {
            action,
            comment: GhReviewComment {
                body: "/continue handle the empty case".into(),
                path: "src/lib.rs".into(),
                ..Default::default()
            },
            pull_request: GhPullRequest {
                number: 12,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_comment_runs_command() {
        let mut ctx = CoreContextTest::new();
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute()
                    .once()
                    .withf(|ctx, command| {
                        ctx.issue.is_none()
                            && ctx.reply_target().ok() == Some(12)
                            && command.name == CommandName::Continue
                            && command.args == "handle the empty case"
                    })
                    .return_once(|_, _| Ok(CommandExecutionResult::builder().build()));
                mock
            }))
            .build();

        HandleReviewCommentEvent
            .run(&ctx.as_context(), event(GhReviewCommentAction::Created))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn edited_comment_is_ignored() {
        let mut ctx = CoreContextTest::new();
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute().never();
                mock
            }))
            .build();

        HandleReviewCommentEvent
            .run(&ctx.as_context(), event(GhReviewCommentAction::Edited))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn comment_from_a_bot_is_ignored() {
        let mut ctx = CoreContextTest::new();
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute().never();
                mock
            }))
            .build();

        let mut event = event(GhReviewCommentAction::Created);
        event.comment.user = GhUser {
            login: "review-helper[bot]".into(),
        };
        HandleReviewCommentEvent
            .run(&ctx.as_context(), event)
            .await
            .unwrap();
    }
}
