use async_trait::async_trait;
use codeagent_ghapi_interface::types::{GhIssueCommentAction, GhIssueCommentEvent};
use shaku::{Component, HasComponent, Interface};
use tracing::{debug, info};

use crate::{
    bot_commands::{CommandContext, CommandExecutorInterface, CommandParser},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleIssueCommentEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhIssueCommentEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandleIssueCommentEventInterface)]
pub(crate) struct HandleIssueCommentEvent;

#[async_trait]
impl HandleIssueCommentEventInterface for HandleIssueCommentEvent {
    #[tracing::instrument(skip(self, ctx), fields(
        action = ?event.action,
        repo_owner = event.repository.owner.login,
        repo_name = event.repository.name,
        number = event.issue.number
    ))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhIssueCommentEvent) -> Result<()> {
        if let GhIssueCommentAction::Created = event.action {
            self.run_created_comment(ctx, event).await
        } else {
            debug!("Ignoring comment action");
            Ok(())
        }
    }
}

impl HandleIssueCommentEvent {
    async fn run_created_comment(
        &self,
        ctx: &CoreContext<'_>,
        event: GhIssueCommentEvent,
    ) -> Result<()> {
        if CommandParser::is_bot_author(&ctx.config.name, &event.comment.user.login) {
            debug!(author = %event.comment.user.login, message = "Ignoring comment from a bot");
            return Ok(());
        }

        let Some(command) = CommandParser::extract(&event.comment.body) else {
            return Ok(());
        };

        // Comments on a pull request arrive as issue comments.
        let upstream_pr = if event.issue.is_pull_request() {
            Some(
                ctx.api_service
                    .pulls_get(
                        &event.repository.owner.login,
                        &event.repository.name,
                        event.issue.number,
                    )
                    .await?,
            )
        } else {
            None
        };

        info!(
            command = %command.to_command_string(),
            author = %event.comment.user.login,
            on_pull_request = upstream_pr.is_some(),
            message = "Command found in comment"
        );

        let mut command_ctx = CommandContext::new(ctx, &event.repository, &event.sender)
            .with_issue(&event.issue)
            .with_comment(&event.comment.body);
        if let Some(pr) = upstream_pr.as_ref() {
            command_ctx = command_ctx.with_pull_request(pr);
        }

        let command_executor: &dyn CommandExecutorInterface = ctx.core_module.resolve_ref();
        command_executor.execute(&command_ctx, command).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use codeagent_ghapi_interface::{
        types::{
            GhBranch, GhIssue, GhIssueComment, GhIssuePullRequestLink, GhPullRequest,
            GhRepository, GhUser,
        },
        MockApiService,
    };

    use super::*;
    use crate::{
        bot_commands::{
            Command, CommandExecutionResult, CommandName, MockCommandExecutorInterface,
        },
        context::tests::CoreContextTest,
        CoreModule,
    };

    fn event(body: &str, pull_request: bool) -> GhIssueCommentEvent {
        event_from("me", body, pull_request)
    }

    fn event_from(author: &str, body: &str, pull_request: bool) -> GhIssueCommentEvent {
        GhIssueCommentEvent {
            action: GhIssueCommentAction::Created,
            issue: GhIssue {
                number: 4,
                pull_request: pull_request.then(GhIssuePullRequestLink::default),
                ..Default::default()
            },
            comment: GhIssueComment {
                body: body.into(),
                user: GhUser {
                    login: author.into(),
                },
                ..Default::default()
            },
            repository: GhRepository {
                owner: GhUser { login: "owner".into() },
                name: "name".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn comment_on_issue() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_get().never();
            svc
        };
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute()
                    .once()
                    .withf(|ctx, command| {
                        ctx.issue.map(|i| i.number) == Some(4)
                            && ctx.pull_request.is_none()
                            && ctx.comment == Some("/fix the crash")
                            && *command == Command::new(CommandName::Fix, "the crash")
                    })
                    .return_once(|_, _| Ok(CommandExecutionResult::builder().build()));
                mock
            }))
            .build();

        HandleIssueCommentEvent
            .run(&ctx.as_context(), event("/fix the crash", false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn comment_on_pull_request() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_get()
                .once()
                .withf(|owner, name, number| owner == "owner" && name == "name" && *number == 4)
                .return_once(|_, _, _| {
                    Ok(GhPullRequest {
                        number: 4,
                        base: GhBranch {
                            reference: "develop".into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    })
                });
            svc
        };
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute()
                    .once()
                    .withf(|ctx, command| {
                        ctx.source_branch() == "develop"
                            && ctx.reply_target().ok() == Some(4)
                            && command.name == CommandName::Review
                    })
                    .return_once(|_, _| Ok(CommandExecutionResult::builder().build()));
                mock
            }))
            .build();

        HandleIssueCommentEvent
            .run(&ctx.as_context(), event("LGTM?\n/review", true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn comment_without_command() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_get().never();
            svc
        };
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute().never();
                mock
            }))
            .build();

        HandleIssueCommentEvent
            .run(&ctx.as_context(), event("Thanks!", true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn comment_from_the_bot_is_ignored() {
        let mut ctx = CoreContextTest::new();
        ctx.config.name = "codeagent".into();
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_get().never();
            svc
        };
        ctx.core_module = CoreModule::builder()
            .with_component_override::<dyn CommandExecutorInterface>(Box::new({
                let mut mock = MockCommandExecutorInterface::new();
                mock.expect_execute().never();
                mock
            }))
            .build();

        let reply = crate::replies::fix_report(
            "crash",
            "Here is the fix.\n/code add regression tests",
            time::OffsetDateTime::UNIX_EPOCH,
        );
        assert!(CommandParser::extract(&reply).is_some());

        HandleIssueCommentEvent
            .run(&ctx.as_context(), event_from("codeagent", &reply, false))
            .await
            .unwrap();
        HandleIssueCommentEvent
            .run(
                &ctx.as_context(),
                event_from("other-agent[bot]", "/fix loop", true),
            )
            .await
            .unwrap();
    }
}
