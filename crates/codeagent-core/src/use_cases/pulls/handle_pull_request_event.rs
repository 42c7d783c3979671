use async_trait::async_trait;
use codeagent_ghapi_interface::types::{GhPullRequestAction, GhPullRequestEvent};
use shaku::{Component, Interface};
use tracing::{debug, info};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandlePullRequestEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhPullRequestEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandlePullRequestEventInterface)]
pub(crate) struct HandlePullRequestEvent;

#[async_trait]
impl HandlePullRequestEventInterface for HandlePullRequestEvent {
    #[tracing::instrument(skip(self, _ctx, event), fields(
        action = %event.action,
        repo_owner = event.repository.owner.login,
        repo_name = event.repository.name,
        pr_number = event.pull_request.number
    ))]
    async fn run<'a>(&self, _ctx: &CoreContext<'a>, event: GhPullRequestEvent) -> Result<()> {
        // Pull request bodies are not scanned for commands.
        match event.action {
            GhPullRequestAction::Opened
            | GhPullRequestAction::Synchronize
            | GhPullRequestAction::Closed => {
                info!(
                    title = %event.pull_request.title,
                    head = %event.pull_request.head.reference,
                    base = %event.pull_request.base.reference,
                    "Pull request {}",
                    event.action
                );
            }
            _ => debug!("Ignoring pull request action"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use codeagent_ghapi_interface::{
        types::{GhPullRequest, GhRepository},
        MockApiService,
    };

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn body_commands_are_not_executed() {
        let mut ctx = CoreContextTest::new();
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_comments_post().never();
            svc
        };

        HandlePullRequestEvent
            .run(
                &ctx.as_context(),
                GhPullRequestEvent {
                    action: GhPullRequestAction::Opened,
                    number: 3,
                    pull_request: GhPullRequest {
                        number: 3,
                        body: Some("/code do something".into()),
                        ..Default::default()
                    },
                    repository: GhRepository::default(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
}
