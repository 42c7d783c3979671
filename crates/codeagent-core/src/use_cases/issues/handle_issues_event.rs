use async_trait::async_trait;
use codeagent_ghapi_interface::types::{GhIssuesAction, GhIssuesEvent};
use shaku::{Component, HasComponent, Interface};
use tracing::{debug, info};

use crate::{
    bot_commands::{CommandContext, CommandExecutorInterface, CommandParser},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait HandleIssuesEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhIssuesEvent) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = HandleIssuesEventInterface)]
pub(crate) struct HandleIssuesEvent;

#[async_trait]
impl HandleIssuesEventInterface for HandleIssuesEvent {
    #[tracing::instrument(skip(self, ctx, event), fields(
        action = %event.action,
        repository = %event.repository.full_name,
        number = event.issue.number
    ))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, event: GhIssuesEvent) -> Result<()> {
        match event.action {
            GhIssuesAction::Opened => self.run_opened(ctx, &event).await,
            GhIssuesAction::Edited | GhIssuesAction::Closed => {
                info!(title = %event.issue.title, "Issue {}", event.action);
                Ok(())
            }
            _ => {
                debug!("Ignoring issue action");
                Ok(())
            }
        }
    }
}

impl HandleIssuesEvent {
    async fn run_opened(&self, ctx: &CoreContext<'_>, event: &GhIssuesEvent) -> Result<()> {
        let body = event.issue.body.as_deref().unwrap_or_default();
        let Some(command) = CommandParser::extract(body) else {
            info!("No command in issue body");
            return Ok(());
        };

        let command_ctx =
            CommandContext::new(ctx, &event.repository, &event.sender).with_issue(&event.issue);
        let command_executor: &dyn CommandExecutorInterface = ctx.core_module.resolve_ref();
        command_executor.execute(&command_ctx, command).await?;

        Ok(())
    }
}
