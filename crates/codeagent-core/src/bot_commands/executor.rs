use async_trait::async_trait;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::{error, info};

use super::{
    command::{Command, CommandExecutionResult, CommandName, ResultAction},
    commands::{
        BotCommand, CodeCommand, CommandContext, ContinueCommand, FixCommand, HelpCommand,
        ReviewCommand, SummaryCommand,
    },
};
use crate::{replies, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CommandExecutorInterface: Interface {
    /// Run a command and post its replies.
    ///
    /// On failure a failure reply is posted, then the error is returned.
    async fn execute<'a>(
        &self,
        ctx: &CommandContext<'a>,
        command: Command,
    ) -> Result<CommandExecutionResult>;
}

#[derive(Component)]
#[shaku(interface = CommandExecutorInterface)]
pub(crate) struct CommandExecutor;

#[async_trait]
impl CommandExecutorInterface for CommandExecutor {
    #[tracing::instrument(
        skip_all,
        fields(
            repo_owner = %ctx.repo_owner(),
            repo_name = %ctx.repo_name(),
            user = %ctx.user.login,
            command = ?command
        )
    )]
    async fn execute<'a>(
        &self,
        ctx: &CommandContext<'a>,
        command: Command,
    ) -> Result<CommandExecutionResult> {
        let target = ctx.reply_target()?;
        info!(target, "Executing command");

        match Self::build_command(&command).handle(ctx).await {
            Ok(result) => {
                self.process_command_result(ctx, target, &result).await?;
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, "Command failed");

                let reply = replies::failure(&command, &e, OffsetDateTime::now_utc());
                if let Err(post_error) = ctx
                    .api_service
                    .comments_post(ctx.repo_owner(), ctx.repo_name(), target, &reply)
                    .await
                {
                    error!(error = %post_error, "Could not post failure reply");
                }

                Err(e)
            }
        }
    }
}

impl CommandExecutor {
    fn build_command(command: &Command) -> Box<dyn BotCommand> {
        let args = command.args.clone();
        match command.name {
            CommandName::Code => Box::new(CodeCommand::new(args)),
            CommandName::Continue => Box::new(ContinueCommand::new(args)),
            CommandName::Fix => Box::new(FixCommand::new(args)),
            CommandName::Help => Box::new(HelpCommand::new()),
            CommandName::Review => Box::new(ReviewCommand::new(args)),
            CommandName::Summary => Box::new(SummaryCommand::new(args)),
        }
    }

    async fn process_command_result(
        &self,
        ctx: &CommandContext<'_>,
        target: u64,
        command_result: &CommandExecutionResult,
    ) -> Result<()> {
        for action in &command_result.result_actions {
            match action {
                ResultAction::PostComment(comment) => {
                    ctx.api_service
                        .comments_post(ctx.repo_owner(), ctx.repo_name(), target, comment)
                        .await?;
                }
            }
        }

        Ok(())
    }
}
