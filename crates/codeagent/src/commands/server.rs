use async_trait::async_trait;
use clap::Parser;
use codeagent_server::server::{run_bot_server, AppContext};

use super::{Command, CommandContext};
use crate::Result;

/// Start server
#[derive(Parser)]
pub(crate) struct ServerCommand;

#[async_trait(?Send)]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let context = AppContext::new_with_adapters(
            ctx.config,
            ctx.core_module,
            ctx.api_service,
            ctx.ai_service,
            ctx.git_service,
        );

        run_bot_server(context).await?;

        Ok(())
    }
}
