//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use codeagent_ai_interface::AiService;
use codeagent_config::Config;
use codeagent_core::CoreModule;
use codeagent_ghapi_interface::ApiService;
use codeagent_git_interface::GitService;
use tokio::sync::RwLock;

use self::{debug::DebugCommand, server::ServerCommand};
use crate::Result;

mod debug;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub core_module: CoreModule,
    pub api_service: Box<dyn ApiService>,
    pub ai_service: Box<dyn AiService>,
    pub git_service: Box<dyn GitService>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait(?Send)]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Debug(DebugCommand),
}

#[async_trait(?Send)]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Debug(sub) => sub.execute(ctx).await,
        }
    }
}
