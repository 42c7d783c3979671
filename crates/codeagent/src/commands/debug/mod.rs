//! Debug commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;
mod check_ai;
mod verify_signature;
use check_ai::DebugCheckAiCommand;
use verify_signature::DebugVerifySignatureCommand;

/// Debug related commands
#[derive(Parser)]
pub(crate) struct DebugCommand {
    #[clap(subcommand)]
    inner: DebugSubCommand,
}

#[async_trait(?Send)]
impl Command for DebugCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum DebugSubCommand {
    CheckAi(DebugCheckAiCommand),
    VerifySignature(DebugVerifySignatureCommand),
}

#[async_trait(?Send)]
impl Command for DebugSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::CheckAi(sub) => sub.execute(ctx).await,
            Self::VerifySignature(sub) => sub.execute(ctx).await,
        }
    }
}
