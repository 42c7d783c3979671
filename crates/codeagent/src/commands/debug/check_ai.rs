use std::io::Write;

use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Check that the AI backend answers
#[derive(Parser)]
pub(crate) struct DebugCheckAiCommand;

#[async_trait(?Send)]
impl Command for DebugCheckAiCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let name = ctx.ai_service.name();
        let description = ctx.ai_service.health_check().await?;

        writeln!(
            ctx.writer.write().await,
            "AI backend '{}' is reachable: {}",
            name,
            description
        )?;
        writeln!(
            ctx.writer.write().await,
            "Can write files: {}",
            ctx.ai_service.can_write_files()
        )?;

        Ok(())
    }
}
