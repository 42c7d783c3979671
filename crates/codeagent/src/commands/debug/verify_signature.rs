use std::{io::Write, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use codeagent_crypto::verify_webhook_signature;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Check a webhook payload signature offline
#[derive(Parser)]
pub(crate) struct DebugVerifySignatureCommand {
    /// Webhook secret
    #[arg(long)]
    secret: String,
    /// Payload file
    #[arg(long)]
    file: PathBuf,
    /// Signature header value (e.g. `sha256=...`)
    #[arg(long)]
    signature: String,
}

#[async_trait(?Send)]
impl Command for DebugVerifySignatureCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let body = tokio::fs::read(&self.file).await?;
        let valid = verify_webhook_signature(Some(&self.signature), &body, &self.secret);

        writeln!(
            ctx.writer.write().await,
            "Signature is {}.",
            if valid { "valid" } else { "invalid" }
        )?;

        Ok(())
    }
}
