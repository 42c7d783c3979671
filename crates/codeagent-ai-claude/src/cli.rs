use std::{
    path::Path,
    process::{Output, Stdio},
    time::Duration,
};

use async_trait::async_trait;
use codeagent_ai_interface::{AiError, AiService, Result};
use codeagent_config::AiConfig;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::mask_api_key;

const WORKSPACE_ALLOWED_TOOLS: &str = "Edit,Write,Read,Glob,Grep";
const WORKSPACE_DISALLOWED_TOOLS: &str = "Bash";
const MAX_TEXT_FILE_BUSY_RETRIES: u32 = 5;
const TEXT_FILE_BUSY_ERRNO: i32 = 26;
const MAX_STDERR_CHARS: usize = 500;

/// Claude Code command line backend.
#[derive(Debug, Clone)]
pub struct ClaudeCliService {
    executable: String,
    model: String,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClaudeCliService {
    /// Build the backend from AI options.
    pub fn new(config: &AiConfig) -> Self {
        Self {
            executable: config.cli_executable.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds.max(1)),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if !self.api_key.is_empty() {
            command.env("ANTHROPIC_API_KEY", &self.api_key);
        }
        if !self.base_url.is_empty() {
            command.env("ANTHROPIC_BASE_URL", &self.base_url);
        }

        command
    }

    fn print_args(&self, command: &mut Command) {
        command.arg("--print");
        if !self.model.is_empty() {
            command.arg("--model").arg(&self.model);
        }
    }

    async fn spawn(&self, command: &mut Command) -> Result<Child> {
        let mut attempt = 0;
        loop {
            match command.spawn() {
                Ok(child) => return Ok(child),
                Err(e)
                    if e.raw_os_error() == Some(TEXT_FILE_BUSY_ERRNO)
                        && attempt < MAX_TEXT_FILE_BUSY_RETRIES =>
                {
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(25)).await;
                }
                Err(e) => {
                    return Err(AiError::ProcessSpawnError {
                        program: self.executable.clone(),
                        source: e,
                    })
                }
            }
        }
    }

    async fn run(&self, mut command: Command) -> Result<String> {
        info!(
            executable = %self.executable,
            model = %self.model,
            api_key = %mask_api_key(&self.api_key),
            base_url = %self.base_url,
            "Calling Claude command line"
        );

        let child = self.spawn(&mut command).await?;
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AiError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| AiError::ImplementationError { source: e.into() })?;

        let text = read_output(output)?;
        debug!(length = text.len(), "Claude command line answered");
        Ok(text)
    }
}

fn read_output(output: Output) -> Result<String> {
    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| "signal".into());
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AiError::ProcessFailed {
            status,
            stderr: stderr.trim().chars().take(MAX_STDERR_CHARS).collect(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        return Err(AiError::EmptyOutput);
    }

    Ok(stdout)
}

#[async_trait]
impl AiService for ClaudeCliService {
    fn name(&self) -> String {
        "claude-cli".into()
    }

    fn can_write_files(&self) -> bool {
        true
    }

    #[tracing::instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut command = self.command();
        self.print_args(&mut command);
        command.arg(prompt);

        self.run(command).await
    }

    #[tracing::instrument(skip_all, fields(prompt_len = prompt.len(), directory = %directory.display()))]
    async fn generate_in_directory(&self, prompt: &str, directory: &Path) -> Result<String> {
        let mut command = self.command();
        command.current_dir(directory);
        self.print_args(&mut command);
        command
            .arg("--allowedTools")
            .arg(WORKSPACE_ALLOWED_TOOLS)
            .arg("--disallowedTools")
            .arg(WORKSPACE_DISALLOWED_TOOLS)
            .arg(prompt);

        self.run(command).await
    }

    async fn health_check(&self) -> Result<String> {
        let mut command = self.command();
        command.arg("--version");

        self.run(command).await
    }
}
