//! Git driver backed by the `git` executable.

#![warn(clippy::all)]

use std::{
    ffi::OsString,
    path::Path,
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use codeagent_config::GitConfig;
use codeagent_git_interface::{GitError, GitService, Result};
use tokio::process::Command;
use tracing::{debug, info, warn};

const FETCH_DEPTH: &str = "50";

/// Git service spawning `git` subprocesses.
#[derive(Debug, Clone)]
pub struct ProcessGitService {
    executable: String,
    clone_timeout: Duration,
    push_timeout: Duration,
    command_timeout: Duration,
}

impl ProcessGitService {
    /// Build the service from git options.
    pub fn new(config: &GitConfig) -> Self {
        Self {
            executable: "git".into(),
            clone_timeout: Duration::from_secs(config.clone_timeout),
            push_timeout: Duration::from_secs(config.push_timeout),
            command_timeout: Duration::from_secs(config.command_timeout),
        }
    }

    /// Run git with arguments, returning stdout.
    async fn run_git<I, S>(
        &self,
        repository: Option<&Path>,
        args: I,
        timeout: Duration,
    ) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let name = command_name(&args);

        let mut command = Command::new(&self.executable);
        if let Some(repository) = repository {
            command.arg("-C").arg(repository);
        }
        command
            .args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_TERMINAL_PROGRESS", "0")
            .env("GIT_HTTP_TIMEOUT", "60")
            .env("GIT_HTTP_MAX_RETRIES", "3")
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = %name, "Running git");
        let child = command.spawn().map_err(|e| GitError::SpawnError {
            command: name.clone(),
            source: e,
        })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| GitError::Timeout {
                command: name.clone(),
                seconds: timeout.as_secs(),
            })?
            .map_err(|e| GitError::SpawnError {
                command: name.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %name, stderr = %stderr, "git command failed");
            return Err(GitError::CommandFailed {
                command: name,
                status: output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".into()),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// First git subcommand in the arguments, skipping `-c key=value` options.
fn command_name(args: &[OsString]) -> String {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-c" {
            iter.next();
        } else if !arg.to_string_lossy().starts_with('-') {
            return arg.to_string_lossy().into_owned();
        }
    }

    String::new()
}

fn remote_ref(branch: &str) -> String {
    format!("+refs/heads/{branch}:refs/remotes/origin/{branch}")
}

#[async_trait]
impl GitService for ProcessGitService {
    #[tracing::instrument(skip(self), fields(destination = %destination.display()))]
    async fn clone_repository(&self, url: &str, branch: &str, destination: &Path) -> Result<()> {
        let destination = destination.as_os_str().to_owned();
        self.run_git(
            None,
            [
                OsString::from("-c"),
                "http.postBuffer=1048576000".into(),
                "clone".into(),
                "-b".into(),
                branch.into(),
                "--depth".into(),
                "1".into(),
                "--single-branch".into(),
                url.into(),
                destination,
            ],
            self.clone_timeout,
        )
        .await?;

        info!(url, branch, "Repository cloned");
        Ok(())
    }

    async fn configure_identity(&self, repository: &Path, name: &str, email: &str) -> Result<()> {
        self.run_git(
            Some(repository),
            ["config", "user.name", name],
            self.command_timeout,
        )
        .await?;
        self.run_git(
            Some(repository),
            ["config", "user.email", email],
            self.command_timeout,
        )
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, repository))]
    async fn create_branch(&self, repository: &Path, branch: &str) -> Result<()> {
        self.run_git(
            Some(repository),
            ["checkout", "-b", branch],
            self.command_timeout,
        )
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, repository))]
    async fn stage(&self, repository: &Path, paths: &[String]) -> Result<()> {
        let args = ["add", "--"]
            .into_iter()
            .map(String::from)
            .chain(paths.iter().cloned());
        self.run_git(Some(repository), args, self.command_timeout)
            .await?;
        Ok(())
    }

    async fn staged_files(&self, repository: &Path) -> Result<Vec<String>> {
        let output = self
            .run_git(
                Some(repository),
                ["diff", "--cached", "--name-only"],
                self.command_timeout,
            )
            .await?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    #[tracing::instrument(skip(self, repository, message))]
    async fn commit(&self, repository: &Path, message: &str) -> Result<()> {
        self.run_git(
            Some(repository),
            ["commit", "-m", message],
            self.command_timeout,
        )
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, repository))]
    async fn push(&self, repository: &Path, branch: &str) -> Result<()> {
        self.run_git(
            Some(repository),
            [
                "-c",
                "http.postBuffer=1048576000",
                "push",
                "-u",
                "origin",
                branch,
            ],
            self.push_timeout,
        )
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, repository))]
    async fn fetch(&self, repository: &Path, branch: &str) -> Result<()> {
        self.run_git(
            Some(repository),
            [
                "fetch".to_string(),
                "--depth".into(),
                FETCH_DEPTH.into(),
                "origin".into(),
                remote_ref(branch),
            ],
            self.clone_timeout,
        )
        .await?;
        Ok(())
    }

    async fn diff(&self, repository: &Path, base: &str, head: &str) -> Result<String> {
        self.run_git(
            Some(repository),
            ["diff".to_string(), format!("{base}...{head}")],
            self.command_timeout,
        )
        .await
    }

    async fn recent_log(&self, repository: &Path, count: usize) -> Result<String> {
        self.run_git(
            Some(repository),
            [
                "log".to_string(),
                "--oneline".into(),
                format!("-{count}"),
                "--stat".into(),
            ],
            self.command_timeout,
        )
        .await
    }
}
