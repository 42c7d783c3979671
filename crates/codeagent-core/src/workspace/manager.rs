//! Workspace manager.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use codeagent_config::GitConfig;
use codeagent_git_interface::{GitError, GitService};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{
    errors::{Result, WorkspaceError},
    guard::Workspace,
    store::{WorkspaceKey, WorkspaceStore},
};
use crate::CoreContext;

/// Max diff size handed to the AI backend.
pub const MAX_DIFF_CHARS: usize = 10_000;
const DIFF_TRUNCATION_MARKER: &str = "\n\n... (diff truncated)";
const FALLBACK_LOG_COUNT: usize = 5;

static CLONE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// How a caller uses the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireMode {
    /// Read-only use: a cached copy can be reused, a fresh one is cached.
    Shared,
    /// Mutating use: always a fresh copy, owned by the caller.
    Exclusive,
}

/// Clones, caches and cleans working copies.
pub struct WorkspaceManager<'a> {
    config: &'a GitConfig,
    git: &'a dyn GitService,
    store: &'a dyn WorkspaceStore,
}

impl<'a> WorkspaceManager<'a> {
    pub fn new(config: &'a GitConfig, git: &'a dyn GitService, store: &'a dyn WorkspaceStore) -> Self {
        Self { config, git, store }
    }

    pub fn from_context(ctx: &CoreContext<'a>) -> Self {
        Self::new(&ctx.config.git, ctx.git_service, ctx.workspace_store)
    }

    /// Acquire a working copy of `url` at `branch`.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&self, url: &str, branch: &str, mode: AcquireMode) -> Result<Workspace> {
        self.purge_expired().await;

        let key = WorkspaceKey::new(url, branch);
        if mode == AcquireMode::Shared {
            if let Some(path) = self.store.cache_get(&key) {
                info!(path = %path.display(), "Reusing cached workspace");
                return Ok(Workspace::shared(path, url, branch));
            }
        }

        self.store
            .try_record_clone(url)
            .map_err(|retry_after| WorkspaceError::RateLimited {
                url: url.into(),
                retry_after,
            })?;

        let work_dir = Path::new(&self.config.work_dir);
        tokio::fs::create_dir_all(work_dir)
            .await
            .map_err(WorkspaceError::io(work_dir))?;

        let destination = work_dir.join(clone_directory_name(OffsetDateTime::now_utc()));
        if let Err(e) = self.git.clone_repository(url, branch, &destination).await {
            remove_directory(&destination).await;
            return Err(e.into());
        }

        Ok(match mode {
            AcquireMode::Shared => {
                self.store.cache_put(key, destination.clone());
                Workspace::shared(destination, url, branch)
            }
            AcquireMode::Exclusive => Workspace::owned(destination, url, branch),
        })
    }

    /// Get the diff between two branches, or a short log when the diff is unavailable.
    ///
    /// Fetches into the workspace, so it must be an exclusive one.
    #[tracing::instrument(skip(self, workspace))]
    pub async fn pull_request_diff(&self, workspace: &Workspace, base: &str, head: &str) -> String {
        let path = workspace.path();
        let diff: Result<String, GitError> = async {
            self.git.fetch(path, base).await?;
            self.git.fetch(path, head).await?;
            self.git
                .diff(path, &format!("origin/{base}"), &format!("origin/{head}"))
                .await
        }
        .await;

        let text = match diff {
            Ok(diff) => diff,
            Err(e) => {
                warn!(error = %e, "Could not compute diff, using recent log");
                match self.git.recent_log(path, FALLBACK_LOG_COUNT).await {
                    Ok(log) => log,
                    Err(e) => {
                        warn!(error = %e, "Could not read recent log");
                        String::new()
                    }
                }
            }
        };

        truncate_diff(&text)
    }

    /// Drop every cached workspace, removing their directories.
    pub async fn cache_clear(&self) -> Vec<PathBuf> {
        let paths = self.store.cache_clear();
        for path in &paths {
            remove_directory(path).await;
        }
        paths
    }

    async fn purge_expired(&self) {
        for path in self.store.purge_expired() {
            remove_directory(&path).await;
        }
    }
}

async fn remove_directory(path: &Path) {
    match tokio::fs::remove_dir_all(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), error = %e, "Could not remove directory");
        }
        _ => (),
    }
}

/// Directory name for a new clone: `repo_<YYYYMMDD_HHMMSS>_<n>`.
pub fn clone_directory_name(now: OffsetDateTime) -> String {
    let n = CLONE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "repo_{:04}{:02}{:02}_{:02}{:02}{:02}_{n}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Cut a diff at [`MAX_DIFF_CHARS`] characters, with a marker.
pub fn truncate_diff(diff: &str) -> String {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        None => diff.to_string(),
        Some((index, _)) => format!("{}{DIFF_TRUNCATION_MARKER}", &diff[..index]),
    }
}
