//! Workspace guard.

use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, warn};

use super::errors::{Result, WorkspaceError};

/// A working copy on disk.
///
/// An owned workspace is removed on [`Workspace::release`], or on drop when not released.
/// A shared workspace belongs to the cache and is left in place.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    url: String,
    branch: String,
    created_at: OffsetDateTime,
    owned: bool,
    released: bool,
}

impl Workspace {
    pub(crate) fn owned(path: PathBuf, url: &str, branch: &str) -> Self {
        Self::build(path, url, branch, true)
    }

    pub(crate) fn shared(path: PathBuf, url: &str, branch: &str) -> Self {
        Self::build(path, url, branch, false)
    }

    fn build(path: PathBuf, url: &str, branch: &str, owned: bool) -> Self {
        Self {
            path,
            url: url.into(),
            branch: branch.into(),
            created_at: OffsetDateTime::now_utc(),
            owned,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Release the workspace, removing its directory when owned.
    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        if !self.owned {
            return Ok(());
        }

        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Workspace removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WorkspaceError::io(&self.path)(e)),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.owned && !self.released && self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(path = %self.path.display(), error = %e, "Could not remove workspace");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn make_dir(root: &Path, name: &str) -> PathBuf {
        let path = root.join(name);
        std::fs::create_dir_all(path.join("src")).unwrap();
        std::fs::write(path.join("src/main.rs"), "fn main() {}").unwrap();
        path
    }

    #[tokio::test]
    async fn release_removes_owned_directory() {
        let root = tempdir().unwrap();
        let path = make_dir(root.path(), "repo");

        Workspace::owned(path.clone(), "url", "main")
            .release()
            .await
            .unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_owned_directory() {
        let root = tempdir().unwrap();
        let path = make_dir(root.path(), "repo");

        {
            let _workspace = Workspace::owned(path.clone(), "url", "main");
        }

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn shared_directory_is_kept() {
        let root = tempdir().unwrap();
        let path = make_dir(root.path(), "repo");

        Workspace::shared(path.clone(), "url", "main")
            .release()
            .await
            .unwrap();
        drop(Workspace::shared(path.clone(), "url", "main"));

        assert!(path.exists());
    }
}
