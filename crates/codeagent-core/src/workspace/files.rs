//! File helpers, relative to a workspace root.

use std::path::{Component, Path, PathBuf};

use ignore::{overrides::OverrideBuilder, WalkBuilder};

use super::errors::{Result, WorkspaceError};

/// Resolve a relative path inside the root, rejecting absolute paths and `..`.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative_path = Path::new(relative.trim());
    let is_safe = !relative.trim().is_empty()
        && relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if is_safe {
        Ok(root.join(relative_path))
    } else {
        Err(WorkspaceError::InvalidPath {
            path: relative.into(),
        })
    }
}

/// Read a text file, refusing files larger than `max_size` bytes.
pub async fn read_file(root: &Path, relative: &str, max_size: u64) -> Result<String> {
    let path = resolve(root, relative)?;
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(WorkspaceError::io(&path))?;

    if metadata.len() > max_size {
        return Err(WorkspaceError::FileTooLarge {
            path: relative.into(),
            size: metadata.len(),
            max_size,
        });
    }

    tokio::fs::read_to_string(&path)
        .await
        .map_err(WorkspaceError::io(&path))
}

/// Write a file, creating parent directories.
pub async fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = resolve(root, relative)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(WorkspaceError::io(parent))?;
    }

    tokio::fs::write(&path, content)
        .await
        .map_err(WorkspaceError::io(&path))
}

/// Delete a file. A missing file is not an error.
pub async fn delete_file(root: &Path, relative: &str) -> Result<()> {
    let path = resolve(root, relative)?;
    match tokio::fs::remove_file(&path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(WorkspaceError::io(&path)(e)),
        _ => Ok(()),
    }
}

fn walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .require_git(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .sort_by_file_name(Ord::cmp);
    builder
}

fn relative_files(root: &Path, builder: &WalkBuilder) -> Vec<String> {
    builder
        .build()
        .flatten()
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect()
}

/// List files, relative to the root, skipping `.git` and ignored files.
pub fn list_files(root: &Path) -> Vec<String> {
    relative_files(root, &walker(root))
}

/// Find files whose path matches a glob, like `*.rs` or `src/**/mod.rs`.
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<String>> {
    let invalid = |source| WorkspaceError::InvalidPattern {
        pattern: pattern.into(),
        source,
    };
    let overrides = OverrideBuilder::new(root)
        .add(pattern)
        .and_then(|b| b.build())
        .map_err(invalid)?;

    let mut builder = walker(root);
    builder.overrides(overrides);
    Ok(relative_files(root, &builder))
}

/// Render an indented tree of folders and files.
pub fn file_tree(root: &Path) -> String {
    let mut output = String::new();

    for entry in walker(root).build().flatten() {
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let depth = relative.components().count();
        if depth == 0 {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let indent = "  ".repeat(depth - 1);
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            output.push_str(&format!("{indent}📁 {name}/\n"));
        } else {
            output.push_str(&format!("{indent}📄 {name}\n"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    use super::*;

    fn setup() -> TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        std::fs::create_dir_all(root.join("src/handlers")).unwrap();
        std::fs::write(root.join("README.md"), "# Demo").unwrap();
        std::fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        std::fs::write(root.join("src/handlers/mod.rs"), "").unwrap();
        dir
    }

    #[test]
    fn rejects_escaping_paths() {
        let root = Path::new("/work");

        assert_eq!(resolve(root, "src/a.rs").unwrap(), root.join("src/a.rs"));
        assert!(resolve(root, "../etc/passwd").is_err());
        assert!(resolve(root, "src/../../x").is_err());
        assert!(resolve(root, "/etc/passwd").is_err());
        assert!(resolve(root, "  ").is_err());
    }

    #[tokio::test]
    async fn write_read_delete() {
        let dir = setup();
        let root = dir.path();

        write_file(root, "docs/guide/intro.md", "Hello").await.unwrap();
        assert_eq!(
            read_file(root, "docs/guide/intro.md", 1024).await.unwrap(),
            "Hello"
        );

        delete_file(root, "docs/guide/intro.md").await.unwrap();
        delete_file(root, "docs/guide/intro.md").await.unwrap();
        assert!(!root.join("docs/guide/intro.md").exists());
    }

    #[tokio::test]
    async fn read_too_large() {
        let dir = setup();

        assert!(matches!(
            read_file(dir.path(), "README.md", 3).await,
            Err(WorkspaceError::FileTooLarge { size: 6, .. })
        ));
    }

    #[test]
    fn list_skips_git() {
        let dir = setup();

        assert_eq!(
            list_files(dir.path()),
            vec!["README.md", "src/handlers/mod.rs", "src/main.rs"]
        );
    }

    #[test]
    fn find_by_glob() {
        let dir = setup();

        assert_eq!(
            find_files(dir.path(), "*.rs").unwrap(),
            vec!["src/handlers/mod.rs", "src/main.rs"]
        );
        assert_eq!(
            find_files(dir.path(), "src/handlers/*").unwrap(),
            vec!["src/handlers/mod.rs"]
        );
    }

    #[test]
    fn tree() {
        let dir = setup();

        assert_eq!(
            file_tree(dir.path()),
            "📄 README.md\n📁 src/\n  📁 handlers/\n    📄 mod.rs\n  📄 main.rs\n"
        );
    }
}
