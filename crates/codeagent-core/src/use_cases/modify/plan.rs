//! JSON modification plans.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::{workspace::files, DomainError, Result};

/// File action.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Modify,
    Delete,
    #[serde(other)]
    Unknown,
}

/// One file change of a plan.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FileModification {
    #[serde(rename = "file")]
    pub path: String,
    pub action: FileAction,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Modification plan.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ModificationPlan {
    #[serde(default)]
    pub modifications: Vec<FileModification>,
    #[serde(default)]
    pub summary: String,
}

impl ModificationPlan {
    /// Parse the JSON object found between the first `{` and the last `}`.
    pub fn parse(text: &str) -> Result<Self> {
        let span = match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => &text[start..=end],
            _ => {
                return Err(DomainError::PlanParseError {
                    reason: "no JSON object found".into(),
                })
            }
        };

        serde_json::from_str(span).map_err(|e| DomainError::PlanParseError {
            reason: e.to_string(),
        })
    }

    /// Apply every modification on a working copy.
    ///
    /// Failing modifications are skipped. Returns one line per applied change.
    pub async fn apply(&self, root: &Path) -> Result<Vec<String>> {
        let mut applied = vec![];

        for modification in &self.modifications {
            let path = &modification.path;
            let outcome = match modification.action {
                FileAction::Create | FileAction::Modify => {
                    files::write_file(
                        root,
                        path,
                        modification.content.as_deref().unwrap_or_default(),
                    )
                    .await
                }
                FileAction::Delete => files::delete_file(root, path).await,
                FileAction::Unknown => {
                    warn!(path = %path, "Unsupported file action, skipping");
                    continue;
                }
            };

            match outcome {
                Ok(()) => {
                    info!(path = %path, action = ?modification.action, "File modified");
                    applied.push(format!("- {}: {}", path, modification.description));
                }
                Err(e) => warn!(path = %path, error = %e, "Could not apply file modification"),
            }
        }

        if applied.is_empty() {
            Err(DomainError::NoModificationsApplied)
        } else {
            Ok(applied)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn parse_surrounded_json() {
        let text = r#"Here is the plan:
{
  "modifications": [
    {"file": "src/main.rs", "action": "create", "content": "fn main() {}", "description": "entry point"},
    {"file": "old.txt", "action": "delete", "description": "cleanup"}
  ],
  "summary": "Add entry point"
}
Hope it helps."#;

        let plan = ModificationPlan::parse(text).unwrap();
        assert_eq!(plan.summary, "Add entry point");
        assert_eq!(plan.modifications.len(), 2);
        assert_eq!(plan.modifications[0].path, "src/main.rs");
        assert_eq!(plan.modifications[0].content.as_deref(), Some("fn main() {}"));
        assert_eq!(plan.modifications[1].action, FileAction::Delete);
        assert_eq!(plan.modifications[1].content, None);
    }

    #[test]
    fn parse_failures() {
        assert!(matches!(
            ModificationPlan::parse("I could not find anything"),
            Err(DomainError::PlanParseError { .. })
        ));
        assert!(matches!(
            ModificationPlan::parse("} nope {"),
            Err(DomainError::PlanParseError { .. })
        ));
        assert!(matches!(
            ModificationPlan::parse("{\"modifications\": [}"),
            Err(DomainError::PlanParseError { .. })
        ));
    }

    #[tokio::test]
    async fn apply_on_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("old.txt"), "old").unwrap();

        let plan = ModificationPlan::parse(
            r#"{"modifications": [
                {"file": "src/lib.rs", "action": "create", "content": "pub fn a() {}", "description": "lib"},
                {"file": "old.txt", "action": "delete", "description": "remove"},
                {"file": "missing.txt", "action": "delete", "description": "already gone"},
                {"file": "../escape.txt", "action": "modify", "content": "x", "description": "outside"},
                {"file": "x", "action": "rename", "description": "unknown"}
            ]}"#,
        )
        .unwrap();

        let applied = plan.apply(dir.path()).await.unwrap();
        assert_eq!(
            applied,
            vec![
                "- src/lib.rs: lib".to_string(),
                "- old.txt: remove".to_string(),
                "- missing.txt: already gone".to_string(),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(),
            "pub fn a() {}"
        );
        assert!(!dir.path().join("old.txt").exists());
    }

    #[tokio::test]
    async fn empty_plan_is_an_error() {
        let dir = tempdir().unwrap();
        let plan = ModificationPlan::default();

        assert!(matches!(
            plan.apply(dir.path()).await,
            Err(DomainError::NoModificationsApplied)
        ));
    }
}
