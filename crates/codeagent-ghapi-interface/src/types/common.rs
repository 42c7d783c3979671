use serde::{Deserialize, Serialize};

/// GitHub User.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhUser {
    /// Username.
    pub login: String,
}

fn default_branch_name() -> String {
    "main".into()
}

/// GitHub Repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, smart_default::SmartDefault)]
pub struct GhRepository {
    /// Name.
    pub name: String,
    /// Full name.
    pub full_name: String,
    /// Owner.
    pub owner: GhUser,
    /// Web URL.
    #[serde(default)]
    pub html_url: String,
    /// Clone URL.
    #[serde(default)]
    pub clone_url: String,
    /// Default branch.
    #[default(default_branch_name())]
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
}

/// GitHub Label.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GhLabel {
    /// Name.
    pub name: String,
    /// Color.
    #[serde(default)]
    pub color: String,
    /// Description.
    pub description: Option<String>,
}

/// GitHub Branch.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhBranch {
    /// Label.
    pub label: Option<String>,
    /// Reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// SHA.
    pub sha: String,
}
