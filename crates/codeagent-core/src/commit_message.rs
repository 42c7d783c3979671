//! Conventional commit messages.

use std::{fmt::Display, str::FromStr};

use codeagent_ghapi_interface::types::GhIssue;

const MAX_DESCRIPTION_CHARS: usize = 50;
const STRIPPED_EMOJIS: [&str; 3] = ["🤖", "✨", "🐛"];
const DEPENDENCY_MANIFESTS: [&str; 5] =
    ["go.mod", "go.sum", "Cargo.toml", "Cargo.lock", "package.json"];

/// Keyword groups, scanned in order.
const TYPE_KEYWORDS: [(CommitType, &[&str]); 7] = [
    (
        CommitType::Fix,
        &["修复", "解决", "fix", "solve", "bug", "错误", "问题", "异常", "故障"],
    ),
    (
        CommitType::Refactor,
        &["重构", "优化", "refactor", "optimize", "improve", "clean", "整理"],
    ),
    (CommitType::Docs, &["文档", "doc", "readme", "注释", "说明"]),
    (CommitType::Test, &["测试", "test", "单元测试", "集成测试"]),
    (
        CommitType::Perf,
        &["性能", "performance", "perf", "速度", "优化性能"],
    ),
    (
        CommitType::Ci,
        &["ci", "cd", "pipeline", "workflow", "actions", "jenkins"],
    ),
    (
        CommitType::Build,
        &["构建", "build", "webpack", "docker", "makefile"],
    ),
];

/// Conventional commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Refactor,
    Docs,
    Style,
    Test,
    Chore,
    Perf,
    Build,
    Ci,
    Revert,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Perf => "perf",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Revert => "revert",
        }
    }

    /// Guess the commit type from a title and a body.
    pub fn detect(title: &str, body: &str) -> Self {
        let content = format!("{} {}", title.to_lowercase(), body.to_lowercase());

        TYPE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| content.contains(k)))
            .map(|(commit_type, _)| *commit_type)
            .unwrap_or(Self::Feat)
    }
}

impl FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "feat" => Self::Feat,
            "fix" => Self::Fix,
            "refactor" => Self::Refactor,
            "docs" => Self::Docs,
            "style" => Self::Style,
            "test" => Self::Test,
            "chore" => Self::Chore,
            "perf" => Self::Perf,
            "build" => Self::Build,
            "ci" => Self::Ci,
            "revert" => Self::Revert,
            _ => return Err(()),
        })
    }
}

impl Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub breaking: bool,
}

impl CommitMessage {
    /// Parse a `type(scope)!: description` header line.
    pub fn parse_header(message: &str) -> Option<Self> {
        let header = message.lines().next()?;
        let (prefix, description) = header.split_once(": ")?;
        let (prefix, breaking) = match prefix.strip_suffix('!') {
            Some(prefix) => (prefix, true),
            None => (prefix, false),
        };

        let (commit_type, scope) = match prefix.split_once('(') {
            Some((commit_type, scope)) => (commit_type, Some(scope.strip_suffix(')')?)),
            None => (prefix, None),
        };

        Some(Self {
            commit_type: commit_type.parse().ok()?,
            scope: scope.filter(|s| !s.is_empty()).map(str::to_string),
            description: description.to_string(),
            body: None,
            footer: None,
            breaking,
        })
    }
}

impl Display for CommitMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({scope})")?;
        }
        if self.breaking {
            f.write_str("!")?;
        }
        write!(f, ": {}", self.description)?;

        for section in [&self.body, &self.footer].into_iter().flatten() {
            write!(f, "\n\n{section}")?;
        }

        Ok(())
    }
}

/// Commit for changes generated from an issue.
pub fn build_auto_fix_commit(issue: &GhIssue, modified_files: &[String]) -> CommitMessage {
    let body = issue.body.as_deref().unwrap_or_default();

    CommitMessage {
        commit_type: CommitType::detect(&issue.title, body),
        scope: detect_scope(modified_files).map(str::to_string),
        description: build_description(&issue.title),
        body: Some(format!(
            "Code changes generated by the AI assistant\n\nModified files:\n{}",
            modified_files.join("\n")
        )),
        footer: Some(format!(
            "Closes #{}\nIssue: {}",
            issue.number, issue.html_url
        )),
        breaking: false,
    }
}

/// Commit for a pull request.
pub fn build_pr_commit(title: &str, description: &str, number: u64) -> CommitMessage {
    CommitMessage {
        commit_type: CommitType::detect(title, description),
        scope: None,
        description: build_description(title),
        body: None,
        footer: Some(format!("PR #{number}")),
        breaking: false,
    }
}

/// Commit with explicit parts.
pub fn build_manual_commit(
    commit_type: CommitType,
    scope: Option<&str>,
    description: &str,
    body: Option<&str>,
    footer: Option<&str>,
) -> CommitMessage {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

    CommitMessage {
        commit_type,
        scope: scope.and_then(non_empty),
        description: description.to_string(),
        body: body.and_then(non_empty),
        footer: footer.and_then(non_empty),
        breaking: false,
    }
}

/// Most frequent scope across files, first seen on ties.
pub fn detect_scope(files: &[String]) -> Option<&'static str> {
    let mut counts: Vec<(&'static str, usize)> = vec![];
    for scope in files.iter().filter_map(|f| file_scope(f)) {
        match counts.iter_mut().find(|(s, _)| *s == scope) {
            Some((_, count)) => *count += 1,
            None => counts.push((scope, 1)),
        }
    }

    let mut selected: Option<(&'static str, usize)> = None;
    for (scope, count) in counts {
        if selected.map_or(true, |(_, max)| count > max) {
            selected = Some((scope, count));
        }
    }

    selected.map(|(scope, _)| scope)
}

fn file_scope(path: &str) -> Option<&'static str> {
    let (directory, filename) = match path.rfind('/') {
        Some(index) => path.split_at(index + 1),
        None => ("", path),
    };

    for scope in ["handlers", "services", "models", "config", "cmd", "pkg"] {
        if directory.contains(&format!("{scope}/")) {
            return Some(scope);
        }
    }

    if filename.contains("test") {
        Some("test")
    } else if filename.ends_with(".md") {
        Some("docs")
    } else if filename.contains("docker") || filename.contains("Dockerfile") {
        Some("docker")
    } else if DEPENDENCY_MANIFESTS.contains(&filename) {
        Some("deps")
    } else {
        None
    }
}

/// Commit description from an issue or pull request title.
pub fn build_description(title: &str) -> String {
    let mut description = strip_issue_number(title.trim()).to_string();
    for emoji in STRIPPED_EMOJIS {
        description = description.replace(emoji, "").trim().to_string();
    }

    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        let truncated: String = description
            .chars()
            .take(MAX_DESCRIPTION_CHARS - 3)
            .collect();
        format!("{truncated}...")
    } else {
        description
    }
}

fn strip_issue_number(title: &str) -> &str {
    let Some((first, rest)) = title.split_once(' ') else {
        return title;
    };

    let is_issue_token = first
        .rfind('#')
        .map(|index| &first[index + 1..])
        .is_some_and(|number| !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()));

    if first.starts_with('#') || is_issue_token {
        rest.trim_start()
    } else {
        title
    }
}
