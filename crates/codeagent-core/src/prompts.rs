//! Prompts sent to the AI backend.

use std::fmt::Write;

use codeagent_ghapi_interface::types::{GhIssue, GhPullRequest};

use crate::bot_commands::CommandContext;

/// Max characters of any issue, pull request or comment text copied into a prompt.
pub const MAX_EXCERPT_CHARS: usize = 2_000;

/// Cut a text at `max` characters.
pub fn excerpt(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((index, _)) => format!("{}...", &text[..index]),
    }
}

/// Describe the repository, issue, pull request, comment and user of a command.
pub fn project_context(ctx: &CommandContext) -> String {
    let mut out = String::new();
    let repository = ctx.repository;

    // Writing to a String cannot fail
    let _ = writeln!(out, "Repository:");
    let _ = writeln!(out, "- Full name: {}", repository.full_name);
    let _ = writeln!(out, "- Name: {}", repository.name);
    let _ = writeln!(out, "- URL: {}", repository.html_url);

    if let Some(issue) = ctx.issue {
        let labels: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
        let _ = writeln!(out, "\nIssue #{}:", issue.number);
        let _ = writeln!(out, "- Title: {}", issue.title);
        let _ = writeln!(
            out,
            "- Description: {}",
            excerpt(issue.body.as_deref().unwrap_or_default(), MAX_EXCERPT_CHARS)
        );
        let _ = writeln!(out, "- State: {:?}", issue.state);
        let _ = writeln!(out, "- Labels: {}", labels.join(", "));
    }

    if let Some(pr) = ctx.pull_request {
        let _ = writeln!(out, "\nPull request #{}:", pr.number);
        let _ = writeln!(out, "- Title: {}", pr.title);
        let _ = writeln!(
            out,
            "- Description: {}",
            excerpt(pr.body.as_deref().unwrap_or_default(), MAX_EXCERPT_CHARS)
        );
        let _ = writeln!(out, "- State: {:?}", pr.state);
        let _ = writeln!(
            out,
            "- Branches: {} -> {}",
            pr.head.reference, pr.base.reference
        );
    }

    if let Some(comment) = ctx.comment {
        let _ = writeln!(out, "\nComment:\n{}", excerpt(comment, MAX_EXCERPT_CHARS));
    }

    let _ = writeln!(out, "\nUser: {}", ctx.user.login);
    out
}

/// Modification request run inside the working copy.
pub fn code_generation(issue: &GhIssue) -> String {
    format!(
        "You are working inside a git repository. Implement the following request by editing \
         the files of this repository directly.\n\n\
         Request title: {}\n\n\
         Request description:\n{}\n\n\
         Requirements:\n\
         1. Read the relevant files before changing them.\n\
         2. Keep the existing code style.\n\
         3. Handle errors and edge cases.\n\
         4. Do not run shell commands.\n\n\
         When you are done, reply with a short summary of the changes.",
        issue.title,
        issue.body.as_deref().unwrap_or_default()
    )
}

pub fn continue_development(instruction: &str, context: &str) -> String {
    format!(
        "You are continuing a software development task. Follow this instruction:\n\n\
         Instruction:\n{instruction}\n\n\
         Current project context:\n{context}\n\n\
         Requirements:\n\
         1. Build on the existing code.\n\
         2. Keep the code style consistent.\n\
         3. Stay compatible with the existing code.\n\
         4. Comment where needed.\n\n\
         Continue the development:"
    )
}

pub fn fix_problem(problem: &str, context: &str) -> String {
    format!(
        "You are fixing a problem in a code base. Analyze and fix the following problem:\n\n\
         Problem:\n{problem}\n\n\
         Code context:\n{context}\n\n\
         Requirements:\n\
         1. Find the root cause.\n\
         2. Propose a fix.\n\
         3. Make sure the fixed code runs correctly.\n\
         4. Explain the fix in comments.\n\n\
         Fix the code:"
    )
}

pub fn review_pull_request(pr: &GhPullRequest, diff: &str, focus: &str, context: &str) -> String {
    format!(
        "Review pull request #{} \"{}\" ({} -> {}).\n\n\
         Project context:\n{context}\n\n\
         Reviewer focus: {}\n\n\
         Diff:\n```diff\n{diff}\n```\n\n\
         Answer with these sections:\n\
         1. Summary of the change.\n\
         2. Bugs and risks.\n\
         3. Code quality and readability.\n\
         4. Tests.\n\
         5. Verdict: approve, comment or request changes.",
        pr.number,
        pr.title,
        pr.head.reference,
        pr.base.reference,
        focus_or_default(focus),
    )
}

pub fn review_project(file_tree: &str, focus: &str, context: &str) -> String {
    format!(
        "Review the whole project described below.\n\n\
         Project context:\n{context}\n\n\
         Reviewer focus: {}\n\n\
         File tree:\n{file_tree}\n\n\
         Answer with these sections:\n\
         1. Architecture overview.\n\
         2. Strengths.\n\
         3. Problems and risks.\n\
         4. Prioritized recommendations.",
        focus_or_default(focus),
    )
}

pub fn summarize_project(context: &str, file_tree: &str, focus: &str) -> String {
    format!(
        "Summarize the project described below.\n\n\
         Project context:\n{context}\n\n\
         File tree:\n{file_tree}\n\n\
         User focus: {}\n\n\
         Describe the purpose of the project, its main components, \
         the technologies it uses and how to get started.",
        focus_or_default(focus),
    )
}

/// First step of the plan strategy.
pub fn analyze_issue(issue: &GhIssue, file_tree: &str) -> String {
    format!(
        "Analyze the following issue and find which files must change.\n\n\
         Issue:\n- Title: {}\n- Description: {}\n\n\
         Project structure:\n{file_tree}\n\n\
         Tasks:\n\
         1. Understand what the user asks for.\n\
         2. List the file paths to change.\n\
         3. Describe the concrete code changes.\n\
         4. Explain the reasons and impacts of the changes.",
        issue.title,
        issue.body.as_deref().unwrap_or_default()
    )
}

/// Second step of the plan strategy, asking for a strict JSON answer.
pub fn modification_plan(issue: &GhIssue, analysis: &str) -> String {
    format!(
        "You are a code modification assistant. Produce a concrete modification plan.\n\n\
         Issue #{}:\n- Title: {}\n- Description: {}\n\n\
         Analysis:\n{analysis}\n\n\
         Answer ONLY with valid JSON, without any other text, in this format:\n\
         {{\n  \"modifications\": [\n    {{\n      \"file\": \"path/to/file\",\n      \
         \"action\": \"create|modify|delete\",\n      \
         \"content\": \"full new file content for create and modify\",\n      \
         \"description\": \"what changed\"\n    }}\n  ],\n  \"summary\": \"summary of the changes\"\n}}",
        issue.number,
        issue.title,
        issue.body.as_deref().unwrap_or_default()
    )
}

fn focus_or_default(focus: &str) -> &str {
    if focus.is_empty() {
        "general"
    } else {
        focus
    }
}

#[cfg(test)]
mod tests {
    use codeagent_ghapi_interface::types::{GhLabel, GhRepository, GhUser};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bot_commands::CommandContextTest;

    #[test]
    fn excerpt_is_char_safe() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("登录登录登录", 2), "登录...");
    }

    #[test]
    fn context_lists_known_parts() {
        let mut ctx = CommandContextTest::new();
        ctx.repository = GhRepository {
            name: "name".into(),
            full_name: "owner/name".into(),
            owner: GhUser {
                login: "owner".into(),
            },
            ..Default::default()
        };
        ctx.issue = Some(GhIssue {
            number: 3,
            title: "Crash".into(),
            body: Some("x".repeat(MAX_EXCERPT_CHARS + 10)),
            labels: vec![
                GhLabel {
                    name: "bug".into(),
                    ..Default::default()
                },
                GhLabel {
                    name: "urgent".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        ctx.user = GhUser { login: "me".into() };

        let text = project_context(&ctx.as_context());
        assert!(text.contains("- Full name: owner/name"));
        assert!(text.contains("Issue #3:"));
        assert!(text.contains("- Labels: bug, urgent"));
        assert!(text.contains(&format!("{}...", "x".repeat(MAX_EXCERPT_CHARS))));
        assert!(!text.contains("Pull request"));
        assert!(text.ends_with("User: me\n"));
    }

    #[test]
    fn plan_prompt_shows_json_format() {
        let issue = GhIssue {
            number: 5,
            title: "Add endpoint".into(),
            ..Default::default()
        };

        let prompt = modification_plan(&issue, "touch src/main.rs");
        assert!(prompt.contains("\"modifications\": ["));
        assert!(prompt.contains("Issue #5:"));
        assert!(prompt.contains("touch src/main.rs"));
    }
}
