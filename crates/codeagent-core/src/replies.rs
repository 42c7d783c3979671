//! Comment templates.

use codeagent_ghapi_interface::types::GhIssue;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    bot_commands::Command,
    use_cases::modify::{AppliedModification, PullRequestOutcome},
    workspace::WorkspaceError,
    DomainError,
};

/// UTC timestamp shown at the bottom of replies.
pub fn timestamp(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
    ))
    .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn footer(now: OffsetDateTime) -> String {
    format!("---\n*Processed at {}*", timestamp(now))
}

pub fn help(bot_name: &str) -> String {
    format!(
        "📖 **{bot_name} help**\n\n\
         **Commands:**\n\n\
         - `/code <request>`: implement the request and open a pull request\n\
         - `/continue [instruction]`: continue the current development task\n\
         - `/fix <problem>`: propose a fix for the described problem\n\
         - `/review [focus]`: review the pull request, or the whole project from an issue\n\
         - `/summary [focus]`: summarize the project\n\
         - `/help`: show this message\n\n\
         **Examples:**\n\
         - `/code add a user login endpoint`\n\
         - `/continue add input validation`\n\
         - `/fix null pointer on startup`\n\
         - `/review error handling`\n\n\
         Only the first command of a comment is run."
    )
}

pub fn continue_report(instruction: &str, output: &str, now: OffsetDateTime) -> String {
    format!(
        "🔄 **Continued development**\n\n\
         {instruction}\n\n\
         **Result:**\n\n\
         {output}\n\n\
         {}",
        footer(now)
    )
}

pub fn fix_report(problem: &str, output: &str, now: OffsetDateTime) -> String {
    format!(
        "🔧 **Code fix**\n\n\
         Problem: {problem}\n\n\
         **Proposed fix:**\n\n\
         {output}\n\n\
         {}",
        footer(now)
    )
}

pub fn review_report(pr_number: Option<u64>, output: &str) -> String {
    let title = match pr_number {
        Some(number) => format!("🔍 **Review of pull request #{number}**"),
        None => "🔍 **Project review**".to_string(),
    };

    format!("{title}\n\n{output}")
}

pub fn summary_report(repository: &str, output: &str) -> String {
    format!("📋 **Summary of {repository}**\n\n{output}")
}

pub fn code_success(issue: &GhIssue, applied: &AppliedModification, now: OffsetDateTime) -> String {
    let pull_request = match &applied.pull_request {
        PullRequestOutcome::Created(pr) => format!("🔗 Pull request created: {}", pr.html_url),
        PullRequestOutcome::AlreadyExists => "🔗 A pull request already exists for this branch".into(),
    };
    let files: Vec<String> = applied.files.iter().map(|f| format!("- `{f}`")).collect();

    format!(
        "🤖 **Automatic change completed**\n\n\
         ## Issue\n\
         - **Title**: {}\n\
         - **Number**: #{}\n\n\
         ## Steps\n\
         1. ✅ Cloned the repository\n\
         2. ✅ Created branch `{}`\n\
         3. ✅ Generated code changes\n\
         4. ✅ Committed and pushed\n\
         5. ✅ Opened a pull request\n\n\
         ## Result\n\
         {}\n\n\
         ## Modified files\n\
         {}\n\n\
         ## Commit message\n\
         ```\n{}\n```\n\n\
         {pull_request}\n\n\
         Review the changes in the pull request before merging.\n\n\
         {}",
        issue.title,
        issue.number,
        applied.branch,
        applied.summary,
        files.join("\n"),
        applied.commit_message,
        footer(now)
    )
}

pub fn no_changes(issue: &GhIssue, branch: &str, now: OffsetDateTime) -> String {
    format!(
        "ℹ️ **No changes**\n\n\
         The AI backend ran for issue #{} on branch `{branch}` but left the code untouched, \
         so nothing was committed.\n\n\
         Try a more detailed request.\n\n\
         {}",
        issue.number,
        footer(now)
    )
}

pub fn failure(command: &Command, error: &DomainError, now: OffsetDateTime) -> String {
    if let DomainError::WorkspaceError {
        source: WorkspaceError::RateLimited { retry_after, .. },
    } = error
    {
        return format!(
            "⏳ **Please wait**\n\n\
             > {}\n\n\
             This repository was cloned recently. Retry in {} seconds.\n\n\
             {}",
            command.to_command_string(),
            retry_after.as_secs(),
            footer(now)
        );
    }

    format!(
        "❌ **Command `/{}` failed**\n\n\
         > {}\n\n\
         Error: {error}\n\n\
         Check that:\n\
         - the AI backend is configured and reachable\n\
         - the bot can clone and push to this repository\n\n\
         {}",
        command.name,
        command.to_command_string(),
        footer(now)
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use codeagent_ai_interface::AiError;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;
    use crate::bot_commands::CommandName;

    const NOW: OffsetDateTime = datetime!(2024-05-06 07:08:09 UTC);

    #[test]
    fn utc_timestamp() {
        assert_eq!(timestamp(NOW), "2024-05-06 07:08:09 UTC");
    }

    #[test]
    fn rate_limited_failure() {
        let command = Command::new(CommandName::Summary, "");
        let error = DomainError::WorkspaceError {
            source: WorkspaceError::RateLimited {
                url: "https://github.com/owner/name.git".into(),
                retry_after: Duration::from_secs(120),
            },
        };

        let reply = failure(&command, &error, NOW);
        assert!(reply.contains("Retry in 120 seconds"));
        assert!(reply.contains("> /summary"));
    }

    #[test]
    fn generic_failure() {
        let command = Command::new(CommandName::Fix, "crash");
        let error = DomainError::AiError {
            source: AiError::EmptyOutput,
        };

        let reply = failure(&command, &error, NOW);
        assert!(reply.starts_with("❌ **Command `/fix` failed**"));
        assert!(reply.contains("> /fix crash"));
        assert!(reply.ends_with("*Processed at 2024-05-06 07:08:09 UTC*"));
    }
}
