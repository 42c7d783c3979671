//! Core module: command handling, workspaces and event use cases.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

pub mod bot_commands;
pub mod commit_message;
mod context;
pub mod errors;
pub mod prompts;
pub mod replies;
pub mod use_cases;
pub mod workspace;

use bot_commands::executor::CommandExecutor;
pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    comments::{
        handle_issue_comment_event::HandleIssueCommentEvent,
        handle_review_comment_event::HandleReviewCommentEvent,
    },
    issues::handle_issues_event::HandleIssuesEvent,
    modify::auto_modify_issue::AutoModifyIssue,
    pulls::handle_pull_request_event::HandlePullRequestEvent,
    reviews::handle_review_event::HandleReviewEvent,
};

module! {
    pub CoreModule {
        components = [
            CommandExecutor, AutoModifyIssue, HandleIssuesEvent,
            HandleIssueCommentEvent, HandleReviewCommentEvent,
            HandlePullRequestEvent, HandleReviewEvent
        ],
        providers = []
    }
}
