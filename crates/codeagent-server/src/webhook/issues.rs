//! Issue webhook handlers.

use codeagent_core::use_cases::{
    comments::HandleIssueCommentEventInterface, issues::HandleIssuesEventInterface,
};
use codeagent_ghapi_interface::types::{GhIssueCommentEvent, GhIssuesEvent};
use shaku::HasComponent;

use super::parse_event_type;
use crate::{event_type::EventType, server::AppContext, Result};

pub(crate) fn parse_issues_event(body: &str) -> Result<GhIssuesEvent> {
    parse_event_type(EventType::Issues, body)
}

pub(crate) fn parse_issue_comment_event(body: &str) -> Result<GhIssueCommentEvent> {
    parse_event_type(EventType::IssueComment, body)
}

pub(crate) async fn issues_event(ctx: &AppContext, event: GhIssuesEvent) -> Result<&'static str> {
    let ctx = ctx.as_core_context();
    let handle_issues_event: &dyn HandleIssuesEventInterface = ctx.core_module.resolve_ref();
    handle_issues_event.run(&ctx, event).await?;

    Ok("Issue.")
}

pub(crate) async fn issue_comment_event(
    ctx: &AppContext,
    event: GhIssueCommentEvent,
) -> Result<&'static str> {
    let ctx = ctx.as_core_context();
    let handle_issue_comment_event: &dyn HandleIssueCommentEventInterface =
        ctx.core_module.resolve_ref();
    handle_issue_comment_event.run(&ctx, event).await?;

    Ok("Issue comment.")
}
