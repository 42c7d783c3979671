//! Pull request webhook handlers.

use codeagent_core::use_cases::pulls::HandlePullRequestEventInterface;
use codeagent_ghapi_interface::types::GhPullRequestEvent;
use shaku::HasComponent;

use super::parse_event_type;
use crate::{event_type::EventType, server::AppContext, Result};

pub(crate) fn parse_pull_request_event(body: &str) -> Result<GhPullRequestEvent> {
    parse_event_type(EventType::PullRequest, body)
}

pub(crate) async fn pull_request_event(
    ctx: &AppContext,
    event: GhPullRequestEvent,
) -> Result<&'static str> {
    let ctx = ctx.as_core_context();
    let handle_pull_request_event: &dyn HandlePullRequestEventInterface =
        ctx.core_module.resolve_ref();
    handle_pull_request_event.run(&ctx, event).await?;

    Ok("Pull request.")
}
