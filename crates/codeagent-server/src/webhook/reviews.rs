//! Review webhook handlers.

use codeagent_core::use_cases::{
    comments::HandleReviewCommentEventInterface, reviews::HandleReviewEventInterface,
};
use codeagent_ghapi_interface::types::{GhReviewCommentEvent, GhReviewEvent};
use shaku::HasComponent;

use super::parse_event_type;
use crate::{event_type::EventType, server::AppContext, Result};

pub(crate) fn parse_review_event(body: &str) -> Result<GhReviewEvent> {
    parse_event_type(EventType::PullRequestReview, body)
}

pub(crate) fn parse_review_comment_event(body: &str) -> Result<GhReviewCommentEvent> {
    parse_event_type(EventType::PullRequestReviewComment, body)
}

pub(crate) async fn review_event(ctx: &AppContext, event: GhReviewEvent) -> Result<&'static str> {
    let ctx = ctx.as_core_context();
    let handle_review_event: &dyn HandleReviewEventInterface = ctx.core_module.resolve_ref();
    handle_review_event.run(&ctx, event).await?;

    Ok("Pull request review.")
}

pub(crate) async fn review_comment_event(
    ctx: &AppContext,
    event: GhReviewCommentEvent,
) -> Result<&'static str> {
    let ctx = ctx.as_core_context();
    let handle_review_comment_event: &dyn HandleReviewCommentEventInterface =
        ctx.core_module.resolve_ref();
    handle_review_comment_event.run(&ctx, event).await?;

    Ok("Pull request review comment.")
}
