//! Webhook handlers.

mod issues;
mod ping;
mod pulls;
mod reviews;

#[cfg(test)]
mod tests;

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use self::{
    issues::{parse_issue_comment_event, parse_issues_event},
    ping::parse_ping_event,
    pulls::parse_pull_request_event,
    reviews::{parse_review_comment_event, parse_review_event},
};
use crate::{
    constants::{GITHUB_DELIVERY_HEADER, GITHUB_EVENT_HEADER},
    event_type::EventType,
    server::AppContext,
    Result, ServerError,
};

/// Webhook answer body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookResponse {
    /// Processing summary.
    pub message: String,
    /// Raw event type header.
    pub event_type: String,
    /// Delivery identifier, empty if absent.
    pub delivery_id: String,
}

#[tracing::instrument(skip(ctx, body))]
async fn parse_event(
    ctx: &AppContext,
    event_type: EventType,
    event_name: &str,
    body: &str,
) -> Result<&'static str> {
    match event_type {
        EventType::Issues => issues::issues_event(ctx, parse_issues_event(body)?).await,
        EventType::IssueComment => {
            issues::issue_comment_event(ctx, parse_issue_comment_event(body)?).await
        }
        EventType::Ping => Ok(ping::ping_event(parse_ping_event(body)?)),
        EventType::PullRequest => {
            pulls::pull_request_event(ctx, parse_pull_request_event(body)?).await
        }
        EventType::PullRequestReview => {
            reviews::review_event(ctx, parse_review_event(body)?).await
        }
        EventType::PullRequestReviewComment => {
            reviews::review_comment_event(ctx, parse_review_comment_event(body)?).await
        }
        EventType::Unknown => {
            info!(event_name, message = "Ignoring unsupported event");
            Ok("Event ignored.")
        }
    }
}

fn parse_event_type<'de, T>(event_type: EventType, body: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|e| ServerError::EventParseError {
        event_type,
        source: e,
    })
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|x| x.to_str().ok())
}

async fn read_payload(payload: &mut web::Payload) -> Result<String> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk.map_err(|_| ServerError::BadPayload)?);
    }

    String::from_utf8(body.to_vec()).map_err(|_| ServerError::BadPayload)
}

#[tracing::instrument(skip_all, fields(event_name, delivery_id))]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    let event_name = header_value(&req, GITHUB_EVENT_HEADER)
        .ok_or(ServerError::MissingEventType)?
        .to_owned();
    let delivery_id = header_value(&req, GITHUB_DELIVERY_HEADER)
        .unwrap_or_default()
        .to_owned();
    tracing::Span::current()
        .record("event_name", event_name.as_str())
        .record("delivery_id", delivery_id.as_str());

    let body = read_payload(&mut payload).await?;
    let event_type = EventType::from(event_name.as_str());

    match parse_event(&ctx, event_type, &event_name, &body).await {
        Ok(message) => Ok(HttpResponse::Ok().json(WebhookResponse {
            message: message.into(),
            event_type: event_name,
            delivery_id,
        })),
        Err(e) => {
            error!(error = %e, message = "Webhook processing failed");
            Err(e.into())
        }
    }
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(event_handler)));
}
