//! Webhook payload parsing tests

use codeagent_ghapi_interface::types::{
    GhIssueCommentAction, GhIssuesAction, GhReviewAction, GhReviewState,
};
use pretty_assertions::assert_eq;

use super::fixtures;
use crate::{
    webhook::{
        issues::{parse_issue_comment_event, parse_issues_event},
        ping::parse_ping_event,
        reviews::parse_review_event,
    },
    Result as ServerResult, ServerError,
};

#[test]
fn test_ping_event_parsing() -> ServerResult<()> {
    let event = parse_ping_event(fixtures::PING_EVENT_DATA)?;

    assert_eq!(event.zen, "Favor focus over features.");
    assert_eq!(event.hook_id, 12_345_678);
    assert_eq!(event.repository.unwrap().full_name, "Example/test-repo");
    assert_eq!(event.sender.unwrap().login, "Example");

    Ok(())
}

#[test]
fn test_issues_opened_event_parsing() -> ServerResult<()> {
    let event = parse_issues_event(fixtures::ISSUES_OPENED_DATA)?;

    assert_eq!(event.action, GhIssuesAction::Opened);
    assert_eq!(event.issue.number, 3);
    assert_eq!(event.issue.labels[0].name, "enhancement");
    assert!(!event.issue.is_pull_request());
    assert_eq!(
        event.repository.clone_url,
        "https://github.com/Example/test-repo.git"
    );

    Ok(())
}

#[test]
fn test_issue_comment_created_event_parsing() -> ServerResult<()> {
    let event = parse_issue_comment_event(fixtures::ISSUE_COMMENT_CREATED_DATA)?;

    assert_eq!(event.action, GhIssueCommentAction::Created);
    assert!(event.issue.is_pull_request());
    assert_eq!(event.comment.body, "/review performance");
    // Missing in the payload, falls back.
    assert_eq!(event.repository.default_branch, "main");

    Ok(())
}

#[test]
fn test_review_submitted_event_parsing() -> ServerResult<()> {
    let event = parse_review_event(fixtures::PULL_REQUEST_REVIEW_SUBMITTED_DATA)?;

    assert_eq!(event.action, GhReviewAction::Submitted);
    assert_eq!(event.review.state, GhReviewState::ChangesRequested);
    assert_eq!(event.pull_request.head.reference, "feature/cache");
    assert_eq!(event.pull_request.base.reference, "main");

    Ok(())
}

#[test]
fn test_malformed_payload() {
    assert!(matches!(
        parse_issues_event("{\"action\": \"opened\"}"),
        Err(ServerError::EventParseError { .. })
    ));
}
