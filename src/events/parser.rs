//! Webhook payload normalizer.
//!
//! Turns the `X-GitHub-Event` header plus the raw JSON body into an
//! [`EventPayload`].
//!
//! # Parsing Strategy
//!
//! 1. The event type is looked up from the header value; unknown types fail
//!    with [`ParseError::UnsupportedEvent`]
//! 2. The body is deserialized into the structure for that event type
//! 3. Unknown JSON fields are ignored; missing required objects fail with
//!    [`ParseError::Decode`]
//!
//! The mapping is an explicit `match` on [`EventType`]; the payload shape is
//! never sniffed.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::payload::EventPayload;
use super::types::EventType;

/// Error type for payload normalization failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The event type header names an event the normalizer does not handle.
    #[error("event type '{0}' not managed")]
    UnsupportedEvent(String),

    /// The body could not be deserialized into the expected shape.
    #[error("failed to extract data from JSON for event '{event_type}': {source}")]
    Decode {
        event_type: EventType,
        #[source]
        source: serde_json::Error,
    },
}

/// Normalizes a raw webhook delivery.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-GitHub-Event` header
/// * `payload` - The raw JSON payload bytes
///
/// # Examples
///
/// ```
/// use quick_actions::events::{parse_payload, EventAction, EventType};
///
/// let payload = br#"{
///     "action": "created",
///     "comment": { "id": 1, "body": "/label bug" },
///     "issue": { "number": 42 },
///     "repository": { "owner": { "login": "octo" }, "name": "repo" }
/// }"#;
///
/// let event = parse_payload("issue_comment", payload).unwrap();
/// assert_eq!(event.event_type(), EventType::IssueComment);
/// assert_eq!(event.action(), EventAction::Created);
/// assert_eq!(event.body(), "/label bug");
/// ```
pub fn parse_payload(event_type: &str, payload: &[u8]) -> Result<EventPayload, ParseError> {
    let event_type: EventType = event_type.parse()?;

    match event_type {
        EventType::Issues => decode(event_type, payload).map(EventPayload::Issues),
        EventType::IssueComment => decode(event_type, payload).map(EventPayload::IssueComment),
        EventType::PullRequest => decode(event_type, payload).map(EventPayload::PullRequest),
        EventType::PullRequestReviewComment => {
            decode(event_type, payload).map(EventPayload::PullRequestReviewComment)
        }
    }
}

fn decode<T: DeserializeOwned>(event_type: EventType, payload: &[u8]) -> Result<T, ParseError> {
    serde_json::from_slice(payload).map_err(|source| ParseError::Decode { event_type, source })
}
