//! Event type and lifecycle action enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::ParseError;

/// The webhook event shapes the normalizer understands.
///
/// The variant is selected from the `X-GitHub-Event` header; it is also the
/// outer key of the action registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// An issue was opened, edited, closed, ... (`issues`).
    Issues,
    /// A comment on an issue or on a pull request's conversation tab.
    IssueComment,
    /// A pull request was opened, edited, synchronized, ...
    PullRequest,
    /// A comment on a pull request diff.
    PullRequestReviewComment,
}

impl EventType {
    /// All supported event types, in declaration order.
    pub const ALL: [EventType; 4] = [
        EventType::Issues,
        EventType::IssueComment,
        EventType::PullRequest,
        EventType::PullRequestReviewComment,
    ];

    /// Returns the canonical `X-GitHub-Event` value for this type.
    pub fn as_tag(&self) -> &'static str {
        match self {
            EventType::Issues => "issues",
            EventType::IssueComment => "issue_comment",
            EventType::PullRequest => "pull_request",
            EventType::PullRequestReviewComment => "pull_request_review_comment",
        }
    }

    /// Looks up an event type from its header value.
    ///
    /// The singular `issue` is accepted as an alias of `issues`.
    pub fn from_tag(tag: &str) -> Option<EventType> {
        match tag {
            "issues" | "issue" => Some(EventType::Issues),
            "issue_comment" => Some(EventType::IssueComment),
            "pull_request" => Some(EventType::PullRequest),
            "pull_request_review_comment" => Some(EventType::PullRequestReviewComment),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EventType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::from_tag(s).ok_or_else(|| ParseError::UnsupportedEvent(s.to_string()))
    }
}

/// Lifecycle state reported by a payload.
///
/// Only [`EventAction::Created`] payloads are scanned for commands, so that
/// editing or deleting a comment never re-runs its quick actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventAction {
    /// The comment, issue or pull request was created.
    Created,
    /// The body was edited.
    Edited,
    /// The comment or issue was deleted.
    Deleted,
    /// Any other lifecycle action GitHub reports (`opened`, `labeled`, ...).
    Other(String),
}

impl EventAction {
    /// Maps GitHub's raw `action` string.
    ///
    /// Only the literal `created` is a creation. Issues and pull requests
    /// report `opened` instead, which is kept as [`EventAction::Other`].
    pub fn from_github(action: &str) -> EventAction {
        match action {
            "created" => EventAction::Created,
            "edited" => EventAction::Edited,
            "deleted" => EventAction::Deleted,
            other => EventAction::Other(other.to_string()),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, EventAction::Created)
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventAction::Created => f.write_str("created"),
            EventAction::Edited => f.write_str("edited"),
            EventAction::Deleted => f.write_str("deleted"),
            EventAction::Other(action) => f.write_str(action),
        }
    }
}
