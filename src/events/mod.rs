//! Webhook event normalization.
//!
//! This module provides:
//! - [`EventType`] and [`EventAction`], the closed enumerations the rest of
//!   the crate keys on
//! - [`EventPayload`], the uniform read-only view over the supported
//!   webhook shapes
//! - [`parse_payload`], which builds an `EventPayload` from the event type
//!   header and the raw body
//!
//! # Event Types
//!
//! | Header | Body scanned for commands |
//! |--------|---------------------------|
//! | `issues` | issue description |
//! | `issue_comment` | comment |
//! | `pull_request` | pull request description |
//! | `pull_request_review_comment` | comment |

pub mod parser;
pub mod payload;
pub mod types;

pub use parser::{ParseError, parse_payload};
pub use payload::{
    Account, Comment, EventPayload, Installation, Issue, IssueCommentEvent, IssuesEvent,
    PullRequest, PullRequestEvent, PullRequestReviewCommentEvent, Repository,
};
pub use types::{EventAction, EventType};
