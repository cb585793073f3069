//! Normalized webhook payloads.
//!
//! Each supported webhook shape gets its own typed structure mirroring the
//! parts of GitHub's JSON that quick actions care about. [`EventPayload`]
//! wraps them in a closed enum and exposes one uniform, read-only view
//! (repository, issue number, body, lifecycle action). Quick actions that need
//! something event-specific match on the variant directly.

use serde::{Deserialize, Serialize};

use crate::types::{IssueNumber, RepoId};

use super::types::{EventAction, EventType};

/// A GitHub user or organization reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub id: Option<u64>,
}

/// Repository info present in every supported payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Account,
}

/// GitHub App installation that received the delivery.
///
/// Quick actions use the ID to obtain an installation-scoped API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<Account>,
    /// Present when the issue is actually a pull request.
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: IssueNumber,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<Account>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: Option<String>,
    pub user: Option<Account>,
}

/// An `issues` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub repository: Repository,
    pub sender: Option<Account>,
    pub installation: Option<Installation>,
}

/// An `issue_comment` event.
///
/// Comments on a pull request's conversation tab are delivered as issue
/// comments too; [`Issue::pull_request`] tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue: Issue,
    pub comment: Comment,
    pub repository: Repository,
    pub sender: Option<Account>,
    pub installation: Option<Installation>,
}

/// A `pull_request` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
    pub sender: Option<Account>,
    pub installation: Option<Installation>,
}

/// A `pull_request_review_comment` event (comment on a diff line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestReviewCommentEvent {
    pub action: String,
    pub comment: Comment,
    pub pull_request: PullRequest,
    pub repository: Repository,
    pub sender: Option<Account>,
    pub installation: Option<Installation>,
}

/// A normalized webhook delivery.
///
/// Built once per delivery by [`parse_payload`](super::parse_payload) and
/// shared, immutable, by every command extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Issues(IssuesEvent),
    IssueComment(IssueCommentEvent),
    PullRequest(PullRequestEvent),
    PullRequestReviewComment(PullRequestReviewCommentEvent),
}

impl EventPayload {
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::Issues(_) => EventType::Issues,
            EventPayload::IssueComment(_) => EventType::IssueComment,
            EventPayload::PullRequest(_) => EventType::PullRequest,
            EventPayload::PullRequestReviewComment(_) => EventType::PullRequestReviewComment,
        }
    }

    /// The `action` string exactly as GitHub sent it.
    pub fn raw_action(&self) -> &str {
        match self {
            EventPayload::Issues(e) => &e.action,
            EventPayload::IssueComment(e) => &e.action,
            EventPayload::PullRequest(e) => &e.action,
            EventPayload::PullRequestReviewComment(e) => &e.action,
        }
    }

    pub fn action(&self) -> EventAction {
        EventAction::from_github(self.raw_action())
    }

    fn repository(&self) -> &Repository {
        match self {
            EventPayload::Issues(e) => &e.repository,
            EventPayload::IssueComment(e) => &e.repository,
            EventPayload::PullRequest(e) => &e.repository,
            EventPayload::PullRequestReviewComment(e) => &e.repository,
        }
    }

    pub fn repository_owner(&self) -> &str {
        &self.repository().owner.login
    }

    pub fn repository_name(&self) -> &str {
        &self.repository().name
    }

    pub fn repo_id(&self) -> RepoId {
        RepoId::new(self.repository_owner(), self.repository_name())
    }

    /// The issue or pull request the event belongs to.
    pub fn issue_number(&self) -> IssueNumber {
        match self {
            EventPayload::Issues(e) => e.issue.number,
            EventPayload::IssueComment(e) => e.issue.number,
            EventPayload::PullRequest(e) => e.pull_request.number,
            EventPayload::PullRequestReviewComment(e) => e.pull_request.number,
        }
    }

    /// The free text scanned for commands.
    ///
    /// For comment events this is the comment, otherwise the issue or pull
    /// request description. A missing or `null` body is empty.
    pub fn body(&self) -> &str {
        let body = match self {
            EventPayload::Issues(e) => e.issue.body.as_deref(),
            EventPayload::IssueComment(e) => e.comment.body.as_deref(),
            EventPayload::PullRequest(e) => e.pull_request.body.as_deref(),
            EventPayload::PullRequestReviewComment(e) => e.comment.body.as_deref(),
        };
        body.unwrap_or_default()
    }

    pub fn sender_login(&self) -> Option<&str> {
        let sender = match self {
            EventPayload::Issues(e) => e.sender.as_ref(),
            EventPayload::IssueComment(e) => e.sender.as_ref(),
            EventPayload::PullRequest(e) => e.sender.as_ref(),
            EventPayload::PullRequestReviewComment(e) => e.sender.as_ref(),
        };
        sender.map(|account| account.login.as_str())
    }

    pub fn installation_id(&self) -> Option<u64> {
        let installation = match self {
            EventPayload::Issues(e) => e.installation,
            EventPayload::IssueComment(e) => e.installation,
            EventPayload::PullRequest(e) => e.installation,
            EventPayload::PullRequestReviewComment(e) => e.installation,
        };
        installation.map(|i| i.id)
    }

    /// Login of the comment author, for comment events only.
    pub fn comment_author(&self) -> Option<&str> {
        let comment = match self {
            EventPayload::IssueComment(e) => &e.comment,
            EventPayload::PullRequestReviewComment(e) => &e.comment,
            EventPayload::Issues(_) | EventPayload::PullRequest(_) => return None,
        };
        comment.user.as_ref().map(|user| user.login.as_str())
    }
}
