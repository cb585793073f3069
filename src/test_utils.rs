//! Shared test utilities: a scriptable quick action, webhook fixtures and
//! arbitrary generators for property-based testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::json;

use crate::actions::{EventContext, QuickAction};
use crate::commands::EventCommand;
use crate::events::{EventPayload, EventType, parse_payload};
use crate::types::DeliveryId;

/// Command names in invocation order, shared by several actions.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, command: &str) {
        self.0.lock().unwrap().push(command.to_string());
    }
}

/// What a handler saw of its context, captured for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenContext {
    pub delivery_id: DeliveryId,
    pub event_type: EventType,
    pub repo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Succeed,
    Fail,
    CancelAndHang,
}

/// A quick action that records its calls and does what the test tells it.
#[derive(Debug)]
pub struct RecordingAction {
    events: Vec<EventType>,
    behavior: Behavior,
    failure: String,
    log: Option<CallLog>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
    last_context: Mutex<Option<SeenContext>>,
}

impl RecordingAction {
    pub fn new(events: &[EventType]) -> Self {
        RecordingAction {
            events: events.to_vec(),
            behavior: Behavior::Succeed,
            failure: String::new(),
            log: None,
            calls: Mutex::new(Vec::new()),
            last_context: Mutex::new(None),
        }
    }

    /// A succeeding action, ready to register.
    pub fn on(events: &[EventType]) -> Arc<Self> {
        Arc::new(Self::new(events))
    }

    /// Returns `message` as the error of every call.
    pub fn failing(mut self, message: &str) -> Self {
        self.behavior = Behavior::Fail;
        self.failure = message.to_string();
        self
    }

    /// Cancels the delivery, then never completes.
    pub fn cancel_and_hang(mut self) -> Self {
        self.behavior = Behavior::CancelAndHang;
        self
    }

    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// (command, arguments) for every call so far.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_context(&self) -> Option<SeenContext> {
        self.last_context.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuickAction for RecordingAction {
    fn trigger_on_events(&self) -> Vec<EventType> {
        self.events.clone()
    }

    async fn handle_command(
        &self,
        ctx: &EventContext,
        command: &EventCommand,
    ) -> anyhow::Result<()> {
        if let Some(log) = &self.log {
            log.push(&command.command);
        }
        *self.last_context.lock().unwrap() = Some(SeenContext {
            delivery_id: ctx.delivery_id.clone(),
            event_type: command.payload.event_type(),
            repo: command.payload.repo_id().to_string(),
        });

        match self.behavior {
            Behavior::Succeed => {}
            Behavior::Fail => anyhow::bail!("{}", self.failure),
            Behavior::CancelAndHang => {
                ctx.cancel.cancel();
                std::future::pending::<()>().await;
            }
        }

        self.calls
            .lock()
            .unwrap()
            .push((command.command.clone(), command.arguments.clone()));
        Ok(())
    }
}

// ─── Webhook fixtures ───

/// A minimal GitHub webhook body for `event_type`, with `body` as the text
/// scanned for commands.
pub fn webhook_json(event_type: EventType, action: &str, body: &str) -> serde_json::Value {
    let repository = json!({ "owner": { "login": "octo" }, "name": "widgets" });
    let sender = json!({ "id": 1, "login": "octocat" });

    match event_type {
        EventType::Issues => json!({
            "action": action,
            "issue": { "number": 42, "title": "Crash", "body": body },
            "repository": repository,
            "sender": sender,
        }),
        EventType::IssueComment => json!({
            "action": action,
            "issue": { "number": 42, "title": "Crash" },
            "comment": { "id": 7, "body": body, "user": sender },
            "repository": repository,
            "sender": sender,
        }),
        EventType::PullRequest => json!({
            "action": action,
            "number": 42,
            "pull_request": { "number": 42, "title": "Fix crash", "body": body },
            "repository": repository,
            "sender": sender,
        }),
        EventType::PullRequestReviewComment => json!({
            "action": action,
            "pull_request": { "number": 42, "title": "Fix crash" },
            "comment": { "id": 7, "body": body, "user": sender },
            "repository": repository,
            "sender": sender,
        }),
    }
}

pub fn webhook_body(event_type: EventType, action: &str, body: &str) -> Vec<u8> {
    serde_json::to_vec(&webhook_json(event_type, action, body)).unwrap()
}

/// A normalized `created` payload of `event_type` carrying `body`.
pub fn payload_with_body(event_type: EventType, body: &str) -> Arc<EventPayload> {
    let bytes = webhook_body(event_type, "created", body);
    Arc::new(parse_payload(event_type.as_tag(), &bytes).unwrap())
}

pub fn comment_payload(body: &str) -> Arc<EventPayload> {
    payload_with_body(EventType::IssueComment, body)
}

// ─── Generators ───

pub fn arb_event_type() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::ALL.to_vec())
}

/// A line of prose that never starts with `/`, even after trimming.
pub fn arb_prose_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \t,.!?'()#@-]{0,60}".prop_map(String::from)
}
