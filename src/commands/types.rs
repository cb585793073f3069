//! Parsed command type.

use std::sync::Arc;

use crate::events::EventPayload;

/// One `/command arg...` line found in a payload body.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCommand {
    /// Command name without the leading `/`.
    pub command: String,

    /// Arguments in the order they were written. Duplicates are kept;
    /// de-duplicating is up to the quick action.
    pub arguments: Vec<String>,

    /// The delivery this command came from, shared with its sibling commands.
    pub payload: Arc<EventPayload>,
}

impl EventCommand {
    pub fn new(
        command: impl Into<String>,
        arguments: Vec<String>,
        payload: Arc<EventPayload>,
    ) -> Self {
        EventCommand {
            command: command.into(),
            arguments,
            payload,
        }
    }
}
