//! Registry of quick actions keyed by event type and command name.
//!
//! The registry is built once at start-up and handed to the
//! [`Dispatcher`](crate::dispatch::Dispatcher), which freezes it. Wiring
//! mistakes (a command registered twice for the same event type, an action
//! that can never fire) are reported as [`RegistrationError`]s so the process
//! refuses to start instead of silently shadowing or dropping a command.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::events::EventType;

use super::QuickAction;

/// Errors raised while wiring quick actions together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The command name can never be matched by the extractor.
    #[error("invalid command name '{0}': must be non-empty, without whitespace or leading '/'")]
    InvalidCommandName(String),

    /// The action declares no event types, so it would never run.
    #[error("quick action for command '/{0}' does not trigger on any event")]
    NoTriggerEvents(String),

    /// The command is already taken for this event type.
    #[error("quick action already defined for command '/{command}' on '{event_type}' events")]
    Duplicate {
        command: String,
        event_type: EventType,
    },
}

/// Two-level mapping: event type, then command name, to the action.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<EventType, HashMap<String, Arc<dyn QuickAction>>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` under `command` for every event type it triggers on.
    ///
    /// All checks run before anything is inserted, so a failed registration
    /// leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::InvalidCommandName`] if `command` is empty,
    ///   contains whitespace, or starts with `/`
    /// - [`RegistrationError::NoTriggerEvents`] if the action declares no
    ///   event types
    /// - [`RegistrationError::Duplicate`] if any of the (event type, command)
    ///   pairs is already registered
    pub fn register(
        &mut self,
        command: impl Into<String>,
        action: Arc<dyn QuickAction>,
    ) -> Result<(), RegistrationError> {
        let command = command.into();
        if !is_valid_command_name(&command) {
            return Err(RegistrationError::InvalidCommandName(command));
        }

        let mut event_types = action.trigger_on_events();
        if event_types.is_empty() {
            return Err(RegistrationError::NoTriggerEvents(command));
        }
        // An action listing the same event twice is not a conflict with itself.
        event_types.sort();
        event_types.dedup();

        if let Some(&event_type) = event_types
            .iter()
            .find(|event_type| self.resolve(**event_type, &command).is_some())
        {
            return Err(RegistrationError::Duplicate {
                command,
                event_type,
            });
        }

        for event_type in event_types {
            debug!(command = %command, event_type = %event_type, "Registered quick action");
            self.actions
                .entry(event_type)
                .or_default()
                .insert(command.clone(), Arc::clone(&action));
        }

        Ok(())
    }

    /// Event types with at least one registered command.
    pub fn handles(&self) -> BTreeSet<EventType> {
        self.actions
            .iter()
            .filter(|(_, commands)| !commands.is_empty())
            .map(|(event_type, _)| *event_type)
            .collect()
    }

    /// Looks up the action for a command. Unknown commands are `None`.
    pub fn resolve(&self, event_type: EventType, command: &str) -> Option<&Arc<dyn QuickAction>> {
        self.actions.get(&event_type)?.get(command)
    }

    /// Command names registered for `event_type`, sorted.
    pub fn commands_for(&self, event_type: EventType) -> Vec<&str> {
        let mut commands: Vec<&str> = self
            .actions
            .get(&event_type)
            .map(|commands| commands.keys().map(String::as_str).collect())
            .unwrap_or_default();
        commands.sort_unstable();
        commands
    }

    pub fn is_empty(&self) -> bool {
        self.actions.values().all(HashMap::is_empty)
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event_type in self.handles() {
            map.entry(&event_type, &self.commands_for(event_type));
        }
        map.finish()
    }
}

fn is_valid_command_name(command: &str) -> bool {
    !command.is_empty() && !command.starts_with('/') && !command.contains(char::is_whitespace)
}
