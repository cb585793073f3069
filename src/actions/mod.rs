//! Quick action contract and registry.
//!
//! A quick action is the code behind one `/command`. Implementations live
//! outside this crate (assigning users, adding labels, ...); they declare the
//! event types they react to and perform their mutation when the dispatcher
//! hands them a parsed [`EventCommand`].
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use quick_actions::actions::{ActionRegistry, EventContext, QuickAction};
//! use quick_actions::commands::EventCommand;
//! use quick_actions::events::EventType;
//! use std::sync::Arc;
//!
//! struct Shrug;
//!
//! #[async_trait]
//! impl QuickAction for Shrug {
//!     fn trigger_on_events(&self) -> Vec<EventType> {
//!         vec![EventType::IssueComment]
//!     }
//!
//!     async fn handle_command(
//!         &self,
//!         _ctx: &EventContext,
//!         _command: &EventCommand,
//!     ) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = ActionRegistry::new();
//! registry.register("shrug", Arc::new(Shrug)).unwrap();
//! assert!(registry.resolve(EventType::IssueComment, "shrug").is_some());
//! ```

mod registry;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::commands::EventCommand;
use crate::events::EventType;
use crate::types::DeliveryId;

pub use registry::{ActionRegistry, RegistrationError};

/// Per-delivery context handed to every quick action.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// The delivery being processed.
    pub delivery_id: DeliveryId,

    /// Cancelled when the delivery is abandoned, e.g. the webhook client
    /// disconnected. Long-running actions should race their I/O against it.
    pub cancel: CancellationToken,
}

impl EventContext {
    pub fn new(delivery_id: DeliveryId, cancel: CancellationToken) -> Self {
        EventContext {
            delivery_id,
            cancel,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// The code behind one or more `/command` names.
#[async_trait]
pub trait QuickAction: Send + Sync {
    /// Event types this action participates in.
    ///
    /// Called once, when the action is registered.
    fn trigger_on_events(&self) -> Vec<EventType>;

    /// Performs the action for one parsed command.
    ///
    /// The normalized payload is available through `command.payload`. Any
    /// error is recorded by the dispatcher and reported alongside the other
    /// failures of the same delivery; it never stops later commands.
    async fn handle_command(&self, ctx: &EventContext, command: &EventCommand)
    -> anyhow::Result<()>;
}
