//! Delivery dispatch.
//!
//! The [`Dispatcher`] ties the pipeline together for one delivery:
//!
//! 1. normalize the raw body into an [`EventPayload`](crate::events::EventPayload)
//! 2. ignore anything that is not a creation (edits and deletions never
//!    re-run commands)
//! 3. extract the commands registered for the event type
//! 4. run their quick actions one after another, in the order they were
//!    written, collecting failures instead of stopping at the first
//!
//! # Cancellation
//!
//! Every quick action call is raced against the caller's
//! [`CancellationToken`]. When the token fires, the in-flight call is dropped,
//! recorded as a [`Cancelled`] failure, and no further command is started.

mod error;

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use crate::actions::{ActionRegistry, EventContext};
use crate::commands::extract_commands;
use crate::events::{EventType, parse_payload};
use crate::types::DeliveryId;

pub use error::{Cancelled, CommandFailure, CommandFailures, DispatchError};

/// Runs quick actions for webhook deliveries.
///
/// Cheap to clone; the registry is frozen when the dispatcher is built.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ActionRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ActionRegistry) -> Self {
        Dispatcher {
            registry: Arc::new(registry),
        }
    }

    /// Event types with at least one registered command.
    ///
    /// Used to subscribe to webhooks and to acknowledge other deliveries
    /// without dispatching them.
    pub fn handles(&self) -> BTreeSet<EventType> {
        self.registry.handles()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Processes one delivery.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Cancels the delivery; remaining commands are not started
    /// * `event_type` - The `X-GitHub-Event` header value
    /// * `delivery_id` - The `X-GitHub-Delivery` header value
    /// * `payload` - The raw JSON body
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Parse`] if the payload cannot be normalized; no
    ///   quick action runs
    /// - [`DispatchError::Commands`] if at least one quick action failed;
    ///   every other command still ran
    #[instrument(skip_all, fields(event_type = %event_type, delivery_id = %delivery_id))]
    pub async fn handle(
        &self,
        cancel: &CancellationToken,
        event_type: &str,
        delivery_id: &DeliveryId,
        payload: &[u8],
    ) -> Result<(), DispatchError> {
        let payload = Arc::new(parse_payload(event_type, payload)?);

        debug!(
            owner = payload.repository_owner(),
            repo = payload.repository_name(),
            issue = %payload.issue_number(),
            action = %payload.action(),
            "Payload normalized"
        );

        let action = payload.action();
        if !action.is_created() {
            debug!(action = %action, "Not a creation, ignored");
            return Ok(());
        }

        let commands = extract_commands(&payload, &self.registry);
        if commands.is_empty() {
            info!("No quick action found");
            return Ok(());
        }

        let ctx = EventContext::new(delivery_id.clone(), cancel.clone());
        let mut failures = Vec::new();

        for command in &commands {
            let Some(quick_action) = self.registry.resolve(payload.event_type(), &command.command)
            else {
                continue;
            };

            let span = info_span!("quick_action", command = %command.command);
            let result = tokio::select! {
                biased;

                _ = cancel.cancelled() => Err(anyhow::Error::from(Cancelled {
                    command: command.command.clone(),
                })),
                result = quick_action.handle_command(&ctx, command).instrument(span) => result,
            };

            match result {
                Ok(()) => {
                    debug!(quick_action = %command.command, "Quick action completed");
                }
                Err(error) => {
                    warn!(
                        quick_action = %command.command,
                        error = %error,
                        "Quick action failed"
                    );
                    let cancelled = error.is::<Cancelled>();
                    failures.push(CommandFailure {
                        command: command.command.clone(),
                        arguments: command.arguments.clone(),
                        error,
                    });
                    if cancelled {
                        break;
                    }
                }
            }
        }

        match CommandFailures::from_vec(failures) {
            Some(failures) => Err(DispatchError::Commands(failures)),
            None => Ok(()),
        }
    }
}
