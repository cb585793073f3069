//! Errors reported for one delivery.

use std::fmt;

use thiserror::Error;

use crate::events::ParseError;

/// Why a delivery did not complete cleanly.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The payload could not be normalized; no quick action ran.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// One or more quick actions failed. The others ran normally.
    #[error(transparent)]
    Commands(CommandFailures),
}

/// A quick action call that returned an error (or was cancelled).
#[derive(Debug)]
pub struct CommandFailure {
    pub command: String,
    pub arguments: Vec<String>,
    pub error: anyhow::Error,
}

impl CommandFailure {
    /// True if the delivery was cancelled while this command was running.
    pub fn is_cancelled(&self) -> bool {
        self.error.downcast_ref::<Cancelled>().is_some()
    }
}

/// Recorded in place of a handler error when the delivery is cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery cancelled before /{command} completed")]
pub struct Cancelled {
    pub command: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}: {:#}", self.command, self.error)
    }
}

/// Every failure of one delivery, in invocation order. Never empty.
#[derive(Debug)]
pub struct CommandFailures(Vec<CommandFailure>);

impl CommandFailures {
    /// Wraps the collected failures, or `None` if there are none.
    pub(crate) fn from_vec(failures: Vec<CommandFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(CommandFailures(failures))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error of each failure with its context chain, without the
    /// `/command:` prefix [`Display`](fmt::Display) adds.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|f| format!("{:#}", f.error)).collect()
    }
}

impl<'a> IntoIterator for &'a CommandFailures {
    type Item = &'a CommandFailure;
    type IntoIter = std::slice::Iter<'a, CommandFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CommandFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} quick action(s) failed: ", self.0.len())?;
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandFailures {}
