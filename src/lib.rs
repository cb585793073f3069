//! Quick actions - slash commands for GitHub issues and pull requests.
//!
//! This library turns GitHub webhook deliveries into calls to registered
//! quick actions: a comment containing `/label bug` runs the action
//! registered for `label` with the argument `bug`.

pub mod actions;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_utils;
