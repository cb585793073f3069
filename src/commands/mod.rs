//! Command extraction from comment and description bodies.
//!
//! This module turns the free text of a payload into the quick actions the
//! user asked for.
//!
//! # Syntax
//!
//! A command is a line starting with `/`, followed by the command name and
//! whitespace-separated arguments. Arguments containing spaces are wrapped in
//! double quotes:
//!
//! ```text
//! Thanks for the report!
//!
//! /assign @bob me
//! /label bug "needs triage"
//! ```
//!
//! Lines that do not start with `/` are ignored, as are commands that no quick
//! action is registered for.

mod parser;
mod tokenizer;
mod types;

pub use parser::extract_commands;
pub use tokenizer::{TokenizeError, tokenize_line};
pub use types::EventCommand;
