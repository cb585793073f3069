//! Extraction of commands from a payload body.
//!
//! This module provides a pure extractor that turns the free text of a
//! comment or description into an ordered list of [`EventCommand`]s.

use std::sync::Arc;

use tracing::{error, trace, warn};

use crate::actions::ActionRegistry;
use crate::events::EventPayload;

use super::tokenizer::tokenize_line;
use super::types::EventCommand;

/// Extracts every registered command from the payload body.
///
/// # Parsing Rules
///
/// - The body is read line by line, top to bottom; each line is trimmed
/// - Only lines starting with `/` are candidates; everything else is prose
/// - The command name runs from after the `/` to the first whitespace; a line
///   with an empty name (`/` alone, `/ foo`) is ignored
/// - Commands not registered for the payload's event type are skipped with a
///   warning, before the line is tokenized
/// - Registered lines are split with [`tokenize_line`]; a line that fails to
///   tokenize is logged and skipped
/// - Empty fields are dropped; the remaining fields after the command are the
///   arguments, in order and with duplicates
///
/// A bad line never stops extraction of the lines after it.
pub fn extract_commands(
    payload: &Arc<EventPayload>,
    registry: &ActionRegistry,
) -> Vec<EventCommand> {
    let event_type = payload.event_type();
    let mut commands = Vec::new();

    for (n, line) in payload.body().split('\n').enumerate() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            trace!(line = n, "No command on line, ignored");
            continue;
        };

        let (command, _) = split_first_word(rest);
        if command.is_empty() {
            trace!(line = n, "Empty command name, ignored");
            continue;
        }

        if registry.resolve(event_type, command).is_none() {
            warn!(
                quick_action = command,
                event_type = %event_type,
                "Quick action '/{}' doesn't exist, ignored",
                command
            );
            continue;
        }

        let fields = match tokenize_line(line) {
            Ok(fields) => fields,
            Err(e) => {
                error!(
                    quick_action = command,
                    line = line,
                    error = %e,
                    "Failed to parse command line, ignored"
                );
                continue;
            }
        };

        let arguments = fields
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .skip(1)
            .map(str::to_string)
            .collect();

        commands.push(EventCommand::new(command, arguments, Arc::clone(payload)));
    }

    commands
}

/// Splits text at the first whitespace, returning (word, rest).
/// If no whitespace, returns (text, "").
fn split_first_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    use crate::test_utils::{RecordingAction, arb_prose_line, comment_payload, payload_with_body};
    use proptest::prelude::*;

    fn registry_with(commands: &[(&str, &[EventType])]) -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        for (command, events) in commands {
            registry
                .register(*command, RecordingAction::on(events))
                .unwrap();
        }
        registry
    }

    /// `cmd1` on issues + issue comments; `cmd2` on all comment-ish events.
    fn two_command_registry() -> ActionRegistry {
        registry_with(&[
            ("cmd1", &[EventType::Issues, EventType::IssueComment]),
            (
                "cmd2",
                &[
                    EventType::Issues,
                    EventType::IssueComment,
                    EventType::PullRequestReviewComment,
                ],
            ),
        ])
    }

    fn names_and_args(commands: &[EventCommand]) -> Vec<(&str, Vec<&str>)> {
        commands
            .iter()
            .map(|c| {
                (
                    c.command.as_str(),
                    c.arguments.iter().map(String::as_str).collect(),
                )
            })
            .collect()
    }

    // ==================== Full bodies ====================

    #[test]
    fn mixed_body_extracts_registered_commands_in_order() {
        let registry = two_command_registry();
        let body = r#"

/
// invalid command
/unknown "command"
/cmd1
/cmd1 simple
/cmd2 "quoted arguments"
/cmd2 mixed "arguments" with simple and "quoted arguments"
  /cmd1 even with spaces ?
"#;
        let payload = comment_payload(body);

        let commands = extract_commands(&payload, &registry);

        assert_eq!(
            names_and_args(&commands),
            vec![
                ("cmd1", vec![]),
                ("cmd1", vec!["simple"]),
                ("cmd2", vec!["quoted arguments"]),
                (
                    "cmd2",
                    vec!["mixed", "arguments", "with", "simple", "and", "quoted arguments"]
                ),
                ("cmd1", vec!["even", "with", "spaces", "?"]),
            ]
        );
        for command in &commands {
            assert!(Arc::ptr_eq(&command.payload, &payload));
        }
    }

    #[test]
    fn commands_are_filtered_by_event_type() {
        let registry = two_command_registry();
        let body = "/cmd1 a\n/cmd2 b\n/cmd1 c";

        let commands = extract_commands(
            &payload_with_body(EventType::PullRequestReviewComment, body),
            &registry,
        );

        assert_eq!(names_and_args(&commands), vec![("cmd2", vec!["b"])]);
    }

    #[test]
    fn zero_arguments_is_an_explicit_empty_list() {
        let registry = registry_with(&[("close", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload("/close"), &registry);

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].arguments, Vec::<String>::new());
    }

    #[test]
    fn duplicate_arguments_are_kept() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload("/cmd x x"), &registry);

        assert_eq!(names_and_args(&commands), vec![("cmd", vec!["x", "x"])]);
    }

    #[test]
    fn quoted_argument_with_spaces() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload(r#"/cmd a "b c" d"#), &registry);

        assert_eq!(names_and_args(&commands), vec![("cmd", vec!["a", "b c", "d"])]);
    }

    #[test]
    fn slash_arguments_are_not_reinterpreted() {
        let registry = registry_with(&[
            ("complex", &[EventType::IssueComment]),
            ("simple", &[EventType::IssueComment]),
        ]);
        let commands = extract_commands(&comment_payload("/complex /simple"), &registry);

        assert_eq!(names_and_args(&commands), vec![("complex", vec!["/simple"])]);
    }

    #[test]
    fn quoted_whitespace_only_argument_is_dropped() {
        let registry = registry_with(&[("label", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload(r#"/label "  " bug "" "#), &registry);

        assert_eq!(names_and_args(&commands), vec![("label", vec!["bug"])]);
    }

    #[test]
    fn quoted_arguments_are_trimmed() {
        let registry = registry_with(&[("label", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload(r#"/label " needs triage ""#), &registry);

        assert_eq!(names_and_args(&commands), vec![("label", vec!["needs triage"])]);
    }

    // ==================== Ignored lines ====================

    #[test]
    fn lone_slash_and_blank_lines_are_ignored() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let body = "\n/\n   \n/ cmd\n\t\n";

        assert!(extract_commands(&comment_payload(body), &registry).is_empty());
    }

    #[test]
    fn unknown_command_does_not_stop_extraction() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let body = "/doesnotexist arg\n/cmd ok";

        let commands = extract_commands(&comment_payload(body), &registry);
        assert_eq!(names_and_args(&commands), vec![("cmd", vec!["ok"])]);
    }

    #[test]
    fn untokenizable_line_is_skipped() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let body = "/cmd \"unterminated\n/cmd bare\"quote\n/cmd fine";

        let commands = extract_commands(&comment_payload(body), &registry);
        assert_eq!(names_and_args(&commands), vec![("cmd", vec!["fine"])]);
    }

    #[test]
    fn unknown_command_with_bad_quoting_is_not_tokenized() {
        // Would be a tokenization error if it were registered.
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let commands = extract_commands(&comment_payload("/other \"open"), &registry);
        assert!(commands.is_empty());
    }

    #[test]
    fn command_must_start_the_line() {
        let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
        let body = "please run /cmd now\n> /cmd quoted reply\n`/cmd` in code";

        assert!(extract_commands(&comment_payload(body), &registry).is_empty());
    }

    #[test]
    fn command_names_are_case_sensitive() {
        let registry = registry_with(&[("label", &[EventType::IssueComment])]);
        assert!(extract_commands(&comment_payload("/LABEL bug"), &registry).is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let registry = registry_with(&[("label", &[EventType::IssueComment])]);
        let body = "Thanks!\r\n/label bug\r\n/label docs\r\n";

        let commands = extract_commands(&comment_payload(body), &registry);
        assert_eq!(
            names_and_args(&commands),
            vec![("label", vec!["bug"]), ("label", vec!["docs"])]
        );
    }

    #[test]
    fn empty_registry_extracts_nothing() {
        let registry = ActionRegistry::new();
        assert!(extract_commands(&comment_payload("/cmd a\n/cmd b"), &registry).is_empty());
    }

    // ==================== Helper function tests ====================

    #[test]
    fn split_first_word_works() {
        assert_eq!(split_first_word("hello world"), ("hello", " world"));
        assert_eq!(split_first_word("hello"), ("hello", ""));
        assert_eq!(split_first_word(""), ("", ""));
        assert_eq!(split_first_word(" x"), ("", " x"));
        assert_eq!(split_first_word("hello\tworld"), ("hello", "\tworld"));
    }

    // ==================== Properties ====================

    proptest! {
        /// Arbitrary bodies never panic.
        #[test]
        fn arbitrary_body_never_panics(body: String) {
            let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
            let _ = extract_commands(&comment_payload(&body), &registry);
        }

        /// Bodies without a line starting with `/` yield no commands.
        #[test]
        fn prose_yields_no_commands(lines in prop::collection::vec(arb_prose_line(), 0..10)) {
            let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
            let body = lines.join("\n");
            prop_assert!(extract_commands(&comment_payload(&body), &registry).is_empty());
        }

        /// One command per registered line, in line order.
        #[test]
        fn one_command_per_line_in_order(args in prop::collection::vec("[a-z0-9]{1,8}", 1..10)) {
            let registry = registry_with(&[("cmd", &[EventType::IssueComment])]);
            let body: Vec<String> = args.iter().map(|arg| format!("/cmd {arg}")).collect();

            let commands = extract_commands(&comment_payload(&body.join("\n")), &registry);

            let extracted: Vec<&str> = commands.iter().map(|c| c.arguments[0].as_str()).collect();
            let expected: Vec<&str> = args.iter().map(String::as_str).collect();
            prop_assert_eq!(extracted, expected);
        }
    }
}
