//! Field tokenizer for a single command line.
//!
//! The grammar is CSV with whitespace as the delimiter:
//!
//! - fields are separated by any whitespace; consecutive separators yield
//!   empty fields, which the caller drops
//! - a field starting with `"` runs to the matching closing quote and keeps
//!   its inner whitespace; `""` inside it is a literal `"`
//! - a closing quote must be followed by whitespace or the end of the line
//! - a `"` inside an unquoted field is an error

use thiserror::Error;

/// Why a command line could not be split into fields.
///
/// Columns are 1-based character positions within the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("bare \" in non-quoted field at column {column}")]
    BareQuote { column: usize },

    #[error("extraneous or missing \" in quoted field at column {column}")]
    UnexpectedCharAfterQuote { column: usize },

    #[error("quoted field starting at column {column} is never closed")]
    UnterminatedQuote { column: usize },
}

/// Splits a line into raw fields.
///
/// Fields are returned untrimmed and may be empty.
///
/// # Examples
///
/// ```
/// use quick_actions::commands::tokenize_line;
///
/// assert_eq!(
///     tokenize_line(r#"/cmd a "b c" d"#).unwrap(),
///     vec!["/cmd", "a", "b c", "d"]
/// );
/// assert!(tokenize_line(r#"/cmd "open"#).is_err());
/// ```
pub fn tokenize_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut fields = Vec::new();
    let mut chars = line.chars().enumerate().peekable();

    loop {
        let mut field = String::new();

        match chars.peek() {
            None => {
                fields.push(field);
                return Ok(fields);
            }
            Some(&(start, '"')) => {
                chars.next();
                loop {
                    match chars.next() {
                        None => {
                            return Err(TokenizeError::UnterminatedQuote { column: start + 1 });
                        }
                        Some((_, '"')) => match chars.peek() {
                            Some(&(_, '"')) => {
                                chars.next();
                                field.push('"');
                            }
                            Some(&(_, c)) if c.is_whitespace() => break,
                            None => break,
                            Some(&(column, _)) => {
                                return Err(TokenizeError::UnexpectedCharAfterQuote {
                                    column: column + 1,
                                });
                            }
                        },
                        Some((_, c)) => field.push(c),
                    }
                }
            }
            Some(_) => {
                while let Some(&(column, c)) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    if c == '"' {
                        return Err(TokenizeError::BareQuote { column: column + 1 });
                    }
                    field.push(c);
                    chars.next();
                }
            }
        }

        fields.push(field);

        // Consume exactly one separator; a further separator starts an empty field.
        if chars.next().is_none() {
            return Ok(fields);
        }
    }
}
