//! Conversion of gyp include files (`.gypi`) to JSON.
//!
//! A `.gypi` file is a Python dictionary literal: `#` comments, single- or
//! double-quoted strings, `True` / `False` / `None`, and trailing commas.
//! [`to_json`] rewrites those constructs so the result can be handed to
//! `serde_json`.

use thiserror::Error;

/// A construct that cannot be rewritten to JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unterminated string starting at line {line}")]
pub struct SyntaxError {
    /// 1-based line on which the offending string starts.
    pub line: usize,
}

/// Rewrite a gypi literal into JSON text.
///
/// # Errors
///
/// Returns [`SyntaxError`] if a string literal is not closed before the end
/// of input.
pub fn to_json(input: &str) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                line += 1;
                out.push(c);
            }
            '#' => {
                // Comment runs to end of line; keep the newline itself.
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            '\'' | '"' => {
                let start = line;
                out.push('"');
                let mut closed = false;
                while let Some(s) = chars.next() {
                    match s {
                        '\\' => {
                            let Some(escaped) = chars.next() else { break };
                            if escaped == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(escaped);
                            }
                        }
                        '"' if c == '\'' => out.push_str("\\\""),
                        s if s == c => {
                            closed = true;
                            break;
                        }
                        '\n' => {
                            line += 1;
                            out.push_str("\\n");
                        }
                        s => out.push(s),
                    }
                }
                if !closed {
                    return Err(SyntaxError { line: start });
                }
                out.push('"');
            }
            '}' | ']' => {
                strip_trailing_comma(&mut out);
                out.push(c);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        word.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Drop a `,` that is followed only by whitespace at the end of `out`.
fn strip_trailing_comma(out: &mut String) {
    let trimmed = out.trim_end();
    if trimmed.ends_with(',') {
        let len = trimmed.len() - 1;
        out.truncate(len);
    }
}
