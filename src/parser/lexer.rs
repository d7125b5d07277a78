//! Gcode lexer
//!
//! Character-level tokenization with one-character lookahead. Produces a
//! flat ordered sequence of (letter, value) tokens, discarding whitespace
//! and parenthesized comments along the way. Values stay as raw text here;
//! numeric interpretation happens in the command parser.

use std::iter::Peekable;
use std::str::CharIndices;

use super::ParseError;

/// A single gcode word: a command-group letter (`G`, `M`) or an argument
/// letter (`X`, `Y`, `Z`, `P`, ...) with its raw numeric-literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub letter: char,
    pub value: String,
}

impl Token {
    /// The verbatim word as it appeared in the program, e.g. `G04` or `X10.5`.
    pub fn name(&self) -> String {
        format!("{}{}", self.letter, self.value)
    }
}

/// Tokenize a complete gcode program.
///
/// Whitespace separates tokens but is otherwise ignored; `(...)` comments
/// are skipped wholesale. End of input terminates the scan cleanly. Any
/// character that fits none of those roles aborts the whole parse.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            ' ' | '\t' | '\r' | '\n' => continue,

            '(' => skip_comment(&mut chars)?,

            c if c.is_ascii_alphabetic() => {
                let value = read_number(&mut chars);
                if value.is_empty() {
                    // A bare letter with no numeric literal would produce an
                    // empty-valued token, which nothing downstream accepts.
                    return Err(ParseError::UnexpectedCharacter {
                        character: c,
                        offset,
                    });
                }
                tokens.push(Token {
                    letter: c.to_ascii_uppercase(),
                    value,
                });
            }

            _ => {
                return Err(ParseError::UnexpectedCharacter {
                    character: ch,
                    offset,
                });
            }
        }
    }

    Ok(tokens)
}

/// Consume characters up to and including the matching `)`.
fn skip_comment(chars: &mut Peekable<CharIndices<'_>>) -> Result<(), ParseError> {
    for (_, ch) in chars.by_ref() {
        if ch == ')' {
            return Ok(());
        }
    }
    Err(ParseError::UnterminatedComment)
}

/// Greedily consume a numeric literal: digits, `-` and `.`, deciding where
/// the literal ends with one character of lookahead.
fn read_number(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut number = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        if ch.is_ascii_digit() || ch == '-' || ch == '.' {
            number.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    number
}
