//! Gcode parsing pipeline
//!
//! Two stages, kept separate: `lexer` turns raw program text into
//! (letter, value) tokens, `command` groups tokens into typed commands.
//! Nothing in here touches robot state or hardware.

pub mod command;
pub mod lexer;

pub use command::{parse, ArgMap, Command};
pub use lexer::{tokenize, Token};

use thiserror::Error;

/// Error raised while turning gcode text into commands.
///
/// Every variant is fatal: parsing aborts at the first error and no part of
/// the program is ever executed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{character}' at byte {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("comment opened with '(' but never closed")]
    UnterminatedComment,

    #[error("unexpected token {token}; expected a G or M command")]
    UnexpectedToken { token: String },

    #[error("command {code} is invalid or not supported")]
    UnsupportedCommand { code: String },

    #[error("command {command} is missing required argument '{letter}'")]
    MissingRequiredArgument { command: String, letter: char },

    #[error("argument {letter}{value} is not a finite number")]
    InvalidNumber { letter: char, value: String },

    #[error("move command specifies neither an X/Y target nor a Z target")]
    InvalidMoveSpecification,
}

/// Parse a complete gcode program into an ordered command sequence.
///
/// This is the main entry point for parsing: tokenize the whole text, then
/// group tokens into commands. Any error aborts the whole parse.
pub fn parse_program(text: &str) -> Result<Vec<Command>, ParseError> {
    let tokens = lexer::tokenize(text)?;
    command::parse(&tokens)
}
