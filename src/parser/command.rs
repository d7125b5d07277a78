//! Command parser
//!
//! Groups a token sequence into typed commands using a fixed table mapping
//! gcode words (`G01`, `G04`, `M30`, ...) onto a closed set of command
//! variants. `G`/`M` tokens start a new command; every other token is an
//! argument of the command currently being assembled.

use std::collections::BTreeMap;

use super::lexer::Token;
use super::ParseError;

/// Argument letters collected for one command, e.g. `{X: 10.0, Y: 0.0}`.
///
/// A repeated letter overwrites the earlier value (last write wins). Extra
/// letters a command does not use are kept here and simply ignored by
/// execution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgMap(BTreeMap<char, f64>);

impl ArgMap {
    pub fn insert(&mut self, letter: char, value: f64) {
        self.0.insert(letter.to_ascii_uppercase(), value);
    }

    pub fn get(&self, letter: char) -> Option<f64> {
        self.0.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains_key(&letter.to_ascii_uppercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully parsed gcode command, ready for execution.
///
/// Closed tagged union: new command kinds are added by extending this enum
/// and the dispatch in the runner, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Linear move to an absolute X/Y target or a Z (pen axis) target.
    /// Arc codes (G02/G03) currently degrade to linear moves.
    Move(ArgMap),
    /// Pause execution for `P` seconds.
    Dwell { seconds: f64 },
    /// Sound the buzzer for `P` seconds.
    Bell { seconds: f64 },
    /// Lift the pen off the paper.
    Retract,
    /// Lower the pen back onto the paper.
    Recover,
    /// Recognized but deliberately ignored (plane select, spindle codes, ...).
    /// Acknowledged rather than squashed so they stay visible in logs.
    Ignore { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Move,
    Dwell,
    Bell,
    Retract,
    Recover,
    Ignore,
}

/// The fixed command table. Lookup is by the verbatim word (`letter+value`),
/// so `G4` and `G04` are distinct entries just like in the dialect we accept.
fn lookup(word: &str) -> Option<CommandKind> {
    let kind = match word {
        "G00" | "G01" => CommandKind::Move,
        // Future: controlled arc moves; treated as linear for now.
        "G02" | "G03" => CommandKind::Move,
        "G04" => CommandKind::Dwell,
        "G10" | "G22" => CommandKind::Retract,
        "G11" | "G23" => CommandKind::Recover,
        // CNC plane select, irrelevant for a pen plotter.
        "G53" | "G54" | "G55" | "G56" | "G57" | "G58" | "G59" => CommandKind::Ignore,
        // Absolute positioning, the only mode we support. Relative (G91)
        // deliberately has no entry so it fails as unsupported.
        "G90" => CommandKind::Ignore,
        "M3" | "M05" | "M30" => CommandKind::Ignore,
        "M300" => CommandKind::Bell,
        _ => return None,
    };
    Some(kind)
}

fn is_command_starter(token: &Token) -> bool {
    matches!(token.letter, 'G' | 'M')
}

/// Group tokens into an ordered command sequence.
///
/// Every group must open with a `G`/`M` token; argument tokens are consumed
/// greedily until the next command starter or end of input. A command with
/// zero arguments is valid (`G90`).
pub fn parse(tokens: &[Token]) -> Result<Vec<Command>, ParseError> {
    let mut program = Vec::new();
    let mut tokens = tokens.iter().peekable();

    while let Some(token) = tokens.next() {
        if !is_command_starter(token) {
            return Err(ParseError::UnexpectedToken { token: token.name() });
        }

        let word = token.name();
        let kind = lookup(&word).ok_or_else(|| ParseError::UnsupportedCommand {
            code: word.clone(),
        })?;

        let mut args = ArgMap::default();
        while let Some(next) = tokens.peek() {
            if is_command_starter(next) {
                break;
            }
            let Some(arg) = tokens.next() else { break };
            args.insert(arg.letter, numeric_value(arg)?);
        }

        program.push(build(kind, &word, args)?);
    }

    Ok(program)
}

/// Interpret a token's raw value as a finite double. NaN and infinities are
/// rejected here so garbage never propagates silently into motion.
fn numeric_value(token: &Token) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        letter: token.letter,
        value: token.value.clone(),
    };
    let value: f64 = token.value.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

fn build(kind: CommandKind, word: &str, args: ArgMap) -> Result<Command, ParseError> {
    let command = match kind {
        CommandKind::Move => {
            validate_move(word, &args)?;
            Command::Move(args)
        }
        CommandKind::Dwell => Command::Dwell {
            seconds: required(word, &args, 'P')?,
        },
        CommandKind::Bell => Command::Bell {
            seconds: required(word, &args, 'P')?,
        },
        CommandKind::Retract => Command::Retract,
        CommandKind::Recover => Command::Recover,
        CommandKind::Ignore => Command::Ignore {
            code: word.to_string(),
        },
    };
    Ok(command)
}

fn required(word: &str, args: &ArgMap, letter: char) -> Result<f64, ParseError> {
    args.get(letter).ok_or(ParseError::MissingRequiredArgument {
        command: word.to_string(),
        letter,
    })
}

/// A move must name a full X/Y target or a Z target. A lone X or lone Y is
/// a missing-argument error; none of the three at all is rejected outright
/// rather than left undefined.
fn validate_move(word: &str, args: &ArgMap) -> Result<(), ParseError> {
    let (x, y, z) = (args.contains('X'), args.contains('Y'), args.contains('Z'));
    if (x && y) || z {
        return Ok(());
    }
    if x || y {
        return Err(ParseError::MissingRequiredArgument {
            command: word.to_string(),
            letter: if x { 'Y' } else { 'X' },
        });
    }
    Err(ParseError::InvalidMoveSpecification)
}
