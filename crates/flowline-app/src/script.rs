//! Gesture scripts for non-interactive play.
//!
//! A script is a list of steps separated by `/`, `;` or newlines:
//!
//! | step | meaning |
//! |---|---|
//! | `d x,y` | press the cell |
//! | `m x,y [x,y ...]` | move through the cells in turn |
//! | `u` | release |
//! | `h` | request a hint |
//! | `z` | undo |
//! | `y` | redo |
//! | `r` | reset the attempt |

use std::str::FromStr;

use flowline_core::{Position, PositionParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Position),
    Move(Position),
    Release,
    Hint,
    Undo,
    Redo,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScriptError {
    #[display("step {step}: unknown command {command:?}")]
    UnknownCommand {
        step: usize,
        #[error(not(source))]
        command: String,
    },
    #[display("step {step}: {source}")]
    BadPosition {
        step: usize,
        source: PositionParseError,
    },
    #[display("step {step}: expected {expected} position(s), found {found}")]
    Arity {
        step: usize,
        expected: &'static str,
        found: usize,
    },
}

impl FromStr for Command {
    type Err = ScriptError;

    /// Parses a step that yields exactly one command.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_step(0, s)?.as_slice() {
            &[command] => Ok(command),
            other => Err(ScriptError::Arity {
                step: 0,
                expected: "one",
                found: other.len(),
            }),
        }
    }
}

/// Parses a whole script. Empty steps are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (step, text) in script.split(['/', ';', '\n']).enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        commands.extend(parse_step(step + 1, text)?);
    }
    Ok(commands)
}

fn parse_step(step: usize, text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let positions = words
        .map(|word| {
            word.parse::<Position>()
                .map_err(|source| ScriptError::BadPosition { step, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let no_args = |command| {
        if positions.is_empty() {
            Ok(vec![command])
        } else {
            Err(ScriptError::Arity {
                step,
                expected: "no",
                found: positions.len(),
            })
        }
    };

    match verb {
        "d" => match positions.as_slice() {
            &[pos] => Ok(vec![Command::Press(pos)]),
            other => Err(ScriptError::Arity {
                step,
                expected: "one",
                found: other.len(),
            }),
        },
        "m" if positions.is_empty() => Err(ScriptError::Arity {
            step,
            expected: "at least one",
            found: 0,
        }),
        "m" => Ok(positions.iter().copied().map(Command::Move).collect()),
        "u" => no_args(Command::Release),
        "h" => no_args(Command::Hint),
        "z" => no_args(Command::Undo),
        "y" => no_args(Command::Redo),
        "r" => no_args(Command::Reset),
        _ => Err(ScriptError::UnknownCommand {
            step,
            command: verb.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_parse_script() {
        let commands = parse_script("d 0,0 / m 1,0 2,0; u\n\nh / z / y / r").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Press(p(0, 0)),
                Command::Move(p(1, 0)),
                Command::Move(p(2, 0)),
                Command::Release,
                Command::Hint,
                Command::Undo,
                Command::Redo,
                Command::Reset,
            ]
        );
    }

    #[test]
    fn test_single_command() {
        assert_eq!("d 3,4".parse::<Command>(), Ok(Command::Press(p(3, 4))));
        assert_eq!(" u ".parse::<Command>(), Ok(Command::Release));
        assert!("m 1,0 2,0".parse::<Command>().is_err());
    }

    #[test]
    fn test_errors_name_the_step() {
        assert!(matches!(
            parse_script("u / x"),
            Err(ScriptError::UnknownCommand { step: 2, .. })
        ));
        assert!(matches!(
            parse_script("d 1;0"),
            Err(ScriptError::BadPosition { step: 1, .. })
        ));
        assert!(matches!(
            parse_script("d"),
            Err(ScriptError::Arity { step: 1, found: 0, .. })
        ));
        assert!(matches!(
            parse_script("u 1,1"),
            Err(ScriptError::Arity { step: 1, found: 1, .. })
        ));
        assert!(matches!(
            parse_script("m"),
            Err(ScriptError::Arity { step: 1, found: 0, .. })
        ));
    }
}
