//! Line-based player commands.

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_rush_hour::PieceId;
use tracing::instrument;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  <id> <col> <row>   slide a piece so its top-left cell lands on (col, row)
  <id> +n | -n       slide a piece n cells along its axis
  reset              put every piece back where the level started
  show               draw the board
  moves              list the moves made so far
  help               show this help
  quit               leave the game";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Slide to an absolute anchor.
    Move {
        /// Piece to move.
        piece: PieceId,
        /// Target column.
        col: i32,
        /// Target row.
        row: i32,
    },
    /// Slide relative to the current anchor.
    Shift {
        /// Piece to move.
        piece: PieceId,
        /// Cells to move; negative is up or left.
        delta: i32,
    },
    /// Restore the starting layout.
    Reset,
    /// Redraw the board.
    Show,
    /// List accepted moves.
    Moves,
    /// Print help.
    Help,
    /// Stop playing.
    Quit,
}

impl FromStr for PlayerCommand {
    type Err = CommandError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(CommandError::new("Empty command")),
            [word] => match word.to_ascii_lowercase().as_str() {
                "reset" | "r" => Ok(Self::Reset),
                "show" | "s" => Ok(Self::Show),
                "moves" | "m" => Ok(Self::Moves),
                "help" | "h" | "?" => Ok(Self::Help),
                "quit" | "q" | "exit" => Ok(Self::Quit),
                other => Err(CommandError::new(format!("Unknown command: {}", other))),
            },
            [piece, delta] if delta.starts_with(['+', '-']) => Ok(Self::Shift {
                piece: PieceId::from(*piece),
                delta: parse_number(delta)?,
            }),
            [piece, col, row] => Ok(Self::Move {
                piece: PieceId::from(*piece),
                col: parse_number(col)?,
                row: parse_number(row)?,
            }),
            _ => Err(CommandError::new(format!(
                "Expected <id> <col> <row> or <id> +n|-n, got: {}",
                line.trim()
            ))),
        }
    }
}

fn parse_number(token: &str) -> Result<i32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::new(format!("Not a number: {}", token)))
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the line.
    pub message: String,
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
