//! Text protocol command parser.
//!
//! Parses incoming lines into structured `Command` variants that the main
//! loop can dispatch on.

use tracing::warn;

/// A parsed command from the controlling process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset to the starting position.
    NewGame,

    /// Set the position from notation.
    Position { notation: String },

    /// Activate a square. Coordinates may be off the board; the engine
    /// rejects those.
    Click { row: isize, col: isize },

    /// End the turn, or complete a deferred turn switch.
    Finish,

    /// Print the current snapshot.
    Show,

    /// Print the current position notation.
    Fen,

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines and unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&name, args) = tokens.split_first()?;

    match name {
        "newgame" => Some(Command::NewGame),
        "finish" => Some(Command::Finish),
        "show" => Some(Command::Show),
        "fen" => Some(Command::Fen),
        "quit" => Some(Command::Quit),

        "position" => parse_position(args),
        "click" => parse_click(args),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `position <notation>` or `position startpos`.
fn parse_position(args: &[&str]) -> Option<Command> {
    match args {
        [] => {
            warn!("malformed position: expected 'position <notation>'");
            None
        }
        ["startpos"] => Some(Command::NewGame),
        _ => Some(Command::Position {
            notation: args.join(" "),
        }),
    }
}

/// Parses `click <row> <col>`.
fn parse_click(args: &[&str]) -> Option<Command> {
    let [row, col] = args else {
        warn!("malformed click: expected 'click <row> <col>'");
        return None;
    };
    match (row.parse::<isize>(), col.parse::<isize>()) {
        (Ok(row), Ok(col)) => Some(Command::Click { row, col }),
        _ => {
            warn!(row = *row, col = *col, "malformed click coordinates");
            None
        }
    }
}
