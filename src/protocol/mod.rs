//! Text protocol handling.
//!
//! Position notation, the snapshot handed to presenters, and the line
//! command parser used by the binary's main loop.

pub mod notation;
pub mod parser;
pub mod snapshot;

pub use notation::{encode_position, parse_position, NotationError, Position, INITIAL_POSITION};
pub use parser::{parse_command, Command};
pub use snapshot::Snapshot;
