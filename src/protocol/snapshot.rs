//! Read-only view of an engine for presenters.

use serde::Serialize;

use crate::board::{Move, Piece, SpecialAction, Square, BOARD_SIZE};
use crate::engine::{AttackInfo, Engine, Outcome, Phase};
use crate::resolve::Turn;

/// Everything a presenter needs to draw one frame of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub position: String,
    /// Cells indexed `[row][col]`.
    pub board: Vec<Vec<Option<Piece>>>,
    pub turn: Turn,
    pub phase: Phase,
    pub selected: Option<Square>,
    pub valid_moves: Vec<Move>,
    pub valid_attacks: Vec<Square>,
    pub valid_special_actions: Vec<SpecialAction>,
    pub staging_options: Vec<Square>,
    pub resting_options: Vec<Square>,
    pub attack: Option<AttackInfo>,
    pub pending_turn_switch: bool,
    pub outcome: Option<Outcome>,
    pub status: String,
}

impl Snapshot {
    pub fn capture(engine: &Engine) -> Self {
        let board = (0..BOARD_SIZE)
            .map(|r| {
                (0..BOARD_SIZE)
                    .map(|c| Square::new(r, c).and_then(|sq| engine.board().get(sq).copied()))
                    .collect()
            })
            .collect();

        Snapshot {
            position: engine.notation(),
            board,
            turn: *engine.turn(),
            phase: engine.phase(),
            selected: engine.selected(),
            valid_moves: engine.valid_moves().to_vec(),
            valid_attacks: engine.valid_attacks().to_vec(),
            valid_special_actions: engine.valid_special_actions().to_vec(),
            staging_options: engine.staging_options().to_vec(),
            resting_options: engine.resting_options().to_vec(),
            attack: engine.attack(),
            pending_turn_switch: engine.pending_turn_switch(),
            outcome: engine.outcome(),
            status: engine.status().to_string(),
        }
    }

    /// True if `square` is offered to the player in the current phase.
    pub fn is_highlighted(&self, square: Square) -> bool {
        self.valid_moves.iter().any(|m| m.to == square)
            || self.valid_attacks.contains(&square)
            || self.valid_special_actions.iter().any(|a| a.target == square)
            || self.staging_options.contains(&square)
            || self.resting_options.contains(&square)
    }

    /// Serializes the snapshot as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
