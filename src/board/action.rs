//! Candidate action types.
//!
//! Move generation produces these; the engine matches clicks against them.
//! Each variant carries exactly what is needed to execute the action later.

use serde::Serialize;

use super::square::Square;

/// How a move reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveKind {
    /// Ordinary step or slide.
    Step,
    /// Pawn leap over an enemy Life or Death standing on `over`.
    SpecialJump { over: Square },
    /// Knight landing reached by hopping over adjacent pieces.
    RampJump,
}

/// A non-capturing relocation of the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn step(to: Square) -> Self {
        Move { to, kind: MoveKind::Step }
    }
}

/// The effect a Life or Death piece applies to a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    /// Life restores a friendly piece's shield.
    Heal,
    /// Death removes an unprotected piece.
    Kill,
}

/// A Life/Death action aimed at a neighbouring square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpecialAction {
    pub target: Square,
    pub kind: SpecialKind,
}

/// Everything a piece can do from its current square.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Actions {
    pub moves: Vec<Move>,
    /// Squares of enemy pieces that can be attacked.
    pub attacks: Vec<Square>,
    pub special_actions: Vec<SpecialAction>,
}

impl Actions {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty() && self.special_actions.is_empty()
    }

    pub fn find_move(&self, to: Square) -> Option<Move> {
        self.moves.iter().copied().find(|m| m.to == to)
    }

    pub fn has_attack(&self, target: Square) -> bool {
        self.attacks.contains(&target)
    }

    pub fn find_special(&self, target: Square) -> Option<SpecialAction> {
        self.special_actions.iter().copied().find(|s| s.target == target)
    }

    /// Appends `other`, used to combine ray sets.
    pub fn extend(&mut self, other: Actions) {
        self.moves.extend(other.moves);
        self.attacks.extend(other.attacks);
        self.special_actions.extend(other.special_actions);
    }
}
