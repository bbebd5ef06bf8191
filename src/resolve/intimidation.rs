//! Intimidation.
//!
//! A piece that threatens an enemy King cannot keep its shield. When it stops
//! threatening, the shield comes back.

use tracing::info;

use crate::board::{Board, Color, Square};
use crate::movegen::attacks_square;

/// Shields changed by one intimidation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intimidation {
    pub stripped: Vec<Square>,
    pub restored: Vec<Square>,
}

/// Recomputes intimidation for the whole board.
///
/// Every piece whose attack set contains the square of a King owned by the
/// other side loses its shield and is marked intimidated. Intimidated pieces
/// that no longer threaten any King are shielded again. A checking piece that
/// had no shield to begin with is left unmarked.
pub fn check_intimidation(board: &mut Board) -> Intimidation {
    let mut checkers: Vec<Square> = Vec::new();
    for king_color in [Color::White, Color::Black] {
        let Some(king) = board.find_king(king_color) else {
            continue;
        };
        for piece in board.pieces().filter(|p| p.owner() != king_color) {
            if attacks_square(piece.square, king, board) && !checkers.contains(&piece.square) {
                checkers.push(piece.square);
            }
        }
    }

    let mut result = Intimidation::default();
    let squares: Vec<Square> = board.pieces().map(|p| p.square).collect();
    for sq in squares {
        let Some(piece) = board.get_mut(sq) else {
            continue;
        };
        if checkers.contains(&sq) {
            if piece.has_shield {
                piece.has_shield = false;
                piece.is_intimidated = true;
                info!(kind = ?piece.kind, square = %sq, "intimidated");
                result.stripped.push(sq);
            }
        } else if piece.is_intimidated {
            piece.grant_shield();
            result.restored.push(sq);
        }
    }
    result
}
