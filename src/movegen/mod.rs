//! Legal action generation.
//!
//! Computes the candidate moves, attacks and special actions for a piece
//! from the current board. Results are never cached: every board mutation
//! can change them.

pub mod leaper;
pub mod pawn;
pub mod ray;
pub mod spirit;
pub mod staging;

pub use staging::staging_squares;

use crate::board::{Actions, Board, Piece, PieceKind, Square};

/// Returns everything the piece on `square` could do. Empty squares yield
/// no actions.
pub fn possible_actions(square: Square, board: &Board) -> Actions {
    match board.get(square) {
        Some(piece) => actions_for(piece, board),
        None => Actions::default(),
    }
}

/// Dispatches on the piece kind.
pub fn actions_for(piece: &Piece, board: &Board) -> Actions {
    match piece.kind {
        PieceKind::Pawn => pawn::pawn_actions(piece, board),
        PieceKind::Rook => ray::rook_actions(piece, board),
        PieceKind::Bishop => ray::bishop_actions(piece, board),
        PieceKind::Queen => ray::queen_actions(piece, board),
        PieceKind::King => leaper::king_actions(piece, board),
        PieceKind::Knight => leaper::knight_actions(piece, board),
        PieceKind::Life => spirit::life_actions(piece, board),
        PieceKind::Death => spirit::death_actions(piece, board),
    }
}

/// True if the piece on `from` currently attacks `target`.
pub fn attacks_square(from: Square, target: Square, board: &Board) -> bool {
    possible_actions(from, board).has_attack(target)
}
