//! Board representation and piece types.
//!
//! Contains squares, pieces and their derived ownership, the board grid,
//! and the candidate action types produced by move generation.

pub mod action;
pub mod piece;
pub mod square;
pub mod state;

pub use action::{Actions, Move, MoveKind, SpecialAction, SpecialKind};
pub use piece::{half_owner, Color, Piece, PieceKind};
pub use square::{
    all_squares, Square, SquareClass, ALL_DIRECTIONS, BOARD_SIZE, DIAGONAL, ORTHOGONAL,
    WHITE_HALF_START,
};
pub use state::Board;
