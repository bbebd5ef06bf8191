//! Sliding move generation for Rook, Bishop and Queen.
//!
//! Rays pass through Life and Death without stopping on them and end at the
//! first standard piece, which is attacked if it belongs to the enemy.

use crate::board::{Actions, Board, Move, Piece, DIAGONAL, ORTHOGONAL};

pub fn rook_actions(piece: &Piece, board: &Board) -> Actions {
    ray_actions(piece, board, &ORTHOGONAL)
}

pub fn bishop_actions(piece: &Piece, board: &Board) -> Actions {
    ray_actions(piece, board, &DIAGONAL)
}

pub fn queen_actions(piece: &Piece, board: &Board) -> Actions {
    let mut actions = ray_actions(piece, board, &ORTHOGONAL);
    actions.extend(ray_actions(piece, board, &DIAGONAL));
    actions
}

/// Casts one ray per direction from the piece's square.
pub fn ray_actions(piece: &Piece, board: &Board, directions: &[(i8, i8)]) -> Actions {
    let mut actions = Actions::default();
    for &(dr, dc) in directions {
        let mut cur = piece.square;
        while let Some(next) = cur.offset(dr, dc) {
            cur = next;
            match board.get(next) {
                None => actions.moves.push(Move::step(next)),
                Some(other) if other.is_spirit() => {}
                Some(other) => {
                    if other.owner() != piece.owner() {
                        actions.attacks.push(next);
                    }
                    break;
                }
            }
        }
    }
    actions
}
