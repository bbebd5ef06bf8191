//! King and Knight move generation.
//!
//! Besides its L-shaped leaps a Knight may use neighbouring pieces as ramps,
//! hopping two squares in a straight line over them, up to two hops in a row.

use crate::board::{Actions, Board, Move, MoveKind, Piece, PieceKind, Square, ALL_DIRECTIONS};

/// The eight L-shaped knight offsets.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Maximum number of chained ramp hops.
const MAX_RAMP_HOPS: usize = 2;

pub fn king_actions(king: &Piece, board: &Board) -> Actions {
    let mut actions = Actions::default();
    for (dr, dc) in ALL_DIRECTIONS {
        let Some(to) = king.square.offset(dr, dc) else {
            continue;
        };
        push_leap(king, to, board, &mut actions);
    }
    actions
}

pub fn knight_actions(knight: &Piece, board: &Board) -> Actions {
    let mut actions = Actions::default();
    for (dr, dc) in KNIGHT_DELTAS {
        let Some(to) = knight.square.offset(dr, dc) else {
            continue;
        };
        push_leap(knight, to, board, &mut actions);
    }

    for landing in ramp_destinations(knight.square, board) {
        if actions.find_move(landing).is_none() {
            actions.moves.push(Move { to: landing, kind: MoveKind::RampJump });
        }
    }
    actions
}

/// Empty squares become moves, enemy standard pieces become attacks.
fn push_leap(piece: &Piece, to: Square, board: &Board, actions: &mut Actions) {
    match board.get(to) {
        None => actions.moves.push(Move::step(to)),
        Some(other) if !other.is_spirit() && other.owner() != piece.owner() => {
            actions.attacks.push(to)
        }
        Some(_) => {}
    }
}

/// Every square a knight on `origin` can reach with one or two ramp hops.
///
/// The knight's own square counts as vacated once it has left, but it is
/// never a valid landing.
pub fn ramp_destinations(origin: Square, board: &Board) -> Vec<Square> {
    let mut found: Vec<Square> = Vec::new();
    let mut frontier = vec![origin];
    for _ in 0..MAX_RAMP_HOPS {
        let mut next = Vec::new();
        for from in frontier {
            for landing in single_ramp_jumps(origin, from, board) {
                if landing != origin && !found.contains(&landing) {
                    found.push(landing);
                    next.push(landing);
                }
            }
        }
        frontier = next;
    }
    found
}

fn single_ramp_jumps(origin: Square, from: Square, board: &Board) -> Vec<Square> {
    let mut out = Vec::new();
    for (dr, dc) in ALL_DIRECTIONS {
        let (Some(ramp), Some(landing)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) else {
            continue;
        };
        if ramp == origin || !is_ramp(board, ramp) {
            continue;
        }
        if board.is_empty(landing) {
            out.push(landing);
        }
    }
    out
}

/// Any standard piece except a King can serve as a ramp.
fn is_ramp(board: &Board, square: Square) -> bool {
    board
        .get(square)
        .is_some_and(|p| !p.is_spirit() && p.kind != PieceKind::King)
}
