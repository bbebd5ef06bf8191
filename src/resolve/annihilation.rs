//! Life/Death annihilation.

use tracing::info;

use crate::board::{Board, PieceKind, Square};

/// Removes every Life and Death that stands next to a spirit of the other
/// kind, in any of the eight directions.
///
/// All touching pairs are collected before anything is removed, so a piece
/// touching two opposites still takes both with it. Returns the cleared
/// squares in board order.
pub fn check_annihilation(board: &mut Board) -> Vec<Square> {
    let spirits: Vec<(Square, PieceKind)> = board
        .pieces()
        .filter(|p| p.is_spirit())
        .map(|p| (p.square, p.kind))
        .collect();

    let mut doomed: Vec<Square> = Vec::new();
    for (i, &(a, kind_a)) in spirits.iter().enumerate() {
        for &(b, kind_b) in &spirits[i + 1..] {
            if kind_a != kind_b && a.is_adjacent(b) {
                for sq in [a, b] {
                    if !doomed.contains(&sq) {
                        doomed.push(sq);
                    }
                }
            }
        }
    }

    doomed.sort();
    for &sq in &doomed {
        if let Some(p) = board.clear(sq) {
            info!(kind = ?p.kind, color = ?p.color, square = %sq, "annihilated");
        }
    }
    doomed
}
