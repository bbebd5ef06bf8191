//! Staging squares for attacks.
//!
//! An attacker never lands on its target directly. It first moves to a
//! staging square adjacent to the target, using its own movement rule, and
//! strikes from there.

use crate::board::{Board, Piece, PieceKind, Square};

use super::actions_for;
use super::leaper::KNIGHT_DELTAS;

/// Squares from which `attacker` may strike `target`.
///
/// - Rook, Bishop, Queen: the square on the attack line next to the target,
///   if it is empty or is the attacker's own square.
/// - Knight: empty squares one L-move away that touch the target.
/// - King, Pawn: empty squares next to the target that the piece can move to
///   this turn. A pawn with a blocked forward square cannot attack.
pub fn staging_squares(attacker: &Piece, target: Square, board: &Board) -> Vec<Square> {
    match attacker.kind {
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
            ray_staging(attacker, target, board).into_iter().collect()
        }
        PieceKind::Knight => KNIGHT_DELTAS
            .iter()
            .filter_map(|&(dr, dc)| attacker.square.offset(dr, dc))
            .filter(|sq| sq.is_adjacent(target) && board.is_empty(*sq))
            .collect(),
        PieceKind::King | PieceKind::Pawn => actions_for(attacker, board)
            .moves
            .into_iter()
            .map(|m| m.to)
            .filter(|sq| sq.is_adjacent(target))
            .collect(),
        PieceKind::Life | PieceKind::Death => Vec::new(),
    }
}

fn ray_staging(attacker: &Piece, target: Square, board: &Board) -> Option<Square> {
    let (dr, dc) = attacker.square.direction_to(target)?;
    let near = target.offset(-dr, -dc)?;
    if near == attacker.square {
        return Some(near);
    }
    if !board.is_empty(near) {
        return None;
    }
    // Everything before the staging square must be passable.
    let clear = attacker
        .square
        .between(near)
        .iter()
        .all(|sq| board.get(*sq).map_or(true, |p| p.is_spirit()));
    clear.then_some(near)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    fn put(board: &mut Board, color: Color, kind: PieceKind, r: usize, c: usize) -> Piece {
        let piece = Piece::new(color, kind, sq(r, c));
        board.place(piece, sq(r, c));
        piece
    }

    #[test]
    fn rook_stages_next_to_target() {
        let mut board = Board::empty();
        let rook = put(&mut board, Color::White, PieceKind::Rook, 1, 0);
        put(&mut board, Color::Black, PieceKind::Pawn, 1, 5);
        assert_eq!(staging_squares(&rook, sq(1, 5), &board), vec![sq(1, 4)]);
    }

    #[test]
    fn adjacent_ray_attacker_strikes_in_place() {
        let mut board = Board::empty();
        let queen = put(&mut board, Color::White, PieceKind::Queen, 4, 4);
        put(&mut board, Color::Black, PieceKind::Pawn, 3, 3);
        assert_eq!(staging_squares(&queen, sq(3, 3), &board), vec![sq(4, 4)]);
    }

    #[test]
    fn spirit_on_staging_square_blocks_the_attack() {
        let mut board = Board::empty();
        let rook = put(&mut board, Color::White, PieceKind::Rook, 1, 0);
        put(&mut board, Color::Black, PieceKind::Life, 1, 4);
        put(&mut board, Color::Black, PieceKind::Pawn, 1, 5);
        assert!(staging_squares(&rook, sq(1, 5), &board).is_empty());
    }

    #[test]
    fn spirit_earlier_on_the_line_is_passable() {
        let mut board = Board::empty();
        let rook = put(&mut board, Color::White, PieceKind::Rook, 1, 0);
        put(&mut board, Color::Black, PieceKind::Death, 1, 2);
        put(&mut board, Color::Black, PieceKind::Pawn, 1, 5);
        assert_eq!(staging_squares(&rook, sq(1, 5), &board), vec![sq(1, 4)]);
    }

    #[test]
    fn knight_stages_on_the_neighbouring_l_square() {
        let mut board = Board::empty();
        let knight = put(&mut board, Color::White, PieceKind::Knight, 5, 5);
        put(&mut board, Color::Black, PieceKind::Pawn, 3, 6);
        let mut staging = staging_squares(&knight, sq(3, 6), &board);
        staging.sort();
        assert_eq!(staging, vec![sq(4, 7)]);

        let mut board = Board::empty();
        let knight = put(&mut board, Color::White, PieceKind::Knight, 5, 5);
        put(&mut board, Color::Black, PieceKind::Pawn, 4, 7);
        assert_eq!(staging_squares(&knight, sq(4, 7), &board), vec![sq(3, 6)]);

        // An occupied staging square leaves nothing.
        put(&mut board, Color::White, PieceKind::Pawn, 3, 6);
        assert!(staging_squares(&knight, sq(4, 7), &board).is_empty());
    }

    #[test]
    fn king_steps_next_to_its_target() {
        let mut board = Board::empty();
        let king = put(&mut board, Color::White, PieceKind::King, 5, 5);
        put(&mut board, Color::Black, PieceKind::Rook, 4, 4);
        let mut staging = staging_squares(&king, sq(4, 4), &board);
        staging.sort();
        assert_eq!(staging, vec![sq(4, 5), sq(5, 4)]);

        put(&mut board, Color::White, PieceKind::Pawn, 4, 5);
        put(&mut board, Color::White, PieceKind::Pawn, 5, 4);
        assert!(staging_squares(&king, sq(4, 4), &board).is_empty());
    }

    #[test]
    fn pawn_stages_on_its_forward_squares() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 6, 4);
        put(&mut board, Color::Black, PieceKind::Knight, 5, 3);
        assert_eq!(staging_squares(&pawn, sq(5, 3), &board), vec![sq(5, 4)]);

        put(&mut board, Color::White, PieceKind::Rook, 5, 4);
        assert!(staging_squares(&pawn, sq(5, 3), &board).is_empty());
    }

    #[test]
    fn unmoved_pawn_may_stage_two_squares_ahead() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 8, 4);
        put(&mut board, Color::Black, PieceKind::Bishop, 7, 5);
        assert_eq!(staging_squares(&pawn, sq(7, 5), &board), vec![sq(7, 4), sq(6, 4)]);
    }
}
