//! Pawn move generation.
//!
//! Pawns step forward, advance two or three squares from their starting
//! row, capture diagonally forward and can leap over an enemy Life or Death
//! directly ahead.

use crate::board::{Actions, Board, Move, MoveKind, Piece};

/// Generates moves, captures and special jumps for a pawn.
pub fn pawn_actions(pawn: &Piece, board: &Board) -> Actions {
    let mut actions = Actions::default();
    let dir = pawn.color.forward();
    let from = pawn.square;

    if let Some(one) = from.offset(dir, 0) {
        match board.get(one) {
            None => {
                actions.moves.push(Move::step(one));
                if !pawn.has_moved && from.row == pawn.color.pawn_row() {
                    push_advance(pawn, board, &mut actions);
                }
            }
            Some(blocker) if blocker.is_spirit() && blocker.owner() != pawn.owner() => {
                if let Some(land) = from.offset(2 * dir, 0).filter(|sq| board.is_empty(*sq)) {
                    actions.moves.push(Move {
                        to: land,
                        kind: MoveKind::SpecialJump { over: one },
                    });
                }
            }
            Some(_) => {}
        }
    }

    for dc in [-1, 1] {
        let Some(diag) = from.offset(dir, dc) else {
            continue;
        };
        if let Some(target) = board.get(diag) {
            if !target.is_spirit() && target.owner() != pawn.owner() {
                actions.attacks.push(diag);
            }
        }
    }

    actions
}

/// Two- and three-square advances. Every square on the way must be empty.
fn push_advance(pawn: &Piece, board: &Board, actions: &mut Actions) {
    let dir = pawn.color.forward();
    let Some(two) = pawn.square.offset(2 * dir, 0).filter(|sq| board.is_empty(*sq)) else {
        return;
    };
    actions.moves.push(Move::step(two));
    if let Some(three) = pawn.square.offset(3 * dir, 0).filter(|sq| board.is_empty(*sq)) {
        actions.moves.push(Move::step(three));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind, Square};

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    fn put(board: &mut Board, color: Color, kind: PieceKind, r: usize, c: usize) -> Piece {
        let piece = Piece::new(color, kind, sq(r, c));
        board.place(piece, sq(r, c));
        piece
    }

    fn targets(actions: &Actions) -> Vec<Square> {
        actions.moves.iter().map(|m| m.to).collect()
    }

    #[test]
    fn initial_advance_up_to_three() {
        let board = Board::initial();
        let pawn = board.get(sq(8, 3)).unwrap();
        let actions = pawn_actions(pawn, &board);
        assert_eq!(targets(&actions), vec![sq(7, 3), sq(6, 3), sq(5, 3)]);
        assert!(actions.attacks.is_empty());
    }

    #[test]
    fn black_pawns_move_down() {
        let board = Board::initial();
        let pawn = board.get(sq(1, 3)).unwrap();
        assert_eq!(targets(&pawn_actions(pawn, &board)), vec![sq(2, 3), sq(3, 3), sq(4, 3)]);
    }

    #[test]
    fn three_step_needs_clear_path() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 8, 0);
        put(&mut board, Color::Black, PieceKind::Rook, 5, 0);
        assert_eq!(targets(&pawn_actions(&pawn, &board)), vec![sq(7, 0), sq(6, 0)]);

        put(&mut board, Color::Black, PieceKind::Rook, 6, 0);
        assert_eq!(targets(&pawn_actions(&pawn, &board)), vec![sq(7, 0)]);
    }

    #[test]
    fn moved_pawn_steps_once() {
        let mut board = Board::empty();
        let mut pawn = put(&mut board, Color::White, PieceKind::Pawn, 8, 0);
        pawn.has_moved = true;
        board.place(pawn, pawn.square);
        assert_eq!(targets(&pawn_actions(&pawn, &board)), vec![sq(7, 0)]);
    }

    #[test]
    fn captures_enemy_standard_pieces_only() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 6, 4);
        put(&mut board, Color::Black, PieceKind::Knight, 5, 3);
        put(&mut board, Color::White, PieceKind::Knight, 5, 5);
        let actions = pawn_actions(&pawn, &board);
        assert_eq!(actions.attacks, vec![sq(5, 3)]);

        // A Death diagonally ahead is never captured.
        board.clear(sq(5, 3));
        put(&mut board, Color::Black, PieceKind::Death, 5, 3);
        assert!(pawn_actions(&pawn, &board).attacks.is_empty());
    }

    #[test]
    fn special_jump_over_enemy_spirit() {
        let mut board = Board::empty();
        // Row 4 is Black's half, so this Life acts for Black.
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 5, 1);
        put(&mut board, Color::White, PieceKind::Life, 4, 1);
        let actions = pawn_actions(&pawn, &board);
        assert_eq!(
            actions.moves,
            vec![Move { to: sq(3, 1), kind: MoveKind::SpecialJump { over: sq(4, 1) } }]
        );

        // Landing square must be empty.
        put(&mut board, Color::Black, PieceKind::Pawn, 3, 1);
        assert!(pawn_actions(&pawn, &board).moves.is_empty());
    }

    #[test]
    fn no_jump_over_friendly_spirit() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 7, 1);
        put(&mut board, Color::Black, PieceKind::Life, 6, 1);
        assert!(pawn_actions(&pawn, &board).moves.is_empty());
    }
}
