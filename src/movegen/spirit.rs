//! Life and Death move generation.
//!
//! Both move one diagonal step and only ever stand on their own colour class:
//! Life on odd squares, Death on even ones. Life heals unshielded friends on
//! neighbouring diagonals; Death kills any unprotected neighbour there.

use crate::board::{
    Actions, Board, Move, Piece, SpecialAction, SpecialKind, Square, SquareClass, DIAGONAL,
    ORTHOGONAL,
};

/// Colour class Life moves on.
pub const LIFE_CLASS: SquareClass = SquareClass::Odd;

/// Colour class Death moves on.
pub const DEATH_CLASS: SquareClass = SquareClass::Even;

pub fn life_actions(life: &Piece, board: &Board) -> Actions {
    let mut actions = Actions::default();
    for target in diagonal_neighbours(life.square, LIFE_CLASS) {
        match board.get(target) {
            None => actions.moves.push(Move::step(target)),
            Some(friend) if can_heal(life, friend) => actions.special_actions.push(SpecialAction {
                target,
                kind: SpecialKind::Heal,
            }),
            Some(_) => {}
        }
    }
    actions
}

pub fn death_actions(death: &Piece, board: &Board) -> Actions {
    let mut actions = Actions::default();
    for target in diagonal_neighbours(death.square, DEATH_CLASS) {
        match board.get(target) {
            None => actions.moves.push(Move::step(target)),
            Some(victim) if !victim.is_immune && !is_protected(victim, board) => {
                actions.special_actions.push(SpecialAction {
                    target,
                    kind: SpecialKind::Kill,
                })
            }
            Some(_) => {}
        }
    }
    actions
}

/// Life heals friendly standard pieces that have lost their shield.
fn can_heal(life: &Piece, target: &Piece) -> bool {
    !target.is_spirit() && target.owner() == life.owner() && !target.has_shield
}

/// A piece is protected when an orthogonal neighbour shares its owner.
pub fn is_protected(piece: &Piece, board: &Board) -> bool {
    ORTHOGONAL.iter().any(|&(dr, dc)| {
        piece
            .square
            .offset(dr, dc)
            .and_then(|sq| board.get(sq))
            .is_some_and(|guard| guard.owner() == piece.owner())
    })
}

fn diagonal_neighbours(from: Square, class: SquareClass) -> impl Iterator<Item = Square> {
    DIAGONAL
        .into_iter()
        .filter_map(move |(dr, dc)| from.offset(dr, dc))
        .filter(move |sq| sq.class() == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    fn put(board: &mut Board, color: Color, kind: PieceKind, r: usize, c: usize) -> Piece {
        let piece = Piece::new(color, kind, sq(r, c));
        board.place(piece, sq(r, c));
        piece
    }

    #[test]
    fn life_moves_on_odd_squares() {
        let board = Board::initial();
        let life = board.get(sq(9, 0)).unwrap();
        let actions = life_actions(life, &board);
        // (8,1) holds a shielded friendly pawn: neither move nor heal.
        assert!(actions.is_empty());

        let mut board = Board::empty();
        let life = put(&mut board, Color::White, PieceKind::Life, 6, 3);
        let actions = life_actions(&life, &board);
        assert_eq!(actions.moves.len(), 4);
        assert!(actions.moves.iter().all(|m| m.to.class() == SquareClass::Odd));
    }

    #[test]
    fn life_on_wrong_class_is_stuck() {
        let mut board = Board::empty();
        let life = put(&mut board, Color::White, PieceKind::Life, 6, 4);
        assert!(life_actions(&life, &board).is_empty());
    }

    #[test]
    fn life_heals_unshielded_friend() {
        let mut board = Board::empty();
        let life = put(&mut board, Color::White, PieceKind::Life, 6, 3);
        let mut rook = put(&mut board, Color::White, PieceKind::Rook, 5, 4);
        rook.has_shield = false;
        board.place(rook, rook.square);
        let mut foe = put(&mut board, Color::Black, PieceKind::Rook, 7, 2);
        foe.has_shield = false;
        board.place(foe, foe.square);
        put(&mut board, Color::White, PieceKind::Knight, 7, 4);

        let actions = life_actions(&life, &board);
        assert_eq!(
            actions.special_actions,
            vec![SpecialAction { target: sq(5, 4), kind: SpecialKind::Heal }]
        );
    }

    #[test]
    fn death_kills_unprotected_neighbours() {
        let mut board = Board::empty();
        let death = put(&mut board, Color::Black, PieceKind::Death, 4, 4);
        put(&mut board, Color::White, PieceKind::Pawn, 5, 5);
        put(&mut board, Color::White, PieceKind::Pawn, 3, 3);
        put(&mut board, Color::White, PieceKind::Pawn, 3, 2);
        let actions = death_actions(&death, &board);
        assert_eq!(
            actions.special_actions,
            vec![SpecialAction { target: sq(5, 5), kind: SpecialKind::Kill }]
        );
        assert_eq!(actions.moves.len(), 2);
    }

    #[test]
    fn death_kills_friends_too() {
        let mut board = Board::empty();
        let death = put(&mut board, Color::Black, PieceKind::Death, 2, 2);
        put(&mut board, Color::Black, PieceKind::Bishop, 1, 1);
        let actions = death_actions(&death, &board);
        assert_eq!(actions.special_actions.len(), 1);
    }

    #[test]
    fn immune_pieces_cannot_be_killed() {
        let mut board = Board::empty();
        let death = put(&mut board, Color::Black, PieceKind::Death, 4, 4);
        let mut pawn = put(&mut board, Color::White, PieceKind::Pawn, 5, 5);
        pawn.is_immune = true;
        board.place(pawn, pawn.square);
        assert!(death_actions(&death, &board).special_actions.is_empty());
    }

    #[test]
    fn protection_uses_owner_not_color() {
        let mut board = Board::empty();
        let pawn = put(&mut board, Color::White, PieceKind::Pawn, 5, 5);
        // A Black Life standing in White's half guards the pawn.
        put(&mut board, Color::Black, PieceKind::Life, 5, 6);
        assert!(is_protected(&pawn, &board));
        board.clear(sq(5, 6));
        put(&mut board, Color::Black, PieceKind::Pawn, 5, 6);
        assert!(!is_protected(&pawn, &board));
    }
}
