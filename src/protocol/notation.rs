//! Position notation encoding and decoding.
//!
//! A compact single-line form of a position, modelled on chess FEN.
//!
//! Format: `<rows> <player> <slots>`
//!
//! - `rows`: ten rows from row 0 to row 9 separated by `/`. A run of empty
//!   squares is written as its length (`10` for an empty row). A piece is its
//!   letter (`P R N B Q K L D`, uppercase White, lowercase Black) followed by
//!   optional markers: `+` shield, `-` no shield, `!` immune, `~` intimidated,
//!   `^` moved. Without `+` or `-` the piece carries its starting shield.
//! - `player`: `w` or `b`.
//! - `slots`: `-`, `s` (standard used), `x` (special used) or `sx`.

use crate::board::{Board, Color, Piece, PieceKind, Square, BOARD_SIZE};
use crate::resolve::Turn;

/// The starting position.
pub const INITIAL_POSITION: &str =
    "drnbqkbnrl/pppppppppp/10/10/10/10/10/10/PPPPPPPPPP/LRNBQKBNRD w -";

/// Errors that can occur while parsing position notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 3 fields separated by spaces, got {0}")]
    WrongFieldCount(usize),

    #[error("expected 10 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} covers {len} squares, expected 10")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("marker '{0}' does not follow a piece")]
    DanglingMarker(char),

    #[error("piece at ({row},{col}) is intimidated but shielded")]
    IntimidatedWithShield { row: usize, col: usize },

    #[error("invalid player: '{0}'")]
    InvalidPlayer(String),

    #[error("invalid slots: '{0}'")]
    InvalidSlots(String),
}

/// A board together with whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Turn,
}

/// Parses a position string.
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
    let fields: Vec<&str> = s.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(NotationError::WrongFieldCount(fields.len()));
    }

    let board = parse_rows(fields[0])?;

    let mut player_chars = fields[1].chars();
    let current_player = match (player_chars.next(), player_chars.next()) {
        (Some(c), None) => Color::from_notation_char(c),
        _ => None,
    }
    .ok_or_else(|| NotationError::InvalidPlayer(fields[1].to_string()))?;

    let (standard_move_made, special_move_made) = match fields[2] {
        "-" => (false, false),
        "s" => (true, false),
        "x" => (false, true),
        "sx" => (true, true),
        other => return Err(NotationError::InvalidSlots(other.to_string())),
    };

    Ok(Position {
        board,
        turn: Turn {
            current_player,
            standard_move_made,
            special_move_made,
        },
    })
}

fn parse_rows(s: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0usize;
        let mut run = 0usize;
        let mut last: Option<Square> = None;

        for ch in text.chars() {
            if let Some(d) = ch.to_digit(10) {
                run = run * 10 + d as usize;
                last = None;
                continue;
            }
            col += run;
            run = 0;

            if let Some(sq) = last.filter(|_| is_marker(ch)) {
                if let Some(piece) = board.get_mut(sq) {
                    apply_marker(piece, ch);
                }
                continue;
            }
            if is_marker(ch) {
                return Err(NotationError::DanglingMarker(ch));
            }

            let kind = PieceKind::from_notation_char(ch).ok_or(NotationError::InvalidPiece(ch))?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let square = Square::new(row, col).ok_or(NotationError::WrongRowLength {
                row,
                len: col + 1,
            })?;
            board.place(Piece::new(color, kind, square), square);
            last = Some(square);
            col += 1;
        }
        col += run;

        if col != BOARD_SIZE {
            return Err(NotationError::WrongRowLength { row, len: col });
        }
    }

    for piece in board.pieces() {
        if piece.is_intimidated && piece.has_shield {
            return Err(NotationError::IntimidatedWithShield {
                row: piece.square.r(),
                col: piece.square.c(),
            });
        }
    }
    Ok(board)
}

fn is_marker(ch: char) -> bool {
    matches!(ch, '+' | '-' | '!' | '~' | '^')
}

fn apply_marker(piece: &mut Piece, marker: char) {
    match marker {
        '+' => piece.has_shield = true,
        '-' => piece.has_shield = false,
        '!' => piece.is_immune = true,
        '~' => piece.is_intimidated = true,
        '^' => piece.has_moved = true,
        _ => {}
    }
}

/// Encodes a board and turn as a position string.
pub fn encode_position(board: &Board, turn: &Turn) -> String {
    let mut result = String::with_capacity(128);

    for row in 0..BOARD_SIZE {
        if row > 0 {
            result.push('/');
        }
        let mut empty = 0;
        for col in 0..BOARD_SIZE {
            let piece = Square::new(row, col).and_then(|sq| board.get(sq));
            let Some(piece) = piece else {
                empty += 1;
                continue;
            };
            if empty > 0 {
                result.push_str(&empty.to_string());
                empty = 0;
            }
            result.push(piece.notation_char());
            if piece.has_shield != piece.kind.starts_shielded() {
                result.push(if piece.has_shield { '+' } else { '-' });
            }
            if piece.is_immune {
                result.push('!');
            }
            if piece.is_intimidated {
                result.push('~');
            }
            if piece.has_moved {
                result.push('^');
            }
        }
        if empty > 0 {
            result.push_str(&empty.to_string());
        }
    }

    result.push(' ');
    result.push(turn.current_player.notation_char());
    result.push(' ');
    result.push_str(match (turn.standard_move_made, turn.special_move_made) {
        (false, false) => "-",
        (true, false) => "s",
        (false, true) => "x",
        (true, true) => "sx",
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    #[test]
    fn initial_position_matches_board() {
        let pos = parse_position(INITIAL_POSITION).unwrap();
        assert_eq!(pos.board, Board::initial());
        assert_eq!(pos.turn, Turn::new(Color::White));
        assert_eq!(encode_position(&Board::initial(), &Turn::new(Color::White)), INITIAL_POSITION);
    }

    #[test]
    fn markers_set_flags() {
        let pos = parse_position("10/10/10/10/3K+!4q-~^1/10/10/10/10/10 b sx").unwrap();
        let king = pos.board.get(sq(4, 3)).unwrap();
        assert_eq!(king.color, Color::White);
        assert!(king.has_shield);
        assert!(king.is_immune);
        let queen = pos.board.get(sq(4, 8)).unwrap();
        assert_eq!(queen.color, Color::Black);
        assert!(!queen.has_shield);
        assert!(queen.is_intimidated);
        assert!(queen.has_moved);
        assert_eq!(pos.turn.current_player, Color::Black);
        assert!(pos.turn.standard_move_made && pos.turn.special_move_made);
    }

    #[test]
    fn encoding_keeps_state_flags() {
        let s = "10/10/10/10/3K+!4q-~^1/10/10/10/10/10 b x";
        let pos = parse_position(s).unwrap();
        assert_eq!(encode_position(&pos.board, &pos.turn), s);
    }

    #[test]
    fn wrong_field_count() {
        assert_eq!(
            parse_position("10/10 w"),
            Err(NotationError::WrongFieldCount(2))
        );
    }

    #[test]
    fn wrong_row_count() {
        assert_eq!(
            parse_position("10/10/10 w -"),
            Err(NotationError::WrongRowCount(3))
        );
    }

    #[test]
    fn short_and_long_rows() {
        assert_eq!(
            parse_position("9/10/10/10/10/10/10/10/10/10 w -"),
            Err(NotationError::WrongRowLength { row: 0, len: 9 })
        );
        assert!(matches!(
            parse_position("10/10/10/10/10/10/10/10/10/10P w -"),
            Err(NotationError::WrongRowLength { row: 9, .. })
        ));
    }

    #[test]
    fn bad_characters() {
        assert_eq!(
            parse_position("10/10/10/10/10/10/10/10/10/9x w -"),
            Err(NotationError::InvalidPiece('x'))
        );
        assert_eq!(
            parse_position("+10/10/10/10/10/10/10/10/10/10 w -"),
            Err(NotationError::DanglingMarker('+'))
        );
        assert_eq!(
            parse_position("10/10/10/10/10/10/10/10/10/10 white -"),
            Err(NotationError::InvalidPlayer("white".to_string()))
        );
        assert_eq!(
            parse_position("10/10/10/10/10/10/10/10/10/10 w xs"),
            Err(NotationError::InvalidSlots("xs".to_string()))
        );
    }

    #[test]
    fn intimidated_piece_must_be_unshielded() {
        assert_eq!(
            parse_position("10/10/10/10/10/4R~5/10/10/10/10 w -"),
            Err(NotationError::IntimidatedWithShield { row: 5, col: 4 })
        );
    }
}
