//! Piece kinds, colours and ownership.
//!
//! Standard pieces belong to their colour. Life and Death belong to whichever
//! player's home half they currently stand in.

use std::ops::Not;

use serde::Serialize;

use super::square::{Square, WHITE_HALF_START};

/// A side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row step a pawn of this colour moves along.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this colour starts on.
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 8,
            Color::Black => 1,
        }
    }

    /// Returns the single-character notation abbreviation.
    pub const fn notation_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a colour from its notation abbreviation.
    pub fn from_notation_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The kind of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Life,
    Death,
}

impl PieceKind {
    /// True for Life and Death.
    pub const fn is_spirit(self) -> bool {
        matches!(self, PieceKind::Life | PieceKind::Death)
    }

    /// Whether a freshly created piece of this kind carries a shield.
    pub const fn starts_shielded(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Life | PieceKind::Death)
    }

    /// Returns the uppercase notation letter (White's spelling).
    pub const fn notation_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Life => 'L',
            PieceKind::Death => 'D',
        }
    }

    /// Parses a kind from a notation letter of either case.
    pub fn from_notation_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            'L' => Some(PieceKind::Life),
            'D' => Some(PieceKind::Death),
            _ => None,
        }
    }
}

/// A piece on the board.
///
/// `square` always mirrors the cell the piece occupies; only `Board` writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    pub has_shield: bool,
    pub has_moved: bool,
    pub is_immune: bool,
    pub is_intimidated: bool,
}

impl Piece {
    /// Creates an unmoved piece with the default shield for its kind.
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Piece {
            color,
            kind,
            square,
            has_shield: kind.starts_shielded(),
            has_moved: false,
            is_immune: false,
            is_intimidated: false,
        }
    }

    /// The player this piece currently acts for.
    pub fn owner(&self) -> Color {
        if self.kind.is_spirit() {
            half_owner(self.square)
        } else {
            self.color
        }
    }

    pub const fn is_spirit(&self) -> bool {
        self.kind.is_spirit()
    }

    /// Grants a shield. A shielded piece is no longer intimidated.
    pub fn grant_shield(&mut self) {
        self.has_shield = true;
        self.is_intimidated = false;
    }

    /// Notation letter, lowercase for Black.
    pub fn notation_char(&self) -> char {
        let c = self.kind.notation_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// The player whose home half contains `square`.
pub fn half_owner(square: Square) -> Color {
    if square.r() >= WHITE_HALF_START {
        Color::White
    } else {
        Color::Black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    #[test]
    fn default_shields() {
        assert!(Piece::new(Color::White, PieceKind::Pawn, sq(8, 0)).has_shield);
        assert!(Piece::new(Color::White, PieceKind::Queen, sq(9, 4)).has_shield);
        assert!(!Piece::new(Color::White, PieceKind::King, sq(9, 5)).has_shield);
        assert!(!Piece::new(Color::White, PieceKind::Life, sq(9, 0)).has_shield);
        assert!(!Piece::new(Color::Black, PieceKind::Death, sq(0, 0)).has_shield);
    }

    #[test]
    fn spirit_owner_follows_half() {
        let mut life = Piece::new(Color::Black, PieceKind::Life, sq(4, 1));
        assert_eq!(life.owner(), Color::Black);
        life.square = sq(5, 0);
        assert_eq!(life.owner(), Color::White);
    }

    #[test]
    fn standard_owner_is_color() {
        let rook = Piece::new(Color::Black, PieceKind::Rook, sq(9, 1));
        assert_eq!(rook.owner(), Color::Black);
    }

    #[test]
    fn notation_chars_roundtrip() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Life,
            PieceKind::Death,
        ] {
            assert_eq!(PieceKind::from_notation_char(kind.notation_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_notation_char('x'), None);
        assert_eq!(Color::from_notation_char('w'), Some(Color::White));
        assert_eq!(Color::from_notation_char('x'), None);
    }

    #[test]
    fn grant_shield_clears_intimidation() {
        let mut q = Piece::new(Color::White, PieceKind::Queen, sq(5, 5));
        q.has_shield = false;
        q.is_intimidated = true;
        q.grant_shield();
        assert!(q.has_shield);
        assert!(!q.is_intimidated);
    }
}
