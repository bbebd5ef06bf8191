//! The board grid.
//!
//! Holds at most one piece per square. All reads and writes go through the
//! methods here so that a piece's stored square always matches its cell.

use super::piece::{Color, Piece, PieceKind};
use super::square::{all_squares, is_valid, Square, BOARD_SIZE};

/// Back rank on columns 1..=8, identical for both colours.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A 10x10 grid of optional pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board { cells: [[None; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Creates the standard starting position.
    ///
    /// Black occupies rows 0-1 with Death in the left corner and Life in the
    /// right; White occupies rows 8-9 with Life left and Death right. Each
    /// spirit piece stands on its own colour class.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (color, back, pawns, left, right) in [
            (Color::Black, 0, 1, PieceKind::Death, PieceKind::Life),
            (Color::White, 9, 8, PieceKind::Life, PieceKind::Death),
        ] {
            board.spawn(color, left, back, 0);
            board.spawn(color, right, back, BOARD_SIZE - 1);
            for (i, &kind) in BACK_RANK.iter().enumerate() {
                board.spawn(color, kind, back, i + 1);
            }
            for c in 0..BOARD_SIZE {
                board.spawn(color, PieceKind::Pawn, pawns, c);
            }
        }
        board
    }

    fn spawn(&mut self, color: Color, kind: PieceKind, row: usize, col: usize) {
        if let Some(sq) = Square::new(row, col) {
            self.place(Piece::new(color, kind, sq), sq);
        }
    }

    /// Returns whether (row, col) is on the board.
    pub fn is_valid(row: isize, col: isize) -> bool {
        is_valid(row, col)
    }

    /// Returns the piece on `square`.
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cells[square.r()][square.c()].as_ref()
    }

    /// Returns the piece at (row, col). Off-board coordinates read as empty.
    pub fn at(&self, row: isize, col: isize) -> Option<&Piece> {
        if !is_valid(row, col) {
            return None;
        }
        self.cells[row as usize][col as usize].as_ref()
    }

    pub fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.cells[square.r()][square.c()].as_mut()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Puts `piece` on `square`, overwriting whatever was there, and records
    /// the square on the piece.
    pub fn place(&mut self, mut piece: Piece, square: Square) {
        piece.square = square;
        self.cells[square.r()][square.c()] = Some(piece);
    }

    /// Removes and returns the piece on `square`.
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.r()][square.c()].take()
    }

    /// Moves the piece on `from` to `to`. The old cell is cleared before the
    /// new one is written, so a piece never appears twice.
    ///
    /// Returns false when `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        match self.clear(from) {
            Some(piece) => {
                self.place(piece, to);
                true
            }
            None => false,
        }
    }

    /// Iterates over all pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    /// Squares of all pieces currently owned by `player`.
    pub fn owned_squares(&self, player: Color) -> Vec<Square> {
        self.pieces().filter(|p| p.owner() == player).map(|p| p.square).collect()
    }

    /// Locates the King of the given colour.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|p| p.kind == PieceKind::King && p.color == color)
            .map(|p| p.square)
    }

    /// Checks that every piece's stored square matches its cell.
    pub fn is_consistent(&self) -> bool {
        all_squares().all(|sq| self.get(sq).map_or(true, |p| p.square == sq))
    }

    /// Applies `f` to every piece owned by `player`.
    pub fn for_each_owned_mut(&mut self, player: Color, mut f: impl FnMut(&mut Piece)) {
        for piece in self.cells.iter_mut().flatten().flatten() {
            if piece.owner() == player {
                f(piece);
            }
        }
    }
}
