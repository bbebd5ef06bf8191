//! Board coordinates.
//!
//! A `Square` is a checked (row, col) pair on the 10x10 board. Squares can
//! only be built through `Square::new` or `Square::offset`, so an out-of-range
//! coordinate never reaches the rules code.

use std::fmt;

use serde::Serialize;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 10;

/// First row of White's home half. Rows below it belong to Black.
pub const WHITE_HALF_START: usize = 5;

/// The four orthogonal unit steps.
pub const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// The four diagonal unit steps.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight unit steps, orthogonal first.
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The two checkerboard colour classes.
///
/// Life only ever stands on odd squares, Death only on even ones; a diagonal
/// step never changes the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareClass {
    /// `(row + col)` is even.
    Even,
    /// `(row + col)` is odd.
    Odd,
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns the square at (row, col), or `None` when it is off the board.
    pub fn new(row: usize, col: usize) -> Option<Square> {
        if is_valid(row as isize, col as isize) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Returns the square `dr` rows and `dc` columns away, if on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row as isize + dr as isize;
        let c = self.col as isize + dc as isize;
        if is_valid(r, c) {
            Some(Square { row: r as u8, col: c as u8 })
        } else {
            None
        }
    }

    /// Row as a usize index.
    pub const fn r(self) -> usize {
        self.row as usize
    }

    /// Column as a usize index.
    pub const fn c(self) -> usize {
        self.col as usize
    }

    pub const fn class(self) -> SquareClass {
        if (self.row + self.col) % 2 == 0 {
            SquareClass::Even
        } else {
            SquareClass::Odd
        }
    }

    /// Chebyshev (king-move) distance between two squares.
    pub fn distance(self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// True for the eight squares surrounding `other`.
    pub fn is_adjacent(self, other: Square) -> bool {
        self.distance(other) == 1
    }

    /// Unit step from `self` toward `other` when both lie on a common rank,
    /// file or diagonal.
    pub fn direction_to(self, other: Square) -> Option<(i8, i8)> {
        let dr = other.row as i8 - self.row as i8;
        let dc = other.col as i8 - self.col as i8;
        if (dr, dc) == (0, 0) {
            return None;
        }
        if dr == 0 || dc == 0 || dr.abs() == dc.abs() {
            Some((dr.signum(), dc.signum()))
        } else {
            None
        }
    }

    /// Squares strictly between `self` and `other` on a straight line.
    ///
    /// Empty when the squares are adjacent or not aligned.
    pub fn between(self, other: Square) -> Vec<Square> {
        let mut out = Vec::new();
        let Some((dr, dc)) = self.direction_to(other) else {
            return out;
        };
        let mut cur = self;
        while let Some(next) = cur.offset(dr, dc) {
            if next == other {
                break;
            }
            out.push(next);
            cur = next;
        }
        out
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Returns whether (row, col) lies on the board.
pub fn is_valid(row: isize, col: isize) -> bool {
    (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col)
}

/// Iterates over all 100 squares in row-major order.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| Square { row: r as u8, col: c as u8 }))
}
