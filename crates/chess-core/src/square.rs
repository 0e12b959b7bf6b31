//! Board coordinates and their algebraic notation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest board size whose files can still be lettered `a..z`.
pub const MAX_BOARD_SIZE: usize = 26;

/// A `(row, col)` coordinate on a square board.
///
/// Row 0 is Black's back rank; on a board of size `n` the notation rank of a
/// row is `n - row`, so `(6, 4)` on an 8×8 board is `e2`. A `Square` does not
/// carry the board size: constructors that take one validate against it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Creates a square if it lies on a board of the given size.
    #[inline]
    pub const fn new(row: usize, col: usize, size: usize) -> Option<Self> {
        if row < size && col < size && size <= MAX_BOARD_SIZE {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Offsets this square, returning `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32, size: usize) -> Option<Self> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize, size)
    }

    /// Row as an index.
    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Column as an index.
    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index into a `size × size` grid.
    #[inline]
    pub const fn index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    /// Parses a square from notation (e.g. `"e2"`, `"c10"`) for a board size.
    pub fn from_notation(s: &str, size: usize) -> Option<Self> {
        let (row, col) = notation_to_coord(s, size)?;
        Square::new(row, col, size)
    }

    /// Returns the notation of this square on a board of the given size.
    pub fn to_notation(self, size: usize) -> String {
        coord_to_notation(self.row(), self.col(), size)
    }
}

/// Converts a coordinate to notation: file `'a' + col`, rank `size - row`.
pub fn coord_to_notation(row: usize, col: usize, size: usize) -> String {
    let file = (b'a' + col as u8) as char;
    format!("{}{}", file, size - row)
}

/// Inverse of [`coord_to_notation`]. Returns `None` for malformed text or a
/// square that does not fit the board.
pub fn notation_to_coord(s: &str, size: usize) -> Option<(usize, usize)> {
    let mut chars = s.chars();
    let file = chars.next()?;
    if !file.is_ascii_lowercase() {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rank: usize = digits.parse().ok()?;
    let col = (file as u8 - b'a') as usize;
    if rank == 0 || rank > size || col >= size {
        return None;
    }
    Some((size - rank, col))
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new_checks_bounds() {
        assert!(Square::new(7, 7, 8).is_some());
        assert!(Square::new(8, 0, 8).is_none());
        assert!(Square::new(0, 8, 8).is_none());
        assert!(Square::new(9, 9, 10).is_some());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::new(0, 0, 8).unwrap();
        assert_eq!(corner.offset(-1, 0, 8), None);
        assert_eq!(corner.offset(0, -1, 8), None);
        assert_eq!(corner.offset(2, 1, 8), Square::new(2, 1, 8));
        let far = Square::new(7, 7, 8).unwrap();
        assert_eq!(far.offset(1, 0, 8), None);
    }

    #[test]
    fn notation_examples() {
        assert_eq!(coord_to_notation(6, 4, 8), "e2");
        assert_eq!(coord_to_notation(0, 0, 8), "a8");
        assert_eq!(coord_to_notation(7, 7, 8), "h1");
        assert_eq!(coord_to_notation(0, 2, 10), "c10");
        assert_eq!(notation_to_coord("e2", 8), Some((6, 4)));
        assert_eq!(notation_to_coord("c10", 10), Some((0, 2)));
    }

    #[test]
    fn malformed_notation() {
        assert_eq!(notation_to_coord("", 8), None);
        assert_eq!(notation_to_coord("e", 8), None);
        assert_eq!(notation_to_coord("e9", 8), None);
        assert_eq!(notation_to_coord("e0", 8), None);
        assert_eq!(notation_to_coord("i1", 8), None);
        assert_eq!(notation_to_coord("E2", 8), None);
        assert_eq!(notation_to_coord("e2x", 8), None);
    }

    #[test]
    fn every_square_round_trips_on_standard_board() {
        for row in 0..8 {
            for col in 0..8 {
                let text = coord_to_notation(row, col, 8);
                assert_eq!(notation_to_coord(&text, 8), Some((row, col)));
            }
        }
    }

    proptest! {
        #[test]
        fn notation_round_trips_on_any_size(half in 4usize..=8, row in 0usize..16, col in 0usize..16) {
            let size = half * 2;
            prop_assume!(row < size && col < size);
            let sq = Square::new(row, col, size).unwrap();
            let text = sq.to_notation(size);
            prop_assert_eq!(Square::from_notation(&text, size), Some(sq));
        }
    }
}
