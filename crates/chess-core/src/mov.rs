//! Move representation.

use crate::{Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move from one square to another.
///
/// Castling is a king move of two columns; the rook relocation is implied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns true if this is a king-style two-column shift along a row.
    #[inline]
    pub const fn is_two_column_shift(self) -> bool {
        self.from.row == self.to.row && self.from.col.abs_diff(self.to.col) == 2
    }

    /// Returns the coordinate notation used on the engine wire, e.g. `"e2e4"`.
    pub fn to_coordinate(self, size: usize) -> String {
        format!(
            "{}{}",
            self.from.to_notation(size),
            self.to.to_notation(size)
        )
    }

    /// Parses coordinate notation such as `"e2e4"` (or `"a10a9"` on larger
    /// boards): `file = letter - 'a'`, `row = size - rank`.
    pub fn from_coordinate(s: &str, size: usize) -> Option<Self> {
        let bytes = s.as_bytes();
        // The destination file is the first letter after the origin's digits.
        let split = bytes
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, b)| b.is_ascii_lowercase())
            .map(|(i, _)| i)?;
        let from = Square::from_notation(&s[..split], size)?;
        let to = Square::from_notation(&s[split..], size)?;
        Some(Move { from, to })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({:?} -> {:?})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A completed move as it was played.
///
/// `piece` is a snapshot taken before the move, so `piece.has_moved`
/// tells whether this was the piece's first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col, 10).unwrap()
    }

    #[test]
    fn coordinate_round_trip() {
        let m = Move::from_coordinate("e2e4", 8).unwrap();
        assert_eq!(m.from, Square::new(6, 4, 8).unwrap());
        assert_eq!(m.to, Square::new(4, 4, 8).unwrap());
        assert_eq!(m.to_coordinate(8), "e2e4");
    }

    #[test]
    fn coordinate_on_larger_board() {
        let m = Move::from_coordinate("a10a8", 10).unwrap();
        assert_eq!(m.from, sq(0, 0));
        assert_eq!(m.to, sq(2, 0));
        assert_eq!(m.to_coordinate(10), "a10a8");
    }

    #[test]
    fn invalid_coordinates() {
        assert_eq!(Move::from_coordinate("", 8), None);
        assert_eq!(Move::from_coordinate("e2", 8), None);
        assert_eq!(Move::from_coordinate("e2e9", 8), None);
        assert_eq!(Move::from_coordinate("0000", 8), None);
        assert_eq!(Move::from_coordinate("(none)", 8), None);
    }

    #[test]
    fn two_column_shift() {
        assert!(Move::new(sq(7, 4), sq(7, 6)).is_two_column_shift());
        assert!(Move::new(sq(7, 4), sq(7, 2)).is_two_column_shift());
        assert!(!Move::new(sq(7, 4), sq(6, 6)).is_two_column_shift());
        assert!(!Move::new(sq(7, 4), sq(7, 5)).is_two_column_shift());
    }

    #[test]
    fn record_keeps_pre_move_snapshot() {
        let record = MoveRecord {
            from: sq(6, 4),
            to: sq(4, 4),
            piece: Piece::new(PieceKind::Pawn, Color::White),
            captured: false,
        };
        assert!(!record.piece.has_moved);
        assert_eq!(Move::new(record.from, record.to).to_coordinate(10), "e4e6");
    }
}
