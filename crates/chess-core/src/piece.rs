//! Chess piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Back-rank template, placed on columns 0..8 of each home row.
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Material value used by the evaluator. Kings are worth nothing.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Returns the lowercase name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Letter used in move records: empty for pawns, otherwise the
    /// uppercased first letter of the name (so knights are also `K`).
    pub const fn record_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Rook => Some('R'),
            PieceKind::Knight => Some('K'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece standing on the board.
///
/// `has_moved` only ever flips from `false` to `true`, on the first real
/// relocation of this piece. Castling eligibility depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Returns the FEN character for this piece.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// Returns the material value signed by color (White positive).
    #[inline]
    pub const fn signed_value(self) -> i32 {
        self.kind.value() * self.color.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_fen_char(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(
            PieceKind::from_fen_char('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_fen_char('k'),
            Some((PieceKind::King, Color::Black))
        );
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn material_values() {
        let values: Vec<i32> = PieceKind::ALL.iter().map(|k| k.value()).collect();
        assert_eq!(values, vec![1, 5, 3, 3, 9, 0]);
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black).signed_value(), -9);
        assert_eq!(Piece::new(PieceKind::Rook, Color::White).signed_value(), 5);
    }

    #[test]
    fn record_letters() {
        assert_eq!(PieceKind::Pawn.record_letter(), None);
        assert_eq!(PieceKind::Queen.record_letter(), Some('Q'));
        assert_eq!(PieceKind::Knight.record_letter(), Some('K'));
    }

    #[test]
    fn new_piece_is_unmoved() {
        let piece = Piece::new(PieceKind::King, Color::White);
        assert!(!piece.has_moved);
        assert_eq!(piece.to_fen_char(), 'K');
    }
}
