//! Player color representation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the row delta of a pawn step (-1 for White, +1 for Black).
    ///
    /// Row 0 is Black's back rank, so White advances towards lower rows.
    #[inline]
    pub const fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the row pawns of this color start on.
    #[inline]
    pub const fn pawn_row(self, size: usize) -> usize {
        match self {
            Color::White => size - 2,
            Color::Black => 1,
        }
    }

    /// Returns the back rank row for this color.
    #[inline]
    pub const fn back_row(self, size: usize) -> usize {
        match self {
            Color::White => size - 1,
            Color::Black => 0,
        }
    }

    /// Returns +1 for White and -1 for Black, the sign used by material scores.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns the lowercase name used in configuration and protocol text.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            other => Err(format!("unknown color '{}'", other)),
        }
    }
}
