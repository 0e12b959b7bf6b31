//! FEN (Forsyth-Edwards Notation) parsing for square boards of any size.
//!
//! The placement field may describe any `n × n` board: ranks are separated by
//! `/` and runs of empty squares may take more than one digit (`"10"`).

use crate::{Color, PieceKind, MAX_BOARD_SIZE};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// One parsed rank: `None` for an empty square.
pub type FenRank = Vec<Option<(PieceKind, Color)>>;

/// Parsed FEN data.
///
/// Only the placement field is mandatory; missing trailing fields take the
/// values of a fresh game (`w - - 0 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Ranks from row 0 (Black's back rank) downwards.
    pub ranks: Vec<FenRank>,
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square; always "-" for this variant.
    pub en_passant: String,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard 8×8 starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let ranks = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts.get(2).copied().unwrap_or("-");
        Self::validate_castling(castling)?;

        let en_passant = parts.get(3).copied().unwrap_or("-");

        let halfmove = parts.get(4).copied().unwrap_or("0");
        let halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?;

        let fullmove = parts.get(5).copied().unwrap_or("1");
        let fullmove_number = fullmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(fullmove.to_string()))?;

        Ok(FenParser {
            ranks,
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Board size described by the placement field.
    pub fn size(&self) -> usize {
        self.ranks.len()
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<FenRank>, FenError> {
        let rank_texts: Vec<&str> = placement.split('/').collect();
        let size = rank_texts.len();
        if size > MAX_BOARD_SIZE {
            return Err(FenError::InvalidPiecePlacement(format!(
                "{} ranks exceed the maximum board size {}",
                size, MAX_BOARD_SIZE
            )));
        }

        let mut ranks = Vec::with_capacity(size);
        for (i, text) in rank_texts.iter().enumerate() {
            let mut rank: FenRank = Vec::with_capacity(size);
            let mut empty_run = 0usize;
            for c in text.chars() {
                if let Some(d) = c.to_digit(10) {
                    empty_run = empty_run
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(d as usize))
                        .filter(|&n| rank.len() + n <= size)
                        .ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "empty run in rank {} overruns {} squares",
                                size - i,
                                size
                            ))
                        })?;
                    continue;
                }
                rank.extend(std::iter::repeat(None).take(empty_run));
                empty_run = 0;
                match PieceKind::from_fen_char(c) {
                    Some(piece) => rank.push(Some(piece)),
                    None => {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "invalid character '{}' in rank {}",
                            c,
                            size - i
                        )))
                    }
                }
            }
            rank.extend(std::iter::repeat(None).take(empty_run));

            if rank.len() != size {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected {}",
                    size - i,
                    rank.len(),
                    size
                )));
            }
            ranks.push(rank);
        }

        Ok(ranks)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }

    /// Returns true if the castling field grants the given right letter.
    pub fn has_castling_right(&self, right: char) -> bool {
        self.castling.contains(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.size(), 8);
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, "-");
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.ranks[0][4], Some((PieceKind::King, Color::Black)));
        assert_eq!(fen.ranks[6][0], Some((PieceKind::Pawn, Color::White)));
        assert_eq!(fen.ranks[3][3], None);
    }

    #[test]
    fn placement_only() {
        let fen = FenParser::parse("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "-");
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn multi_digit_empty_runs() {
        let placement = "r8r/10/10/10/10/10/10/10/10/4K5";
        let fen = FenParser::parse(placement).unwrap();
        assert_eq!(fen.size(), 10);
        assert_eq!(fen.ranks[0][9], Some((PieceKind::Rook, Color::Black)));
        assert_eq!(fen.ranks[9][4], Some((PieceKind::King, Color::White)));
    }

    #[test]
    fn oversized_empty_runs_are_rejected() {
        for placement in [
            "99999999999999999999/8/8/8/8/8/8/8 w - - 0 1",
            "4000000000/8/8/8/8/8/8/8 w - - 0 1",
            "k9/8/8/8/8/8/8/8 w - - 0 1",
            "8/8/8/8/8/8/8/K11",
        ] {
            assert!(
                matches!(
                    FenParser::parse(placement),
                    Err(FenError::InvalidPiecePlacement(_))
                ),
                "{}",
                placement
            );
        }
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenParser::parse(""),
            Err(FenError::InvalidPartCount(0))
        ));

        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            FenParser::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 y"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }
}
