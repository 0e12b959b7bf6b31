//! Move records and PGN export.
//!
//! Move records take the form `{letter}{from}{x?}{to}`, e.g. `e2e4`,
//! `Bf1xb5`. The letter is the uppercase initial of the piece kind name and
//! is omitted for pawns, so kings and knights share `K`.

use chess_core::Piece;
use chrono::{NaiveDate, Utc};

/// Formats a move record from square names such as `"e2"`.
pub fn format_move(piece: &Piece, from: &str, to: &str, capture: bool) -> String {
    format_move_annotated(piece, from, to, capture, false, false)
}

/// Like [`format_move`], with a trailing `#` for mate or `+` for check.
pub fn format_move_annotated(
    piece: &Piece,
    from: &str,
    to: &str,
    capture: bool,
    check: bool,
    mate: bool,
) -> String {
    let mut record = String::with_capacity(from.len() + to.len() + 3);
    if let Some(letter) = piece.kind.record_letter() {
        record.push(letter);
    }
    record.push_str(from);
    if capture {
        record.push('x');
    }
    record.push_str(to);
    if mate {
        record.push('#');
    } else if check {
        record.push('+');
    }
    record
}

/// Header tags written before the move text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnTags {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub round: u32,
    pub white: String,
    pub black: String,
}

impl Default for PgnTags {
    fn default() -> Self {
        PgnTags {
            event: "Custom Board Chess Game".to_string(),
            site: "local".to_string(),
            date: Utc::now().date_naive(),
            round: 1,
            white: "Player".to_string(),
            black: "Computer".to_string(),
        }
    }
}

/// Renders a game with default tags dated today.
pub fn generate_pgn(moves: &[String], result: &str) -> String {
    generate_pgn_with(&PgnTags::default(), moves, result)
}

/// Renders the tag section, a blank line, and the numbered move text
/// terminated by `result`.
pub fn generate_pgn_with(tags: &PgnTags, moves: &[String], result: &str) -> String {
    let mut pgn = String::new();
    pgn.push_str(&format!("[Event \"{}\"]\n", tags.event));
    pgn.push_str(&format!("[Site \"{}\"]\n", tags.site));
    pgn.push_str(&format!("[Date \"{}\"]\n", tags.date.format("%Y.%m.%d")));
    pgn.push_str(&format!("[Round \"{}\"]\n", tags.round));
    pgn.push_str(&format!("[White \"{}\"]\n", tags.white));
    pgn.push_str(&format!("[Black \"{}\"]\n", tags.black));
    pgn.push_str(&format!("[Result \"{}\"]\n", result));
    pgn.push('\n');

    for (i, mv) in moves.iter().enumerate() {
        if i % 2 == 0 {
            pgn.push_str(&format!("{}. ", i / 2 + 1));
        }
        pgn.push_str(mv);
        pgn.push(' ');
    }
    pgn.push_str(result);
    pgn.push('\n');
    pgn
}
