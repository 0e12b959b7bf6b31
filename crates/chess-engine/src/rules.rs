//! Check, checkmate and stalemate detection.
//!
//! Attacks are read off the pseudo-legal candidate sets, so a piece attacks
//! every square it could move to. Checkmate and the strict stalemate test
//! simulate each candidate with make/unmake and require `&mut Board`; the
//! board is restored before they return.

use crate::movegen::{all_moves, candidate_moves, has_candidate_move};
use crate::Board;
use chess_core::{Color, Square};
use serde::{Deserialize, Serialize};

/// Position status for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

/// Which stalemate test a game applies.
///
/// `PseudoLegal` declares stalemate only when no piece has any candidate at
/// all, even if every candidate would walk into check. `Legal` discards
/// candidates that leave the king attacked, as checkmate detection does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalemateRule {
    #[default]
    PseudoLegal,
    Legal,
}

impl StalemateRule {
    /// Applies this rule to `color`.
    pub fn is_stalemate(self, board: &mut Board, color: Color) -> bool {
        match self {
            StalemateRule::PseudoLegal => is_stalemate(board, color),
            StalemateRule::Legal => is_strict_stalemate(board, color),
        }
    }
}

/// Returns true if any piece of `by` has `target` among its candidates.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| candidate_moves(board, from).contains(&target))
}

/// Returns true if the king of `color` is attacked.
///
/// The first king of `color` in row-major order is tested; a side without a
/// king is never in check.
pub fn is_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// Returns true if `color` is in check and no candidate move resolves it.
pub fn is_checkmate(board: &mut Board, color: Color) -> bool {
    is_check(board, color) && !has_escape(board, color)
}

/// Returns true if `color` is not in check and has no candidate move.
///
/// Candidates are not filtered for self-check; see [`is_strict_stalemate`].
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_check(board, color) && !has_candidate_move(board, color)
}

/// Returns true if `color` is not in check and every candidate move would
/// leave its king attacked.
pub fn is_strict_stalemate(board: &mut Board, color: Color) -> bool {
    !is_check(board, color) && !has_escape(board, color)
}

/// Classifies the position for `color` under the pseudo-legal stalemate rule.
pub fn status(board: &mut Board, color: Color) -> Status {
    status_with(board, color, StalemateRule::PseudoLegal)
}

/// Classifies the position for `color` under `rule`.
pub fn status_with(board: &mut Board, color: Color, rule: StalemateRule) -> Status {
    if is_check(board, color) {
        if has_escape(board, color) {
            Status::Check
        } else {
            Status::Checkmate
        }
    } else if rule.is_stalemate(board, color) {
        Status::Stalemate
    } else {
        Status::Normal
    }
}

/// Returns true on the first candidate move after which `color` is not in check.
fn has_escape(board: &mut Board, color: Color) -> bool {
    for mov in all_moves(board, color) {
        let Some(undo) = board.make_move(mov) else {
            continue;
        };
        let still_in_check = is_check(board, color);
        board.unmake_move(undo);
        if !still_in_check {
            return true;
        }
    }
    false
}
