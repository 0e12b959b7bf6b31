//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the pseudo-legal move tree, walking the
//! board in place with make/unmake. In the first three plies from the
//! standard 8×8 start no side can be in check, so the counts match the
//! well-known legal values there.

use super::all_moves;
use crate::Board;
use chess_core::Color;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_moves(board, color);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        if let Some(undo) = board.make_move(m) {
            nodes += perft(board, color.opposite(), depth - 1);
            board.unmake_move(undo);
        }
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &mut Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let size = board.size();
    let moves = all_moves(board, color);
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        if let Some(undo) = board.make_move(m) {
            let nodes = if depth > 1 {
                perft(board, color.opposite(), depth - 1)
            } else {
                1
            };
            board.unmake_move(undo);
            results.push((m.to_coordinate(size), nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
