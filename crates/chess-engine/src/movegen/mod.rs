//! Move generation.
//!
//! Candidate moves are pseudo-legal: they respect piece movement and
//! occupancy but are not filtered for leaving the mover's own king attacked.
//! Every neighbour lookup goes through [`Square::offset`], so generation never
//! reads outside the grid.

pub mod perft;

use crate::Board;
use chess_core::{Color, Move, Piece, PieceKind, Square};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Minimum number of empty squares between king and rook for castling,
/// kingside (towards higher columns) and queenside.
const KINGSIDE_GAP: usize = 2;
const QUEENSIDE_GAP: usize = 3;

/// Returns the candidate destinations of the piece on `from`.
///
/// An empty square yields no candidates.
pub fn candidate_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut moves),
        PieceKind::Rook => slide(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Knight => step(board, from, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slide(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Queen => {
            slide(board, from, piece.color, &ROOK_DIRECTIONS, &mut moves);
            slide(board, from, piece.color, &BISHOP_DIRECTIONS, &mut moves);
        }
        PieceKind::King => {
            step(board, from, piece.color, &KING_OFFSETS, &mut moves);
            castling_moves(board, from, piece, &mut moves);
        }
    }
    moves
}

/// Returns every candidate move of `color`, pieces in row-major order and
/// destinations in generator order.
pub fn all_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces(color)
        .flat_map(|(from, _)| {
            candidate_moves(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Returns true if any piece of `color` has at least one candidate move.
pub fn has_candidate_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(from, _)| !candidate_moves(board, from).is_empty())
}

fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    let size = board.size();
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0, size) {
        if board.piece_at(one).is_none() {
            moves.push(one);
            if from.row() == color.pawn_row(size) {
                if let Some(two) = from.offset(2 * dir, 0, size) {
                    if board.piece_at(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(dir, d_col, size) {
            if board.piece_at(target).is_some_and(|p| p.color != color) {
                moves.push(target);
            }
        }
    }
}

fn slide(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    let size = board.size();
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col, size) {
            match board.piece_at(next) {
                None => moves.push(next),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

fn step(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    let size = board.size();
    for &(d_row, d_col) in offsets {
        if let Some(target) = from.offset(d_row, d_col, size) {
            if !matches!(board.piece_at(target), Some(p) if p.color == color) {
                moves.push(target);
            }
        }
    }
}

/// Adds castling destinations. Attacked transit squares are not checked.
fn castling_moves(board: &Board, from: Square, king: Piece, moves: &mut Vec<Square>) {
    if king.has_moved {
        return;
    }
    for d_col in [1, -1] {
        if castling_rook(board, from, king.color, d_col).is_some() {
            if let Some(target) = from.offset(0, 2 * d_col, board.size()) {
                moves.push(target);
            }
        }
    }
}

/// Finds the rook an unmoved king at `king_sq` may castle with in direction
/// `d_col` (+1 kingside, -1 queenside).
///
/// The first occupied square towards the edge must hold an unmoved friendly
/// rook, with at least two (kingside) or three (queenside) empty squares in
/// between.
pub(crate) fn castling_rook(
    board: &Board,
    king_sq: Square,
    color: Color,
    d_col: i32,
) -> Option<Square> {
    let size = board.size();
    let min_gap = if d_col > 0 { KINGSIDE_GAP } else { QUEENSIDE_GAP };

    let mut gap = 0;
    let mut current = king_sq;
    while let Some(next) = current.offset(0, d_col, size) {
        match board.piece_at(next) {
            None => gap += 1,
            Some(p) => {
                let eligible = p.kind == PieceKind::Rook && p.color == color && !p.has_moved;
                return (eligible && gap >= min_gap).then_some(next);
            }
        }
        current = next;
    }
    None
}
