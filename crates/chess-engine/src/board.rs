//! Board state: the grid, real moves with history, and trial moves for search.

use crate::movegen::{candidate_moves, castling_rook};
use crate::notation::format_move;
use chess_core::{Color, Move, MoveRecord, Piece, PieceKind, Square};
use std::fmt;
use thiserror::Error;

/// Smallest supported board size.
pub const MIN_BOARD_SIZE: usize = 8;
/// Largest supported board size.
pub const MAX_SUPPORTED_SIZE: usize = 16;

/// Errors that can occur when constructing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("unsupported board size {0}: expected an even size from 8 to 16")]
    UnsupportedSize(usize),

    #[error(transparent)]
    Fen(#[from] chess_core::FenError),
}

/// Everything needed to take back a trial move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    mov: Move,
    moved: Piece,
    captured: Option<Piece>,
}

impl Undo {
    /// The move that was made.
    pub fn mov(&self) -> Move {
        self.mov
    }

    /// The piece that stood on the destination square, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// An `N × N` board with its move history.
///
/// Row 0 is Black's back rank. [`Board::move_piece`] plays a real move and
/// records it; [`Board::make_move`]/[`Board::unmake_move`] perform the raw
/// relocation used by search and mate detection and leave no trace once
/// undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    squares: Vec<Option<Piece>>,
    history: Vec<String>,
    records: Vec<MoveRecord>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_SUPPORTED_SIZE).contains(&size) || size % 2 != 0 {
            return Err(BoardError::UnsupportedSize(size));
        }
        Ok(Board {
            size,
            squares: vec![None; size * size],
            history: Vec::new(),
            records: Vec::new(),
        })
    }

    /// Creates a board with the starting setup.
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        board.setup();
        Ok(board)
    }

    /// Places the starting pieces.
    ///
    /// Pawns fill rows 1 and `N-2`. The eight-piece back-rank template goes on
    /// columns 0..8 of rows 0 and `N-1`; further columns stay empty.
    pub fn setup(&mut self) {
        let size = self.size;
        for color in Color::BOTH {
            let pawn_row = color.pawn_row(size);
            let back_row = color.back_row(size);
            for col in 0..size {
                self.squares[pawn_row * size + col] = Some(Piece::new(PieceKind::Pawn, color));
            }
            for (col, &kind) in PieceKind::BACK_RANK.iter().enumerate().take(size) {
                self.squares[back_row * size + col] = Some(Piece::new(kind, color));
            }
        }
    }

    /// Clears the board and history, then sets up the starting position.
    pub fn reset(&mut self) {
        self.squares.fill(None);
        self.history.clear();
        self.records.clear();
        self.setup();
    }

    /// Returns the board size `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares.get(sq.index(self.size)).copied().flatten()
    }

    /// Returns the piece at `(row, col)`; coordinates off the board hold no piece.
    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        Square::new(row, col, self.size).and_then(|sq| self.piece_at(sq))
    }

    /// Puts a piece on (or clears) a square. Used to build positions.
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        let index = sq.index(self.size);
        if let Some(slot) = self.squares.get_mut(index) {
            *slot = piece;
        }
    }

    /// Iterates over the pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Iterates over all occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let size = self.size;
        self.squares.iter().enumerate().filter_map(move |(i, slot)| {
            let piece = (*slot)?;
            Square::new(i / size, i % size, size).map(|sq| (sq, piece))
        })
    }

    /// Returns the first king of `color` in row-major order.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Formatted records of every completed move, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Structured records of every completed move, oldest first.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Plays a move if it is one of the piece's candidates.
    ///
    /// Returns `false` and leaves the board untouched when `from` is empty or
    /// `to` is not a candidate. A king moving two columns castles: the rook
    /// it castles with lands next to the king's destination, on the rook's
    /// side, and is marked as moved.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        let Some(mut piece) = self.piece_at(from) else {
            return false;
        };
        if !candidate_moves(self, from).contains(&to) {
            return false;
        }

        let mov = Move::new(from, to);
        if piece.kind == PieceKind::King && mov.is_two_column_shift() {
            let d_col = if to.col > from.col { 1 } else { -1 };
            if let Some(rook_from) = castling_rook(self, from, piece.color, d_col) {
                if let Some(rook_to) = to.offset(0, -d_col, self.size) {
                    let rook = self.piece_at(rook_from).map(|mut rook| {
                        rook.has_moved = true;
                        rook
                    });
                    self.set_piece(rook_from, None);
                    self.set_piece(rook_to, rook);
                }
            }
        }

        let captured = self.piece_at(to).is_some();
        self.history.push(format_move(
            &piece,
            &from.to_notation(self.size),
            &to.to_notation(self.size),
            captured,
        ));
        self.records.push(MoveRecord {
            from,
            to,
            piece,
            captured,
        });

        piece.has_moved = true;
        self.set_piece(to, Some(piece));
        self.set_piece(from, None);
        true
    }

    /// Relocates a piece for a trial and returns what is needed to undo it.
    ///
    /// No legality check, no castling rook, no `has_moved` update and no
    /// history entry. Returns `None` if `from` is empty.
    pub fn make_move(&mut self, mov: Move) -> Option<Undo> {
        let moved = self.piece_at(mov.from)?;
        let captured = self.piece_at(mov.to);
        self.set_piece(mov.to, Some(moved));
        self.set_piece(mov.from, None);
        Some(Undo {
            mov,
            moved,
            captured,
        })
    }

    /// Restores the exact occupants of both squares of a trial move.
    pub fn unmake_move(&mut self, undo: Undo) {
        self.set_piece(undo.mov.from, Some(undo.moved));
        self.set_piece(undo.mov.to, undo.captured);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{:>2} ", self.size - row)?;
            for col in 0..self.size {
                let c = self
                    .get_piece(row, col)
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
