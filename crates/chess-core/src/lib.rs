//! Core types for variable-size chess.
//!
//! This crate provides the fundamental types shared by the rules engine,
//! the search bot and the arena:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for `(row, col)` board coordinates and their notation
//! - [`Move`] and [`MoveRecord`] for move representation
//! - FEN placement parsing for arbitrary even board sizes
//!
//! Boards are square, `size × size`, with row 0 being Black's back rank.

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveRecord};
pub use piece::{Piece, PieceKind};
pub use square::{coord_to_notation, notation_to_coord, Square, MAX_BOARD_SIZE};
