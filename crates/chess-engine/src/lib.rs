//! Rules engine for chess on `N × N` boards.
//!
//! This crate provides:
//! - [`Board`] - the grid with real moves, history, and trial make/unmake
//! - [`movegen`] - pseudo-legal candidate move generation and perft
//! - [`rules`] - check, checkmate and stalemate detection
//! - [`notation`] - move records and PGN export
//! - [`Game`] - a session with turn order and end detection
//!
//! Moves are pseudo-legal: generation does not filter moves that leave the
//! mover's king attacked. There is no en passant and no promotion.
//!
//! # Example
//!
//! ```
//! use chess_engine::{rules, Board};
//! use chess_core::{Color, Square};
//!
//! let mut board = Board::standard(8).unwrap();
//! let from = Square::from_notation("e2", 8).unwrap();
//! let to = Square::from_notation("e4", 8).unwrap();
//! assert!(board.move_piece(from, to));
//! assert_eq!(board.history(), &["e2e4"]);
//! assert!(!rules::is_check(&board, Color::Black));
//! ```

mod board;
mod fen;
mod game;
pub mod movegen;
pub mod notation;
pub mod rules;

pub use board::{Board, BoardError, Undo, MAX_SUPPORTED_SIZE, MIN_BOARD_SIZE};
pub use game::{Game, GameError, GameState, Outcome};
pub use movegen::{all_moves, candidate_moves, has_candidate_move};
pub use notation::{format_move, generate_pgn, generate_pgn_with, PgnTags};
pub use rules::{StalemateRule, Status};
