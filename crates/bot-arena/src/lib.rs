//! Bot Arena - plays minimax bots against each other.
//!
//! Games run on any supported board size between two difficulty tiers and
//! are exported as PGN records.
//!
//! # Modules
//!
//! - [`config`] - `arena.toml` loading
//! - [`game_runner`] - Game execution logic for running matches
//! - [`pgn`] - PGN file generation

pub mod config;
pub mod game_runner;
pub mod pgn;
