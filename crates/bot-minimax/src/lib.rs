//! Minimax opponent with alpha-beta pruning.
//!
//! The search is a plain depth-bounded minimax over pseudo-legal moves with
//! a material-only evaluation. White maximizes, Black minimizes. The board is
//! walked in place with make/unmake; every trial is undone before the next
//! one, so callers get their board back unchanged.
//!
//! At the [`Difficulty::Impossible`] tier on 8×8 boards the move comes from
//! an attached [`ExternalEngine`] instead.

use chess_core::{Color, Move};
use chess_engine::{all_moves, Board};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use uci::{ClientError, EngineProcess, UciClient};

/// Score of a position where White has no move; also the initial alpha.
pub const NEG_INFINITY: i32 = -i32::MAX;
/// Score of a position where Black has no move; also the initial beta.
pub const INFINITY: i32 = i32::MAX;

/// Board size at which the impossible tier hands off to the external engine.
pub const EXTERNAL_BOARD_SIZE: usize = 8;
/// Depth requested from the external engine unless configured otherwise.
pub const DEFAULT_EXTERNAL_DEPTH: u32 = 15;

/// Errors from move selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The external engine is missing or has not completed its handshake.
    #[error("external engine not ready")]
    NotReady,
    #[error("external engine protocol error: {0}")]
    Protocol(String),
}

impl From<ClientError> for EngineError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::NotReady => EngineError::NotReady,
            ClientError::Protocol(msg) => EngineError::Protocol(msg),
            ClientError::Io(e) => EngineError::Protocol(e.to_string()),
        }
    }
}

/// Bot strength, expressed as search depth in plies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Difficult,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Difficult,
        Difficulty::Impossible,
    ];

    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Intermediate => 3,
            Difficulty::Difficult => 4,
            Difficulty::Impossible => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Difficult => "difficult",
            Difficulty::Impossible => "impossible",
        }
    }

    /// Lenient lookup: unknown names fall back to intermediate.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty '{}'", s))
    }
}

/// Signed material balance: P1 N3 B3 R5 Q9, kings 0. Positive favours White.
pub fn evaluate(board: &Board) -> i32 {
    board.occupied().map(|(_, piece)| piece.signed_value()).sum()
}

/// Depth-bounded minimax with node counting.
#[derive(Debug, Clone)]
pub struct Searcher {
    nodes: u64,
    pruning: bool,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            nodes: 0,
            pruning: true,
        }
    }

    /// Enables or disables alpha-beta cutoffs. Scores are identical either way.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores the position with `color` to move, searching `depth` plies.
    ///
    /// A side without moves scores [`NEG_INFINITY`] for White and
    /// [`INFINITY`] for Black.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        color: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return evaluate(board);
        }

        let maximizing = color == Color::White;
        let mut best = if maximizing { NEG_INFINITY } else { INFINITY };

        for mov in all_moves(board, color) {
            let Some(undo) = board.make_move(mov) else {
                continue;
            };
            let score = self.minimax(board, depth - 1, color.opposite(), alpha, beta);
            board.unmake_move(undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }

        best
    }

    /// Picks the best root move for `color` and its score.
    ///
    /// Roots are tried in generation order and a later move replaces the
    /// incumbent only with a strictly better score, so ties go to the first.
    pub fn search(&mut self, board: &mut Board, color: Color, depth: u32) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;

        for mov in all_moves(board, color) {
            let Some(undo) = board.make_move(mov) else {
                continue;
            };
            let score = self.minimax(
                board,
                depth.saturating_sub(1),
                color.opposite(),
                NEG_INFINITY,
                INFINITY,
            );
            board.unmake_move(undo);

            let better = match best {
                None => true,
                Some((_, incumbent)) => match color {
                    Color::White => score > incumbent,
                    Color::Black => score < incumbent,
                },
            };
            if better {
                best = Some((mov, score));
            }
        }

        best
    }
}

/// Standalone minimax with pruning enabled.
pub fn minimax(board: &mut Board, depth: u32, color: Color, alpha: i32, beta: i32) -> i32 {
    Searcher::new().minimax(board, depth, color, alpha, beta)
}

/// A search engine consulted for the impossible tier.
///
/// One request at a time: the reply is returned before the call ends.
pub trait ExternalEngine {
    /// Returns the best move for the position as a coordinate string
    /// (`e2e4`), or `0000` when the side to move has none.
    fn best_move(&mut self, fen: &str, depth: u32) -> Result<String, EngineError>;
}

impl<R: BufRead, W: Write> ExternalEngine for UciClient<R, W> {
    fn best_move(&mut self, fen: &str, depth: u32) -> Result<String, EngineError> {
        Ok(UciClient::best_move(self, fen, depth)?)
    }
}

impl ExternalEngine for EngineProcess {
    fn best_move(&mut self, fen: &str, depth: u32) -> Result<String, EngineError> {
        Ok(self.client().best_move(fen, depth)?)
    }
}

/// Chooses moves for one side at a given difficulty.
pub struct SearchEngine {
    difficulty: Difficulty,
    external: Option<Box<dyn ExternalEngine>>,
    external_depth: u32,
}

impl SearchEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        SearchEngine {
            difficulty,
            external: None,
            external_depth: DEFAULT_EXTERNAL_DEPTH,
        }
    }

    /// Attaches the engine used by the impossible tier on 8×8 boards.
    pub fn with_external(mut self, engine: Box<dyn ExternalEngine>) -> Self {
        self.external = Some(engine);
        self
    }

    pub fn with_external_depth(mut self, depth: u32) -> Self {
        self.external_depth = depth;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Selects a move for `color`, or `None` if it has no move.
    ///
    /// `board` is used as scratch space and is unchanged on return.
    pub fn select_move(
        &mut self,
        board: &mut Board,
        color: Color,
    ) -> Result<Option<Move>, EngineError> {
        if self.difficulty == Difficulty::Impossible && board.size() == EXTERNAL_BOARD_SIZE {
            return self.external_move(board, color);
        }

        let depth = self.difficulty.depth();
        let mut searcher = Searcher::new();
        let best = searcher.search(board, color, depth);
        debug!(
            %color,
            depth,
            nodes = searcher.nodes(),
            score = best.map(|(_, s)| s),
            "local search complete"
        );
        Ok(best.map(|(mov, _)| mov))
    }

    fn external_move(&mut self, board: &Board, color: Color) -> Result<Option<Move>, EngineError> {
        let engine = self.external.as_mut().ok_or(EngineError::NotReady)?;
        let fen = board.to_fen(color);
        let reply = engine.best_move(&fen, self.external_depth)?;
        debug!(%fen, %reply, depth = self.external_depth, "external engine replied");

        if reply == "0000" || reply == "(none)" {
            return Ok(None);
        }
        Move::from_coordinate(&reply, board.size())
            .map(Some)
            .ok_or_else(|| EngineError::Protocol(format!("cannot decode move '{}'", reply)))
    }
}
