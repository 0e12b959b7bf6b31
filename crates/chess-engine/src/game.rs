//! Game session: turn order, end detection and result reporting.
//!
//! A [`Game`] wraps a [`Board`] with the side to move and a lifecycle
//! (setup, playing, ended). After every move the side that must answer is
//! examined: checkmate hands the win to the mover, stalemate (under the
//! configured [`StalemateRule`]) draws, and a side left without a king has
//! lost it to a pseudo-legal capture.

use crate::notation::{generate_pgn_with, PgnTags};
use crate::rules::{is_checkmate, status_with, StalemateRule, Status};
use crate::{Board, BoardError};
use chess_core::{Color, Move, Square};
use thiserror::Error;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Resignation { winner: Color },
    /// The loser's king was taken.
    KingCaptured { winner: Color },
}

impl Outcome {
    /// The winning side, or `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner }
            | Outcome::Resignation { winner }
            | Outcome::KingCaptured { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Setup,
    Playing,
    Ended(Outcome),
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is not in progress")]
    NotPlaying,

    #[error("it is {expected}'s turn")]
    WrongColor { expected: Color },

    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// A game between two sides on one board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    state: GameState,
    stalemate_rule: StalemateRule,
}

impl Game {
    /// Creates a game on a standard board of `size`, White to move.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::standard(size)?, Color::White))
    }

    /// Creates a game from an arbitrary position.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Game {
            board,
            side_to_move,
            state: GameState::Setup,
            stalemate_rule: StalemateRule::default(),
        }
    }

    /// Creates a game from FEN, taking the side to move from its active color.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let side = chess_core::FenParser::parse(fen)?.active_color;
        Ok(Self::from_board(Board::from_fen(fen)?, side))
    }

    /// Sets the stalemate test applied after each move.
    pub fn with_stalemate_rule(mut self, rule: StalemateRule) -> Self {
        self.stalemate_rule = rule;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stalemate_rule(&self) -> StalemateRule {
        self.stalemate_rule
    }

    /// Number of moves played.
    pub fn ply_count(&self) -> usize {
        self.board.records().len()
    }

    /// Returns the outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Begins play. A position that is already decided ends immediately.
    pub fn start(&mut self) {
        self.state = GameState::Playing;
        self.conclude();
    }

    /// Restores the starting setup and returns to [`GameState::Setup`].
    pub fn reset(&mut self) {
        self.board.reset();
        self.side_to_move = Color::White;
        self.state = GameState::Setup;
    }

    /// Plays a move for the side to move.
    pub fn play(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying);
        }

        let size = self.board.size();
        match self.board.piece_at(from) {
            Some(piece) if piece.color != self.side_to_move => {
                return Err(GameError::WrongColor {
                    expected: self.side_to_move,
                })
            }
            Some(_) => {}
            None => {
                return Err(GameError::IllegalMove(
                    Move::new(from, to).to_coordinate(size),
                ))
            }
        }

        if !self.board.move_piece(from, to) {
            return Err(GameError::IllegalMove(
                Move::new(from, to).to_coordinate(size),
            ));
        }

        self.side_to_move = self.side_to_move.opposite();
        self.conclude();
        Ok(())
    }

    /// Plays a move given as a [`Move`].
    pub fn play_move(&mut self, mov: Move) -> Result<(), GameError> {
        self.play(mov.from, mov.to)
    }

    /// Plays a move in coordinate form such as `e2e4`.
    pub fn play_coordinate(&mut self, text: &str) -> Result<(), GameError> {
        let mov = Move::from_coordinate(text, self.board.size())
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        self.play_move(mov)
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying);
        }
        self.state = GameState::Ended(Outcome::Resignation {
            winner: self.side_to_move.opposite(),
        });
        Ok(())
    }

    /// Status of the side to move under this game's stalemate rule.
    pub fn status(&mut self) -> Status {
        status_with(&mut self.board, self.side_to_move, self.stalemate_rule)
    }

    /// `1-0`, `0-1`, `1/2-1/2`, or `*` while undecided.
    pub fn result_token(&self) -> &'static str {
        self.outcome().map_or("*", Outcome::result_token)
    }

    /// FEN of the current position.
    pub fn to_fen(&self) -> String {
        self.board.to_fen(self.side_to_move)
    }

    /// Renders the game so far as PGN.
    pub fn to_pgn(&self, tags: &PgnTags) -> String {
        generate_pgn_with(tags, self.board.history(), self.result_token())
    }

    fn conclude(&mut self) {
        let side = self.side_to_move;
        let mover = side.opposite();

        let outcome = if self.board.king_square(side).is_none() {
            Some(Outcome::KingCaptured { winner: mover })
        } else if is_checkmate(&mut self.board, side) {
            Some(Outcome::Checkmate { winner: mover })
        } else if self.stalemate_rule.is_stalemate(&mut self.board, side) {
            Some(Outcome::Stalemate)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.state = GameState::Ended(outcome);
        }
    }
}
