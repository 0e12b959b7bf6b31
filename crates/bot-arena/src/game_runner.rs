//! Game execution logic for bot-versus-bot matches.
//!
//! [`GameRunner`] owns one [`SearchEngine`] per side and drives a
//! [`Game`] from its first move until it ends or the ply limit is reached.

use crate::config::ArenaConfig;
use bot_minimax::{Difficulty, EngineError, SearchEngine, EXTERNAL_BOARD_SIZE};
use chess_core::Color;
use chess_engine::{BoardError, Game, GameError, Outcome, StalemateRule};
use thiserror::Error;
use tracing::{debug, info, warn};
use uci::{ClientError, EngineProcess};

/// Errors that can occur during game execution.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// The external engine could not be started.
    #[error("External engine: {0}")]
    Client(#[from] ClientError),
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
    /// A bot chose a move the game refused.
    #[error("{color} played {mv}: {source}")]
    InvalidMove {
        color: Color,
        mv: String,
        #[source]
        source: GameError,
    },
}

/// The outcome of a game as the arena scores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// Stopped at the ply limit, or a bot had no move to offer.
    Unfinished,
}

impl MatchResult {
    fn from_outcome(outcome: Option<Outcome>) -> Self {
        match outcome.map(Outcome::winner) {
            Some(Some(Color::White)) => MatchResult::WhiteWins,
            Some(Some(Color::Black)) => MatchResult::BlackWins,
            Some(None) => MatchResult::Draw,
            None => MatchResult::Unfinished,
        }
    }
}

/// The result of a completed game, containing move history and outcome.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// The finished game; its board holds the formatted move history.
    pub game: Game,
    /// Moves in coordinate form (`e2e4`), in order.
    pub moves: Vec<String>,
    pub result: MatchResult,
    pub white_name: String,
    pub black_name: String,
}

/// Executes games between two minimax bots.
pub struct GameRunner {
    white: SearchEngine,
    black: SearchEngine,
    board_size: usize,
    max_plies: usize,
    stalemate_rule: StalemateRule,
}

impl GameRunner {
    pub fn new(white: SearchEngine, black: SearchEngine, board_size: usize) -> Self {
        let defaults = ArenaConfig::default();
        Self {
            white,
            black,
            board_size,
            max_plies: defaults.max_plies,
            stalemate_rule: defaults.stalemate_rule,
        }
    }

    /// Builds both bots from the configured difficulties, starting the
    /// external engine where the impossible tier needs one.
    pub fn from_config(config: &ArenaConfig) -> Result<Self, RunnerError> {
        let white = engine_for(config.white, config)?;
        let black = engine_for(config.black, config)?;
        Ok(Self::new(white, black, config.board_size)
            .with_max_plies(config.max_plies)
            .with_stalemate_rule(config.stalemate_rule))
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_stalemate_rule(mut self, rule: StalemateRule) -> Self {
        self.stalemate_rule = rule;
        self
    }

    /// Plays a game from the standard starting position.
    pub fn play_game(&mut self) -> Result<GameResult, RunnerError> {
        let game = Game::new(self.board_size)?;
        self.play_from(game)
    }

    /// Plays `game` out from its current position.
    ///
    /// # Errors
    ///
    /// Returns an error if a bot fails to produce a move or produces one
    /// the game rejects.
    pub fn play_from(&mut self, game: Game) -> Result<GameResult, RunnerError> {
        let mut game = game.with_stalemate_rule(self.stalemate_rule);
        let size = game.board().size();
        let mut moves: Vec<String> = Vec::new();
        game.start();

        while !game.is_over() && moves.len() < self.max_plies {
            let color = game.side_to_move();
            let engine = match color {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };

            let mut scratch = game.board().clone();
            let Some(mov) = engine.select_move(&mut scratch, color)? else {
                warn!(%color, "bot has no move in an undecided position");
                break;
            };

            let mv = mov.to_coordinate(size);
            game.play_move(mov)
                .map_err(|source| RunnerError::InvalidMove {
                    color,
                    mv: mv.clone(),
                    source,
                })?;
            debug!(ply = moves.len() + 1, %color, %mv, "move played");
            moves.push(mv);
        }

        let result = MatchResult::from_outcome(game.outcome());
        info!(?result, plies = moves.len(), "game finished");

        Ok(GameResult {
            game,
            moves,
            result,
            white_name: label(self.white.difficulty()),
            black_name: label(self.black.difficulty()),
        })
    }
}

/// Creates the bot for `difficulty`.
///
/// The impossible tier on 8×8 boards gets the configured external engine,
/// spawned and past its handshake. Without one, its moves fail with
/// [`EngineError::NotReady`].
pub fn engine_for(difficulty: Difficulty, config: &ArenaConfig) -> Result<SearchEngine, RunnerError> {
    let engine = SearchEngine::new(difficulty).with_external_depth(config.external_depth);
    if difficulty != Difficulty::Impossible || config.board_size != EXTERNAL_BOARD_SIZE {
        return Ok(engine);
    }

    let Some(path) = &config.engine_path else {
        warn!("impossible tier on an 8x8 board without engine_path");
        return Ok(engine);
    };

    let mut process = EngineProcess::spawn(path)?;
    process.client().handshake()?;
    info!(
        path = %path.display(),
        name = process.client().name().unwrap_or("unknown"),
        "external engine ready"
    );
    Ok(engine.with_external(Box::new(process)))
}

fn label(difficulty: Difficulty) -> String {
    format!("Minimax ({})", difficulty)
}
