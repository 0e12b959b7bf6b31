//! Minimax bot speaking UCI.
//!
//! Plays the variable-size variant: `position fen` accepts any even board
//! size the engine supports, and moves are coordinate strings such as
//! `e2e4` or `j9j7`. The optional first argument names the difficulty used
//! when `go` carries no depth. Logs go to stderr (`RUST_LOG`).

use bot_minimax::{Difficulty, Searcher};
use chess_core::{Color, FenParser, Move};
use chess_engine::{Board, BoardError};
use std::io::{BufReader, Stdin, Stdout};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use uci::{stdio_engine, GuiCommand, InfoBuilder, UciEngine, UciError};

type StdioEngine = UciEngine<BufReader<Stdin>, Stdout>;

/// Position state between `position` and `go`.
struct Session {
    board: Board,
    side: Color,
    difficulty: Difficulty,
}

impl Session {
    fn new(difficulty: Difficulty) -> Result<Self, BoardError> {
        Ok(Session {
            board: Board::standard(8)?,
            side: Color::White,
            difficulty,
        })
    }

    fn set_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let loaded = match fen {
            Some(fen) => Board::from_fen(fen).and_then(|board| {
                let side = FenParser::parse(fen)?.active_color;
                Ok((board, side))
            }),
            None => Board::standard(8).map(|board| (board, Color::White)),
        };
        match loaded {
            Ok((board, side)) => {
                self.board = board;
                self.side = side;
            }
            Err(e) => {
                warn!(error = %e, "rejecting position");
                return;
            }
        }

        for text in moves {
            let size = self.board.size();
            let played = Move::from_coordinate(text, size)
                .is_some_and(|mv| self.board.move_piece(mv.from, mv.to));
            if !played {
                warn!(mv = %text, "ignoring unplayable move");
                break;
            }
            self.side = self.side.opposite();
        }
    }

    fn go(&mut self, depth: Option<u32>, engine: &mut StdioEngine) -> Result<(), UciError> {
        let depth = depth.unwrap_or(self.difficulty.depth()).max(1);
        let start = Instant::now();
        let mut searcher = Searcher::new();
        let best = searcher.search(&mut self.board, self.side, depth);
        let size = self.board.size();

        debug!(depth, nodes = searcher.nodes(), "search finished");

        match best {
            Some((mv, score)) => {
                let coordinate = mv.to_coordinate(size);
                // Scores are from White's side; UCI reports the mover's.
                let score = score.saturating_mul(self.side.sign()).saturating_mul(100);
                let info = InfoBuilder::new()
                    .depth(depth)
                    .score_cp(score)
                    .nodes(searcher.nodes())
                    .time(start.elapsed().as_millis() as u64)
                    .pv(vec![coordinate.clone()])
                    .build();
                engine.send_info(info)?;
                engine.send_bestmove(&coordinate)
            }
            None => engine.send_bestmove("0000"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let difficulty = std::env::args()
        .nth(1)
        .map(|name| Difficulty::from_name(&name))
        .unwrap_or_default();
    info!(%difficulty, "minimax bot starting");

    let mut engine = stdio_engine();
    let mut session = Session::new(difficulty)?;

    loop {
        let cmd = match engine.read_command() {
            Ok(cmd) => cmd,
            Err(UciError::Eof) => break,
            Err(UciError::IoError(e)) => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "bad command");
                continue;
            }
        };

        match cmd {
            GuiCommand::Uci => {
                engine.send_id("MinimaxBot", "Tom Metten")?;
                engine.send_uciok()?;
            }
            GuiCommand::IsReady => engine.send_readyok()?,
            GuiCommand::NewGame => session = Session::new(difficulty)?,
            GuiCommand::Position { fen, moves } => session.set_position(fen.as_deref(), &moves),
            GuiCommand::Go(opts) => session.go(opts.depth, &mut engine)?,
            GuiCommand::Stop | GuiCommand::Unknown(_) => {}
            GuiCommand::Quit => break,
        }
    }

    Ok(())
}
