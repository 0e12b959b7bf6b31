use anyhow::Context;
use bot_arena::config::ArenaConfig;
use bot_arena::game_runner::{GameRunner, MatchResult};
use bot_arena::pgn;
use bot_minimax::Difficulty;
use chess_engine::StalemateRule;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bot-arena")]
#[command(about = "Plays minimax bots against each other on custom board sizes")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "arena.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a match between two difficulty tiers
    Match(MatchArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Flags that override the configuration file.
#[derive(Args, Debug, Default)]
struct MatchArgs {
    /// White difficulty (beginner, intermediate, difficult, impossible)
    white: Option<Difficulty>,
    /// Black difficulty
    black: Option<Difficulty>,
    /// Number of games to play
    #[arg(short, long)]
    games: Option<u32>,
    /// Board size (even, 8-16)
    #[arg(short, long)]
    size: Option<usize>,
    /// Plies before an undecided game is abandoned
    #[arg(long)]
    max_plies: Option<usize>,
    /// Only count stalemate when every move would leave the king attacked
    #[arg(long)]
    legal_stalemate: bool,
    /// UCI engine for the impossible tier on 8x8 boards
    #[arg(short, long)]
    engine: Option<PathBuf>,
    /// Depth requested from the UCI engine
    #[arg(long)]
    external_depth: Option<u32>,
    /// Directory for PGN records
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Do not write PGN records
    #[arg(long)]
    no_pgn: bool,
}

impl MatchArgs {
    fn apply(&self, config: &mut ArenaConfig) {
        if let Some(white) = self.white {
            config.white = white;
        }
        if let Some(black) = self.black {
            config.black = black;
        }
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if self.legal_stalemate {
            config.stalemate_rule = StalemateRule::Legal;
        }
        if let Some(engine) = &self.engine {
            config.engine_path = Some(engine.clone());
        }
        if let Some(depth) = self.external_depth {
            config.external_depth = depth;
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ArenaConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Match(args) => {
            args.apply(&mut config);
            config.validate()?;
            run_match(&config, !args.no_pgn)
        }
        Commands::Config => {
            print!("{}", toml::to_string(&config)?);
            Ok(())
        }
    }
}

fn run_match(config: &ArenaConfig, save_pgn: bool) -> anyhow::Result<()> {
    println!(
        "Running {} games on {}x{}: {} vs {}",
        config.games, config.board_size, config.board_size, config.white, config.black
    );

    let mut white_wins = 0;
    let mut black_wins = 0;
    let mut draws = 0;
    let mut unfinished = 0;

    for round in 1..=config.games {
        let mut runner = GameRunner::from_config(config).context("Failed to initialize game")?;

        match runner.play_game() {
            Ok(result) => {
                match result.result {
                    MatchResult::WhiteWins => white_wins += 1,
                    MatchResult::BlackWins => black_wins += 1,
                    MatchResult::Draw => draws += 1,
                    MatchResult::Unfinished => unfinished += 1,
                }

                if save_pgn {
                    match pgn::save_game(&config.output_dir, &result, round) {
                        Ok(path) => info!(path = %path.display(), "saved PGN"),
                        Err(e) => warn!(error = %e, "Failed to save PGN file"),
                    }
                }

                println!(
                    "Game {}: {:?} ({} plies)",
                    round,
                    result.result,
                    result.moves.len()
                );
            }
            Err(e) => {
                eprintln!("Game {} error: {}", round, e);
            }
        }
    }

    println!(
        "\nSession Results: W:{} D:{} L:{} unfinished:{}",
        white_wins, draws, black_wins, unfinished
    );
    Ok(())
}
