//! Configuration file loading for the bot arena.
//!
//! Settings come from a TOML file (`arena.toml` unless `--config` says
//! otherwise). Every field is optional; a missing file means all defaults.

use bot_minimax::{Difficulty, DEFAULT_EXTERNAL_DEPTH};
use chess_engine::StalemateRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The board size is not one the engine can set up.
    #[error("Unsupported board size: {0}")]
    BoardSize(usize),
}

/// Match settings shared by every game of a run.
///
/// Difficulty names must be exact; unlike [`Difficulty::from_name`], an
/// unknown tier is a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Board side length. Even, 8 through 16.
    pub board_size: usize,
    /// Difficulty of the bot playing White.
    pub white: Difficulty,
    /// Difficulty of the bot playing Black.
    pub black: Difficulty,
    /// Number of games to play.
    pub games: u32,
    /// Plies after which an undecided game is abandoned.
    pub max_plies: usize,
    pub stalemate_rule: StalemateRule,
    /// UCI engine used by the impossible tier on 8×8 boards.
    pub engine_path: Option<PathBuf>,
    /// Depth requested from that engine.
    pub external_depth: u32,
    /// Directory PGN records are written under.
    pub output_dir: PathBuf,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            board_size: 8,
            white: Difficulty::default(),
            black: Difficulty::default(),
            games: 1,
            max_plies: 200,
            stalemate_rule: StalemateRule::default(),
            engine_path: None,
            external_depth: DEFAULT_EXTERNAL_DEPTH,
            output_dir: PathBuf::from("games"),
        }
    }
}

impl ArenaConfig {
    /// Loads the arena configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it contains invalid TOML, or
    /// [`ConfigError::BoardSize`] if the board size is unsupported.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ArenaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("arena.toml")
    }

    /// Checks settings that TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.board_size;
        let supported = (chess_engine::MIN_BOARD_SIZE..=chess_engine::MAX_SUPPORTED_SIZE)
            .contains(&size)
            && size % 2 == 0;
        if supported {
            Ok(())
        } else {
            Err(ConfigError::BoardSize(size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
board_size = 10
white = "beginner"
black = "difficult"
games = 4
max_plies = 80
stalemate_rule = "legal"
engine_path = "/usr/bin/stockfish"
external_depth = 12
output_dir = "out/pgn"
"#;

        let config: ArenaConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.board_size, 10);
        assert_eq!(config.white, Difficulty::Beginner);
        assert_eq!(config.black, Difficulty::Difficult);
        assert_eq!(config.games, 4);
        assert_eq!(config.max_plies, 80);
        assert_eq!(config.stalemate_rule, StalemateRule::Legal);
        assert_eq!(config.engine_path, Some(PathBuf::from("/usr/bin/stockfish")));
        assert_eq!(config.external_depth, 12);
        assert_eq!(config.output_dir, PathBuf::from("out/pgn"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: ArenaConfig = toml::from_str("").unwrap();

        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.board_size, 8);
        assert_eq!(config.white, Difficulty::Intermediate);
        assert_eq!(config.games, 1);
        assert_eq!(config.max_plies, 200);
        assert_eq!(config.stalemate_rule, StalemateRule::PseudoLegal);
        assert!(config.engine_path.is_none());
        assert_eq!(config.output_dir, PathBuf::from("games"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: ArenaConfig = toml::from_str("black = \"impossible\"\n").unwrap();
        assert_eq!(config.black, Difficulty::Impossible);
        assert_eq!(config.white, Difficulty::Intermediate);
        assert_eq!(config.external_depth, DEFAULT_EXTERNAL_DEPTH);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(toml::from_str::<ArenaConfig>("white = \"grandmaster\"").is_err());
        assert!(toml::from_str::<ArenaConfig>("stalemate_rule = \"strict\"").is_err());
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(ArenaConfig::config_path(), PathBuf::from("arena.toml"));
    }

    #[test]
    fn test_load_returns_default_when_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArenaConfig::load(dir.path().join("arena.toml")).unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "board_size = 12").unwrap();
        writeln!(file, "games = 3").unwrap();

        let config = ArenaConfig::load(file.path()).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.games, 3);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "board_size = ").unwrap();

        assert!(matches!(
            ArenaConfig::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_rejects_unsupported_board_size() {
        for size in [6, 9, 18] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "board_size = {}", size).unwrap();

            match ArenaConfig::load(file.path()) {
                Err(ConfigError::BoardSize(n)) => assert_eq!(n, size),
                other => panic!("Expected BoardSize error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ArenaConfig {
            board_size: 14,
            white: Difficulty::Impossible,
            stalemate_rule: StalemateRule::Legal,
            engine_path: Some(PathBuf::from("engines/fish")),
            ..ArenaConfig::default()
        };

        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("stalemate_rule = \"legal\""));
        let deserialized: ArenaConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
