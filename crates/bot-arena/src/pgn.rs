//! PGN (Portable Game Notation) files for finished arena games.
//!
//! Records are grouped by day: `{output_dir}/{YYYY-MM-DD}/game-{round}.pgn`.

use crate::game_runner::GameResult;
use chess_engine::PgnTags;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

const EVENT: &str = "Bot Arena Match";

/// Header tags for game number `round` of a match played on `date`.
pub fn tags_for(result: &GameResult, round: u32, date: NaiveDate) -> PgnTags {
    PgnTags {
        event: EVENT.to_string(),
        site: "local".to_string(),
        date,
        round,
        white: result.white_name.clone(),
        black: result.black_name.clone(),
    }
}

/// Writes a completed game to a PGN file at `path`, dated today.
///
/// The move text uses the game's own move records (`e2e4`, `Bf1xb5`) and
/// ends with `1-0`, `0-1`, `1/2-1/2`, or `*` for a game stopped at the ply
/// limit.
pub fn write_pgn<P: AsRef<Path>>(path: P, result: &GameResult, round: u32) -> std::io::Result<()> {
    let tags = tags_for(result, round, Utc::now().date_naive());
    std::fs::write(path, result.game.to_pgn(&tags))
}

/// Location of game `round` played on `date`.
pub fn game_path(output_dir: &Path, date: NaiveDate, round: u32) -> PathBuf {
    output_dir
        .join(date.format("%Y-%m-%d").to_string())
        .join(format!("game-{:03}.pgn", round))
}

/// Saves a game under `output_dir`, creating the day's directory as needed.
/// Returns the path written.
pub fn save_game(output_dir: &Path, result: &GameResult, round: u32) -> std::io::Result<PathBuf> {
    let path = game_path(output_dir, Utc::now().date_naive(), round);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    write_pgn(&path, result, round)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_runner::MatchResult;
    use chess_engine::Game;
    use std::fs;

    fn fools_mate() -> GameResult {
        let mut game = Game::new(8).unwrap();
        game.start();
        let moves = ["f2f3", "e7e5", "g2g4", "d8h4"];
        for mv in moves {
            game.play_coordinate(mv).unwrap();
        }
        GameResult {
            game,
            moves: moves.iter().map(|m| m.to_string()).collect(),
            result: MatchResult::BlackWins,
            white_name: "TestEngineWhite".to_string(),
            black_name: "TestEngineBlack".to_string(),
        }
    }

    #[test]
    fn test_write_pgn_creates_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let pgn_path = dir.path().join("test_game.pgn");

        write_pgn(&pgn_path, &fools_mate(), 3).expect("Failed to write PGN file");
        let contents = fs::read_to_string(&pgn_path).expect("Failed to read PGN file");

        assert!(contents.contains("[Event \"Bot Arena Match\"]"));
        assert!(contents.contains("[Site \"local\"]"));
        assert!(contents.contains("[Date \""));
        assert!(contents.contains("[Round \"3\"]"));
        assert!(contents.contains("[White \"TestEngineWhite\"]"));
        assert!(contents.contains("[Black \"TestEngineBlack\"]"));
        assert!(contents.contains("[Result \"0-1\"]"));
    }

    #[test]
    fn test_write_pgn_formats_moves_correctly() {
        let dir = tempfile::tempdir().unwrap();
        let pgn_path = dir.path().join("moves.pgn");

        write_pgn(&pgn_path, &fools_mate(), 1).unwrap();
        let contents = fs::read_to_string(&pgn_path).unwrap();

        assert!(contents.ends_with("\n\n1. f2f3 e7e5 2. g2g4 Qd8h4 0-1\n"));
    }

    #[test]
    fn test_unfinished_game_uses_star() {
        let mut game = Game::new(8).unwrap();
        game.start();
        game.play_coordinate("e2e4").unwrap();
        let result = GameResult {
            game,
            moves: vec!["e2e4".to_string()],
            result: MatchResult::Unfinished,
            white_name: "A".to_string(),
            black_name: "B".to_string(),
        };

        let dir = tempfile::tempdir().unwrap();
        let pgn_path = dir.path().join("open.pgn");
        write_pgn(&pgn_path, &result, 1).unwrap();
        let contents = fs::read_to_string(&pgn_path).unwrap();

        assert!(contents.contains("[Result \"*\"]"));
        assert!(contents.ends_with("1. e2e4 *\n"));
    }

    #[test]
    fn test_game_path_groups_by_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            game_path(Path::new("games"), date, 7),
            PathBuf::from("games/2024-03-09/game-007.pgn")
        );
    }

    #[test]
    fn test_tags_for_uses_bot_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let tags = tags_for(&fools_mate(), 2, date);
        assert_eq!(tags.event, "Bot Arena Match");
        assert_eq!(tags.round, 2);
        assert_eq!(tags.date, date);
        assert_eq!(tags.white, "TestEngineWhite");
    }

    #[test]
    fn test_save_game_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/games");

        let path = save_game(&out, &fools_mate(), 1).unwrap();

        assert!(path.starts_with(&out));
        assert!(path.exists());
        assert!(fs::read_to_string(path).unwrap().contains("Qd8h4"));
    }
}
