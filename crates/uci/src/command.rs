//! UCI command parsing and formatting.

use crate::UciError;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// Start a new game.
    NewGame,
    /// Set up position. `fen: None` means the standard start.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search to this depth.
    pub depth: Option<u32>,
}

impl GoOptions {
    /// Options for a fixed-depth search.
    pub fn depth(depth: u32) -> Self {
        GoOptions { depth: Some(depth) }
    }
}

impl GuiCommand {
    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd {
            "uci" => Ok(GuiCommand::Uci),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::NewGame),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "position" => Self::parse_position(parts),
            "go" => Ok(Self::parse_go(parts)),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    /// Formats the command as a protocol line (without newline).
    pub fn to_uci(&self) -> String {
        match self {
            GuiCommand::Uci => "uci".to_string(),
            GuiCommand::IsReady => "isready".to_string(),
            GuiCommand::NewGame => "ucinewgame".to_string(),
            GuiCommand::Stop => "stop".to_string(),
            GuiCommand::Quit => "quit".to_string(),
            GuiCommand::Position { fen, moves } => {
                let mut line = match fen {
                    Some(fen) => format!("position fen {}", fen),
                    None => "position startpos".to_string(),
                };
                if !moves.is_empty() {
                    line.push_str(" moves ");
                    line.push_str(&moves.join(" "));
                }
                line
            }
            GuiCommand::Go(opts) => {
                let mut line = "go".to_string();
                if let Some(depth) = opts.depth {
                    line.push_str(&format!(" depth {}", depth));
                }
                line
            }
            GuiCommand::Unknown(text) => text.clone(),
        }
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => None,
            Some("fen") => {
                let fen_parts: Vec<&str> = parts.by_ref().take_while(|&p| p != "moves").collect();
                if fen_parts.is_empty() {
                    return Err(UciError::ParseError("missing FEN after 'fen'".to_string()));
                }
                let moves = parts.map(str::to_string).collect();
                return Ok(GuiCommand::Position {
                    fen: Some(fen_parts.join(" ")),
                    moves,
                });
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let moves = match parts.next() {
            Some("moves") => parts.map(str::to_string).collect(),
            _ => Vec::new(),
        };
        Ok(GuiCommand::Position { fen, moves })
    }

    fn parse_go<'a>(mut parts: impl Iterator<Item = &'a str>) -> Self {
        let mut opts = GoOptions::default();

        while let Some(token) = parts.next() {
            match token {
                "depth" => opts.depth = parts.next().and_then(|v| v.parse().ok()),
                _ => {}
            }
        }

        GuiCommand::Go(opts)
    }
}
