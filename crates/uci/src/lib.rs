//! UCI (Universal Chess Interface) protocol library.
//!
//! This crate provides types and parsing for both ends of the protocol:
//! - [`UciEngine`] reads GUI commands and writes engine messages, for bots
//! - [`UciClient`] drives an external engine, for hosts that delegate search
//!
//! # Commands used here
//!
//! - `uci` / `uciok` - Initialize engine, get id
//! - `isready` / `readyok` - Synchronization
//! - `position fen <fen> [moves <move>...]` - Set position
//! - `go depth <d>` - Start search
//! - `bestmove <move>` - Search result
//! - `quit` - Exit engine

mod client;
mod command;
mod info;

pub use client::{ClientError, EngineProcess, UciClient};
pub use command::{GoOptions, GuiCommand};
pub use info::{EngineInfo, InfoBuilder, Score};

use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("input closed")]
    Eof,
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information.
    Info(EngineInfo),
    /// Best move found.
    BestMove { mv: String, ponder: Option<String> },
}

impl EngineMessage {
    /// Format message for output.
    pub fn to_uci(&self) -> String {
        match self {
            EngineMessage::Id { name, author } => {
                let mut parts = Vec::new();
                if let Some(n) = name {
                    parts.push(format!("id name {}", n));
                }
                if let Some(a) = author {
                    parts.push(format!("id author {}", a));
                }
                parts.join("\n")
            }
            EngineMessage::UciOk => "uciok".to_string(),
            EngineMessage::ReadyOk => "readyok".to_string(),
            EngineMessage::Info(info) => info.to_uci(),
            EngineMessage::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {} ponder {}", mv, p),
                None => format!("bestmove {}", mv),
            },
        }
    }

    /// Parse one line of engine output. Lines this crate does not model
    /// (`option`, `copyprotection`, ...) yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(' ').unwrap_or((line, ""));
        match keyword {
            "uciok" => Some(EngineMessage::UciOk),
            "readyok" => Some(EngineMessage::ReadyOk),
            "info" => EngineInfo::parse(line).map(EngineMessage::Info),
            "id" => {
                let (field, value) = rest.trim().split_once(' ')?;
                let value = Some(value.trim().to_string());
                match field {
                    "name" => Some(EngineMessage::Id {
                        name: value,
                        author: None,
                    }),
                    "author" => Some(EngineMessage::Id {
                        name: None,
                        author: value,
                    }),
                    _ => None,
                }
            }
            "bestmove" => {
                let mut parts = rest.split_whitespace();
                let mv = parts.next().unwrap_or("").to_string();
                let ponder = match parts.next() {
                    Some("ponder") => parts.next().map(str::to_string),
                    _ => None,
                };
                Some(EngineMessage::BestMove { mv, ponder })
            }
            _ => None,
        }
    }
}

/// Simple UCI engine wrapper for writing bots.
pub struct UciEngine<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read and parse the next command from GUI.
    pub fn read_command(&mut self) -> Result<GuiCommand, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(UciError::Eof);
        }
        GuiCommand::parse(&line)
    }

    /// Send a message to the GUI.
    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        writeln!(self.writer, "{}", msg.to_uci())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send engine identification.
    pub fn send_id(&mut self, name: &str, author: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Id {
            name: Some(name.to_string()),
            author: Some(author.to_string()),
        })
    }

    pub fn send_uciok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::UciOk)
    }

    pub fn send_readyok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::ReadyOk)
    }

    /// Send best move. UCI uses `0000` for "no move".
    pub fn send_bestmove(&mut self, mv: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::BestMove {
            mv: mv.to_string(),
            ponder: None,
        })
    }

    pub fn send_info(&mut self, info: EngineInfo) -> Result<(), UciError> {
        self.send(&EngineMessage::Info(info))
    }

    /// Consumes the wrapper, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Create a UCI engine using stdin/stdout.
pub fn stdio_engine() -> UciEngine<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    UciEngine::new(
        std::io::BufReader::new(std::io::stdin()),
        std::io::stdout(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_engine_messages() {
        assert_eq!(EngineMessage::parse("uciok"), Some(EngineMessage::UciOk));
        assert_eq!(EngineMessage::parse("readyok\n"), Some(EngineMessage::ReadyOk));
        assert_eq!(
            EngineMessage::parse("id name Minimax 0.1"),
            Some(EngineMessage::Id {
                name: Some("Minimax 0.1".to_string()),
                author: None
            })
        );
        assert_eq!(
            EngineMessage::parse("bestmove e2e4 ponder e7e5"),
            Some(EngineMessage::BestMove {
                mv: "e2e4".to_string(),
                ponder: Some("e7e5".to_string())
            })
        );
        assert!(matches!(
            EngineMessage::parse("info depth 4"),
            Some(EngineMessage::Info(EngineInfo { depth: Some(4), .. }))
        ));
        assert_eq!(EngineMessage::parse("option name Hash type spin"), None);
        assert_eq!(EngineMessage::parse(""), None);
    }

    #[test]
    fn messages_round_trip() {
        for msg in [
            EngineMessage::UciOk,
            EngineMessage::ReadyOk,
            EngineMessage::BestMove {
                mv: "a10a8".to_string(),
                ponder: None,
            },
        ] {
            assert_eq!(EngineMessage::parse(&msg.to_uci()), Some(msg));
        }
    }

    #[test]
    fn engine_reads_commands_and_writes_replies() {
        let input = Cursor::new(b"uci\nisready\n".to_vec());
        let mut engine = UciEngine::new(input, Vec::new());

        assert_eq!(engine.read_command().unwrap(), GuiCommand::Uci);
        engine.send_id("Bot", "Author").unwrap();
        engine.send_uciok().unwrap();
        assert_eq!(engine.read_command().unwrap(), GuiCommand::IsReady);
        engine.send_readyok().unwrap();
        assert!(matches!(engine.read_command(), Err(UciError::Eof)));

        let out = String::from_utf8(engine.into_writer()).unwrap();
        assert_eq!(out, "id name Bot\nid author Author\nuciok\nreadyok\n");
    }
}
