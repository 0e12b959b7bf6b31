//! Client side of the protocol: drives an external engine.
//!
//! [`UciClient`] works over any line transport, so tests can use in-memory
//! buffers. [`EngineProcess`] spawns an engine executable and wraps its
//! pipes. Each request takes `&mut self` and reads the correlated reply
//! before returning, so at most one request is ever outstanding.

use crate::{EngineInfo, EngineMessage, GoOptions, GuiCommand};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use thiserror::Error;
use tracing::{trace, warn};

/// Errors that can occur when talking to an external engine.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A search was requested before the handshake completed.
    #[error("engine not ready")]
    NotReady,
    /// The engine closed its output or replied with something unexpected.
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A single-slot request/response client for a UCI engine.
pub struct UciClient<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    ready: bool,
    name: Option<String>,
}

impl<R: BufRead, W: Write> UciClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            ready: false,
            name: None,
        }
    }

    /// Engine name reported during the handshake.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true once [`handshake`](Self::handshake) has succeeded.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Sends `uci`, waits for `uciok`, then `isready` and waits for `readyok`.
    pub fn handshake(&mut self) -> Result<(), ClientError> {
        self.ready = false;
        self.send(&GuiCommand::Uci)?;
        loop {
            match self.read_message()? {
                EngineMessage::UciOk => break,
                EngineMessage::Id {
                    name: Some(name), ..
                } => self.name = Some(name),
                _ => {}
            }
        }

        self.send(&GuiCommand::IsReady)?;
        loop {
            if let EngineMessage::ReadyOk = self.read_message()? {
                break;
            }
        }

        self.ready = true;
        Ok(())
    }

    /// Asks for the best move in `fen` at a fixed depth and returns the move
    /// token exactly as the engine sent it (e.g. `e2e4`).
    pub fn best_move(&mut self, fen: &str, depth: u32) -> Result<String, ClientError> {
        if !self.ready {
            return Err(ClientError::NotReady);
        }

        self.send(&GuiCommand::Position {
            fen: Some(fen.to_string()),
            moves: Vec::new(),
        })?;
        self.send(&GuiCommand::Go(GoOptions::depth(depth)))?;

        loop {
            match self.read_message()? {
                EngineMessage::BestMove { mv, .. } => return Ok(mv),
                EngineMessage::Info(EngineInfo { depth, score, .. }) => {
                    trace!(?depth, ?score, "engine info");
                }
                other => warn!(?other, "unexpected message while searching"),
            }
        }
    }

    /// Sends `quit`. The client is no longer ready afterwards.
    pub fn quit(&mut self) -> Result<(), ClientError> {
        self.ready = false;
        self.send(&GuiCommand::Quit)
    }

    fn send(&mut self, cmd: &GuiCommand) -> Result<(), ClientError> {
        let line = cmd.to_uci();
        trace!(%line, "-> engine");
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Reads lines until one parses as an engine message.
    fn read_message(&mut self) -> Result<EngineMessage, ClientError> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                self.ready = false;
                return Err(ClientError::Protocol("engine closed its output".to_string()));
            }
            let line = line.trim();
            trace!(%line, "<- engine");
            match EngineMessage::parse(line) {
                Some(EngineMessage::BestMove { mv, .. }) if mv.is_empty() => {
                    return Err(ClientError::Protocol(format!("malformed reply '{}'", line)));
                }
                Some(msg) => return Ok(msg),
                None if line.is_empty() => {}
                None => trace!(%line, "ignoring unrecognized line"),
            }
        }
    }
}

/// A spawned engine executable with a client on its pipes.
pub struct EngineProcess {
    child: Child,
    client: UciClient<BufReader<ChildStdout>, ChildStdin>,
}

impl EngineProcess {
    /// Spawns the engine. Call [`handshake`](UciClient::handshake) on
    /// [`client`](Self::client) before searching.
    pub fn spawn<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let mut child = Command::new(path.as_ref())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(ClientError::Protocol("engine pipes unavailable".to_string()));
        };

        Ok(Self {
            child,
            client: UciClient::new(BufReader::new(stdout), stdin),
        })
    }

    pub fn client(&mut self) -> &mut UciClient<BufReader<ChildStdout>, ChildStdin> {
        &mut self.client
    }

    /// Sends `quit` and waits for the process to exit.
    pub fn shutdown(mut self) -> Result<(), ClientError> {
        self.client.quit()?;
        self.child.wait()?;
        Ok(())
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        if self.client.is_ready() {
            let _ = self.client.quit();
        }
        let _ = self.child.kill();
    }
}
