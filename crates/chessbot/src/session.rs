//! Line-driven game session between a user and the engine.

use crate::command::Command;
use crate::config::ChessbotConfig;
use chess_core::Color;
use chess_engine::{Game, GameError, GameStatus};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Engine error: {0}")]
    EngineError(#[from] GameError),
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// An interactive game read from `reader` and reported to `writer`.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    game: Game,
    config: ChessbotConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, config: ChessbotConfig) -> Self {
        Self {
            reader,
            writer,
            game: Game::new(),
            config,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until the user quits, input ends, or the engine finds the game over.
    pub fn run(&mut self) -> Result<(), SessionError> {
        writeln!(self.writer, "{}", self.game.board())?;
        writeln!(self.writer, "Enter UCI moves like e2e4, g8f6, or 'quit'.")?;

        loop {
            write!(self.writer, "> ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.writer)?;
                writeln!(self.writer, "bye")?;
                break;
            }

            if self.handle(Command::parse(&line))? == Flow::Stop {
                break;
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn handle(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::Quit => {
                writeln!(self.writer, "bye")?;
                return Ok(Flow::Stop);
            }
            Command::Moves => {
                let moves: Vec<String> = self.game.legal_moves().iter().map(|m| m.to_uci()).collect();
                writeln!(self.writer, "moves: {}", moves.join(" "))?;
            }
            Command::Engine => return self.engine_turn(),
            Command::Undo => match self.game.undo() {
                Some(m) => {
                    writeln!(self.writer, "Took back: {}", m)?;
                    self.show_board()?;
                }
                None => writeln!(self.writer, "nothing to undo")?,
            },
            Command::Reset => {
                self.game.reset();
                writeln!(self.writer, "New game.")?;
                self.show_board()?;
            }
            Command::Board => writeln!(self.writer, "{}", self.game.board())?,
            Command::Empty => {}
            Command::Move(text) => self.user_move(&text)?,
        }
        Ok(Flow::Continue)
    }

    fn engine_turn(&mut self) -> Result<Flow, SessionError> {
        match self.game.status() {
            GameStatus::Checkmate { winner } => {
                let name = match winner {
                    Color::White => "White",
                    Color::Black => "Black",
                };
                writeln!(self.writer, "No legal moves: checkmate. {} wins.", name)?;
                return Ok(Flow::Stop);
            }
            GameStatus::Stalemate => {
                writeln!(self.writer, "No legal moves: stalemate.")?;
                return Ok(Flow::Stop);
            }
            GameStatus::Ongoing | GameStatus::FiftyMoveRule => {}
        }

        let m = self.game.engine_move(self.config.depth)?;
        tracing::info!(mv = %m, depth = self.config.depth, "engine moved");
        writeln!(self.writer, "Engine plays: {}", m)?;
        self.show_board()?;
        Ok(Flow::Continue)
    }

    fn user_move(&mut self, text: &str) -> Result<(), SessionError> {
        match self.game.play_uci(text) {
            Ok(_) => self.show_board()?,
            Err(GameError::EmptySquare(_)) => writeln!(self.writer, "no piece on source square")?,
            Err(e @ (GameError::Parse(_) | GameError::IllegalMove(_))) => {
                writeln!(self.writer, "{}", e)?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<(), SessionError> {
        if self.config.show_board {
            writeln!(self.writer, "{}", self.game.board())?;
        }
        Ok(())
    }
}
