//! Game session management with take-back history.
//!
//! [`Game`] owns a [`Board`] plus the snapshots needed to undo every move
//! played on it. Moves entered through [`Game::play`] are validated against
//! the legal move list; the engine's own moves come from [`select_move`].

use crate::movegen::{generate_legal, in_check, MoveList};
use crate::search::{select_move, SearchError};
use crate::{Board, UndoSnapshot};
use chess_core::{Color, Move, MoveParseError, Square};
use thiserror::Error;
use tracing::debug;

/// Half-move clock value at which the fifty-move rule applies.
const FIFTY_MOVE_LIMIT: u32 = 100;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] MoveParseError),
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// There is no piece on the move's source square.
    #[error("no piece on source square {0}")]
    EmptySquare(Square),
    /// The engine could not produce a move.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Classification of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal moves.
    Stalemate,
    /// A hundred half-moves without a capture or pawn move.
    FiftyMoveRule,
}

impl GameStatus {
    /// Returns true if no further moves should be played.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// A chess game played from the standard starting position.
#[derive(Debug)]
pub struct Game {
    board: Board,
    history: Vec<(Move, UndoSnapshot)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            history: Vec::new(),
        }
    }

    /// Returns a reference to the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut scratch = self.board.clone();
        generate_legal(&mut scratch)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        in_check(&self.board, self.board.side_to_move())
    }

    /// Plays a move after checking it against the legal moves.
    ///
    /// The move only needs matching squares and promotion piece; the
    /// generator's flags are used when it is applied.
    pub fn play(&mut self, m: Move) -> Result<(), GameError> {
        if self.board.piece_at(m.from()).is_none() {
            return Err(GameError::EmptySquare(m.from()));
        }

        let legal = self
            .legal_moves()
            .find_matching(m)
            .ok_or_else(|| GameError::IllegalMove(m.to_uci()))?;

        self.push(legal);
        Ok(())
    }

    /// Parses a move in UCI notation and plays it.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, GameError> {
        let m = Move::from_uci(text)?;
        self.play(m)?;
        Ok(m)
    }

    /// Lets the engine pick a move at the given depth and plays it.
    pub fn engine_move(&mut self, depth: u32) -> Result<Move, GameError> {
        let m = select_move(&mut self.board, depth)?;
        self.push(m);
        Ok(m)
    }

    fn push(&mut self, m: Move) {
        let snapshot = self.board.apply(m);
        debug!(mv = %m, ply = self.history.len() + 1, "move played");
        self.history.push((m, snapshot));
    }

    /// Takes back the last move, returning it.
    pub fn undo(&mut self) -> Option<Move> {
        let (m, snapshot) = self.history.pop()?;
        self.board.undo_move(snapshot);
        debug!(mv = %m, ply = self.history.len(), "move taken back");
        Some(m)
    }

    /// Restores the starting position and clears the history.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
    }

    /// Classifies the current position.
    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            let side = self.board.side_to_move();
            return if in_check(&self.board, side) {
                GameStatus::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.board.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return GameStatus::FiftyMoveRule;
        }
        GameStatus::Ongoing
    }

    /// Returns the number of moves that can be taken back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
