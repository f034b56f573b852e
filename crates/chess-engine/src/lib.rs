//! Chess rules and a fixed-depth alpha-beta engine.
//!
//! This crate provides:
//! - [`Board`] - 0x88 mailbox board with reversible make/undo
//! - Legal move generation, attack detection and perft
//! - [`evaluate`] - static material and positional evaluation
//! - [`search`] / [`select_move`] - negamax with alpha-beta pruning
//! - [`Game`] - a game session with take-back history
//!
//! # Example
//!
//! ```
//! use chess_engine::{select_move, Board, Game, GameStatus};
//!
//! let mut board = Board::new();
//! let best = select_move(&mut board, 2).unwrap();
//! println!("Engine plays {}", best);
//!
//! let mut game = Game::new();
//! game.play_uci("e2e4").unwrap();
//! game.play_uci("e7e5").unwrap();
//! assert_eq!(game.status(), GameStatus::Ongoing);
//! ```

mod board;
pub mod eval;
mod game;
pub mod movegen;
pub mod search;

pub use board::{Board, CastlingRights, Placed, UndoSnapshot};
pub use eval::{evaluate, piece_value};
pub use game::{Game, GameError, GameStatus};
pub use movegen::{
    generate_legal, generate_pseudo_legal, in_check, is_square_attacked, king_square, MoveList,
};
pub use search::{search, select_move, SearchError, SearchOutcome};
