//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for 0x88 board coordinates
//! - [`Move`] and [`MoveFlags`] for move representation
//! - UCI-style move text parsing ([`MoveParseError`])

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Move, MoveFlags, MoveParseError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
