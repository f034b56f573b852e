//! Move representation.

use crate::{Piece, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing move text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move must be 4 or 5 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid promotion piece '{0}' (expected q/r/b/n)")]
    InvalidPromotion(char),
}

/// Special-move markers attached by the move generator.
///
/// The board never reads these when applying a move; they exist for
/// generation, legality filtering and move ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 0);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 1);
    pub const CASTLE: MoveFlags = MoveFlags(1 << 2);
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(1 << 3);

    /// Returns true if every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both flag sets.
    #[inline]
    pub const fn union(self, other: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | other.0)
    }

    /// Returns true if no flag is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = MoveFlags;

    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        self.union(rhs)
    }
}

/// A chess move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    flags: MoveFlags,
}

impl Move {
    /// Creates a quiet move or plain capture.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            flags: MoveFlags::NONE,
        }
    }

    /// Creates a move carrying the given special-move flags.
    #[inline]
    pub const fn with_flags(from: Square, to: Square, flags: MoveFlags) -> Self {
        Move {
            from,
            to,
            promotion: None,
            flags,
        }
    }

    /// Creates a promotion to `piece`.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
            flags: MoveFlags::PROMOTION,
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the special-move flags.
    #[inline]
    pub const fn flags(self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PUSH)
    }

    /// Returns true if both moves name the same squares and promotion piece,
    /// ignoring flags.
    #[inline]
    pub fn same_squares(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion.and_then(Piece::promotion_char) {
            Some(c) => format!("{}{}{}", self.from, self.to, c),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from UCI notation.
    ///
    /// Surrounding whitespace is ignored and letters are case-insensitive.
    /// The result only carries the promotion flag; the generator supplies
    /// the other flags for moves it produces.
    pub fn from_uci(s: &str) -> Result<Self, MoveParseError> {
        let text = s.trim().to_ascii_lowercase();
        let len = text.chars().count();
        if len != 4 && len != 5 {
            return Err(MoveParseError::InvalidLength(len));
        }
        // Length is counted in chars above, so non-ASCII input must be
        // rejected before slicing by byte.
        if !text.is_ascii() {
            return Err(MoveParseError::InvalidSquare(text));
        }
        let from = Square::from_algebraic(&text[0..2])
            .ok_or_else(|| MoveParseError::InvalidSquare(text[0..2].to_string()))?;
        let to = Square::from_algebraic(&text[2..4])
            .ok_or_else(|| MoveParseError::InvalidSquare(text[2..4].to_string()))?;
        match text[4..].chars().next() {
            Some(c) => {
                let piece = Piece::from_promotion_char(c).ok_or(MoveParseError::InvalidPromotion(c))?;
                Ok(Move::promotion(from, to, piece))
            }
            None => Ok(Move::new(from, to)),
        }
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::new(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
