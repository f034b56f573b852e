//! Attack detection on the 0x88 board.
//!
//! Offsets are 0x88 index deltas: one file is 1, one rank is 16.

use crate::Board;
use chess_core::{Color, Piece, Square};

pub const KNIGHT_OFFSETS: [i8; 8] = [33, 31, 18, 14, -14, -18, -31, -33];
pub const KING_OFFSETS: [i8; 8] = [1, -1, 16, -16, 17, 15, -15, -17];
pub const BISHOP_DIRECTIONS: [i8; 4] = [17, 15, -15, -17];
pub const ROOK_DIRECTIONS: [i8; 4] = [1, -1, 16, -16];
pub const QUEEN_DIRECTIONS: [i8; 8] = [17, 15, -15, -17, 1, -1, 16, -16];

/// Returns true if the given square is attacked by the given color.
///
/// The side to move plays no part; a square holding a `by_color` piece can
/// still be attacked by another `by_color` piece.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // Pawns capture toward their forward direction, so look one rank back.
    for side in [-1, 1] {
        if holds(board, sq.offset(side - by_color.forward()), Piece::Pawn, by_color) {
            return true;
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&d| holds(board, sq.offset(d), Piece::Knight, by_color))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&d| holds(board, sq.offset(d), Piece::King, by_color))
    {
        return true;
    }

    ray_hits(board, sq, &BISHOP_DIRECTIONS, by_color, Piece::Bishop)
        || ray_hits(board, sq, &ROOK_DIRECTIONS, by_color, Piece::Rook)
}

/// Walks each direction from `sq` and reports whether the first piece met is
/// a `by_color` `slider` or queen.
fn ray_hits(board: &Board, sq: Square, directions: &[i8], by_color: Color, slider: Piece) -> bool {
    directions.iter().any(|&d| {
        let mut current = sq.offset(d);
        while let Some(s) = current {
            if let Some((piece, color)) = board.piece_at(s) {
                return color == by_color && (piece == slider || piece == Piece::Queen);
            }
            current = s.offset(d);
        }
        false
    })
}

#[inline]
fn holds(board: &Board, sq: Option<Square>, piece: Piece, color: Color) -> bool {
    sq.and_then(|s| board.piece_at(s)) == Some((piece, color))
}

/// Finds the king of the given color by scanning the board.
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces()
        .find(|&(_, piece, c)| piece == Piece::King && c == color)
        .map(|(sq, _, _)| sq)
}

/// Returns true if the king of the given color is in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    match king_square(board, color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false, // No king (shouldn't happen in a reachable position)
    }
}
