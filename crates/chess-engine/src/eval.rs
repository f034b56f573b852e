//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favors
//! White whoever is to move.

use crate::Board;
use chess_core::{Color, Piece, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Only used to rank captures and attackers; kings are never traded.
pub const KING_VALUE: i32 = 2000;

/// Bonus per rank a pawn has advanced from its own back rank.
const PAWN_ADVANCE_BONUS: i32 = 3;
const KNIGHT_CENTER_BONUS: i32 = 10;
const BISHOP_CENTER_BONUS: i32 = 5;
const QUEEN_CENTER_BONUS: i32 = 3;
const ROOK_OPEN_FILE_BONUS: i32 = 12;
const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 6;

/// Returns the material value of a piece type.
#[inline]
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

/// Evaluates the board statically, from White's perspective.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0i32;

    for (sq, piece, color) in board.pieces() {
        let sign = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        score += sign * (piece_value(piece) + positional_bonus(board, sq, piece, color));
    }

    score
}

fn positional_bonus(board: &Board, sq: Square, piece: Piece, color: Color) -> i32 {
    match piece {
        Piece::Pawn => {
            let advanced = sq.rank_index().abs_diff(color.back_rank());
            PAWN_ADVANCE_BONUS * advanced as i32
        }
        Piece::Knight if is_center(sq) => KNIGHT_CENTER_BONUS,
        Piece::Bishop if is_center(sq) => BISHOP_CENTER_BONUS,
        Piece::Queen if is_center(sq) => QUEEN_CENTER_BONUS,
        Piece::Rook => {
            let (white_pawns, black_pawns) = pawns_on_file(board, sq.file_index());
            let own_pawns = match color {
                Color::White => white_pawns,
                Color::Black => black_pawns,
            };
            if !white_pawns && !black_pawns {
                ROOK_OPEN_FILE_BONUS
            } else if !own_pawns {
                ROOK_SEMI_OPEN_FILE_BONUS
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// d4, e4, d5 and e5.
#[inline]
fn is_center(sq: Square) -> bool {
    (3..=4).contains(&sq.file_index()) && (3..=4).contains(&sq.rank_index())
}

/// Reports whether White and Black have a pawn on the given file.
fn pawns_on_file(board: &Board, file: u8) -> (bool, bool) {
    let mut seen = (false, false);
    for rank in 0..8 {
        let content = Square::from_coords(file, rank).and_then(|sq| board.piece_at(sq));
        match content {
            Some((Piece::Pawn, Color::White)) => seen.0 = true,
            Some((Piece::Pawn, Color::Black)) => seen.1 = true,
            _ => {}
        }
    }
    seen
}
