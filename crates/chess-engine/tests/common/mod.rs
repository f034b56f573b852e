//! Shared helpers for integration tests.

use chess_core::{Color, Piece, Square};
use chess_engine::{Board, CastlingRights};

/// Builds a board from the piece placement field of a FEN record, with the
/// given side to move, castling flags and en passant target.
pub fn board_from_placement(
    placement: &str,
    side_to_move: Color,
    castling: u8,
    en_passant: Option<&str>,
) -> Board {
    let mut board = Board::empty();
    for (row, rank_text) in placement.split('/').enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let piece = match c.to_ascii_lowercase() {
                'p' => Piece::Pawn,
                'n' => Piece::Knight,
                'b' => Piece::Bishop,
                'r' => Piece::Rook,
                'q' => Piece::Queen,
                'k' => Piece::King,
                other => panic!("unexpected piece character {other:?}"),
            };
            let sq = Square::from_coords(file, rank).expect("square on board");
            board.set_piece(sq, Some((piece, color)));
            file += 1;
        }
        assert_eq!(file, 8, "rank {rank_text:?} does not cover eight files");
    }
    board.set_side_to_move(side_to_move);
    board.set_castling(CastlingRights::new(castling));
    board.set_en_passant(en_passant.map(|s| Square::from_algebraic(s).expect("valid square")));
    board
}

#[allow(dead_code)]
pub fn sq(text: &str) -> Square {
    Square::from_algebraic(text).expect("valid square")
}
