//! End-to-end play through the public API.

mod common;

use chess_core::{Color, Move, Piece};
use chess_engine::search::{search, MATE_SCORE};
use chess_engine::{generate_legal, in_check, select_move, Board, Game, GameStatus, SearchError};
use common::{board_from_placement, sq};

fn play(board: &mut Board, uci: &str) {
    let wanted = Move::from_uci(uci).unwrap();
    let m = generate_legal(board)
        .find_matching(wanted)
        .unwrap_or_else(|| panic!("{uci} is not legal"));
    board.apply(m);
}

#[test]
fn open_game_by_literal_squares() {
    let mut board = Board::new();

    play(&mut board, "e2e4");
    assert_eq!(board.piece_at(sq("e2")), None);
    assert_eq!(board.piece_at(sq("e4")), Some((Piece::Pawn, Color::White)));
    assert_eq!(board.en_passant(), Some(sq("e3")));
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.halfmove_clock(), 0);

    play(&mut board, "e7e5");
    assert_eq!(board.piece_at(sq("e7")), None);
    assert_eq!(board.piece_at(sq("e5")), Some((Piece::Pawn, Color::Black)));
    assert_eq!(board.en_passant(), Some(sq("e6")));
    assert_eq!(board.fullmove_number(), 2);

    play(&mut board, "g1f3");
    assert_eq!(board.piece_at(sq("g1")), None);
    assert_eq!(board.piece_at(sq("f3")), Some((Piece::Knight, Color::White)));
    assert_eq!(board.en_passant(), None);
    assert_eq!(board.halfmove_clock(), 1);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn en_passant_window_lasts_one_move() {
    let mut board = Board::new();
    for m in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        play(&mut board, m);
    }
    let ep = Move::from_uci("e5d6").unwrap();
    assert!(generate_legal(&mut board).find_matching(ep).is_some());

    // Both sides make a quiet move; the capture is gone.
    play(&mut board, "g1f3");
    play(&mut board, "g8f6");
    assert!(generate_legal(&mut board).find_matching(ep).is_none());
}

#[test]
fn checkmate_and_stalemate_are_told_apart() {
    // Back-rank mate, Black to move.
    let mut mated = board_from_placement("R5k1/5ppp/8/8/8/8/8/6K1", Color::Black, 0, None);
    assert!(generate_legal(&mut mated).is_empty());
    assert!(in_check(&mated, Color::Black));
    assert_eq!(select_move(&mut mated, 3), Err(SearchError::NoLegalMoves));

    let mut stalemated = board_from_placement("7k/5Q2/6K1/8/8/8/8/8", Color::Black, 0, None);
    assert!(generate_legal(&mut stalemated).is_empty());
    assert!(!in_check(&stalemated, Color::Black));
    assert_eq!(select_move(&mut stalemated, 3), Err(SearchError::NoLegalMoves));
}

#[test]
fn game_status_folds_terminal_positions() {
    let mut game = Game::new();
    for m in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"] {
        game.play_uci(m).unwrap();
    }
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn search_is_deterministic() {
    let mut board = Board::new();
    for m in ["d2d4", "g8f6", "c2c4", "e7e6"] {
        play(&mut board, m);
    }
    let first = search(&mut board, 3).unwrap();
    let second = search(&mut board, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn engine_prefers_faster_mate() {
    // Qh5xf7 mates at once; other lines mate later or not at all.
    let mut board = board_from_placement(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR",
        Color::White,
        0b1111,
        None,
    );
    let outcome = search(&mut board, 3).unwrap();
    assert_eq!(outcome.best_move.to_uci(), "h5f7");
    assert_eq!(outcome.score, MATE_SCORE - 1);
}
