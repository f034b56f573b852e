//! Move generation.
//!
//! Pseudo-legal moves are produced per piece by offset leaps and ray walks
//! on the 0x88 board. Legal moves are the pseudo-legal ones that survive a
//! make/test/undo cycle against [`in_check`].

mod attacks;
pub mod perft;

use crate::Board;
use chess_core::{Color, Move, MoveFlags, Piece, Square};

pub use attacks::{
    in_check, is_square_attacked, king_square, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns a mutable slice of the moves, e.g. for ordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns the first move naming the same squares and promotion as `m`.
    pub fn find_matching(&self, m: Move) -> Option<Move> {
        self.iter().copied().find(|candidate| candidate.same_squares(m))
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
///
/// Each candidate is played on `board` and taken back again, so the board is
/// borrowed mutably but left exactly as it was.
pub fn generate_legal(board: &mut Board) -> MoveList {
    let us = board.side_to_move();
    let them = us.opposite();
    let was_in_check = in_check(board, us);

    let mut moves = generate_pseudo_legal(board);
    moves.retain(|m| {
        if m.is_castle() && (was_in_check || castle_path_attacked(board, *m, them)) {
            return false;
        }
        let undo = board.apply(*m);
        let legal = !in_check(board, us);
        board.undo_move(undo);
        legal
    });

    moves
}

/// Returns true if the king's start, transit or landing square of a castle
/// is attacked by `them`.
fn castle_path_attacked(board: &Board, m: Move, them: Color) -> bool {
    let from = m.from().index();
    let to = m.to().index();
    [from, (from + to) / 2, to]
        .into_iter()
        .filter_map(Square::from_index)
        .any(|sq| is_square_attacked(board, sq, them))
}

/// Generates pseudo-legal moves for the side to move: every move obeying the
/// pieces' movement rules, including ones that leave the own king in check.
pub fn generate_pseudo_legal(board: &Board) -> MoveList {
    let us = board.side_to_move();
    let mut moves = MoveList::new();

    for (from, piece, color) in board.pieces() {
        if color != us {
            continue;
        }
        match piece {
            Piece::Pawn => generate_pawn_moves(board, from, us, &mut moves),
            Piece::Knight => generate_leaper_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
            Piece::King => {
                generate_leaper_moves(board, from, us, &KING_OFFSETS, &mut moves);
                generate_castling_candidates(board, from, us, &mut moves);
            }
            slider => generate_slider_moves(board, from, us, slider_directions(slider), &mut moves),
        }
    }

    moves
}

/// Ray directions for a sliding piece; empty for everything else.
fn slider_directions(piece: Piece) -> &'static [i8] {
    if !piece.is_slider() {
        return &[];
    }
    match piece {
        Piece::Bishop => &BISHOP_DIRECTIONS,
        Piece::Rook => &ROOK_DIRECTIONS,
        _ => &QUEEN_DIRECTIONS,
    }
}

#[inline]
fn is_enemy(board: &Board, sq: Square, us: Color) -> bool {
    matches!(board.piece_at(sq), Some((_, color)) if color != us)
}

/// Pushes `from -> to`, branching into all four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.rank_index() == us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let forward = us.forward();

    // Pushes
    if let Some(one) = from.offset(forward).filter(|&s| board.piece_at(s).is_none()) {
        push_pawn_move(from, one, us, moves);

        if from.rank_index() == us.pawn_rank() {
            if let Some(two) = one.offset(forward).filter(|&s| board.piece_at(s).is_none()) {
                moves.push(Move::with_flags(from, two, MoveFlags::DOUBLE_PUSH));
            }
        }
    }

    // Captures
    for side in [-1, 1] {
        if let Some(to) = from.offset(forward + side) {
            if is_enemy(board, to, us) {
                push_pawn_move(from, to, us, moves);
            }
        }
    }

    // En passant
    if let Some(ep) = board.en_passant() {
        let reaches = [-1, 1]
            .into_iter()
            .any(|side| from.offset(forward + side) == Some(ep));
        let victim = ep
            .offset(-forward)
            .and_then(|behind| board.piece_at(behind));
        if reaches && victim == Some((Piece::Pawn, us.opposite())) {
            moves.push(Move::with_flags(from, ep, MoveFlags::EN_PASSANT));
        }
    }
}

/// Generates knight or king steps onto empty or enemy squares.
fn generate_leaper_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[i8],
    moves: &mut MoveList,
) {
    for &d in offsets {
        if let Some(to) = from.offset(d) {
            if board.piece_at(to).map_or(true, |(_, color)| color != us) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Generates ray moves up to and including the first enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[i8],
    moves: &mut MoveList,
) {
    for &d in directions {
        let mut current = from.offset(d);
        while let Some(to) = current {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some((_, color)) => {
                    if color != us {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to.offset(d);
        }
    }
}

/// Generates castling moves whose right is held and whose path is empty.
///
/// Whether the king passes through check is left to [`generate_legal`].
fn generate_castling_candidates(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let (home, kingside_target, queenside_target, kingside_path, queenside_path) = match us {
        Color::White => (
            Square::E1,
            Square::G1,
            Square::C1,
            [Square::F1, Square::G1],
            [Square::D1, Square::C1, Square::B1],
        ),
        Color::Black => (
            Square::E8,
            Square::G8,
            Square::C8,
            [Square::F8, Square::G8],
            [Square::D8, Square::C8, Square::B8],
        ),
    };
    if from != home {
        return;
    }
    let is_clear = |path: &[Square]| path.iter().all(|&sq| board.piece_at(sq).is_none());

    if board.castling().can_castle_kingside(us) && is_clear(&kingside_path) {
        moves.push(Move::with_flags(home, kingside_target, MoveFlags::CASTLE));
    }
    if board.castling().can_castle_queenside(us) && is_clear(&queenside_path) {
        moves.push(Move::with_flags(home, queenside_target, MoveFlags::CASTLE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CastlingRights;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn has(moves: &MoveList, uci: &str) -> bool {
        moves.iter().any(|m| m.to_uci() == uci)
    }

    /// Kings on e1/e8 and rooks on all four corners, full castling rights.
    fn castling_board() -> Board {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Some((Piece::King, Color::White)));
        board.set_piece(Square::E8, Some((Piece::King, Color::Black)));
        for corner in [Square::A1, Square::H1] {
            board.set_piece(corner, Some((Piece::Rook, Color::White)));
        }
        for corner in [Square::A8, Square::H8] {
            board.set_piece(corner, Some((Piece::Rook, Color::Black)));
        }
        board.set_castling(CastlingRights::ALL);
        board
    }

    fn castles(moves: &MoveList) -> Vec<String> {
        moves
            .iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to_uci())
            .collect()
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::new(sq("e2"), sq("e4"));
        let m2 = Move::new(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
    }

    #[test]
    fn movelist_retain() {
        let mut list = MoveList::new();
        list.push(Move::new(sq("e2"), sq("e3")));
        list.push(Move::new(sq("e2"), sq("e4")));
        list.push(Move::new(sq("e3"), sq("e4")));

        list.retain(|m| m.from() == sq("e2"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn movelist_find_matching_ignores_flags() {
        let mut list = MoveList::new();
        list.push(Move::with_flags(sq("e2"), sq("e4"), MoveFlags::DOUBLE_PUSH));
        let found = list.find_matching(Move::new(sq("e2"), sq("e4")));
        assert_eq!(found.map(|m| m.is_double_push()), Some(true));
        assert!(list.find_matching(Move::new(sq("e2"), sq("e3"))).is_none());
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let mut board = Board::new();
        assert_eq!(generate_pseudo_legal(&board).len(), 20);
        let moves = generate_legal(&mut board);
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
        assert_eq!(moves.iter().filter(|m| m.is_double_push()).count(), 8);
        assert!(has(&moves, "g1f3"));
        assert!(has(&moves, "b1a3"));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn pawn_blocked_cannot_push() {
        let mut board = Board::new();
        board.set_piece(sq("e3"), Some((Piece::Knight, Color::Black)));
        board.set_piece(sq("d4"), Some((Piece::Knight, Color::Black)));
        let moves = generate_pseudo_legal(&board);
        assert!(!has(&moves, "e2e3"));
        assert!(!has(&moves, "e2e4"));
        assert!(has(&moves, "d2d3"));
        assert!(!has(&moves, "d2d4"));
        assert!(has(&moves, "d2e3"));
        assert!(has(&moves, "f2e3"));
    }

    #[test]
    fn promotion_branches_four_ways() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Some((Piece::King, Color::White)));
        board.set_piece(Square::H1, Some((Piece::King, Color::Black)));
        board.set_piece(sq("a7"), Some((Piece::Pawn, Color::White)));
        board.set_piece(Square::B8, Some((Piece::Knight, Color::Black)));
        let moves = generate_legal(&mut board);

        let promos: Vec<String> = moves
            .iter()
            .filter(|m| m.is_promotion())
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(
            promos,
            vec!["a7a8q", "a7a8r", "a7a8b", "a7a8n", "a7b8q", "a7b8r", "a7b8b", "a7b8n"]
        );
    }

    #[test]
    fn black_pawns_move_down() {
        let mut board = Board::new();
        board.set_side_to_move(Color::Black);
        let moves = generate_legal(&mut board);
        assert_eq!(moves.len(), 20);
        assert!(has(&moves, "e7e5"));
        assert!(has(&moves, "g8f6"));
    }

    #[test]
    fn en_passant_requires_enemy_pawn_behind_target() {
        let mut board = Board::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            board.make_move(sq(from), sq(to), None);
        }
        let moves = generate_legal(&mut board);
        let ep: Vec<Move> = moves.iter().copied().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_uci(), "e5d6");

        // A target with nothing behind it offers no capture.
        board.set_piece(sq("d5"), None);
        let moves = generate_legal(&mut board);
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn en_passant_expires_after_one_move() {
        let mut board = Board::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            board.make_move(sq(from), sq(to), None);
        }
        board.make_move(sq("g1"), sq("f3"), None);
        board.make_move(sq("a6"), sq("a5"), None);
        assert_eq!(board.en_passant(), None);
        let moves = generate_legal(&mut board);
        assert!(!has(&moves, "e5d6"));
    }

    #[test]
    fn sliders_stop_at_pieces() {
        let mut board = Board::empty();
        board.set_piece(Square::A1, Some((Piece::King, Color::White)));
        board.set_piece(Square::H8, Some((Piece::King, Color::Black)));
        board.set_piece(sq("d4"), Some((Piece::Rook, Color::White)));
        board.set_piece(sq("d6"), Some((Piece::Pawn, Color::Black)));
        board.set_piece(sq("f4"), Some((Piece::Pawn, Color::White)));
        let moves = generate_pseudo_legal(&board);
        let rook: Vec<String> = moves
            .iter()
            .filter(|m| m.from() == sq("d4"))
            .map(|m| m.to().to_algebraic())
            .collect();
        // left: c4 b4 a4, right: e4, up: d5 d6, down: d3 d2 d1
        assert_eq!(rook.len(), 9);
        assert!(rook.contains(&"d6".to_string()));
        assert!(!rook.contains(&"d7".to_string()));
        assert!(!rook.contains(&"f4".to_string()));
    }

    #[test]
    fn slider_moves_from_open_center() {
        for (piece, expected) in [(Piece::Bishop, 13), (Piece::Rook, 14), (Piece::Queen, 27)] {
            let mut board = Board::empty();
            board.set_piece(Square::A8, Some((Piece::King, Color::White)));
            board.set_piece(Square::H1, Some((Piece::King, Color::Black)));
            board.set_piece(sq("d4"), Some((piece, Color::White)));
            let moves = generate_pseudo_legal(&board);
            let count = moves.iter().filter(|m| m.from() == sq("d4")).count();
            assert_eq!(count, expected, "{piece} on d4");
        }
        assert!(slider_directions(Piece::Knight).is_empty());
        assert!(slider_directions(Piece::King).is_empty());
    }

    #[test]
    fn knight_in_corner() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Some((Piece::King, Color::White)));
        board.set_piece(Square::E8, Some((Piece::King, Color::Black)));
        board.set_piece(Square::H8, Some((Piece::Knight, Color::White)));
        let moves = generate_pseudo_legal(&board);
        let knight = moves.iter().filter(|m| m.from() == Square::H8).count();
        assert_eq!(knight, 2);
    }

    #[test]
    fn castling_both_sides() {
        let mut board = castling_board();
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e1g1", "e1c1"]);

        board.set_side_to_move(Color::Black);
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn castling_needs_right_and_empty_path() {
        let mut board = castling_board();
        board.set_castling(CastlingRights::new(CastlingRights::WHITE_QUEENSIDE));
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e1c1"]);

        board.set_piece(Square::B1, Some((Piece::Knight, Color::White)));
        let moves = generate_legal(&mut board);
        assert!(castles(&moves).is_empty());
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut board = castling_board();
        board.set_piece(sq("e4"), Some((Piece::Rook, Color::Black)));
        let moves = generate_legal(&mut board);
        assert!(castles(&moves).is_empty());
    }

    #[test]
    fn no_castling_through_or_into_attack() {
        let mut board = castling_board();
        // f-file rook covers f1, so only queenside remains.
        board.set_piece(sq("f5"), Some((Piece::Rook, Color::Black)));
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e1c1"]);

        // c-file rook covers the landing square c1.
        board.set_piece(sq("f5"), None);
        board.set_piece(sq("c5"), Some((Piece::Rook, Color::Black)));
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e1g1"]);

        // An attacked b1 does not stop queenside castling.
        board.set_piece(sq("c5"), None);
        board.set_piece(sq("b5"), Some((Piece::Rook, Color::Black)));
        let moves = generate_legal(&mut board);
        assert_eq!(castles(&moves), vec!["e1g1", "e1c1"]);
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Some((Piece::King, Color::White)));
        board.set_piece(sq("e2"), Some((Piece::Knight, Color::White)));
        board.set_piece(sq("e7"), Some((Piece::Rook, Color::Black)));
        board.set_piece(Square::A8, Some((Piece::King, Color::Black)));
        let moves = generate_legal(&mut board);
        assert!(moves.iter().all(|m| m.from() != sq("e2")));
    }

    #[test]
    fn en_passant_cannot_expose_king() {
        // Removing both pawns from the fifth rank would open the rook's line.
        let mut board = Board::empty();
        board.set_piece(sq("a5"), Some((Piece::King, Color::White)));
        board.set_piece(sq("b5"), Some((Piece::Pawn, Color::White)));
        board.set_piece(sq("c7"), Some((Piece::Pawn, Color::Black)));
        board.set_piece(sq("h5"), Some((Piece::Rook, Color::Black)));
        board.set_piece(sq("h8"), Some((Piece::King, Color::Black)));
        board.set_side_to_move(Color::Black);
        board.make_move(sq("c7"), sq("c5"), None);

        let moves = generate_legal(&mut board);
        assert!(!has(&moves, "b5c6"));
        assert!(generate_pseudo_legal(&board).iter().any(|m| m.is_en_passant()));
    }
}
