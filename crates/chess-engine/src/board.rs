//! Mutable board state with reversible move application.

use chess_core::{Color, Move, Piece, Square};
use std::fmt;

/// A piece standing on a square.
pub type Placed = (Piece, Color);

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Removes the right tied to a `color` rook on its home corner `sq`.
    ///
    /// Squares other than the four corners leave the rights untouched.
    pub fn remove_rook_home(&mut self, color: Color, sq: Square) {
        match (color, sq) {
            (Color::White, Square::H1) | (Color::Black, Square::H8) => self.remove_kingside(color),
            (Color::White, Square::A1) | (Color::Black, Square::A8) => self.remove_queenside(color),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Everything [`Board::make_move`] changed, so [`Board::undo_move`] can put it back.
///
/// A snapshot is consumed by the undo it belongs to. Snapshots must be undone
/// in reverse order of the moves that produced them.
#[derive(Debug, PartialEq, Eq)]
pub struct UndoSnapshot {
    from: Square,
    to: Square,
    moved: Placed,
    captured: Option<Placed>,
    /// Square of the pawn taken en passant; `None` for every other move.
    captured_square: Option<Square>,
    en_passant: Option<Square>,
    castling: CastlingRights,
    halfmove_clock: u32,
    fullmove_number: u32,
    rook_move: Option<(Square, Square)>,
}

impl UndoSnapshot {
    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    /// The piece that moved, as it stood before any promotion.
    pub fn moved(&self) -> Placed {
        self.moved
    }

    pub fn captured(&self) -> Option<Placed> {
        self.captured
    }

    /// Where the captured piece stood, which differs from `to` only en passant.
    pub fn capture_square(&self) -> Option<Square> {
        self.captured.map(|_| self.captured_square.unwrap_or(self.to))
    }

    /// The rook's source and destination if the move was a castle.
    pub fn rook_move(&self) -> Option<(Square, Square)> {
        self.rook_move
    }
}

/// Complete chess game state on a 0x88 square array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Placed>; Square::SLOTS],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture.
    halfmove_clock: u32,
    /// Starts at 1, increments after Black's move.
    fullmove_number: u32,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            for (file, piece) in (0u8..).zip(BACK_RANK) {
                board.place(file, color.back_rank(), Some((piece, color)));
                board.place(file, color.pawn_rank(), Some((Piece::Pawn, color)));
            }
        }
        board.castling = CastlingRights::ALL;
        board
    }

    /// Creates a board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; Square::SLOTS],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    fn place(&mut self, file: u8, rank: u8, content: Option<Placed>) {
        if let Some(sq) = Square::from_coords(file, rank) {
            self.squares[sq.slot()] = content;
        }
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Placed> {
        self.squares[sq.slot()]
    }

    /// Puts `content` on `sq`, replacing whatever stood there.
    ///
    /// Intended for setting up positions; no consistency checks are made.
    pub fn set_piece(&mut self, sq: Square, content: Option<Placed>) {
        self.squares[sq.slot()] = content;
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    /// Returns the en passant target square, the square a double-pushed pawn
    /// just passed over.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Applies a generated move. See [`Board::make_move`].
    #[inline]
    pub fn apply(&mut self, m: Move) -> UndoSnapshot {
        self.make_move(m.from(), m.to(), m.promotion_piece())
    }

    /// Moves the piece on `from` to `to` and returns what is needed to undo it.
    ///
    /// The kind of move is worked out from the moving piece and the squares:
    /// a pawn moving two ranks is a double push, a pawn landing on the empty
    /// en passant target captures en passant, and a king moving two files
    /// castles. Legality is not checked.
    ///
    /// # Panics
    ///
    /// Panics if `from` is empty.
    pub fn make_move(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> UndoSnapshot {
        let moved = self.squares[from.slot()].expect("No piece at from square");
        let (piece, us) = moved;
        let mut captured = self.squares[to.slot()];

        let is_pawn = piece == Piece::Pawn;
        let is_double_push = is_pawn
            && from.rank_index() == us.pawn_rank()
            && from.rank_index().abs_diff(to.rank_index()) == 2;
        let is_castle = piece == Piece::King && from.file_index().abs_diff(to.file_index()) == 2;
        let is_en_passant = is_pawn && self.en_passant == Some(to) && captured.is_none();

        let captured_square = if is_en_passant {
            to.offset(-us.forward())
        } else {
            None
        };
        if let Some(sq) = captured_square {
            captured = self.squares[sq.slot()];
        }

        let rook_move = if is_castle {
            Some(match (us, to.file_index() == 6) {
                (Color::White, true) => (Square::H1, Square::F1),
                (Color::White, false) => (Square::A1, Square::D1),
                (Color::Black, true) => (Square::H8, Square::F8),
                (Color::Black, false) => (Square::A8, Square::D8),
            })
        } else {
            None
        };

        let snapshot = UndoSnapshot {
            from,
            to,
            moved,
            captured,
            captured_square,
            en_passant: self.en_passant,
            castling: self.castling,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move,
        };

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if let Some(sq) = captured_square {
            self.squares[sq.slot()] = None;
        }

        if let Some((rook_from, rook_to)) = rook_move {
            self.squares[rook_to.slot()] = self.squares[rook_from.slot()].take();
        }

        self.squares[from.slot()] = None;
        self.squares[to.slot()] = Some(moved);

        if let Some(promoted) = promotion {
            self.squares[to.slot()] = Some((promoted, us));
        }

        self.update_castling_rights(from, moved, captured, captured_square.unwrap_or(to));

        self.en_passant = if is_double_push {
            from.offset(us.forward())
        } else {
            None
        };

        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.opposite();

        snapshot
    }

    /// Reverts the move that produced `snapshot`.
    pub fn undo_move(&mut self, snapshot: UndoSnapshot) {
        self.side_to_move = self.side_to_move.opposite();

        if let Some((rook_from, rook_to)) = snapshot.rook_move {
            self.squares[rook_from.slot()] = self.squares[rook_to.slot()].take();
        }

        match snapshot.captured_square {
            Some(sq) => {
                self.squares[sq.slot()] = snapshot.captured;
                self.squares[snapshot.to.slot()] = None;
            }
            None => self.squares[snapshot.to.slot()] = snapshot.captured,
        }

        self.squares[snapshot.from.slot()] = Some(snapshot.moved);

        self.en_passant = snapshot.en_passant;
        self.castling = snapshot.castling;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
    }

    fn update_castling_rights(
        &mut self,
        from: Square,
        moved: Placed,
        captured: Option<Placed>,
        capture_square: Square,
    ) {
        match moved {
            (Piece::King, color) => self.castling.remove_color(color),
            (Piece::Rook, color) => self.castling.remove_rook_home(color, from),
            _ => {}
        }
        if let Some((Piece::Rook, victim)) = captured {
            self.castling.remove_rook_home(victim, capture_square);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(piece, color)| piece.to_char(color));
                if file > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        write!(f, "   a b c d e f g h")
    }
}
