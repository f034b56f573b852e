//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The search walks a single [`Board`] with make/undo. Moves are ordered so
//! that cheap attackers taking valuable pieces, and promotions, come first;
//! the sort is stable, so ties keep generation order and the search is
//! deterministic.

use crate::eval::{evaluate, piece_value, PAWN_VALUE};
use crate::movegen::{generate_legal, in_check, MoveList};
use crate::Board;
use chess_core::{Color, Move};
use std::cmp::Reverse;
use thiserror::Error;
use tracing::{debug, trace};

/// Larger than any reachable score; the initial alpha-beta window.
pub const INFINITY: i32 = 10_000_000;
/// Score of being checkmated at the root. Mates found deeper score `ply` less.
pub const MATE_SCORE: i32 = 1_000_000;
/// Ordering bonus for promotions.
pub const PROMOTION_BONUS: i32 = 800;

/// Error type for search operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The side to move has no legal moves. Use [`in_check`] to tell
    /// checkmate from stalemate.
    #[error("no legal moves")]
    NoLegalMoves,
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The best root move; the first one searched wins ties.
    pub best_move: Move,
    /// Score of `best_move` from the point of view of the side to move.
    pub score: i32,
    /// Nodes visited, root excluded.
    pub nodes: u64,
}

/// Search state
#[derive(Debug, Default)]
struct Searcher {
    nodes: u64,
}

impl Searcher {
    fn negamax(&mut self, board: &mut Board, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> i32 {
        self.nodes += 1;
        let us = board.side_to_move();

        if depth == 0 {
            let score = evaluate(board);
            return match us {
                Color::White => score,
                Color::Black => -score,
            };
        }

        let mut moves = generate_legal(board);
        if moves.is_empty() {
            return if in_check(board, us) {
                // Checkmated: prefer the longest way to lose, the shortest to win.
                -MATE_SCORE + ply
            } else {
                0
            };
        }

        order_moves(board, &mut moves);

        let mut best = -INFINITY;
        for m in &moves {
            let undo = board.apply(*m);
            let score = -self.negamax(board, depth - 1, -beta, -alpha, ply + 1);
            board.undo_move(undo);

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

/// Searches `depth` plies and reports the best move with its score.
///
/// Every root move is searched with the full window, so cutoffs happen only
/// below the root. A depth of 0 searches like a depth of 1.
pub fn search(board: &mut Board, depth: u32) -> Result<SearchOutcome, SearchError> {
    let mut moves = generate_legal(board);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    order_moves(board, &mut moves);

    let mut searcher = Searcher::default();
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -INFINITY;
    let beta = INFINITY;

    for m in &moves {
        let undo = board.apply(*m);
        let score = -searcher.negamax(board, depth.saturating_sub(1), -beta, -alpha, 1);
        board.undo_move(undo);
        trace!(mv = %m, score, "root move searched");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((*m, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    let (best_move, score) = best.ok_or(SearchError::NoLegalMoves)?;
    let outcome = SearchOutcome {
        best_move,
        score,
        nodes: searcher.nodes,
    };
    debug!(
        depth,
        best_move = %outcome.best_move,
        score = outcome.score,
        nodes = outcome.nodes,
        "search complete"
    );
    Ok(outcome)
}

/// Picks a move for the side to move by searching `depth` plies.
///
/// Fails with [`SearchError::NoLegalMoves`] on checkmate and stalemate alike.
pub fn select_move(board: &mut Board, depth: u32) -> Result<Move, SearchError> {
    search(board, depth).map(|outcome| outcome.best_move)
}

/// Negamax score of `board` from the side to move's perspective.
///
/// `ply` is the distance from the root and only shortens mate scores.
pub fn negamax(board: &mut Board, depth: u32, alpha: i32, beta: i32, ply: i32) -> i32 {
    Searcher::default().negamax(board, depth, alpha, beta, ply)
}

/// Ordering key: captured value minus attacker value, plus a promotion bonus.
pub fn move_order_key(board: &Board, m: Move) -> i32 {
    let attacker = board.piece_at(m.from()).map_or(0, |(piece, _)| piece_value(piece));
    let victim = if m.is_en_passant() {
        PAWN_VALUE
    } else {
        board.piece_at(m.to()).map_or(0, |(piece, _)| piece_value(piece))
    };
    let promotion = if m.promotion_piece().is_some() {
        PROMOTION_BONUS
    } else {
        0
    };
    victim - attacker + promotion
}

/// Sorts moves by descending [`move_order_key`], keeping generation order on ties.
pub fn order_moves(board: &Board, moves: &mut MoveList) {
    moves
        .as_mut_slice()
        .sort_by_key(|&m| Reverse(move_order_key(board, m)));
}
