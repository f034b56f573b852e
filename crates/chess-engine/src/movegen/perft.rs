//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::generate_legal;
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
///
/// The board is walked with make/undo and handed back unchanged.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let undo = board.apply(*m);
        nodes += perft(board, depth - 1);
        board.undo_move(undo);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_legal(board);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let undo = board.apply(*m);
        let nodes = perft(board, depth.saturating_sub(1));
        board.undo_move(undo);
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
