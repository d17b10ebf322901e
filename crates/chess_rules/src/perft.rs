use crate::board::Board;
use crate::config::RulesConfig;
use crate::types::{Color, Move};

/// Pure perft node count.
/// Counts all legal move sequences of length `depth` from `board` with
/// `side` to move. Each ply builds new snapshots; nothing is undone.
pub fn perft(board: &Board, side: Color, depth: u8, config: &RulesConfig) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves(side, config);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| {
            let next = board.apply(&mv.piece, mv.to, mv.promotion);
            perft(&next, side.opposite(), depth - 1, config)
        })
        .sum()
}

/// Node counts below each root move, for narrowing down mismatches.
pub fn perft_divide(board: &Board, side: Color, depth: u8, config: &RulesConfig) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    board
        .legal_moves(side, config)
        .into_iter()
        .map(|mv| {
            let next = board.apply(&mv.piece, mv.to, mv.promotion);
            (mv, perft(&next, side.opposite(), depth - 1, config))
        })
        .collect()
}

#[cfg(test)]
#[path = "perft_tests.rs"]
mod perft_tests;
