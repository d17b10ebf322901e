//! Greedy Move Picker
//!
//! Looks exactly one ply ahead: every legal move is played on a copy of the
//! board and the resulting snapshot is scored by material and centre
//! control. The best score wins; ties are broken at random.

mod eval;

use chess_rules::{Engine, Game, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

pub use eval::{evaluate, PIECE_VALUES};

/// Score of a move that checkmates the opponent.
pub const MATE_SCORE: i32 = 100_000;

/// A move picker that plays the best-scoring move one ply ahead.
#[derive(Debug, Clone)]
pub struct GreedyEngine {
    rng: StdRng,
    /// Candidate boards evaluated for the last move
    evaluated: usize,
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            evaluated: 0,
        }
    }

    /// Deterministic tie-breaking, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            evaluated: 0,
        }
    }

    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Every legal move with its score, in generation order.
    pub fn rate_moves(&self, game: &Game) -> Vec<(Move, i32)> {
        if game.is_over() {
            return Vec::new();
        }
        let side = game.side_to_move();
        let config = game.config();
        game.candidates(side)
            .into_iter()
            .map(|(mv, board)| {
                let opponent = side.opposite();
                let mates = board.in_check(opponent) && !board.has_legal_move(opponent, config);
                let score = if mates {
                    MATE_SCORE
                } else {
                    evaluate(&board, side)
                };
                (mv, score)
            })
            .collect()
    }
}

impl Engine for GreedyEngine {
    fn choose_move(&mut self, game: &Game) -> Option<Move> {
        let rated = self.rate_moves(game);
        self.evaluated = rated.len();

        let best = rated.iter().map(|(_, score)| *score).max()?;
        let top: Vec<Move> = rated
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(mv, _)| *mv)
            .collect();
        let choice = top.choose(&mut self.rng).copied();

        if let Some(mv) = choice {
            debug!(%mv, score = best, ties = top.len(), candidates = rated.len(), "greedy choice");
        }
        choice
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }

    fn new_game(&mut self) {
        self.evaluated = 0;
    }
}
