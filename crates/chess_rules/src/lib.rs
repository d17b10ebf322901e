pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod patterns;
pub mod perft;
pub mod record;
pub mod square_set;
pub mod types;
pub mod zobrist;

// Re-export the rules API
pub use board::*;
pub use config::RulesConfig;
pub use error::*;
pub use fen::{FenSetup, START_FEN, parse_fen, to_fen};
pub use game::*;
pub use movegen::CheckContext;
pub use perft::{perft, perft_divide};
pub use record::{GameRecord, RecordedMove};
pub use square_set::SquareSet;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by move pickers that play a Game
// =============================================================================

/// Trait that all move pickers implement.
///
/// An engine only reads the game; the caller plays the returned move with
/// [`Game::make_move`].
pub trait Engine: Send {
    /// Pick a move for the side to move, or `None` when there is none
    /// (the game is over).
    fn choose_move(&mut self, game: &Game) -> Option<Move>;

    /// Returns the engine's name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
