//! JSON game records that can be replayed into a [`Game`].

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::RecordError;
use crate::game::Game;
use crate::types::{Move, PieceKind, Square};

/// A move as stored in a record: coordinates only, the piece is looked up
/// again on replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl From<&Move> for RecordedMove {
    fn from(mv: &Move) -> Self {
        Self {
            from: mv.from(),
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

/// Complete record of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    #[serde(default)]
    pub rules: RulesConfig,
    pub moves: Vec<RecordedMove>,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Game {
    pub fn record(&self) -> GameRecord {
        GameRecord {
            start_fen: self.start_fen().to_string(),
            rules: *self.config(),
            moves: self.moves().iter().map(|r| RecordedMove::from(&r.mv)).collect(),
        }
    }

    /// Rebuild a game from a record, validating every move again.
    pub fn replay(record: &GameRecord) -> Result<Game, RecordError> {
        let mut game = Game::from_fen_with_config(&record.start_fen, record.rules)?;
        for (ply, recorded) in record.moves.iter().enumerate() {
            let piece = game
                .current_board()
                .piece_at(recorded.from)
                .ok_or(RecordError::MissingPiece {
                    ply,
                    from: recorded.from,
                })?;
            let mv = Move {
                piece,
                to: recorded.to,
                promotion: recorded.promotion,
            };
            game.make_move(mv)
                .map_err(|source| RecordError::Replay { ply, source })?;
        }
        Ok(game)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
