//! Rule switches for a game.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::types::PieceKind;

/// Which optional rules a [`crate::Game`] enforces.
///
/// Missing keys in a TOML rules file fall back to the defaults, which are
/// standard chess with promotion kinds supplied by the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub castling: bool,
    pub en_passant: bool,
    /// Draw once 100 half-moves pass without a capture or pawn move.
    pub fifty_move_rule: bool,
    pub threefold_repetition: bool,
    pub insufficient_material: bool,
    /// Promote to this kind when a move reaches the last rank without naming one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_promotion: Option<PieceKind>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            castling: true,
            en_passant: true,
            fifty_move_rule: true,
            threefold_repetition: true,
            insufficient_material: true,
            auto_promotion: None,
        }
    }
}

impl RulesConfig {
    /// Bare movement and check rules: no castling, no en passant, and games
    /// end only by checkmate or stalemate.
    pub fn minimal() -> Self {
        Self {
            castling: false,
            en_passant: false,
            fifty_move_rule: false,
            threefold_repetition: false,
            insufficient_material: false,
            auto_promotion: None,
        }
    }

    pub fn with_auto_promotion(self, kind: PieceKind) -> Result<Self, ConfigError> {
        let config = Self {
            auto_promotion: Some(kind),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.auto_promotion {
            Some(kind) if !kind.is_promotion_target() => Err(ConfigError::InvalidPromotion(kind)),
            _ => Ok(()),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save rules to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
