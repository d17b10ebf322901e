use thiserror::Error;

use crate::game::GameStatus;
use crate::types::{Move, Square};

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("it is not this side's turn")]
    WrongTurn,
    #[error("the piece is not on the current board")]
    PieceNotOnBoard,
    #[error("the path is blocked")]
    BlockedPath,
    #[error("the destination holds a piece of the same color")]
    OwnPieceOccupied,
    #[error("the move would leave the king in check")]
    LeavesKingInCheck,
    #[error("the piece does not move that way")]
    PatternMismatch,
    #[error("the king may not castle out of, through or into check")]
    CastlingThroughCheck,
    #[error("pawns can only promote to a knight, bishop, rook or queen")]
    InvalidPromotion,
    #[error("en passant is disabled by the rules")]
    EnPassantDisabled,
    #[error("castling is disabled by the rules")]
    CastlingDisabled,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    /// A pawn reaches the last rank and the move names no promotion kind.
    #[error("pawn reaching {square} must name a promotion piece")]
    PromotionRequired { square: Square },

    #[error("the game is over ({status})")]
    GameOver { status: GameStatus },
}

impl MoveError {
    pub fn illegal(mv: Move, reason: IllegalReason) -> Self {
        MoveError::IllegalMove { mv, reason }
    }

    /// The rejection reason, for `IllegalMove` errors.
    pub fn reason(&self) -> Option<IllegalReason> {
        match self {
            MoveError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square ({file}, {rank}) is off the board")]
    SquareOutOfRange { file: u8, rank: u8 },

    #[error("'{0}' is not a square in algebraic notation")]
    InvalidSquare(String),

    #[error("two pieces placed on {0}")]
    SquareOccupied(Square),

    #[error("{0} is not a square a pawn just skipped")]
    InvalidEnPassant(Square),

    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize rules: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("auto_promotion must be a knight, bishop, rook or queen, not a {0}")]
    InvalidPromotion(crate::types::PieceKind),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed game record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game record has an invalid start position: {0}")]
    StartPosition(#[from] BoardError),

    #[error("no piece on {from} to replay ply {ply}")]
    MissingPiece { ply: usize, from: Square },

    #[error("ply {ply} does not replay: {source}")]
    Replay {
        ply: usize,
        #[source]
        source: MoveError,
    },
}
