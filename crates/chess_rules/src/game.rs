//! A game: the append-only history of board snapshots plus turn, clocks and
//! status tracking.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::RulesConfig;
use crate::error::{BoardError, IllegalReason, MoveError};
use crate::fen::{parse_fen, to_fen};
use crate::square_set::SquareSet;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Half-moves without a capture or pawn move that end the game.
pub const FIFTY_MOVE_PLIES: u32 = 100;
pub const REPETITION_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// The given side is to move and in check.
    Check(Color),
    /// The given side delivered mate and wins.
    Checkmate(Color),
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate(_) | GameStatus::Stalemate | GameStatus::Draw(_)
        )
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate(color) => write!(f, "checkmate, {color} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

/// One accepted move and the piece it removed, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
}

#[derive(Clone, Debug)]
pub struct Game {
    /// Index 0 is the starting position; one snapshot is appended per move.
    boards: Vec<Board>,
    moves: Vec<MoveRecord>,
    side_to_move: Color,
    status: GameStatus,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Occurrences of each position since the last capture or pawn move.
    repetitions: HashMap<u64, u32>,
    config: RulesConfig,
    start_fen: String,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_board(Board::startpos(), Color::White, config)
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Self::from_fen_with_config(fen, RulesConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: RulesConfig) -> Result<Self, BoardError> {
        let setup = parse_fen(fen)?;
        Ok(Self::setup(
            setup.board,
            setup.side_to_move,
            setup.halfmove_clock,
            setup.fullmove_number,
            config,
        ))
    }

    pub fn from_board(board: Board, side_to_move: Color, config: RulesConfig) -> Self {
        Self::setup(board, side_to_move, 0, 1, config)
    }

    fn setup(
        board: Board,
        side_to_move: Color,
        halfmove_clock: u32,
        fullmove_number: u32,
        config: RulesConfig,
    ) -> Self {
        let start_fen = to_fen(&board, side_to_move, halfmove_clock, fullmove_number);
        let mut repetitions = HashMap::new();
        repetitions.insert(ZOBRIST.position_key(&board, side_to_move), 1);
        let mut game = Game {
            boards: vec![board],
            moves: Vec::new(),
            side_to_move,
            status: GameStatus::Ongoing,
            halfmove_clock,
            fullmove_number,
            repetitions,
            config,
            start_fen,
        };
        game.status = game.evaluate_status();
        game
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn current_board(&self) -> &Board {
        &self.boards[self.boards.len() - 1]
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    pub fn to_fen(&self) -> String {
        to_fen(
            self.current_board(),
            self.side_to_move,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// How often the current position has occurred, counting itself.
    pub fn repetition_count(&self) -> u32 {
        let key = ZOBRIST.position_key(self.current_board(), self.side_to_move);
        self.repetitions.get(&key).copied().unwrap_or(0)
    }

    // =========================================================================
    // Legal moves
    // =========================================================================

    /// Check-safe destinations for every piece of `color` that can move.
    /// The map is a fresh value; later moves do not change it.
    pub fn possible_moves(&self, color: Color) -> BTreeMap<Piece, SquareSet> {
        self.current_board()
            .legal_moves_by_piece(color, &self.config)
    }

    /// Legal moves for the side to move, promotions expanded. Empty once
    /// the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.current_board()
            .legal_moves(self.side_to_move, &self.config)
    }

    /// Every legal move of `color` paired with the snapshot it leads to.
    pub fn candidates(&self, color: Color) -> Vec<(Move, Board)> {
        let board = self.current_board();
        board
            .legal_moves(color, &self.config)
            .into_iter()
            .map(|mv| {
                let next = board.apply(&mv.piece, mv.to, mv.promotion);
                (mv, next)
            })
            .collect()
    }

    // =========================================================================
    // Playing moves
    // =========================================================================

    /// Validate and play `mv`. On error nothing about the game changes.
    pub fn make_move(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver {
                status: self.status,
            });
        }
        let (mv, next) = match self.validate(mv) {
            Ok(accepted) => accepted,
            Err(err) => {
                debug!(ply = self.moves.len() + 1, %mv, error = %err, "move rejected");
                return Err(err);
            }
        };

        let captured = self.current_board().captured_by(&mv);
        let irreversible = mv.piece.kind == PieceKind::Pawn || captured.is_some();
        if irreversible {
            self.halfmove_clock = 0;
            self.repetitions.clear();
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opposite();

        let key = ZOBRIST.position_key(&next, self.side_to_move);
        *self.repetitions.entry(key).or_insert(0) += 1;
        self.boards.push(next);
        self.moves.push(MoveRecord { mv, captured });

        self.status = self.evaluate_status();
        debug!(
            ply = self.moves.len(),
            %mv,
            captured = ?captured.map(|p| p.to_string()),
            status = %self.status,
            "move accepted"
        );
        if self.status.is_over() {
            info!(
                status = %self.status,
                winner = ?self.status.winner(),
                plies = self.moves.len(),
                "game over"
            );
        }
        Ok(self.status)
    }

    /// The move as it will be played (with any automatic promotion filled
    /// in) and the board it produces.
    fn validate(&self, mut mv: Move) -> Result<(Move, Board), MoveError> {
        let board = self.current_board();
        if mv.piece.color != self.side_to_move {
            return Err(MoveError::illegal(mv, IllegalReason::WrongTurn));
        }
        if board.piece_at(mv.from()) != Some(mv.piece) {
            return Err(MoveError::illegal(mv, IllegalReason::PieceNotOnBoard));
        }
        if mv.reaches_last_rank() && mv.promotion.is_none() {
            if let Some(kind) = self.config.auto_promotion {
                mv = mv.with_promotion(kind);
            }
        }

        let ctx = board.check_context(self.side_to_move);
        let legal = board.legal_destinations(&mv.piece, &ctx, &self.config);
        if !legal.contains(mv.to) {
            let reason = self.rejection_reason(board, &mv);
            return Err(MoveError::illegal(mv, reason));
        }
        // Legal destinations already passed every geometric check; this
        // resolves the promotion piece.
        let next = board.make_move(&mv)?;
        Ok((mv, next))
    }

    fn rejection_reason(&self, board: &Board, mv: &Move) -> IllegalReason {
        let piece = &mv.piece;
        if mv.is_castle() {
            if !board
                .castle_destinations(piece, SquareSet::EMPTY)
                .contains(mv.to)
            {
                return board.rejection_reason(piece, mv.to);
            }
            return if !self.config.castling {
                IllegalReason::CastlingDisabled
            } else {
                IllegalReason::CastlingThroughCheck
            };
        }
        if !self.config.en_passant && board.en_passant_capture(piece) == Some(mv.to) {
            return IllegalReason::EnPassantDisabled;
        }
        if board.possible_moves(piece).contains(mv.to) {
            // Pseudo-legal, so only king safety can have excluded it.
            return IllegalReason::LeavesKingInCheck;
        }
        board.rejection_reason(piece, mv.to)
    }

    fn evaluate_status(&self) -> GameStatus {
        let board = self.current_board();
        let side = self.side_to_move;
        let ctx = board.check_context(side);
        if !board.any_legal_move(&ctx, &self.config) {
            return if ctx.in_check {
                GameStatus::Checkmate(side.opposite())
            } else {
                GameStatus::Stalemate
            };
        }
        if self.config.insufficient_material && insufficient_material(board) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if self.config.fifty_move_rule && self.halfmove_clock >= FIFTY_MOVE_PLIES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.config.threefold_repetition && self.repetition_count() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if ctx.in_check {
            GameStatus::Check(side)
        } else {
            GameStatus::Ongoing
        }
    }
}

/// Neither side can ever mate: bare kings, a single minor piece, or one
/// bishop each on squares of the same shade.
pub fn insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::with_capacity(2);
    for piece in board.pieces(None, None) {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors.push(piece),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }
    match minors.as_slice() {
        [] | [_] => true,
        [a, b] => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.color != b.color
                && a.square.shade() == b.square.shade()
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
