//! Legal move generation on top of the board's pseudo-legal destinations.
//!
//! The opponent's attack map is computed once per position with the mover's
//! king lifted off the board, so squares behind the king on a checking ray
//! count as attacked. King steps and castling paths are filtered against
//! that map directly. Other pieces only need a trial move when their side
//! is in check, when they share a line with their king (a potential pin) or
//! when they can capture en passant (which empties two squares on the king's
//! rank at once).

use std::collections::BTreeMap;

use tracing::trace;

use crate::board::Board;
use crate::config::RulesConfig;
use crate::patterns::lines_through;
use crate::square_set::SquareSet;
use crate::types::*;

/// What a side needs to know about its king before generating moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckContext {
    pub color: Color,
    pub king: Option<Square>,
    /// Squares the opponent attacks when the king is removed.
    pub danger: SquareSet,
    pub in_check: bool,
}

impl Board {
    pub fn check_context(&self, color: Color) -> CheckContext {
        let king = self.king_square(color);
        let mut occupied = self.occupied();
        if let Some(sq) = king {
            occupied.remove(sq);
        }
        let danger = self.attack_map(color.opposite(), occupied);
        let in_check = king.is_some_and(|sq| danger.contains(sq));
        trace!(%color, ?king, in_check, danger = danger.len(), "check context");
        CheckContext {
            color,
            king,
            danger,
            in_check,
        }
    }

    /// Destinations `piece` may legally reach, castling included.
    pub fn legal_destinations(
        &self,
        piece: &Piece,
        ctx: &CheckContext,
        config: &RulesConfig,
    ) -> SquareSet {
        let mut dests = self.possible_moves(piece);

        if piece.kind == PieceKind::King {
            dests = dests - ctx.danger;
            if config.castling && !ctx.in_check {
                dests |= self.castle_destinations(piece, ctx.danger);
            }
            return dests;
        }

        let en_passant = self.en_passant_capture(piece);
        if let Some(target) = en_passant {
            if !config.en_passant {
                dests.remove(target);
            }
        }

        let Some(king) = ctx.king else {
            return dests;
        };
        let may_expose = ctx.in_check
            || lines_through(king).contains(piece.square)
            || (config.en_passant && en_passant.is_some());
        if !may_expose {
            return dests;
        }

        let opponent = piece.color.opposite();
        dests
            .filter(|&to| !self.apply(piece, to, None).is_square_attacked(king, opponent))
            .collect()
    }

    /// Every piece of `color` with at least one legal destination.
    pub fn legal_moves_by_piece(
        &self,
        color: Color,
        config: &RulesConfig,
    ) -> BTreeMap<Piece, SquareSet> {
        let ctx = self.check_context(color);
        self.pieces(None, Some(color))
            .into_iter()
            .filter_map(|piece| {
                let dests = self.legal_destinations(&piece, &ctx, config);
                (!dests.is_empty()).then_some((piece, dests))
            })
            .collect()
    }

    /// All legal moves of `color`, one per promotion kind where a pawn
    /// reaches the last rank.
    pub fn legal_moves(&self, color: Color, config: &RulesConfig) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for (piece, dests) in self.legal_moves_by_piece(color, config) {
            for to in dests {
                let mv = Move::new(piece, to);
                if mv.reaches_last_rank() {
                    out.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
                } else {
                    out.push(mv);
                }
            }
        }
        out
    }

    pub fn has_legal_move(&self, color: Color, config: &RulesConfig) -> bool {
        self.any_legal_move(&self.check_context(color), config)
    }

    /// [`Board::has_legal_move`] for a context the caller already holds.
    pub fn any_legal_move(&self, ctx: &CheckContext, config: &RulesConfig) -> bool {
        self.pieces(None, Some(ctx.color))
            .iter()
            .any(|piece| !self.legal_destinations(piece, ctx, config).is_empty())
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
