//! Zobrist keys identifying positions for repetition counting.
//!
//! Two positions share a key when they have the same piece placement (kind
//! and color per square), the same side to move, the same castling rights
//! and the same en-passant capture opportunity. Has-moved flags of pieces
//! other than kings and rooks do not take part.

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

const PIECE_KEYS: usize = 2 * 6 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EN_PASSANT_KEYS: usize = CASTLING_KEYS + 4;
const KEY_COUNT: usize = EN_PASSANT_KEYS + 8;

/// One flat table: piece/square keys first, then the side-to-move key, four
/// castling keys (white king- and queenside, then black) and one key per
/// en-passant file.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Splitmix64 over a fixed seed, evaluated at compile time.
    pub const fn new() -> Self {
        let mut keys = [0u64; KEY_COUNT];
        let mut state = 0x9E37_79B9_7F4A_7C15u64 ^ 0x00C0_FFEE;
        let mut i = 0;
        while i < KEY_COUNT {
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            keys[i] = z ^ (z >> 31);
            i += 1;
        }
        ZobristKeys { keys }
    }

    pub fn piece(&self, color: Color, kind: PieceKind, square: Square) -> u64 {
        self.keys[(color.idx() * 6 + kind.idx()) * 64 + square.index()]
    }

    pub fn side_to_move(&self) -> u64 {
        self.keys[SIDE_KEY]
    }

    /// `side` is 0 for kingside, 1 for queenside.
    pub fn castling(&self, color: Color, side: usize) -> u64 {
        self.keys[CASTLING_KEYS + color.idx() * 2 + side]
    }

    pub fn en_passant(&self, file: u8) -> u64 {
        self.keys[EN_PASSANT_KEYS + file as usize]
    }

    /// Every key in the table, for collision checks.
    pub fn all(&self) -> &[u64] {
        &self.keys
    }

    /// Key of `board` with `side_to_move` to play.
    pub fn position_key(&self, board: &Board, side_to_move: Color) -> u64 {
        let mut key = 0u64;
        for piece in board.pieces(None, None) {
            key ^= self.piece(piece.color, piece.kind, piece.square);
        }
        if side_to_move == Color::Black {
            key ^= self.side_to_move();
        }
        for color in Color::ALL {
            let rights = board.castling_rights(color);
            if rights.kingside {
                key ^= self.castling(color, 0);
            }
            if rights.queenside {
                key ^= self.castling(color, 1);
            }
        }
        // The target only matters when a pawn of the side to move can use it.
        if let Some(target) = board.en_passant_target() {
            let capturable = board
                .pieces(Some(PieceKind::Pawn), Some(side_to_move))
                .iter()
                .any(|pawn| board.en_passant_capture(pawn).is_some());
            if capturable {
                key ^= self.en_passant(target.file());
            }
        }
        key
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
