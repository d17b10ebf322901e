//! Movement patterns on an empty board, one table per piece kind.
//!
//! Everything here is a pure function of (kind, color, square): tables are
//! built at compile time and never consult occupancy, except the ray casts at
//! the bottom which take the occupancy as an explicit argument.

use crate::square_set::SquareSet;
use crate::types::{Color, PieceKind, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Ray directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW.
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

const fn bit(file: i8, rank: i8) -> u64 {
    1u64 << (rank as u32 * 8 + file as u32)
}

const fn jump_table(deltas: &[(i8, i8); 8]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (df, dr) = deltas[i];
            if on_board(file + df, rank + dr) {
                bits |= bit(file + df, rank + dr);
            }
            i += 1;
        }
        table[sq] = SquareSet::from_bits(bits);
        sq += 1;
    }
    table
}

/// Knight destinations for each square.
pub static KNIGHT_ATTACKS: [SquareSet; 64] = jump_table(&KNIGHT_DELTAS);

/// King destinations for each square (castling excluded).
pub static KING_ATTACKS: [SquareSet; 64] = jump_table(&KING_DELTAS);

/// Diagonal-forward capture squares, indexed by [color][square].
pub static PAWN_ATTACKS: [[SquareSet; 64]; 2] = {
    let mut table = [[SquareSet::EMPTY; 64]; 2];
    let mut color = 0;
    while color < 2 {
        let dir: i8 = if color == 0 { 1 } else { -1 };
        let mut sq = 0;
        while sq < 64 {
            let file = (sq % 8) as i8;
            let rank = (sq / 8) as i8;
            let mut bits = 0u64;
            if on_board(file - 1, rank + dir) {
                bits |= bit(file - 1, rank + dir);
            }
            if on_board(file + 1, rank + dir) {
                bits |= bit(file + 1, rank + dir);
            }
            table[color][sq] = SquareSet::from_bits(bits);
            sq += 1;
        }
        color += 1;
    }
    table
};

/// Straight-ahead pawn squares: one step, plus two from the starting rank.
/// Indexed by [color][square].
pub static PAWN_PUSHES: [[SquareSet; 64]; 2] = {
    let mut table = [[SquareSet::EMPTY; 64]; 2];
    let mut color = 0;
    while color < 2 {
        let (dir, start): (i8, i8) = if color == 0 { (1, 1) } else { (-1, 6) };
        let mut sq = 0;
        while sq < 64 {
            let file = (sq % 8) as i8;
            let rank = (sq / 8) as i8;
            let mut bits = 0u64;
            if on_board(file, rank + dir) {
                bits |= bit(file, rank + dir);
                if rank == start {
                    bits |= bit(file, rank + 2 * dir);
                }
            }
            table[color][sq] = SquareSet::from_bits(bits);
            sq += 1;
        }
        color += 1;
    }
    table
};

/// RAYS[direction][square]: every square from `square` to the edge in that
/// direction, excluding `square` itself.
pub static RAYS: [[SquareSet; 64]; 8] = {
    let mut rays = [[SquareSet::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut file = (sq % 8) as i8 + df;
            let mut rank = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while on_board(file, rank) {
                bits |= bit(file, rank);
                file += df;
                rank += dr;
            }
            rays[dir][sq] = SquareSet::from_bits(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
};

const ORTHOGONAL: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL: [usize; 4] = [1, 3, 5, 7];

fn directions(kind: PieceKind) -> &'static [usize] {
    const ALL: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
    match kind {
        PieceKind::Bishop => &DIAGONAL,
        PieceKind::Rook => &ORTHOGONAL,
        PieceKind::Queen => &ALL,
        _ => &[],
    }
}

#[inline(always)]
pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_ATTACKS[color.idx()][sq.index()]
}

#[inline(always)]
pub fn pawn_pushes(sq: Square, color: Color) -> SquareSet {
    PAWN_PUSHES[color.idx()][sq.index()]
}

/// Union of the full rays of a slider on an empty board.
pub fn slider_pattern(kind: PieceKind, sq: Square) -> SquareSet {
    directions(kind)
        .iter()
        .fold(SquareSet::EMPTY, |acc, &dir| acc | RAYS[dir][sq.index()])
}

/// Every square on a rank, file or diagonal through `sq`.
pub fn lines_through(sq: Square) -> SquareSet {
    slider_pattern(PieceKind::Queen, sq)
}

/// The geometric destination set of a piece, ignoring every other piece.
pub fn pattern(kind: PieceKind, color: Color, sq: Square) -> SquareSet {
    match kind {
        PieceKind::Pawn => pawn_pushes(sq, color) | pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::King => king_attacks(sq),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => slider_pattern(kind, sq),
    }
}

/// One ray truncated at its first occupied square; the blocker itself is kept.
#[inline]
pub fn ray_until_blocked(dir: usize, sq: Square, occupied: SquareSet) -> SquareSet {
    let ray = RAYS[dir][sq.index()];
    let blockers = ray & occupied;
    // N, NE, E, NW walk toward higher indices, so the nearest blocker is the lowest bit.
    let nearest = if matches!(dir, 0 | 1 | 2 | 7) {
        blockers.first()
    } else {
        blockers.last()
    };
    match nearest {
        Some(blocker) => ray - RAYS[dir][blocker.index()],
        None => ray,
    }
}

/// Squares a slider reaches given the occupancy, blockers included.
pub fn slider_attacks(kind: PieceKind, sq: Square, occupied: SquareSet) -> SquareSet {
    directions(kind)
        .iter()
        .fold(SquareSet::EMPTY, |acc, &dir| {
            acc | ray_until_blocked(dir, sq, occupied)
        })
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod patterns_tests;
