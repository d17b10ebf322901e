//! Static evaluation of a board from one side's point of view.

use chess_rules::{Board, Color, PieceKind, Square};

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];

const MATERIAL_WEIGHT: i32 = 10;
const CORE_CENTRE_SCORE: i32 = 3;
const BROAD_CENTRE_SCORE: i32 = 1;

/// Material balance for `color`, weighted.
pub fn material(board: &Board, color: Color) -> i32 {
    let own = board.material(color);
    let theirs = board.material(color.opposite());
    let balance: i32 = PieceKind::ALL
        .iter()
        .map(|kind| {
            let i = kind.idx();
            PIECE_VALUES[i] * (own[i] as i32 - theirs[i] as i32)
        })
        .sum();
    MATERIAL_WEIGHT * balance
}

/// d4, e4, d5 and e5 score 3; the ring of squares around them scores 1.
fn centre_value(square: Square) -> i32 {
    let (file, rank) = (square.file(), square.rank());
    if (3..=4).contains(&file) && (3..=4).contains(&rank) {
        CORE_CENTRE_SCORE
    } else if (2..=5).contains(&file) && (2..=5).contains(&rank) {
        BROAD_CENTRE_SCORE
    } else {
        0
    }
}

/// Centre occupation by `color`'s pieces.
pub fn centre(board: &Board, color: Color) -> i32 {
    board
        .pieces(None, Some(color))
        .iter()
        .map(|piece| centre_value(piece.square))
        .sum()
}

/// Higher is better for `color`.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    material(board, color) + centre(board, color)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
