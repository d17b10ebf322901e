use super::*;
use crate::types::{Move, PieceKind, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(board: &Board, from: &str, to: &str) -> Board {
    let piece = board.piece_at(sq(from)).unwrap();
    board.make_move(&Move::new(piece, sq(to))).unwrap()
}

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();
    for &key in ZOBRIST.all() {
        assert_ne!(key, 0);
        assert!(seen.insert(key), "Duplicate Zobrist key found");
    }
    assert_eq!(seen.len(), 781);
}

#[test]
fn test_accessors_address_distinct_keys() {
    let e4 = sq("e4");
    let white_pawn = ZOBRIST.piece(Color::White, PieceKind::Pawn, e4);
    assert_ne!(white_pawn, ZOBRIST.piece(Color::Black, PieceKind::Pawn, e4));
    assert_ne!(white_pawn, ZOBRIST.piece(Color::White, PieceKind::Knight, e4));
    assert_ne!(ZOBRIST.castling(Color::White, 0), ZOBRIST.castling(Color::Black, 0));
    assert_ne!(ZOBRIST.en_passant(0), ZOBRIST.en_passant(7));
    assert_eq!(ZOBRIST.all()[768], ZOBRIST.side_to_move());
}

#[test]
fn test_side_to_move_changes_key() {
    let board = Board::startpos();
    assert_ne!(
        ZOBRIST.position_key(&board, Color::White),
        ZOBRIST.position_key(&board, Color::Black)
    );
}

#[test]
fn test_knight_shuffle_returns_to_same_key() {
    let start = Board::startpos();
    let mut board = play(&start, "g1", "f3");
    board = play(&board, "g8", "f6");
    board = play(&board, "f3", "g1");
    board = play(&board, "f6", "g8");

    // The knights carry has-moved flags now, but the position is the same.
    assert_ne!(board, start);
    assert_eq!(
        ZOBRIST.position_key(&board, Color::White),
        ZOBRIST.position_key(&start, Color::White)
    );
}

#[test]
fn test_lost_castling_right_changes_key() {
    let start = Board::startpos();
    let mut board = play(&start, "g1", "f3");
    board = play(&board, "g8", "f6");
    board = play(&board, "h1", "g1");
    board = play(&board, "f6", "g8");
    board = play(&board, "g1", "h1");
    board = play(&board, "g8", "f6");
    board = play(&board, "f3", "g1");
    board = play(&board, "f6", "g8");

    assert_eq!(board.pieces(None, None).len(), 32);
    assert_ne!(
        ZOBRIST.position_key(&board, Color::White),
        ZOBRIST.position_key(&start, Color::White)
    );
}

#[test]
fn test_unusable_en_passant_target_is_ignored() {
    let start = Board::startpos();
    let after_e4 = play(&start, "e2", "e4");
    assert_eq!(after_e4.en_passant_target(), Some(sq("e3")));

    let same_without_target = after_e4.clone().with_en_passant(None);
    assert_eq!(
        ZOBRIST.position_key(&after_e4, Color::Black),
        ZOBRIST.position_key(&same_without_target, Color::Black)
    );
}
