use super::*;
use chess_rules::Piece;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn kings() -> Vec<Piece> {
    vec![
        Piece::new(PieceKind::King, Color::White, sq("e1")),
        Piece::new(PieceKind::King, Color::Black, sq("e8")),
    ]
}

#[test]
fn test_material_balance() {
    let board = Board::startpos();
    assert_eq!(material(&board, Color::White), 0);

    let mut pieces = kings();
    pieces.push(Piece::new(PieceKind::Queen, Color::White, sq("a1")));
    let board = Board::from_pieces(pieces).unwrap();
    assert_eq!(material(&board, Color::White), 90);
    assert_eq!(material(&board, Color::Black), -90);
}

#[test]
fn test_centre_scores() {
    let mut pieces = kings();
    let board = Board::from_pieces(pieces.clone()).unwrap();
    assert_eq!(centre(&board, Color::White), 0);

    pieces.push(Piece::new(PieceKind::Queen, Color::White, sq("d4")));
    let board = Board::from_pieces(pieces.clone()).unwrap();
    assert_eq!(centre(&board, Color::White), 3);

    pieces.push(Piece::new(PieceKind::Queen, Color::White, sq("d6")));
    let board = Board::from_pieces(pieces).unwrap();
    assert_eq!(centre(&board, Color::White), 4);
    assert_eq!(centre(&board, Color::Black), 0);
}

#[test]
fn test_broad_centre_ring() {
    for (square, expected) in [("c3", 1), ("f6", 1), ("c6", 1), ("e5", 3), ("b4", 0), ("g5", 0)] {
        assert_eq!(centre_value(sq(square)), expected, "{square}");
    }
}
