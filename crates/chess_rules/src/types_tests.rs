use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_color_opposite() {
    assert_eq!(Color::White.opposite(), Color::Black);
    assert_eq!(Color::Black.opposite(), Color::White);
    assert_eq!(Color::White.opposite().opposite(), Color::White);
}

#[test]
fn test_square_bounds() {
    assert!(Square::new(7, 7).is_ok());
    assert_eq!(
        Square::new(8, 0),
        Err(BoardError::SquareOutOfRange { file: 8, rank: 0 })
    );
    assert!(Square::from_coords(-1, 0).is_none());
    assert!(Square::from_coords(3, 8).is_none());
}

#[test]
fn test_square_parse_and_display() {
    let c4 = sq("c4");
    assert_eq!(c4.file(), 2);
    assert_eq!(c4.rank(), 3);
    assert_eq!(c4.to_string(), "c4");
    assert!("i1".parse::<Square>().is_err());
    assert!("a9".parse::<Square>().is_err());
    assert!("a".parse::<Square>().is_err());
}

#[test]
fn test_square_offset_does_not_wrap() {
    assert_eq!(sq("d4").offset(2, 3), Some(sq("f7")));
    assert_eq!(sq("h4").offset(1, 0), None);
    assert_eq!(sq("a1").offset(0, -1), None);
}

#[test]
fn test_square_ordering_is_file_then_rank() {
    assert!(sq("a8") < sq("b1"));
    assert!(sq("c2") < sq("c3"));
}

#[test]
fn test_square_shade() {
    assert_eq!(sq("a1").shade(), Color::Black);
    assert_eq!(sq("b1").shade(), Color::White);
    assert_eq!(sq("h8").shade(), Color::Black);
}

#[test]
fn test_square_index_roundtrip() {
    for idx in 0..64u8 {
        assert_eq!(Square::from_index(idx).index(), idx as usize);
    }
}

#[test]
fn test_square_serializes_as_coordinate() {
    let json = serde_json::to_string(&sq("e4")).unwrap();
    assert_eq!(json, "\"e4\"");
    assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
}

#[test]
fn test_piece_letters_and_display() {
    let knight = Piece::new(PieceKind::Knight, Color::White, sq("g1"));
    assert_eq!(knight.letter(), 'N');
    assert_eq!(knight.to_string(), "Ng1");
    let pawn = Piece::new(PieceKind::Pawn, Color::Black, sq("e5"));
    assert_eq!(pawn.to_string(), "pe5");
    assert_eq!(pawn.symbol(), '♟');
}

#[test]
fn test_piece_moved_to_sets_flag() {
    let rook = Piece::new(PieceKind::Rook, Color::White, sq("a1"));
    let moved = rook.moved_to(sq("a4"));
    assert!(!rook.has_moved);
    assert!(moved.has_moved);
    assert_eq!(moved.square, sq("a4"));
    assert_eq!(moved.kind, PieceKind::Rook);
}

#[test]
fn test_move_display() {
    let knight = Piece::new(PieceKind::Knight, Color::White, sq("g1"));
    assert_eq!(Move::new(knight, sq("f3")).to_string(), "g1Nf3");

    let king = Piece::new(PieceKind::King, Color::White, sq("e1"));
    assert_eq!(Move::new(king, sq("g1")).to_string(), "0-0");
    assert_eq!(Move::new(king, sq("c1")).to_string(), "0-0-0");

    let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("a7"));
    let promo = Move::new(pawn, sq("a8")).with_promotion(PieceKind::Queen);
    assert!(promo.reaches_last_rank());
    assert_eq!(promo.to_string(), "a7Pa8=Q");
}

#[test]
fn test_piece_kind_letters() {
    for kind in PieceKind::ALL {
        assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
    }
    assert_eq!(PieceKind::from_letter('x'), None);
    assert!(!PieceKind::King.is_promotion_target());
    assert!(PieceKind::Knight.is_promotion_target());
}
