//! Invariants checked across many positions.

use rayon::prelude::*;

use chess_rules::{
    Board, Color, Game, Move, Piece, PieceKind, RulesConfig, Square, SquareSet, patterns,
};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn assert_unique_squares(board: &Board) {
    let pieces = board.pieces(None, None);
    let squares: SquareSet = pieces.iter().map(|p| p.square).collect();
    assert_eq!(squares.len(), pieces.len());
    for piece in &pieces {
        assert_eq!(board.piece_at(piece.square), Some(*piece));
    }
}

#[test]
fn knight_moves_ignore_intervening_pieces() {
    let knight = Piece::new(PieceKind::Knight, Color::White, sq("d4"));
    let alone = Board::from_pieces([knight]).unwrap();
    let expected = alone.possible_moves(&knight);
    assert_eq!(expected.len(), 8);

    // Surround the knight on every adjacent square.
    let mut pieces = vec![knight];
    for (i, square) in patterns::king_attacks(sq("d4")).enumerate() {
        let color = if i % 2 == 0 { Color::White } else { Color::Black };
        pieces.push(Piece::new(PieceKind::Pawn, color, square));
    }
    let crowded = Board::from_pieces(pieces).unwrap();
    assert_eq!(crowded.possible_moves(&knight), expected);
}

#[test]
fn slider_counts_on_empty_board() {
    let d4 = sq("d4");
    for (kind, count) in [
        (PieceKind::Rook, 14),
        (PieceKind::Bishop, 13),
        (PieceKind::Queen, 27),
    ] {
        let piece = Piece::new(kind, Color::White, d4);
        let board = Board::from_pieces([piece]).unwrap();
        assert_eq!(board.possible_moves(&piece).len(), count, "{kind}");
    }
}

#[test]
fn possible_moves_is_idempotent() {
    for fen in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let side = game.side_to_move();
        assert_eq!(game.possible_moves(side), game.possible_moves(side), "{fen}");
    }
}

#[test]
fn possible_moves_survive_later_moves() {
    let mut game = Game::new();
    let before = game.possible_moves(Color::White);
    let (piece, dests) = before.iter().next().map(|(p, d)| (*p, *d)).unwrap();
    let to = dests.first().unwrap();
    game.make_move(Move::new(piece, to)).unwrap();
    assert!(before.contains_key(&piece));
    assert_eq!(before[&piece], dests);
}

#[test]
fn candidates_evaluated_in_parallel() {
    for fen in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let side = game.side_to_move();
        let candidates = game.candidates(side);
        let original = game.current_board().clone();

        // Every resulting snapshot is a valid position where the mover's king
        // is safe, with one piece per square.
        let violations: usize = candidates
            .par_iter()
            .filter(|(_, board)| {
                assert_unique_squares(board);
                board.in_check(side)
            })
            .count();
        assert_eq!(violations, 0, "{fen}");
        assert_eq!(game.current_board(), &original);
    }
}

#[test]
fn king_never_moves_into_attack() {
    for fen in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let side = game.side_to_move();
        for (mv, board) in game.candidates(side) {
            if mv.piece.kind == PieceKind::King {
                assert!(
                    !board.attacked_squares(side.opposite()).contains(mv.to),
                    "{fen}: {mv}"
                );
            }
        }
    }
}

#[test]
fn no_moves_means_mate_or_stalemate() {
    let positions = [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1",
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ];
    for fen in positions {
        let game = Game::from_fen(fen).unwrap();
        let side = game.side_to_move();
        assert!(game.possible_moves(side).is_empty(), "{fen}");
        let status = game.status();
        if game.current_board().in_check(side) {
            assert_eq!(status.winner(), Some(side.opposite()), "{fen}");
        } else {
            assert_eq!(status, chess_rules::GameStatus::Stalemate, "{fen}");
        }
    }
}

#[test]
fn random_playouts_keep_invariants() {
    // Deterministic pseudo-random games: pick moves by a simple LCG.
    (0u64..16).into_par_iter().for_each(|seed| {
        let mut game = Game::with_config(RulesConfig::default());
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        for _ in 0..120 {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let mv = moves[(state >> 33) as usize % moves.len()];
            let side = game.side_to_move();
            game.make_move(mv).unwrap();
            let board = game.current_board();
            assert_unique_squares(board);
            assert!(!board.in_check(side), "seed {seed}: {mv} left {side} in check");
            assert_eq!(board.pieces(Some(PieceKind::King), None).len(), 2);
        }
        assert_eq!(game.boards().len(), game.moves().len() + 1);
    });
}
