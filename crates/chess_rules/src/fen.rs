//! Forsyth-Edwards Notation for setting up and printing positions.
//!
//! FEN has no has-moved flags, so they are inferred: pawns off their starting
//! rank have moved, kings and rooks keep castling eligibility only where the
//! castling field grants it, and any other piece off its initial square has
//! moved.

use crate::board::Board;
use crate::error::BoardError;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Everything a FEN string describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenSetup {
    pub board: Board,
    pub side_to_move: Color,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

fn invalid(fen: &str, reason: impl Into<String>) -> BoardError {
    BoardError::InvalidFen {
        fen: fen.to_string(),
        reason: reason.into(),
    }
}

fn initial_files(kind: PieceKind) -> &'static [u8] {
    match kind {
        PieceKind::Rook => &[0, 7],
        PieceKind::Knight => &[1, 6],
        PieceKind::Bishop => &[2, 5],
        PieceKind::Queen => &[3],
        PieceKind::King => &[4],
        PieceKind::Pawn => &[0, 1, 2, 3, 4, 5, 6, 7],
    }
}

fn infer_has_moved(kind: PieceKind, color: Color, square: Square, castling: &str) -> bool {
    let home = match kind {
        PieceKind::Pawn => color.pawn_start_rank(),
        _ => color.home_rank(),
    };
    if square.rank() != home || !initial_files(kind).contains(&square.file()) {
        return true;
    }
    let (kingside, queenside) = match color {
        Color::White => ('K', 'Q'),
        Color::Black => ('k', 'q'),
    };
    match kind {
        PieceKind::King => !castling.contains(kingside) && !castling.contains(queenside),
        PieceKind::Rook if square.file() == 7 => !castling.contains(kingside),
        PieceKind::Rook => !castling.contains(queenside),
        _ => false,
    }
}

pub fn parse_fen(fen: &str) -> Result<FenSetup, BoardError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(invalid(fen, "expected at least 4 fields"));
    }

    let board_part = parts[0];
    let stm_part = parts[1];
    let castle_part = parts[2];
    let ep_part = parts[3];
    let halfmove_part = parts.get(4).copied().unwrap_or("0");
    let fullmove_part = parts.get(5).copied().unwrap_or("1");

    if castle_part != "-" && !castle_part.chars().all(|c| "KQkq".contains(c)) {
        return Err(invalid(fen, format!("bad castling field '{castle_part}'")));
    }

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(fen, "board section needs 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let mut file: u8 = 0;
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as u8;
            } else {
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = PieceKind::from_letter(ch)
                    .ok_or_else(|| invalid(fen, format!("bad piece letter '{ch}'")))?;
                let square = Square::new(file, rank)
                    .map_err(|_| invalid(fen, format!("rank {} overflows", rank + 1)))?;
                let mut piece = Piece::new(kind, color, square);
                piece.has_moved = infer_has_moved(kind, color, square, castle_part);
                pieces.push(piece);
                file += 1;
            }
            if file > 8 {
                return Err(invalid(fen, format!("rank {} overflows", rank + 1)));
            }
        }
        if file != 8 {
            return Err(invalid(fen, format!("rank {} is short", rank + 1)));
        }
    }

    let side_to_move = match stm_part {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(invalid(fen, format!("bad side to move '{stm_part}'"))),
    };

    let en_passant = if ep_part == "-" {
        None
    } else {
        Some(
            ep_part
                .parse::<Square>()
                .map_err(|_| invalid(fen, format!("bad en-passant square '{ep_part}'")))?,
        )
    };

    let halfmove_clock: u32 = halfmove_part
        .parse()
        .map_err(|_| invalid(fen, "bad halfmove clock"))?;
    let fullmove_number: u32 = fullmove_part
        .parse()
        .map_err(|_| invalid(fen, "bad fullmove number"))?;

    let board = Board::from_pieces(pieces)?;
    if let Some(target) = en_passant {
        let mover = board
            .en_passant_mover(target)
            .map_err(|_| invalid(fen, format!("no pawn just skipped {target}")))?;
        if mover == side_to_move {
            return Err(invalid(
                fen,
                format!("en-passant target {target} with {side_to_move} to move"),
            ));
        }
    }
    let board = board.with_en_passant(en_passant);
    Ok(FenSetup {
        board,
        side_to_move,
        halfmove_clock,
        fullmove_number,
    })
}

pub fn to_fen(
    board: &Board,
    side_to_move: Color,
    halfmove_clock: u32,
    fullmove_number: u32,
) -> String {
    let mut placement = String::with_capacity(64);
    for rank in (0..BOARD_LEN).rev() {
        let mut empty = 0;
        for file in 0..BOARD_LEN {
            match board.piece_at(Square::from_index(rank * BOARD_LEN + file)) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(piece.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let mut castling = String::new();
    for (color, k, q) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
        let rights = board.castling_rights(color);
        if rights.kingside {
            castling.push(k);
        }
        if rights.queenside {
            castling.push(q);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let ep = board
        .en_passant_target()
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!("{placement} {side} {castling} {ep} {halfmove_clock} {fullmove_number}")
}

impl Board {
    /// FEN of this board with the given side to move and counters.
    pub fn to_fen(&self, side_to_move: Color, halfmove_clock: u32, fullmove_number: u32) -> String {
        to_fen(self, side_to_move, halfmove_clock, fullmove_number)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
