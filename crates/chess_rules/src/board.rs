use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, IllegalReason, MoveError};
use crate::patterns::{king_attacks, knight_attacks, pawn_attacks, slider_attacks};
use crate::square_set::SquareSet;
use crate::types::*;

const KINGSIDE_ROOK_FILE: u8 = 7;
const QUEENSIDE_ROOK_FILE: u8 = 0;
const KING_FILE: u8 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

/// One immutable position: the placement of every piece plus the square a
/// pawn skipped on the previous move (if any).
///
/// Nothing mutates a `Board` after construction; [`Board::make_move`]
/// returns a new snapshot. That makes snapshots safe to share across threads
/// and to keep as history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoardRepr", try_from = "BoardRepr")]
pub struct Board {
    squares: [Option<Piece>; 64],
    occupied: [SquareSet; 2],
    en_passant: Option<Square>,
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    pieces: Vec<Piece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    en_passant: Option<Square>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            pieces: board.pieces(None, None),
            en_passant: board.en_passant,
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let board = Board::from_pieces(repr.pieces)?;
        if let Some(target) = repr.en_passant {
            board.en_passant_mover(target)?;
        }
        Ok(board.with_en_passant(repr.en_passant))
    }
}

fn home_square(color: Color, file: u8) -> Square {
    Square::from_index(color.home_rank() * BOARD_LEN + file)
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            occupied: [SquareSet::EMPTY; 2],
            en_passant: None,
        }
    }

    pub fn startpos() -> Self {
        let mut board = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in Color::ALL {
            for (file, &kind) in back.iter().enumerate() {
                board.place(Piece::new(kind, color, home_square(color, file as u8)));
            }
            for file in 0..BOARD_LEN {
                let square = Square::from_index(color.pawn_start_rank() * BOARD_LEN + file);
                board.place(Piece::new(PieceKind::Pawn, color, square));
            }
        }
        board
    }

    /// Build a board from a list of pieces. Fails if two share a square.
    pub fn from_pieces<I>(pieces: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Board::empty();
        for piece in pieces {
            if board.piece_at(piece.square).is_some() {
                return Err(BoardError::SquareOccupied(piece.square));
            }
            board.place(piece);
        }
        Ok(board)
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Ok(crate::fen::parse_fen(fen)?.board)
    }

    pub(crate) fn with_en_passant(mut self, target: Option<Square>) -> Self {
        self.en_passant = target;
        self
    }

    /// The side whose double step left `target` behind. The target and the
    /// pawn's start square must be empty with the pawn just past the target.
    pub(crate) fn en_passant_mover(&self, target: Square) -> Result<Color, BoardError> {
        let mover = match target.rank() {
            2 => Color::White,
            5 => Color::Black,
            _ => return Err(BoardError::InvalidEnPassant(target)),
        };
        let dir = mover.pawn_direction();
        let pawn_landed = target
            .offset(0, dir)
            .and_then(|sq| self.piece_at(sq))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == mover);
        let start_empty = target
            .offset(0, -dir)
            .is_some_and(|sq| self.piece_at(sq).is_none());
        if pawn_landed && start_empty && self.piece_at(target).is_none() {
            Ok(mover)
        } else {
            Err(BoardError::InvalidEnPassant(target))
        }
    }

    fn place(&mut self, piece: Piece) {
        self.squares[piece.square.index()] = Some(piece);
        self.occupied[piece.color.idx()].insert(piece.square);
    }

    fn clear(&mut self, square: Square) {
        if let Some(piece) = self.squares[square.index()].take() {
            self.occupied[piece.color.idx()].remove(square);
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Pieces in a1..h8 order, optionally filtered by kind and/or color.
    pub fn pieces(&self, kind: Option<PieceKind>, color: Option<Color>) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter(|p| kind.is_none_or(|k| p.kind == k))
            .filter(|p| color.is_none_or(|c| p.color == c))
            .copied()
            .collect()
    }

    pub fn occupied(&self) -> SquareSet {
        self.occupied[0] | self.occupied[1]
    }

    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.occupied[color.idx()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let mut own = self.occupied[color.idx()];
        own.find(|&sq| self.squares[sq.index()].is_some_and(|p| p.kind == PieceKind::King))
    }

    /// Square skipped by a pawn double step on the move that produced this board.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Piece counts per kind, indexed by [`PieceKind::idx`].
    pub fn material(&self, color: Color) -> [u32; 6] {
        let mut counts = [0u32; 6];
        for sq in self.occupied[color.idx()] {
            if let Some(piece) = self.squares[sq.index()] {
                counts[piece.kind.idx()] += 1;
            }
        }
        counts
    }

    /// Squares of `color`'s pieces, split by kind.
    fn kind_sets(&self, color: Color) -> [SquareSet; 6] {
        let mut sets = [SquareSet::EMPTY; 6];
        for sq in self.occupied[color.idx()] {
            if let Some(piece) = self.squares[sq.index()] {
                sets[piece.kind.idx()].insert(sq);
            }
        }
        sets
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Pseudo-legal destinations of `piece`: its pattern cut down by path
    /// clearance and never landing on its own side. King safety is not
    /// considered here, and castling is reported separately by
    /// [`Board::castle_destinations`].
    pub fn possible_moves(&self, piece: &Piece) -> SquareSet {
        let own = self.occupied_by(piece.color);
        let all = self.occupied();
        let sq = piece.square;
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece),
            PieceKind::Knight => knight_attacks(sq) - own,
            PieceKind::King => king_attacks(sq) - own,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slider_attacks(piece.kind, sq, all) - own
            }
        }
    }

    fn pawn_moves(&self, pawn: &Piece) -> SquareSet {
        let all = self.occupied();
        let theirs = self.occupied_by(pawn.color.opposite());
        let dir = pawn.color.pawn_direction();
        let mut moves = SquareSet::EMPTY;

        // Forward squares must be empty; the double step also needs the first one clear.
        if let Some(one) = pawn.square.offset(0, dir) {
            if !all.contains(one) {
                moves.insert(one);
                if pawn.square.rank() == pawn.color.pawn_start_rank() {
                    if let Some(two) = one.offset(0, dir) {
                        if !all.contains(two) {
                            moves.insert(two);
                        }
                    }
                }
            }
        }

        moves |= pawn_attacks(pawn.square, pawn.color) & theirs;
        if let Some(target) = self.en_passant_capture(pawn) {
            moves.insert(target);
        }
        moves
    }

    /// The en-passant destination available to `pawn`, if any.
    pub(crate) fn en_passant_capture(&self, pawn: &Piece) -> Option<Square> {
        let target = self.en_passant?;
        if pawn.kind != PieceKind::Pawn || !pawn_attacks(pawn.square, pawn.color).contains(target) {
            return None;
        }
        let victim = Square::from_coords(target.file() as i8, pawn.square.rank() as i8)?;
        match self.piece_at(victim) {
            Some(p) if p.kind == PieceKind::Pawn && p.color != pawn.color => Some(target),
            _ => None,
        }
    }

    fn piece_attacks(piece: &Piece, occupied: SquareSet) -> SquareSet {
        match piece.kind {
            PieceKind::Pawn => pawn_attacks(piece.square, piece.color),
            PieceKind::Knight => knight_attacks(piece.square),
            PieceKind::King => king_attacks(piece.square),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slider_attacks(piece.kind, piece.square, occupied)
            }
        }
    }

    /// Every square `color` attacks. Rays stop on the first occupied square
    /// and include it whatever its color, so defended pieces count as
    /// attacked. Pawns contribute their diagonals only.
    pub fn attacked_squares(&self, color: Color) -> SquareSet {
        self.attack_map(color, self.occupied())
    }

    /// [`Board::attacked_squares`] against an arbitrary occupancy.
    pub(crate) fn attack_map(&self, color: Color, occupied: SquareSet) -> SquareSet {
        let mut attacks = SquareSet::EMPTY;
        for sq in self.occupied[color.idx()] {
            if let Some(piece) = self.squares[sq.index()] {
                attacks |= Self::piece_attacks(&piece, occupied);
            }
        }
        attacks
    }

    /// Whether any piece of `by` attacks `target`, probing outward from the target.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let sets = self.kind_sets(by);
        let occupied = self.occupied();
        let queens = sets[PieceKind::Queen.idx()];

        pawn_attacks(target, by.opposite()).intersects(sets[PieceKind::Pawn.idx()])
            || knight_attacks(target).intersects(sets[PieceKind::Knight.idx()])
            || king_attacks(target).intersects(sets[PieceKind::King.idx()])
            || slider_attacks(PieceKind::Bishop, target, occupied)
                .intersects(sets[PieceKind::Bishop.idx()] | queens)
            || slider_attacks(PieceKind::Rook, target, occupied)
                .intersects(sets[PieceKind::Rook.idx()] | queens)
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opposite()))
    }

    // =========================================================================
    // Castling
    // =========================================================================

    /// Castling is available on a side while its king and that rook stand
    /// unmoved on their home squares.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        let unmoved = |file: u8, kind: PieceKind| {
            self.piece_at(home_square(color, file))
                .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
        };
        if !unmoved(KING_FILE, PieceKind::King) {
            return CastlingRights::default();
        }
        CastlingRights {
            kingside: unmoved(KINGSIDE_ROOK_FILE, PieceKind::Rook),
            queenside: unmoved(QUEENSIDE_ROOK_FILE, PieceKind::Rook),
        }
    }

    /// King destinations for castling. `attacked` is the opponent's attack
    /// map; pass an empty set to check only the structural conditions.
    pub fn castle_destinations(&self, king: &Piece, attacked: SquareSet) -> SquareSet {
        let mut dests = SquareSet::EMPTY;
        if king.kind != PieceKind::King || self.piece_at(king.square) != Some(*king) {
            return dests;
        }
        let color = king.color;
        let rights = self.castling_rights(color);
        let all = self.occupied();
        let sq = |file: u8| home_square(color, file);
        let clear = |files: &[u8]| files.iter().all(|&f| !all.contains(sq(f)));
        let safe = |files: &[u8]| files.iter().all(|&f| !attacked.contains(sq(f)));

        if rights.kingside && clear(&[5, 6]) && safe(&[KING_FILE, 5, 6]) {
            dests.insert(sq(6));
        }
        if rights.queenside && clear(&[1, 2, 3]) && safe(&[KING_FILE, 3, 2]) {
            dests.insert(sq(2));
        }
        dests
    }

    // =========================================================================
    // Applying moves
    // =========================================================================

    /// The piece `mv` would remove from the board, including en-passant victims.
    pub fn captured_by(&self, mv: &Move) -> Option<Piece> {
        self.capture_square(&mv.piece, mv.to)
            .and_then(|sq| self.piece_at(sq))
    }

    fn capture_square(&self, piece: &Piece, to: Square) -> Option<Square> {
        match self.piece_at(to) {
            Some(occupant) if occupant.color != piece.color => Some(to),
            Some(_) => None,
            None if self.en_passant_capture(piece) == Some(to) => {
                Square::from_coords(to.file() as i8, piece.square.rank() as i8)
            }
            None => None,
        }
    }

    /// Validate `mv` by pattern and path clearance, then return the board
    /// after it. King safety is the caller's concern (see [`crate::Game`]).
    pub fn make_move(&self, mv: &Move) -> Result<Board, MoveError> {
        let piece = mv.piece;
        if self.piece_at(piece.square) != Some(piece) {
            return Err(MoveError::illegal(*mv, IllegalReason::PieceNotOnBoard));
        }
        let castles = mv.is_castle()
            && self
                .castle_destinations(&piece, SquareSet::EMPTY)
                .contains(mv.to);
        if !castles && !self.possible_moves(&piece).contains(mv.to) {
            return Err(MoveError::illegal(*mv, self.rejection_reason(&piece, mv.to)));
        }
        let promotion = Self::promotion_for(mv)?;
        Ok(self.apply(&piece, mv.to, promotion))
    }

    fn promotion_for(mv: &Move) -> Result<Option<PieceKind>, MoveError> {
        match (mv.reaches_last_rank(), mv.promotion) {
            (true, None) => Err(MoveError::PromotionRequired { square: mv.to }),
            (true, Some(kind)) if kind.is_promotion_target() => Ok(Some(kind)),
            (_, Some(_)) => Err(MoveError::illegal(*mv, IllegalReason::InvalidPromotion)),
            (false, None) => Ok(None),
        }
    }

    /// Explain why `to` is not among `piece`'s pseudo-legal destinations.
    pub fn rejection_reason(&self, piece: &Piece, to: Square) -> IllegalReason {
        if self.piece_at(to).is_some_and(|p| p.color == piece.color) {
            return IllegalReason::OwnPieceOccupied;
        }
        let from = piece.square;
        if piece.kind == PieceKind::King
            && from.rank() == to.rank()
            && from.file().abs_diff(to.file()) == 2
        {
            let (lo, hi) = if to.file() > from.file() {
                (from.file() + 1, KINGSIDE_ROOK_FILE)
            } else {
                (QUEENSIDE_ROOK_FILE + 1, from.file())
            };
            let blocked = (lo..hi).any(|f| {
                Square::new(f, from.rank()).is_ok_and(|sq| self.piece_at(sq).is_some())
            });
            return if blocked {
                IllegalReason::BlockedPath
            } else {
                IllegalReason::PatternMismatch
            };
        }
        if !piece.pattern().contains(to) {
            return IllegalReason::PatternMismatch;
        }
        match piece.kind {
            // A diagonal pawn step onto an empty square is not a pawn move at all.
            PieceKind::Pawn if pawn_attacks(from, piece.color).contains(to) => {
                IllegalReason::PatternMismatch
            }
            PieceKind::Pawn => IllegalReason::BlockedPath,
            kind if kind.is_slider() => IllegalReason::BlockedPath,
            _ => IllegalReason::PatternMismatch,
        }
    }

    /// Unchecked transform used once a move is known to be pseudo-legal.
    pub(crate) fn apply(&self, piece: &Piece, to: Square, promotion: Option<PieceKind>) -> Board {
        let mut next = self.clone();
        next.en_passant = None;

        if let Some(victim) = self.capture_square(piece, to) {
            next.clear(victim);
        }
        next.clear(piece.square);

        let mut moved = piece.moved_to(to);
        if let Some(kind) = promotion {
            moved = moved.promoted(kind);
        }
        next.place(moved);

        let from = piece.square;
        match piece.kind {
            PieceKind::King if from.file().abs_diff(to.file()) == 2 => {
                let (rook_from, rook_to) = if to.file() > from.file() {
                    (KINGSIDE_ROOK_FILE, to.file() - 1)
                } else {
                    (QUEENSIDE_ROOK_FILE, to.file() + 1)
                };
                let rook_sq = home_square(piece.color, rook_from);
                if let Some(rook) = self.piece_at(rook_sq) {
                    next.clear(rook_sq);
                    next.place(rook.moved_to(home_square(piece.color, rook_to)));
                }
            }
            PieceKind::Pawn if from.rank().abs_diff(to.rank()) == 2 => {
                next.en_passant = from.offset(0, piece.color.pawn_direction());
            }
            _ => {}
        }
        next
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Text diagram, White at the bottom. Dark empty squares are drawn as
    /// '█' (unicode) or '#' (ascii); pieces as chess symbols or FEN letters.
    pub fn render(&self, unicode: bool) -> String {
        let mut out = String::with_capacity(128);
        out.push_str("  abcdefgh\n");
        for rank in (0..BOARD_LEN).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..BOARD_LEN {
                let sq = Square::from_index(rank * BOARD_LEN + file);
                let c = match (self.piece_at(sq), unicode) {
                    (Some(p), true) => p.symbol(),
                    (Some(p), false) => p.letter(),
                    (None, true) if sq.shade() == Color::Black => '█',
                    (None, false) if sq.shade() == Color::Black => '#',
                    (None, _) => ' ',
                };
                out.push(c);
            }
            out.push_str(&format!(" {}\n", rank + 1));
        }
        out.push_str("  abcdefgh\n");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
