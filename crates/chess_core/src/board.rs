use crate::fen::{self, FenError};
use crate::types::*;
use crate::zobrist;

/// Remaining castling rights as a four-bit set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 2;
    pub const BLACK_KING: u8 = 4;
    pub const BLACK_QUEEN: u8 = 8;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, right: u8) -> bool {
        self.0 & right != 0
    }

    pub fn insert(&mut self, right: u8) {
        self.0 |= right;
    }

    pub fn remove(&mut self, right: u8) {
        self.0 &= !right;
    }

    /// Drop every right that depends on a piece standing on `sq`.
    /// Called for both ends of every move, which covers king moves,
    /// rook moves and rooks captured at home.
    pub fn touch(&mut self, sq: u8) {
        match sq {
            0 => self.remove(Self::WHITE_QUEEN),
            4 => self.remove(Self::WHITE_KING | Self::WHITE_QUEEN),
            7 => self.remove(Self::WHITE_KING),
            56 => self.remove(Self::BLACK_QUEEN),
            60 => self.remove(Self::BLACK_KING | Self::BLACK_QUEEN),
            63 => self.remove(Self::BLACK_KING),
            _ => {}
        }
    }
}

/// Geometry of one castling move.
pub(crate) struct Castle {
    pub color: Color,
    pub right: u8,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares between king and rook that must be empty.
    pub empty: &'static [u8],
    /// Squares the king crosses or lands on; none may be attacked.
    pub safe: &'static [u8],
}

pub(crate) const CASTLES: [Castle; 4] = [
    Castle {
        color: Color::White,
        right: CastlingRights::WHITE_KING,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        empty: &[5, 6],
        safe: &[5, 6],
    },
    Castle {
        color: Color::White,
        right: CastlingRights::WHITE_QUEEN,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        empty: &[1, 2, 3],
        safe: &[2, 3],
    },
    Castle {
        color: Color::Black,
        right: CastlingRights::BLACK_KING,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        empty: &[61, 62],
        safe: &[61, 62],
    },
    Castle {
        color: Color::Black,
        right: CastlingRights::BLACK_QUEEN,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        empty: &[57, 58, 59],
        safe: &[58, 59],
    },
];

fn castle_for(from: u8, to: u8) -> Option<&'static Castle> {
    CASTLES
        .iter()
        .find(|c| c.king_from == from && c.king_to == to)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything `make_move` destroys, so `unmake_move` can put it back.
#[derive(Clone, Debug)]
pub struct Undo {
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Where the captured piece stood; differs from `to` only for en passant.
    pub captured_sq: u8,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// A board with no pieces, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;
        for (f, &kind) in BACK_RANK.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        fen::parse(text)
    }

    pub fn to_fen(&self) -> String {
        fen::format(self)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as u8, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces()
            .find(|&(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let holds = |s: Option<u8>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks diagonally forward, so look one rank behind the target.
        let back = -by.forward();
        if holds(offset(target, (-1, back)), &[PieceKind::Pawn])
            || holds(offset(target, (1, back)), &[PieceKind::Pawn])
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|&d| holds(offset(target, d), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|&d| holds(offset(target, d), &[PieceKind::King]))
        {
            return true;
        }

        let diagonal = [PieceKind::Bishop, PieceKind::Queen];
        let straight = [PieceKind::Rook, PieceKind::Queen];
        DIAGONALS
            .iter()
            .any(|&d| holds(self.first_piece_along(target, d), &diagonal))
            || ORTHOGONALS
                .iter()
                .any(|&d| holds(self.first_piece_along(target, d), &straight))
    }

    /// First occupied square walking from `from` in direction `d`.
    fn first_piece_along(&self, from: u8, d: (i8, i8)) -> Option<u8> {
        let mut cur = from;
        while let Some(next) = offset(cur, d) {
            if self.piece_at(next).is_some() {
                return Some(next);
            }
            cur = next;
        }
        None
    }

    /// Play `mv`, which must be legal here. The returned `Undo` takes it back.
    ///
    /// # Panics
    /// If `mv.from` is empty.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.piece_at(mv.from).expect("no piece on from-square");
        let captured_sq = if mv.is_en_passant {
            // The captured pawn sits beside the origin, on the destination file.
            sq(file_of(mv.to), rank_of(mv.from)).expect("en-passant square on board")
        } else {
            mv.to
        };
        let undo = Undo {
            moved,
            captured: self.piece_at(captured_sq),
            captured_sq,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        self.set_piece(captured_sq, None);
        self.set_piece(mv.from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ => moved,
        };
        self.set_piece(mv.to, Some(landed));

        if mv.is_castle
            && let Some(c) = castle_for(mv.from, mv.to)
        {
            let rook = self.piece_at(c.rook_from);
            self.set_piece(c.rook_from, None);
            self.set_piece(c.rook_to, rook);
        }

        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if mv.is_castle
            && let Some(c) = castle_for(mv.from, mv.to)
        {
            let rook = self.piece_at(c.rook_to);
            self.set_piece(c.rook_to, None);
            self.set_piece(c.rook_from, rook);
        }

        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved));
        self.set_piece(undo.captured_sq, undo.captured);
    }

    /// Fifty moves by each side without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece,
    /// or only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop if is_dark(s) => dark_bishops += 1,
                PieceKind::Bishop => light_bishops += 1,
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        let bishops = light_bishops + dark_bishops;
        match (knights, bishops) {
            (0, 0) | (1, 0) | (0, 1) => true,
            (0, _) => light_bishops == 0 || dark_bishops == 0,
            _ => false,
        }
    }

    /// Zobrist hash of the placement, side, castling rights and en-passant file.
    pub fn position_hash(&self) -> u64 {
        zobrist::hash(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
