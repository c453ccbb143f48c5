//! Zobrist keys used to recognise repeated positions.
//!
//! A position's hash is the XOR of one key per (colour, kind, square) that is
//! occupied, a key when Black is to move, one key per castling-rights set and
//! one per en-passant file. The en-passant key is only mixed in when a pawn
//! of the side to move could actually capture.

use crate::board::Position;
use crate::types::{Color, Piece, PieceKind, file_of, offset};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    pub black_to_move: u64,
    /// Indexed by the 4-bit castling-rights value.
    pub castling: [u64; 16],
    pub en_passant: [u64; 8],
}

// SplitMix64 step; returns (next state, output).
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    pub const fn generate(seed: u64) -> Self {
        let mut state = seed;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            let next = splitmix64(state);
            state = next.0;
            pieces[i / 384][(i / 64) % 6][i % 64] = next.1;
            i += 1;
        }

        let next = splitmix64(state);
        state = next.0;
        let black_to_move = next.1;

        // The empty set hashes to zero so positions without rights need no key.
        let mut castling = [0u64; 16];
        let mut i = 1;
        while i < 16 {
            let next = splitmix64(state);
            state = next.0;
            castling[i] = next.1;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            let next = splitmix64(state);
            state = next.0;
            en_passant[i] = next.1;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x5EED_C0DE_2024_0001);

/// Full (non-incremental) hash of a position.
pub fn hash(pos: &Position) -> u64 {
    let mut h = pos
        .pieces()
        .fold(0u64, |h, (s, pc)| h ^ ZOBRIST.piece_key(pc, s));
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.black_to_move;
    }
    h ^= ZOBRIST.castling[pos.castling.bits() as usize];
    if let Some(ep) = capturable_en_passant(pos) {
        h ^= ZOBRIST.en_passant[file_of(ep) as usize];
    }
    h
}

/// The en-passant square, if a pawn of the side to move attacks it.
fn capturable_en_passant(pos: &Position) -> Option<u8> {
    let ep = pos.en_passant?;
    let ours = Piece::new(pos.side_to_move, PieceKind::Pawn);
    let back = -pos.side_to_move.forward();
    [-1, 1]
        .into_iter()
        .filter_map(|df| offset(ep, (df, back)))
        .any(|s| pos.piece_at(s) == Some(ours))
        .then_some(ep)
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
