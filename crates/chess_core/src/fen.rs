//! Forsyth-Edwards Notation parsing and formatting.

use thiserror::Error;

use crate::board::{CastlingRights, Position};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("board must have 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 files")]
    RankWidth(usize),
    #[error("invalid piece character '{0}'")]
    Piece(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("each side needs exactly one king")]
    KingCount,
}

pub fn parse(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields(parts.len()));
    }

    let mut pos = Position::empty();

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }
    for (i, text) in ranks.iter().enumerate() {
        let rank = 7 - i as i8; // FEN lists rank 8 first
        let mut file: i8 = 0;
        for ch in text.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as i8;
            } else {
                let pc = Piece::from_char(ch).ok_or(FenError::Piece(ch))?;
                let s = sq(file, rank).ok_or(FenError::RankWidth(rank as usize + 1))?;
                pos.set_piece(s, Some(pc));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth(rank as usize + 1));
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth(rank as usize + 1));
        }
    }

    pos.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    if parts[2] != "-" {
        for c in parts[2].chars() {
            let right = match c {
                'K' => CastlingRights::WHITE_KING,
                'Q' => CastlingRights::WHITE_QUEEN,
                'k' => CastlingRights::BLACK_KING,
                'q' => CastlingRights::BLACK_QUEEN,
                _ => return Err(FenError::Castling(parts[2].to_string())),
            };
            pos.castling.insert(right);
        }
    }

    pos.en_passant = match parts[3] {
        "-" => None,
        s => {
            let ep = coord_to_sq(s).ok_or_else(|| FenError::EnPassant(s.to_string()))?;
            if !en_passant_consistent(&pos, ep) {
                return Err(FenError::EnPassant(s.to_string()));
            }
            Some(ep)
        }
    };

    let counter = |s: Option<&&str>, default: u32| match s {
        Some(s) => s.parse().map_err(|_| FenError::Counter(s.to_string())),
        None => Ok(default),
    };
    pos.halfmove_clock = counter(parts.get(4), 0)?;
    pos.fullmove_number = counter(parts.get(5), 1)?;

    for color in [Color::White, Color::Black] {
        let kings = pos
            .pieces()
            .filter(|&(_, pc)| pc.color == color && pc.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(FenError::KingCount);
        }
    }

    Ok(pos)
}

/// `ep` must be the empty square an opposing pawn skipped over with a
/// double push on the previous move.
fn en_passant_consistent(pos: &Position, ep: u8) -> bool {
    let mover = pos.side_to_move;
    let skipped_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    let pushed = Piece::new(mover.other(), PieceKind::Pawn);
    let pawn_sq = offset(ep, (0, -mover.forward()));
    let origin = offset(ep, (0, mover.forward()));

    rank_of(ep) == skipped_rank
        && pos.piece_at(ep).is_none()
        && pawn_sq.and_then(|s| pos.piece_at(s)) == Some(pushed)
        && origin.is_some_and(|s| pos.piece_at(s).is_none())
}

pub fn format(pos: &Position) -> String {
    let mut out = String::with_capacity(90);
    for rank in (0..8).rev() {
        let mut gap = 0;
        for file in 0..8 {
            match sq(file, rank).and_then(|s| pos.piece_at(s)) {
                Some(pc) => {
                    if gap > 0 {
                        out.push_str(&gap.to_string());
                        gap = 0;
                    }
                    out.push(pc.to_char());
                }
                None => gap += 1,
            }
        }
        if gap > 0 {
            out.push_str(&gap.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = [
        (CastlingRights::WHITE_KING, 'K'),
        (CastlingRights::WHITE_QUEEN, 'Q'),
        (CastlingRights::BLACK_KING, 'k'),
        (CastlingRights::BLACK_QUEEN, 'q'),
    ];
    let before = out.len();
    for (right, c) in rights {
        if pos.castling.contains(right) {
            out.push(c);
        }
    }
    if out.len() == before {
        out.push('-');
    }

    out.push(' ');
    match pos.en_passant {
        Some(s) => out.push_str(&sq_to_coord(s)),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
