use crate::board::{CASTLES, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
/// The position is used as scratch space and is restored before returning.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_legal_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for (from, pc) in pos.pieces() {
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => push_pawn_moves(pos, from, us, out),
            PieceKind::Knight => push_steps(pos, from, us, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => push_slides(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => push_slides(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                push_slides(pos, from, us, &DIAGONALS, out);
                push_slides(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                push_steps(pos, from, us, &KING_DELTAS, out);
                push_castles(pos, from, us, out);
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(mv: Move, us: Color, out: &mut Vec<Move>) {
    if rank_of(mv.to) == us.promotion_rank() {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&k| mv.with_promotion(k)));
    } else {
        out.push(mv);
    }
}

fn push_pawn_moves(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let fwd = us.forward();

    if let Some(one) = offset(from, (0, fwd))
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(Move::new(from, one), us, out);

        if rank_of(from) == us.pawn_rank()
            && let Some(two) = offset(from, (0, 2 * fwd))
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = offset(from, (df, fwd)) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(victim) if victim.color != us => {
                push_pawn_move(Move::capture(from, to, victim.kind), us, out);
            }
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::capture(from, to, PieceKind::Pawn);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

/// Push the move onto `to` unless it is blocked by our own piece.
/// Returns true when `to` was empty, so rays may continue past it.
fn push_to(pos: &Position, from: u8, to: u8, us: Color, out: &mut Vec<Move>) -> bool {
    match pos.piece_at(to) {
        None => {
            out.push(Move::new(from, to));
            true
        }
        Some(pc) if pc.color != us => {
            out.push(Move::capture(from, to, pc.kind));
            false
        }
        Some(_) => false,
    }
}

fn push_steps(pos: &Position, from: u8, us: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &d in deltas {
        if let Some(to) = offset(from, d) {
            push_to(pos, from, to, us, out);
        }
    }
}

fn push_slides(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &d in dirs {
        let mut cur = from;
        while let Some(to) = offset(cur, d) {
            if !push_to(pos, from, to, us, out) {
                break;
            }
            cur = to;
        }
    }
}

fn push_castles(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let them = us.other();
    for c in CASTLES.iter().filter(|c| c.color == us && c.king_from == from) {
        if !pos.castling.contains(c.right) {
            continue;
        }
        let rook_home = pos.piece_at(c.rook_from) == Some(Piece::new(us, PieceKind::Rook));
        if !rook_home || c.empty.iter().any(|&s| pos.piece_at(s).is_some()) {
            continue;
        }
        // The king may not castle out of check or across an attacked square.
        if pos.is_square_attacked(from, them) || c.safe.iter().any(|&s| pos.is_square_attacked(s, them)) {
            continue;
        }
        let mut mv = Move::new(c.king_from, c.king_to);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
