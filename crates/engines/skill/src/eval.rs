//! Material plus piece-square evaluation.
//!
//! Scores are in an absolute frame: positive favors White, negative favors
//! Black. The search multiplies by its perspective sign.

use chess_core::{Color, GameStatus, PieceKind};

use crate::pst;
use crate::rules::Rules;

/// Score of a checkmate, before the sign for the mated side is applied.
pub const MATE_SCORE: f64 = 100_000.0;

/// Material values, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Evaluates the position held by `rules`.
///
/// Needs move generation to tell checkmate from stalemate, so it takes the
/// working position mutably; it is left exactly as it was found.
pub fn evaluate<R: Rules + ?Sized>(rules: &mut R) -> f64 {
    let status = rules.status();
    evaluate_with_status(rules, status)
}

/// Same as [`evaluate`] when the caller already knows the game status.
pub fn evaluate_with_status<R: Rules + ?Sized>(rules: &R, status: GameStatus) -> f64 {
    match status {
        // The side to move is the one that got mated.
        GameStatus::Checkmate => match rules.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        },
        GameStatus::Stalemate | GameStatus::Draw(_) => 0.0,
        GameStatus::Ongoing => f64::from(material_and_placement(rules)),
    }
}

/// Sum of material and square bonuses, White minus Black. Ignores whether
/// the game is over.
pub fn material_and_placement<R: Rules + ?Sized>(rules: &R) -> i32 {
    let mut score = 0i32;
    for sq in 0..64u8 {
        let Some(piece) = rules.piece_at(sq) else {
            continue;
        };
        let value = piece_value(piece.kind) + pst::bonus(piece, sq);
        score += value * piece.color.sign();
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
