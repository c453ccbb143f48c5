//! Capture-first move ordering for alpha-beta.

use chess_core::Move;

use crate::eval::piece_value;
use crate::rules::Rules;

/// Added to every capture so it sorts ahead of every quiet move.
pub const CAPTURE_BONUS: i32 = 10_000;

/// Ordering key for `mv` in the position held by `rules`.
///
/// Captures score `CAPTURE_BONUS` plus the value of the capturing piece,
/// quiet moves score 0.
pub fn move_order_key<R: Rules + ?Sized>(rules: &R, mv: &Move) -> i32 {
    if !mv.is_capture() {
        return 0;
    }
    let mover = rules
        .piece_at(mv.from)
        .map_or(0, |piece| piece_value(piece.kind));
    CAPTURE_BONUS + mover
}

/// Sort `moves` by descending key. The sort is stable, so equal keys keep
/// generation order.
pub fn order_moves<R: Rules + ?Sized>(rules: &R, moves: &mut [Move]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(move_order_key(rules, mv)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
