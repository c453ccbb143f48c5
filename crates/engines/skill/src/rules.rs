//! The capability the search needs from a rules engine.
//!
//! Search code is generic over [`Rules`] so it never reaches into board
//! internals, and so tests can wrap a real game to count calls.

use chess_core::{Color, DrawReason, Game, GameStatus, Move, Piece};

/// A mutable working position: legal moves, apply/undo, terminal checks.
///
/// `apply` must only be given moves returned by `legal_moves` for the
/// current position; anything else is a broken precondition and may panic.
pub trait Rules {
    fn side_to_move(&self) -> Color;

    /// Occupant of `sq` (a1 = 0, h8 = 63).
    fn piece_at(&self, sq: u8) -> Option<Piece>;

    /// Replace the contents of `out` with every legal move.
    fn legal_moves(&mut self, out: &mut Vec<Move>);

    fn apply(&mut self, mv: Move);

    /// Take back the most recent `apply`.
    fn undo(&mut self);

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// Draws by rule (fifty moves, repetition, insufficient material).
    fn draw_reason(&self) -> Option<DrawReason>;

    fn status(&mut self) -> GameStatus {
        let mut moves = Vec::with_capacity(64);
        self.legal_moves(&mut moves);
        GameStatus::classify(!moves.is_empty(), self.in_check(), self.draw_reason())
    }

    fn is_checkmate(&mut self) -> bool {
        self.status() == GameStatus::Checkmate
    }

    fn is_stalemate(&mut self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    fn is_draw(&mut self) -> bool {
        matches!(self.status(), GameStatus::Stalemate | GameStatus::Draw(_))
    }
}

impl Rules for Game {
    fn side_to_move(&self) -> Color {
        Game::side_to_move(self)
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.position().piece_at(sq)
    }

    fn legal_moves(&mut self, out: &mut Vec<Move>) {
        self.legal_moves_into(out);
    }

    fn apply(&mut self, mv: Move) {
        self.play(mv);
    }

    fn undo(&mut self) {
        let undone = Game::undo(self);
        debug_assert!(undone.is_some(), "undo with an empty undo log");
    }

    fn in_check(&self) -> bool {
        Game::in_check(self)
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        Game::draw_reason(self)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
