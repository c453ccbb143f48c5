//! A position together with the moves that led to it.
//!
//! `Game` is the working board a search owns: moves are applied in place and
//! taken back from an explicit undo log, and the hash of every position
//! reached is kept so threefold repetition can be detected.

use crate::board::{Position, Undo};
use crate::fen::FenError;
use crate::movegen::legal_moves_into;
use crate::types::{Color, Move};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoves,
    Repetition,
    InsufficientMaterial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Status once it is known whether the side to move has any legal move.
    pub fn classify(has_moves: bool, in_check: bool, draw: Option<DrawReason>) -> Self {
        match (has_moves, in_check, draw) {
            (false, true, _) => GameStatus::Checkmate,
            (false, false, _) => GameStatus::Stalemate,
            (true, _, Some(reason)) => GameStatus::Draw(reason),
            (true, _, None) => GameStatus::Ongoing,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    pos: Position,
    undo_log: Vec<(Move, Undo)>,
    /// Hash of every position reached, the current one last.
    history: Vec<u64>,
}

impl Game {
    pub fn new(pos: Position) -> Self {
        let history = vec![pos.position_hash()];
        Self {
            pos,
            undo_log: Vec::new(),
            history,
        }
    }

    pub fn startpos() -> Self {
        Self::new(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::new)
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move
    }

    /// Number of moves currently on the undo log.
    pub fn ply(&self) -> usize {
        self.undo_log.len()
    }

    pub fn legal_moves_into(&mut self, out: &mut Vec<Move>) {
        legal_moves_into(&mut self.pos, out);
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.legal_moves_into(&mut out);
        out
    }

    /// Apply a move. The move must be legal in the current position.
    pub fn play(&mut self, mv: Move) {
        let undo = self.pos.make_move(mv);
        self.undo_log.push((mv, undo));
        self.history.push(self.pos.position_hash());
    }

    /// Take back the last move, returning it, or `None` at the root.
    pub fn undo(&mut self) -> Option<Move> {
        let (mv, undo) = self.undo_log.pop()?;
        self.pos.unmake_move(mv, undo);
        self.history.pop();
        Some(mv)
    }

    pub fn in_check(&self) -> bool {
        self.pos.in_check(self.pos.side_to_move)
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetitions(&self) -> usize {
        match self.history.last() {
            Some(&cur) => self.history.iter().filter(|&&h| h == cur).count(),
            None => 0,
        }
    }

    /// Draws that do not depend on move generation.
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.pos.is_fifty_move_draw() {
            Some(DrawReason::FiftyMoves)
        } else if self.repetitions() >= 3 {
            Some(DrawReason::Repetition)
        } else if self.pos.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else {
            None
        }
    }

    pub fn status(&mut self) -> GameStatus {
        let mut moves = Vec::with_capacity(64);
        self.legal_moves_into(&mut moves);
        GameStatus::classify(!moves.is_empty(), self.in_check(), self.draw_reason())
    }
}

impl From<Position> for Game {
    fn from(pos: Position) -> Self {
        Game::new(pos)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
