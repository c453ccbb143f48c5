//! UCI move notation and the `position` command.

use thiserror::Error;

use crate::fen::FenError;
use crate::game::Game;
use crate::{board::Position, movegen::legal_moves, types::*};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("position command needs 'startpos' or 'fen <fields>'")]
    MissingPosition,
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("illegal or malformed move '{0}'")]
    IllegalMove(String),
}

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Resolve `e2e4` / `e7e8q` against the legal moves of `pos`, so the
/// returned move carries the right capture, castle and en-passant flags.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let from = coord_to_sq(txt.get(0..2)?)?;
    let to = coord_to_sq(txt.get(2..4)?)?;
    let promo = match txt.get(4..) {
        None | Some("") => None,
        Some(rest) => {
            let mut chars = rest.chars();
            let kind = chars.next().and_then(PieceKind::from_char)?;
            if chars.next().is_some() || !PieceKind::PROMOTIONS.contains(&kind) {
                return None;
            }
            Some(kind)
        }
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Build a game from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <4-6 fields> [moves ...]`.
pub fn game_from_uci(args: &[&str]) -> Result<Game, UciError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &args[args.len()..]),
    };

    let mut game = match setup.split_first() {
        Some((&"startpos", _)) => Game::startpos(),
        Some((&"fen", fields)) if !fields.is_empty() => Game::from_fen(&fields.join(" "))?,
        _ => return Err(UciError::MissingPosition),
    };

    for txt in moves {
        let mv = parse_uci_move(game.position(), txt)
            .ok_or_else(|| UciError::IllegalMove(txt.to_string()))?;
        game.play(mv);
    }
    Ok(game)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
