//! UCI command handling, one line at a time.

use std::io::{self, Write};
use std::time::Duration;

use chess_core::{Engine, Game, SearchLimits, game_from_uci, move_to_uci};
use skill_engine::SkillEngine;
use tracing::{debug, warn};

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    engine: SkillEngine,
    game: Game,
}

impl Session {
    pub fn new(engine: SkillEngine) -> Self {
        Self {
            engine,
            game: Game::startpos(),
        }
    }

    /// Handle one input line, writing any reply to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Level type spin default {} min 1 max {}",
                    SkillEngine::DEFAULT_LEVEL,
                    self.engine.table().max_level()
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                self.engine.new_game();
                self.game = Game::startpos();
            }
            "position" => match game_from_uci(args) {
                Ok(game) => self.game = game,
                Err(e) => warn!(error = %e, "ignoring position command"),
            },
            "go" => self.go(args, out)?,
            "hint" => {
                let mut scratch = self.game.clone();
                match self.engine.hint(&mut scratch) {
                    Some(selection) => {
                        writeln!(out, "info string hint {}", move_to_uci(selection.mv))?
                    }
                    None => writeln!(out, "info string hint none")?,
                }
            }
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "ignoring unknown command"),
        }

        out.flush()?;
        Ok(Flow::Continue)
    }

    // setoption name <name...> [value <value...>]
    fn set_option(&mut self, args: &[&str]) {
        let Some(name_at) = args.iter().position(|&t| t == "name") else {
            warn!("setoption without a name");
            return;
        };
        let value_at = args.iter().position(|&t| t == "value").unwrap_or(args.len());
        let name = args.get(name_at + 1..value_at).unwrap_or_default().join(" ");
        let value = args.get(value_at + 1..).unwrap_or_default().join(" ");

        if self.engine.set_option(&name, &value) {
            debug!(%name, %value, level = self.engine.level(), "option set");
        } else {
            warn!(%name, %value, "unsupported option");
        }
    }

    fn go(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let limits = parse_go(args);
        let result = self.engine.search(&self.game, &limits);

        writeln!(
            out,
            "info depth {} score cp {} nodes {}",
            result.depth, result.score, result.nodes
        )?;
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv)),
            None => writeln!(out, "bestmove 0000"),
        }
    }
}

/// Limits from the arguments of `go`. Only `depth` and `movetime` are
/// honoured; clock fields are ignored.
pub fn parse_go(args: &[&str]) -> SearchLimits {
    let mut limits = SearchLimits::none();
    let mut tokens = args.iter();
    while let Some(&token) = tokens.next() {
        match token {
            "depth" => {
                limits.depth = tokens.next().and_then(|v| v.parse().ok());
            }
            "movetime" => {
                limits.move_time = tokens
                    .next()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_millis);
            }
            _ => {}
        }
    }
    limits
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
