//! Leveled Chess Engine
//!
//! Negamax with alpha-beta pruning over a material plus piece-square
//! evaluation, wrapped in difficulty levels that trade search depth and
//! randomness for playing strength.
//!
//! - [`evaluate`]: absolute-frame score, positive favors White
//! - [`order_moves`]: captures first, by value of the capturing piece
//! - [`Searcher`]: negamax with node counting and an optional time budget
//! - [`select_move`]: the move to play for a [`DifficultyProfile`]
//! - [`SkillEngine`]: the above behind [`chess_core::Engine`]

mod difficulty;
mod eval;
mod ordering;
pub mod pst;
mod rules;
mod search;
mod select;

use chess_core::{Engine, Game, SearchLimits, SearchResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

pub use difficulty::{DifficultyProfile, DifficultyTable, ProfileError};
pub use eval::{MATE_SCORE, evaluate, evaluate_with_status, material_and_placement, piece_value};
pub use ordering::{CAPTURE_BONUS, move_order_key, order_moves};
pub use rules::Rules;
pub use search::{SearchStats, Searcher, TIE_TOLERANCE, best_group, negamax};
pub use select::{RANDOM_PLAY_THRESHOLD, Selection, candidate_count, select_move, select_move_with};

/// Chess engine with selectable difficulty.
///
/// Holds a difficulty table, the current level and its own random number
/// generator; nothing else survives between searches.
#[derive(Debug, Clone)]
pub struct SkillEngine {
    table: DifficultyTable,
    level: u8,
    rng: StdRng,
}

impl SkillEngine {
    pub const DEFAULT_LEVEL: u8 = 1;

    pub fn new() -> Self {
        Self::with_table(DifficultyTable::standard())
    }

    pub fn with_table(table: DifficultyTable) -> Self {
        Self {
            table,
            level: Self::DEFAULT_LEVEL,
            rng: StdRng::from_entropy(),
        }
    }

    /// Standard table with a fixed seed, for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self::new().with_seed(seed)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.set_level(level);
        self
    }

    /// Switch level. Unknown levels select level 1; the level actually in
    /// use is returned.
    pub fn set_level(&mut self, level: u8) -> u8 {
        self.level = self.table.resolve(level);
        self.level
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn profile(&self) -> &DifficultyProfile {
        self.table.profile(self.level)
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    /// Move to play at the current level, or None if there is none.
    pub fn choose<R: Rules + ?Sized>(&mut self, rules: &mut R) -> Option<Selection> {
        select_move(rules, self.table.profile(self.level), &mut self.rng)
    }

    /// Move suggested to the player: what the engine would play one level
    /// weaker (never below level 1).
    pub fn hint<R: Rules + ?Sized>(&mut self, rules: &mut R) -> Option<Selection> {
        let level = self.level.saturating_sub(1).max(1);
        select_move(rules, self.table.profile(level), &mut self.rng)
    }
}

impl Default for SkillEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SkillEngine {
    fn search(&mut self, game: &Game, limits: &SearchLimits) -> SearchResult {
        let mut profile = self.profile().clone();
        if let Some(cap) = limits.depth {
            profile.depth = profile.depth.min(cap.max(1));
        }

        let mut working = game.clone();
        let selection = select_move_with(&mut working, &profile, limits.budget(), &mut self.rng);

        let Some(selection) = selection else {
            debug!(level = self.level, "no move available");
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
            };
        };

        let nodes = selection.stats.nodes;
        debug!(
            level = self.level,
            label = %profile.label,
            depth = selection.depth,
            nodes,
            "search finished"
        );

        SearchResult {
            best_move: Some(selection.mv),
            score: selection.score.map_or(0, |s| s.round() as i32),
            depth: selection.depth,
            nodes,
            stopped: selection.stopped,
        }
    }

    fn name(&self) -> &str {
        "Skill v1.0"
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("level") {
            return false;
        }
        match value.trim().parse::<u8>() {
            Ok(level) => {
                self.set_level(level);
                true
            }
            Err(_) => false,
        }
    }
}
