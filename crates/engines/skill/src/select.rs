//! Choosing the move to play at a given difficulty.

use chess_core::{Move, TimeBudget};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::difficulty::DifficultyProfile;
use crate::ordering::order_moves;
use crate::rules::Rules;
use crate::search::{SearchStats, Searcher, best_group};

/// Profiles more random than this skip search and play any legal move.
pub const RANDOM_PLAY_THRESHOLD: f64 = 0.75;

/// The move chosen by [`select_move`] and how it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub mv: Move,
    /// Root score of `mv` for the side to move, or None when no root move
    /// was scored.
    pub score: Option<f64>,
    /// Moves tied for the best score, in search order. Empty when no
    /// search ran.
    pub best_moves: Vec<Move>,
    /// Deepest fully completed search depth (0 when none completed).
    pub depth: u8,
    /// The time budget ran out before the profile depth was reached.
    pub stopped: bool,
    pub stats: SearchStats,
}

/// Pick a move for the side to move in `rules` according to `profile`.
///
/// Returns None when there is no legal move, before any search starts.
pub fn select_move<R, G>(rules: &mut R, profile: &DifficultyProfile, rng: &mut G) -> Option<Selection>
where
    R: Rules + ?Sized,
    G: Rng + ?Sized,
{
    select_move_with(rules, profile, TimeBudget::unlimited(), rng)
}

/// [`select_move`] under a wall-clock budget.
///
/// With a limited budget the root is searched by iterative deepening, one
/// ply at a time up to the profile depth, and the deepest iteration that
/// finished is used.
pub fn select_move_with<R, G>(
    rules: &mut R,
    profile: &DifficultyProfile,
    budget: TimeBudget,
    rng: &mut G,
) -> Option<Selection>
where
    R: Rules + ?Sized,
    G: Rng + ?Sized,
{
    let mut moves = Vec::with_capacity(64);
    rules.legal_moves(&mut moves);
    if moves.is_empty() {
        debug!("no legal moves");
        return None;
    }

    if profile.randomness > RANDOM_PLAY_THRESHOLD {
        let mv = *moves.choose(rng)?;
        debug!(randomness = profile.randomness, candidates = moves.len(), "random play");
        return Some(Selection {
            mv,
            score: None,
            best_moves: Vec::new(),
            depth: 0,
            stopped: false,
            stats: SearchStats::default(),
        });
    }

    order_moves(rules, &mut moves);
    let mut searcher = Searcher::new(budget);
    let (depth, scored) = if searcher.is_time_limited() {
        deepen(&mut searcher, rules, &moves, profile.depth)
    } else {
        let scored = searcher.search_root(rules, &moves, profile.depth);
        (profile.depth, scored)
    };
    let stats = searcher.stats();
    let stopped = searcher.is_stopped();

    let (best_score, best_moves) = best_group(&scored);
    if best_moves.is_empty() {
        let mv = *moves.choose(rng)?;
        debug!(nodes = stats.nodes, "search finished nothing, playing a random move");
        return Some(Selection {
            mv,
            score: None,
            best_moves,
            depth,
            stopped,
            stats,
        });
    }

    let pool = candidate_count(best_moves.len(), profile.randomness);
    let mv = *best_moves[..pool].choose(rng)?;

    debug!(
        depth,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        score = best_score,
        best = best_moves.len(),
        pool,
        "selected move"
    );

    Some(Selection {
        mv,
        score: Some(best_score),
        best_moves,
        depth,
        stopped,
        stats,
    })
}

/// How many of the best-scoring moves, taken in search order, the engine
/// may choose from.
///
/// Randomness 0 allows the whole group. Otherwise the group is cut to
/// `max(1, floor(len * randomness))`, so looser play samples the moves the
/// search saw first and stricter play narrows to a single move.
pub fn candidate_count(best: usize, randomness: f64) -> usize {
    if best == 0 || randomness <= 0.0 {
        return best;
    }
    let cutoff = (best as f64 * randomness).floor() as usize;
    cutoff.clamp(1, best)
}

/// Iterative deepening over the root moves. Returns the deepest completed
/// depth with its scores; if depth 1 never completes, returns depth 0 with
/// whatever root moves were scored.
fn deepen<R: Rules + ?Sized>(
    searcher: &mut Searcher,
    rules: &mut R,
    moves: &[Move],
    max_depth: u8,
) -> (u8, Vec<(Move, f64)>) {
    let mut completed = (0, Vec::new());

    for depth in 1..=max_depth.max(1) {
        let scored = searcher.search_root(rules, moves, depth);
        if searcher.is_stopped() {
            if completed.0 == 0 {
                completed.1 = scored;
            }
            trace!(depth, nodes = searcher.stats().nodes, "iteration abandoned");
            break;
        }
        trace!(depth, nodes = searcher.stats().nodes, "iteration complete");
        completed = (depth, scored);
    }

    completed
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod select_tests;
