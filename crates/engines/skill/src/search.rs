//! Negamax search with alpha-beta pruning

use chess_core::{GameStatus, Move, TimeBudget};

use crate::eval::evaluate_with_status;
use crate::ordering::order_moves;
use crate::rules::Rules;

/// Root scores closer than this are treated as equal.
pub const TIE_TOLERANCE: f64 = 1e-6;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root
    pub nodes: u64,
    /// Leaf and terminal evaluations
    pub evaluations: u64,
    /// Beta cutoffs taken
    pub cutoffs: u64,
}

/// Runs negamax over a [`Rules`] position, counting work and honouring an
/// optional wall-clock budget.
///
/// Once the budget expires the searcher is stopped for good: every call
/// unwinds immediately and the scores it returns are meaningless.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    budget: TimeBudget,
    stats: SearchStats,
    stopped: bool,
}

impl Searcher {
    pub fn new(budget: TimeBudget) -> Self {
        Self {
            budget,
            stats: SearchStats::default(),
            stopped: false,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(TimeBudget::unlimited())
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_time_limited(&self) -> bool {
        self.budget.is_limited()
    }

    /// Best score reachable by the side to move within `depth` plies, seen
    /// through `perspective` (+1 when the absolute frame already favors the
    /// mover, -1 when it must be flipped).
    ///
    /// The position is restored before returning.
    pub fn negamax<R: Rules + ?Sized>(
        &mut self,
        rules: &mut R,
        depth: u8,
        mut alpha: f64,
        beta: f64,
        perspective: f64,
    ) -> f64 {
        self.stats.nodes += 1;
        if self.budget.poll(self.stats.nodes) {
            self.stopped = true;
            return 0.0;
        }

        let mut moves = Vec::with_capacity(64);
        rules.legal_moves(&mut moves);
        let status = GameStatus::classify(!moves.is_empty(), rules.in_check(), rules.draw_reason());

        if depth == 0 || status.is_terminal() {
            self.stats.evaluations += 1;
            return perspective * evaluate_with_status(rules, status);
        }

        order_moves(rules, &mut moves);

        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            rules.apply(mv);
            let score = -self.negamax(rules, depth - 1, -beta, -alpha, -perspective);
            rules.undo();

            if self.stopped {
                return best;
            }

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Score every root move with a full window, in the order given.
    ///
    /// Scores are from the point of view of the side to move at the root.
    /// If the budget runs out, the move being searched is dropped and only
    /// the moves finished so far are returned.
    pub fn search_root<R: Rules + ?Sized>(
        &mut self,
        rules: &mut R,
        moves: &[Move],
        depth: u8,
    ) -> Vec<(Move, f64)> {
        let perspective = f64::from(rules.side_to_move().sign());
        let mut scored = Vec::with_capacity(moves.len());

        for &mv in moves {
            if self.stopped || self.budget.check_now() {
                self.stopped = true;
                break;
            }

            rules.apply(mv);
            let score = -self.negamax(
                rules,
                depth.saturating_sub(1),
                f64::NEG_INFINITY,
                f64::INFINITY,
                -perspective,
            );
            rules.undo();

            if self.stopped {
                break;
            }
            scored.push((mv, score));
        }

        scored
    }
}

/// Plain negamax without a time budget. See [`Searcher::negamax`].
pub fn negamax<R: Rules + ?Sized>(
    rules: &mut R,
    depth: u8,
    alpha: f64,
    beta: f64,
    perspective: f64,
) -> f64 {
    Searcher::unlimited().negamax(rules, depth, alpha, beta, perspective)
}

/// Moves tied for the best root score, in search order.
///
/// Ties are judged against the running best: a score more than
/// [`TIE_TOLERANCE`] above it starts a new group, one within tolerance
/// joins the current group.
pub fn best_group(scored: &[(Move, f64)]) -> (f64, Vec<Move>) {
    let mut best_score = f64::NEG_INFINITY;
    let mut best = Vec::new();

    for &(mv, score) in scored {
        if score > best_score + TIE_TOLERANCE {
            best_score = score;
            best.clear();
            best.push(mv);
        } else if (score - best_score).abs() <= TIE_TOLERANCE {
            best.push(mv);
        }
    }

    (best_score, best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
