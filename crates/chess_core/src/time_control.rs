//! Search limits and the wall-clock budget engines poll while searching.

use std::time::{Duration, Instant};

/// What the caller allows a single search to spend.
///
/// `depth` caps the engine's own configured depth; `move_time` turns on a
/// wall-clock budget. Both default to "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies (None = engine default)
    pub depth: Option<u8>,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            move_time: None,
        }
    }

    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: None,
            move_time: Some(move_time),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth: Some(depth),
            move_time: Some(move_time),
        }
    }

    /// A fresh budget for these limits, started now.
    pub fn budget(&self) -> TimeBudget {
        TimeBudget::new(self.move_time)
    }
}

/// Wall-clock budget for one search. Owned by the search, not shared.
///
/// Reading the clock on every node is wasteful, so `poll` only looks at it
/// every `check_interval` nodes. Once expired it stays expired.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    limit: Option<Duration>,
    started: Instant,
    expired: bool,
    check_interval: u64,
}

impl TimeBudget {
    pub const DEFAULT_CHECK_INTERVAL: u64 = 1024;

    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            limit,
            started: Instant::now(),
            expired: false,
            check_interval: Self::DEFAULT_CHECK_INTERVAL,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes.max(1);
        self
    }

    pub fn is_limited(&self) -> bool {
        self.limit.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Called once per node with the running node count.
    /// Returns true once the budget has run out.
    #[inline]
    pub fn poll(&mut self, nodes: u64) -> bool {
        if !self.expired && nodes.is_multiple_of(self.check_interval) {
            self.check_now();
        }
        self.expired
    }

    /// Read the clock immediately.
    pub fn check_now(&mut self) -> bool {
        if let Some(limit) = self.limit
            && self.started.elapsed() >= limit
        {
            self.expired = true;
        }
        self.expired
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
