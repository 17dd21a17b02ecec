//! Evaluation and wall-clock budget for one search.
//!
//! The clock is consulted only when `evaluations & clock_check_mask == 0`,
//! so the per-evaluation cost is a counter increment and a mask test.

use std::time::{Duration, Instant};

use crate::config::MaximizerConfig;

#[derive(Clone, Debug)]
pub struct Budget {
    max_evaluations: u64,
    evaluations: u64,
    time_limit: Option<Duration>,
    start: Instant,
    clock_check_mask: u64,
    exhausted: Option<&'static str>,
}

impl Budget {
    /// Check the clock every 256 evaluations.
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0xFF;

    pub fn new(config: &MaximizerConfig) -> Self {
        Self {
            max_evaluations: config.max_evaluations,
            evaluations: 0,
            time_limit: config.time_limit(),
            start: Instant::now(),
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
            exhausted: None,
        }
    }

    /// Overrides how often the clock is read. A mask of zero reads it on every
    /// evaluation.
    pub fn with_clock_check_mask(mut self, clock_check_mask: u64) -> Self {
        self.clock_check_mask = clock_check_mask;
        self
    }

    /// Reserves one evaluation. Returns `false` once any limit is reached;
    /// after that every call returns `false`.
    pub fn charge(&mut self) -> bool {
        if self.exhausted.is_some() {
            return false;
        }
        if self.evaluations >= self.max_evaluations {
            self.exhausted = Some("evaluation limit reached");
            return false;
        }
        if let Some(limit) = self.time_limit {
            if (self.evaluations & self.clock_check_mask) == 0 && self.start.elapsed() >= limit {
                self.exhausted = Some("time limit reached");
                return false;
            }
        }
        self.evaluations = self.evaluations.wrapping_add(1);
        true
    }

    /// Marks the budget exhausted for a reason outside evaluation counting
    /// (e.g. the pass limit).
    pub fn exhaust(&mut self, reason: &'static str) {
        self.exhausted.get_or_insert(reason);
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted.is_some()
    }

    pub fn reason(&self) -> Option<&'static str> {
        self.exhausted
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
