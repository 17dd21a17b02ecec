/// Search budget and tolerance parameters.
///
/// The search space is finite, but the multi-slot phase grows with the number
/// of owned items, so every invocation runs under these caps. When a cap is hit
/// the best assignment found so far is returned instead of an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaximizerConfig {
    /// Hard cap on full-assignment evaluations.
    pub max_evaluations: u64,
    /// Wall-clock budget in milliseconds. Zero disables the clock.
    pub time_limit_ms: u64,
    /// Number of top-ranked candidates per slot used when enumerating coupled groups.
    pub group_fanout: usize,
    /// Cap on joint combinations tried per coupled group per pass.
    pub max_group_combinations: usize,
    /// Scores closer than this are treated as tied.
    pub score_epsilon: f64,
    /// Cap on hill-climbing passes.
    pub max_passes: u32,
}

impl MaximizerConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_EVALUATIONS: u64 = 250_000;
    pub const DEFAULT_TIME_LIMIT_MS: u64 = 5_000;
    pub const DEFAULT_GROUP_FANOUT: usize = 6;
    pub const DEFAULT_MAX_GROUP_COMBINATIONS: usize = 4_096;
    pub const DEFAULT_SCORE_EPSILON: f64 = 1e-6;
    pub const DEFAULT_MAX_PASSES: u32 = 16;

    pub fn new() -> Self {
        Self {
            max_evaluations: Self::DEFAULT_MAX_EVALUATIONS,
            time_limit_ms: Self::DEFAULT_TIME_LIMIT_MS,
            group_fanout: Self::DEFAULT_GROUP_FANOUT,
            max_group_combinations: Self::DEFAULT_MAX_GROUP_COMBINATIONS,
            score_epsilon: Self::DEFAULT_SCORE_EPSILON,
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_evaluations(mut self, max_evaluations: u64) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    pub fn with_group_fanout(mut self, group_fanout: usize) -> Self {
        self.group_fanout = group_fanout;
        self
    }

    pub fn time_limit(&self) -> Option<std::time::Duration> {
        (self.time_limit_ms > 0).then(|| std::time::Duration::from_millis(self.time_limit_ms))
    }
}

impl Default for MaximizerConfig {
    fn default() -> Self {
        Self::new()
    }
}
