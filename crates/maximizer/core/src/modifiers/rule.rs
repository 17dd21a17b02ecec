//! Combination rules for stacking modifier contributions.
//!
//! Every modifier declares how two independent contributions merge:
//!
//! - **Additive**: values are summed (`+5` and `+3` → `+8`).
//! - **Multiplicative**: percentages compound, like sequential "more"
//!   multipliers (`+50%` and `+20%` → `+80%`).
//! - **SoftCapped**: values are summed, then the total is bent once all
//!   contributions are in: beyond `±soft` every `excess_divisor` points count
//!   as one, and the result is clamped to `±hard`.
//!
//! `combine` is associative and commutative for every rule, so the order in
//! which slots are folded never changes the aggregate. Caps are applied by
//! `finalize`, after all contributions have been combined.

use strum::{EnumCount, IntoEnumIterator};

use super::ModifierId;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combination {
    Additive,
    Multiplicative,
    SoftCapped {
        soft: f64,
        hard: f64,
        excess_divisor: f64,
    },
}

impl Combination {
    /// Merges contribution `value` into the running total `acc`.
    #[inline]
    pub fn combine(self, acc: f64, value: f64) -> f64 {
        match self {
            Combination::Additive | Combination::SoftCapped { .. } => acc + value,
            Combination::Multiplicative => {
                ((1.0 + acc / 100.0) * (1.0 + value / 100.0) - 1.0) * 100.0
            }
        }
    }

    /// Applies any cap to a fully combined total.
    #[inline]
    pub fn finalize(self, total: f64) -> f64 {
        match self {
            Combination::SoftCapped {
                soft,
                hard,
                excess_divisor,
            } => {
                let magnitude = total.abs();
                let bent = if magnitude > soft {
                    soft + (magnitude - soft) / excess_divisor
                } else {
                    magnitude
                };
                bent.min(hard).copysign(total)
            }
            _ => total,
        }
    }
}

/// Per-modifier combination rules, resolved once per invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinationTable {
    rules: [Combination; ModifierId::COUNT],
}

impl CombinationTable {
    /// Builds the table from a rule lookup (typically the catalog oracle).
    pub fn from_fn(mut rule: impl FnMut(ModifierId) -> Combination) -> Self {
        let mut rules = [Combination::Additive; ModifierId::COUNT];
        for id in ModifierId::iter() {
            rules[id.index()] = rule(id);
        }
        Self { rules }
    }

    #[inline]
    pub fn rule(&self, id: ModifierId) -> Combination {
        self.rules[id.index()]
    }

    /// Overrides one rule (builder pattern).
    pub fn with(mut self, id: ModifierId, rule: Combination) -> Self {
        self.rules[id.index()] = rule;
        self
    }
}

impl Default for CombinationTable {
    fn default() -> Self {
        Self::from_fn(ModifierId::default_combination)
    }
}
