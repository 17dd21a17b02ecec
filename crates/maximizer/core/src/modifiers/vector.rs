//! Dense modifier vector over the closed [`ModifierId`] set.

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};

use super::{CombinationTable, ModifierId};

/// Mapping from modifier to magnitude.
///
/// Conceptually sparse (most items touch two or three modifiers), stored dense
/// so that folding a full assignment is a branch-free loop. Absent modifiers
/// read as zero. With the `serde` feature the vector is (de)serialized as a
/// sparse map of non-zero entries, e.g. `{ MeatDrop: 25.0, Muscle: 7.0 }`.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "std::collections::BTreeMap<ModifierId, f64>",
        into = "std::collections::BTreeMap<ModifierId, f64>"
    )
)]
pub struct ModifierVector {
    values: [f64; ModifierId::COUNT],
}

impl ModifierVector {
    pub const fn new() -> Self {
        Self {
            values: [0.0; ModifierId::COUNT],
        }
    }

    /// Builds a vector from `(modifier, value)` pairs, summing duplicates.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ModifierId, f64)>) -> Self {
        let mut vector = Self::new();
        for (id, value) in pairs {
            vector.values[id.index()] += value;
        }
        vector
    }

    /// Sets a value (builder pattern).
    pub fn with(mut self, id: ModifierId, value: f64) -> Self {
        self.values[id.index()] = value;
        self
    }

    #[inline]
    pub fn get(&self, id: ModifierId) -> f64 {
        self.values[id.index()]
    }

    #[inline]
    pub fn set(&mut self, id: ModifierId, value: f64) {
        self.values[id.index()] = value;
    }

    /// Adds `value` without consulting any combination rule.
    #[inline]
    pub fn add(&mut self, id: ModifierId, value: f64) {
        self.values[id.index()] += value;
    }

    /// Folds `other` into `self`, modifier by modifier, using each modifier's rule.
    pub fn combine(&mut self, other: &ModifierVector, rules: &CombinationTable) {
        for id in ModifierId::iter() {
            let value = other.values[id.index()];
            if value != 0.0 {
                let slot = &mut self.values[id.index()];
                *slot = rules.rule(id).combine(*slot, value);
            }
        }
    }

    /// Folds `other` scaled by `factor` (e.g. per-pound familiar modifiers).
    pub fn combine_scaled(&mut self, other: &ModifierVector, factor: f64, rules: &CombinationTable) {
        for id in ModifierId::iter() {
            let value = other.values[id.index()] * factor;
            if value != 0.0 {
                let slot = &mut self.values[id.index()];
                *slot = rules.rule(id).combine(*slot, value);
            }
        }
    }

    /// Applies every modifier's cap in place.
    pub fn finalize(&mut self, rules: &CombinationTable) {
        for id in ModifierId::iter() {
            let slot = &mut self.values[id.index()];
            *slot = rules.rule(id).finalize(*slot);
        }
    }

    /// Iterates over non-zero entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModifierId, f64)> + '_ {
        ModifierId::iter()
            .map(|id| (id, self.values[id.index()]))
            .filter(|(_, value)| *value != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }
}

impl Default for ModifierVector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModifierVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(ModifierId, f64)> for ModifierVector {
    fn from_iter<T: IntoIterator<Item = (ModifierId, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl From<std::collections::BTreeMap<ModifierId, f64>> for ModifierVector {
    fn from(map: std::collections::BTreeMap<ModifierId, f64>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<ModifierVector> for std::collections::BTreeMap<ModifierId, f64> {
    fn from(vector: ModifierVector) -> Self {
        vector.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Combination;

    #[test]
    fn absent_modifiers_read_as_zero() {
        let vector = ModifierVector::new().with(ModifierId::MeatDrop, 25.0);
        assert_eq!(vector.get(ModifierId::MeatDrop), 25.0);
        assert_eq!(vector.get(ModifierId::ItemDrop), 0.0);
        assert_eq!(vector.iter().count(), 1);
    }

    #[test]
    fn combine_respects_rules() {
        let rules = CombinationTable::default();
        let mut total = ModifierVector::from_pairs([
            (ModifierId::Muscle, 7.0),
            (ModifierId::SpellDamagePercent, 50.0),
        ]);
        total.combine(
            &ModifierVector::from_pairs([
                (ModifierId::Muscle, 3.0),
                (ModifierId::SpellDamagePercent, 20.0),
            ]),
            &rules,
        );
        assert_eq!(total.get(ModifierId::Muscle), 10.0);
        assert!((total.get(ModifierId::SpellDamagePercent) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn combination_is_order_independent() {
        let rules = CombinationTable::default().with(ModifierId::ItemDrop, Combination::Multiplicative);
        let a = ModifierVector::from_pairs([(ModifierId::ItemDrop, 10.0), (ModifierId::Muscle, 1.0)]);
        let b = ModifierVector::from_pairs([(ModifierId::ItemDrop, 40.0), (ModifierId::Moxie, 2.0)]);

        let mut ab = ModifierVector::new();
        ab.combine(&a, &rules);
        ab.combine(&b, &rules);
        let mut ba = ModifierVector::new();
        ba.combine(&b, &rules);
        ba.combine(&a, &rules);

        for id in ModifierId::iter() {
            assert!((ab.get(id) - ba.get(id)).abs() < 1e-9, "{id} differs");
        }
    }

    #[test]
    fn finalize_caps_combat_rate() {
        let rules = CombinationTable::default();
        let mut total = ModifierVector::new().with(ModifierId::CombatRate, -45.0);
        total.finalize(&rules);
        assert_eq!(total.get(ModifierId::CombatRate), -25.0);
    }
}
