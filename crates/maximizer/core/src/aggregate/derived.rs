//! Derived modifiers, resolved after every raw contribution has been folded in.
//!
//! Evaluation order (fixed, so results are reproducible):
//!
//! 1. Familiar weight = owned base weight + `Familiar Weight` bonuses
//! 2. Active familiar's weight-scaled contributions (`per_pound × weight`)
//! 3. Item scalings (`target += ratio × source`), all sources read before any
//!    scaling is applied
//! 4. Buffed stats: `max(0, base + flat + floor(base × percent / 100))`
//! 5. Caps (`Combination::finalize`)

use crate::catalog::{FamiliarDefinition, Scaling, Stat};
use crate::modifiers::{CombinationTable, ModifierId, ModifierVector};
use crate::state::BaseStats;

/// Inputs to derived-modifier resolution that are not part of the raw vector.
pub(super) struct DerivedInputs<'a> {
    pub familiar: Option<(&'a FamiliarDefinition, u32)>,
    pub scalings: Vec<Scaling>,
    pub stats: BaseStats,
}

pub(super) fn resolve(total: &mut ModifierVector, inputs: &DerivedInputs<'_>, rules: &CombinationTable) {
    if let Some((familiar, base_weight)) = inputs.familiar {
        let weight = familiar_weight(base_weight, total);
        total.combine_scaled(&familiar.per_pound, weight, rules);
    }

    let sources = *total;
    for scaling in &inputs.scalings {
        let value = scaling.ratio * sources.get(scaling.source);
        if value != 0.0 {
            let rule = rules.rule(scaling.target);
            total.set(scaling.target, rule.combine(total.get(scaling.target), value));
        }
    }

    for stat in [Stat::Muscle, Stat::Mysticality, Stat::Moxie] {
        total.set(stat.buffed(), buffed_stat(inputs.stats.get(stat), stat, total));
    }

    total.finalize(rules);
}

/// Effective weight of the active familiar; never negative.
pub(super) fn familiar_weight(base_weight: u32, total: &ModifierVector) -> f64 {
    (f64::from(base_weight) + total.get(ModifierId::FamiliarWeight)).max(0.0)
}

fn buffed_stat(base: i32, stat: Stat, total: &ModifierVector) -> f64 {
    let (flat, percent) = stat.bonuses();
    let base = f64::from(base);
    let scaled = (base * total.get(percent) / 100.0).floor();
    (base + total.get(flat) + scaled).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FamiliarId;

    fn inputs<'a>(stats: BaseStats) -> DerivedInputs<'a> {
        DerivedInputs {
            familiar: None,
            scalings: Vec::new(),
            stats,
        }
    }

    #[test]
    fn buffed_stats_apply_flat_then_floored_percent() {
        let mut total = ModifierVector::new()
            .with(ModifierId::Muscle, 7.0)
            .with(ModifierId::MusclePercent, 15.0)
            .with(ModifierId::Moxie, -40.0);
        resolve(&mut total, &inputs(BaseStats::new(10, 3, 12)), &CombinationTable::default());

        // 10 + 7 + floor(1.5)
        assert_eq!(total.get(ModifierId::BuffedMuscle), 18.0);
        assert_eq!(total.get(ModifierId::BuffedMysticality), 3.0);
        assert_eq!(total.get(ModifierId::BuffedMoxie), 0.0);
    }

    #[test]
    fn per_pound_scales_with_bonus_weight() {
        let medium = FamiliarDefinition::new(FamiliarId(1), "Happy Medium")
            .with_per_pound(ModifierId::MeatDrop, 2.0);
        let mut total = ModifierVector::new().with(ModifierId::FamiliarWeight, 5.0);
        let inputs = DerivedInputs {
            familiar: Some((&medium, 10)),
            ..inputs(BaseStats::default())
        };
        resolve(&mut total, &inputs, &CombinationTable::default());
        assert_eq!(total.get(ModifierId::MeatDrop), 30.0);
    }

    #[test]
    fn scalings_read_unscaled_sources() {
        let mut total = ModifierVector::new()
            .with(ModifierId::Smithsness, 5.0)
            .with(ModifierId::MeatDrop, 10.0);
        let inputs = DerivedInputs {
            scalings: vec![
                Scaling { target: ModifierId::MeatDrop, source: ModifierId::Smithsness, ratio: 1.0 },
                Scaling { target: ModifierId::ItemDrop, source: ModifierId::MeatDrop, ratio: 0.5 },
            ],
            ..inputs(BaseStats::default())
        };
        resolve(&mut total, &inputs, &CombinationTable::default());
        assert_eq!(total.get(ModifierId::MeatDrop), 15.0);
        assert_eq!(total.get(ModifierId::ItemDrop), 5.0);
    }

    #[test]
    fn caps_apply_last() {
        let mut total = ModifierVector::new().with(ModifierId::CombatRate, -30.0);
        resolve(&mut total, &inputs(BaseStats::default()), &CombinationTable::default());
        assert!((total.get(ModifierId::CombatRate) + 22.0).abs() < 1e-9);
    }
}
