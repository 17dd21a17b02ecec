//! Modifier aggregation and assignment evaluation.
//!
//! [`Aggregator`] folds a full assignment into one [`ModifierVector`]:
//!
//! 1. start from the character's baseline (innate skills, sign, effects)
//! 2. add every worn item, the active familiar and container riders
//! 3. add synergies whose members are all present
//! 4. resolve derived modifiers (see [`derived`])
//!
//! [`Evaluator`] then reduces the vector to a score and pairs it with the
//! equipability verdict.

mod derived;
mod evaluation;

pub use evaluation::{Evaluation, Evaluator};

use crate::candidates::{Assignment, Candidate};
use crate::catalog::{CatalogOracle, ItemId, Synergy, SynergyMember};
use crate::modifiers::{CombinationTable, ModifierVector};
use crate::state::{CharacterState, Slot};

use derived::DerivedInputs;

pub struct Aggregator<'a> {
    catalog: &'a dyn CatalogOracle,
    character: &'a CharacterState,
    rules: CombinationTable,
}

impl<'a> Aggregator<'a> {
    /// Resolves the combination table from the catalog once.
    pub fn new(catalog: &'a dyn CatalogOracle, character: &'a CharacterState) -> Self {
        Self {
            catalog,
            character,
            rules: CombinationTable::from_fn(|id| catalog.combination(id)),
        }
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn character(&self) -> &'a CharacterState {
        self.character
    }

    pub fn rules(&self) -> &CombinationTable {
        &self.rules
    }

    /// Aggregated modifiers of `assignment`, derived modifiers included.
    pub fn aggregate(&self, assignment: &Assignment) -> ModifierVector {
        let mut total = self.character.baseline;

        for slot in Slot::searchable() {
            match assignment.get(slot) {
                Candidate::Empty => {}
                Candidate::Item(item) => self.add_item(&mut total, item),
                Candidate::InhabitedContainer { item, inhabitant } => {
                    self.add_item(&mut total, item);
                    if let Some(rider) = inhabitant.and_then(|id| self.catalog.familiar(id)) {
                        total.combine(&rider.inhabitant, &self.rules);
                    }
                }
                Candidate::Familiar(familiar) => {
                    if let Some(definition) = self.catalog.familiar(familiar) {
                        total.combine(&definition.modifiers, &self.rules);
                    }
                }
            }
        }

        for synergy in self.catalog.synergies() {
            if is_active(synergy, assignment) {
                tracing::trace!(synergy = %synergy.name, "synergy active");
                total.combine(&synergy.modifiers, &self.rules);
            }
        }

        let inputs = DerivedInputs {
            familiar: assignment.familiar().and_then(|id| {
                let definition = self.catalog.familiar(id)?;
                let owned = self.character.owned_familiar(id)?;
                Some((definition, owned.weight))
            }),
            scalings: assignment
                .worn_items()
                .filter_map(|(_, item)| self.catalog.item(item))
                .flat_map(|definition| definition.scaling.iter().copied())
                .collect(),
            stats: self.character.stats,
        };
        derived::resolve(&mut total, &inputs, &self.rules);
        total
    }

    /// Effective weight of the active familiar, or `None` without one.
    pub fn familiar_weight(&self, assignment: &Assignment) -> Option<f64> {
        let owned = self.character.owned_familiar(assignment.familiar()?)?;
        Some(derived::familiar_weight(owned.weight, &self.aggregate(assignment)))
    }

    fn add_item(&self, total: &mut ModifierVector, item: ItemId) {
        if let Some(definition) = self.catalog.item(item) {
            total.combine(&definition.modifiers, &self.rules);
        }
    }
}

/// A synergy applies when every member is present: items worn in any slot,
/// familiars as the active familiar.
pub(crate) fn is_active(synergy: &Synergy, assignment: &Assignment) -> bool {
    !synergy.members.is_empty()
        && synergy.members.iter().all(|member| match member {
            SynergyMember::Item(item) => assignment.wears(*item),
            SynergyMember::Familiar(familiar) => assignment.familiar() == Some(*familiar),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogSnapshot, FamiliarDefinition, FamiliarId, ItemDefinition, ItemFlags, ItemSlot,
    };
    use crate::modifiers::{Combination, ModifierId};
    use crate::state::{BaseStats, Equipment};

    const HELMET: ItemId = ItemId(1);
    const CLOAK: ItemId = ItemId(2);
    const BJORN: ItemId = ItemId(3);
    const DICE: FamiliarId = FamiliarId(1);
    const MEDIUM: FamiliarId = FamiliarId(2);

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                ItemDefinition::new(HELMET, "helmet turtle", ItemSlot::Hat)
                    .with_modifier(ModifierId::Muscle, 1.0),
                ItemDefinition::new(CLOAK, "barskin cloak", ItemSlot::Back)
                    .with_modifier(ModifierId::Muscle, 7.0),
                ItemDefinition::new(BJORN, "Buddy Bjorn", ItemSlot::Back)
                    .with_flags(ItemFlags::INHABITANT_HOST),
            ],
            vec![
                FamiliarDefinition::new(DICE, "Dice")
                    .with_inhabitant(ModifierId::Muscle, 10.0)
                    .with_inhabitant(ModifierId::Moxie, 10.0),
                FamiliarDefinition::new(MEDIUM, "Happy Medium")
                    .with_per_pound(ModifierId::MeatDrop, 1.0)
                    .with_modifier(ModifierId::ItemDrop, 5.0),
            ],
            vec![
                Synergy::new("turtle cloak", [SynergyMember::Item(HELMET), SynergyMember::Item(CLOAK)])
                    .with_modifier(ModifierId::MaximumHp, 20.0),
            ],
        )
    }

    fn character() -> CharacterState {
        CharacterState::new()
            .with_stats(BaseStats::new(10, 10, 10))
            .with_baseline(ModifierVector::new().with(ModifierId::FamiliarWeight, 5.0))
            .with_familiar(DICE, 1)
            .with_familiar(MEDIUM, 10)
    }

    #[test]
    fn baseline_items_and_derived_stats() {
        let catalog = catalog();
        let character = character();
        let aggregator = Aggregator::new(&catalog, &character);
        let assignment = Assignment::empty().with(Slot::Hat, Candidate::Item(HELMET));

        let total = aggregator.aggregate(&assignment);
        assert_eq!(total.get(ModifierId::Muscle), 1.0);
        assert_eq!(total.get(ModifierId::BuffedMuscle), 11.0);
        assert_eq!(total.get(ModifierId::FamiliarWeight), 5.0);
        assert_eq!(total.get(ModifierId::MaximumHp), 0.0);
    }

    #[test]
    fn synergies_need_every_member() {
        let catalog = catalog();
        let character = character();
        let aggregator = Aggregator::new(&catalog, &character);
        let both = Assignment::empty()
            .with(Slot::Hat, Candidate::Item(HELMET))
            .with(Slot::Back, Candidate::Item(CLOAK));
        assert_eq!(aggregator.aggregate(&both).get(ModifierId::MaximumHp), 20.0);
        assert_eq!(aggregator.aggregate(&both).get(ModifierId::BuffedMuscle), 18.0);
    }

    #[test]
    fn riders_contribute_fixed_bonuses() {
        let catalog = catalog();
        let character = character();
        let aggregator = Aggregator::new(&catalog, &character);
        let assignment = Assignment::empty().with(
            Slot::Back,
            Candidate::InhabitedContainer { item: BJORN, inhabitant: Some(DICE) },
        );
        let total = aggregator.aggregate(&assignment);
        assert_eq!(total.get(ModifierId::BuffedMuscle), 20.0);
        assert_eq!(total.get(ModifierId::BuffedMoxie), 20.0);

        // the resident of an unworn container contributes nothing
        let unworn = assignment.with(Slot::Back, Candidate::Item(CLOAK));
        assert_eq!(aggregator.aggregate(&unworn).get(ModifierId::BuffedMoxie), 10.0);
    }

    #[test]
    fn active_familiar_scales_with_weight() {
        let catalog = catalog();
        let character = character();
        let aggregator = Aggregator::new(&catalog, &character);
        let assignment = Assignment::empty().with(Slot::Familiar, Candidate::Familiar(MEDIUM));
        let total = aggregator.aggregate(&assignment);
        assert_eq!(total.get(ModifierId::MeatDrop), 15.0);
        assert_eq!(total.get(ModifierId::ItemDrop), 5.0);
        assert_eq!(aggregator.familiar_weight(&assignment), Some(15.0));
        assert_eq!(aggregator.familiar_weight(&Assignment::empty()), None);
    }

    #[test]
    fn combination_rules_come_from_the_catalog() {
        let catalog = catalog().with_combination(ModifierId::Muscle, Combination::Multiplicative);
        let character = character();
        let aggregator = Aggregator::new(&catalog, &character);
        assert_eq!(aggregator.rules().rule(ModifierId::Muscle), Combination::Multiplicative);
    }

    #[test]
    fn current_equipment_round_trips_through_aggregation() {
        let catalog = catalog();
        let character = character()
            .with_equipment(Equipment::builder().hat(HELMET).familiar(MEDIUM).build());
        let aggregator = Aggregator::new(&catalog, &character);
        let current = Assignment::from_equipment(&character.equipment, &catalog);
        assert_eq!(aggregator.aggregate(&current).get(ModifierId::BuffedMuscle), 11.0);
    }
}
