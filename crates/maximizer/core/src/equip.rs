//! Equipability resolution for whole assignments.
//!
//! Requirements are tested against the buffed stats of the assignment under
//! test, never the pre-equipment baseline. The only self-reference is through
//! additive stat bonuses, which the aggregator has already folded in, so one
//! pass over the slots suffices.
//!
//! ## Checks
//!
//! - the item fits the slot (containers only on their host slot)
//! - copies worn ≤ copies available; single-equip items worn at most once
//! - at most one member of each exclusive group
//! - two-handed weapons leave the off-hand empty
//! - stat requirements against buffed stats
//! - class, path and effect restrictions
//! - familiar equipment restricted to a familiar needs that familiar active
//! - the active familiar and both riders are owned and pairwise distinct
//!
//! An item left in the slot it was worn in when the invocation started is
//! exempt from requirement checks (stat, class, path, effect), so keeping
//! current gear is always legal. Another copy of it, or the same item moved to
//! another slot, is checked like any other candidate. Structural checks
//! (counts, groups, hands, familiars) apply to everything.

use std::collections::BTreeSet;

use crate::candidates::{Assignment, Candidate};
use crate::catalog::{CatalogOracle, ExclusiveGroup, FamiliarId, ItemDefinition, ItemId, Requirement};
use crate::modifiers::ModifierVector;
use crate::state::{CharacterState, Slot};

// ============================================================================
// Legality
// ============================================================================

/// Outcome of checking an assignment.
///
/// Illegal assignments still carry a violation count so the search can prefer
/// "less broken" ones while it looks for a legal one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Legality {
    violations: u32,
    blocked: Option<Slot>,
}

impl Legality {
    pub const fn legal() -> Self {
        Self {
            violations: 0,
            blocked: None,
        }
    }

    pub const fn is_legal(&self) -> bool {
        self.violations == 0
    }

    pub const fn violations(&self) -> u32 {
        self.violations
    }

    /// First slot (in slot order) found in violation.
    pub const fn blocked(&self) -> Option<Slot> {
        self.blocked
    }

    fn violate(&mut self, slot: Slot) {
        self.violations += 1;
        if self.blocked.is_none_or(|blocked| slot < blocked) {
            self.blocked = Some(slot);
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

pub struct EquipabilityResolver<'a> {
    catalog: &'a dyn CatalogOracle,
    character: &'a CharacterState,
}

impl<'a> EquipabilityResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, character: &'a CharacterState) -> Self {
        Self { catalog, character }
    }

    /// Whether `item` in `slot` is exempt from requirement re-validation:
    /// it is the item worn there when the invocation started.
    pub fn is_exempt(&self, slot: Slot, item: ItemId) -> bool {
        self.character.equipment.item(slot) == Some(item)
    }

    /// Checks every slot of `assignment` against `stats`, the assignment's own
    /// aggregated modifiers (buffed stats included).
    pub fn check(&self, assignment: &Assignment, stats: &ModifierVector) -> Legality {
        let mut legality = Legality::legal();
        let mut groups: BTreeSet<ExclusiveGroup> = BTreeSet::new();
        let mut counted: BTreeSet<ItemId> = BTreeSet::new();

        for (slot, item) in assignment.worn_items() {
            let Some(definition) = self.catalog.item(item) else {
                legality.violate(slot);
                continue;
            };
            if !self.fits(slot, assignment.get(slot), definition) {
                legality.violate(slot);
            }

            // per-item checks run once, at the first slot wearing it
            if counted.insert(item) {
                let worn = assignment.worn_count(item);
                let limit = if definition.is_single_equip() {
                    1
                } else {
                    self.character.available(item)
                };
                if worn > limit {
                    legality.violate(slot);
                }
            }

            if let Some(group) = definition.exclusive_group {
                if !groups.insert(group) {
                    legality.violate(slot);
                }
            }

            if slot == Slot::Weapon
                && definition.is_two_handed()
                && !assignment.get(Slot::Offhand).is_empty()
            {
                legality.violate(Slot::Offhand);
            }

            if !self.is_exempt(slot, item) && !self.meets(&definition.requirement, stats) {
                legality.violate(slot);
            }

            if let Some(required) = definition.requirement.familiar {
                if slot == Slot::FamiliarEquipment && assignment.familiar() != Some(required) {
                    legality.violate(slot);
                }
            }
        }

        self.check_familiars(assignment, &mut legality);
        legality
    }

    fn fits(&self, slot: Slot, candidate: Candidate, definition: &ItemDefinition) -> bool {
        if !definition.accepts(slot) {
            return false;
        }
        match candidate {
            Candidate::InhabitedContainer { .. } => {
                slot.inhabitant().is_some() && definition.hosts_inhabitant()
            }
            _ => true,
        }
    }

    fn meets(&self, requirement: &Requirement, stats: &ModifierVector) -> bool {
        let character = self.character;
        requirement
            .stat
            .is_none_or(|req| stats.get(req.stat.buffed()) >= f64::from(req.minimum))
            && requirement.class.is_none_or(|class| character.class == Some(class))
            && requirement.path.is_none_or(|path| character.path == Some(path))
            && requirement
                .effect
                .is_none_or(|effect| character.has_effect(effect))
    }

    fn check_familiars(&self, assignment: &Assignment, legality: &mut Legality) {
        let mut seen: Vec<FamiliarId> = Vec::with_capacity(3);

        if let Some(active) = assignment.familiar() {
            if self.character.owned_familiar(active).is_none() {
                legality.violate(Slot::Familiar);
            }
            seen.push(active);
        }

        for (slot, rider) in assignment.riders() {
            let can_ride = self.character.owned_familiar(rider).is_some()
                && self
                    .catalog
                    .familiar(rider)
                    .is_some_and(|definition| definition.can_inhabit);
            if !can_ride || seen.contains(&rider) {
                legality.violate(slot);
            }
            seen.push(rider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogSnapshot, FamiliarDefinition, ItemFlags, ItemSlot, Stat,
    };
    use crate::modifiers::ModifierId;
    use crate::state::Equipment;

    const SLIPPERS: ItemId = ItemId(1);
    const SWORD: ItemId = ItemId(2);
    const SHIELD: ItemId = ItemId(3);
    const WATCH: ItemId = ItemId(4);
    const BAYWATCH: ItemId = ItemId(5);
    const BJORN: ItemId = ItemId(6);
    const RING: ItemId = ItemId(7);
    const LEASH: ItemId = ItemId(8);
    const DICE: FamiliarId = FamiliarId(1);
    const MEDIUM: FamiliarId = FamiliarId(2);

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                ItemDefinition::new(SLIPPERS, "Fuzzy Slippers of Hatred", ItemSlot::Accessory)
                    .with_requirement(Requirement::stat(Stat::Moxie, 125)),
                ItemDefinition::new(SWORD, "claymore", ItemSlot::Weapon)
                    .with_flags(ItemFlags::TWO_HANDED),
                ItemDefinition::new(SHIELD, "shield", ItemSlot::Offhand),
                ItemDefinition::new(WATCH, "Counterclockwise Watch", ItemSlot::Accessory)
                    .with_exclusive_group(ExclusiveGroup(1)),
                ItemDefinition::new(BAYWATCH, "baywatch", ItemSlot::Accessory)
                    .with_exclusive_group(ExclusiveGroup(1)),
                ItemDefinition::new(BJORN, "Buddy Bjorn", ItemSlot::Back)
                    .with_flags(ItemFlags::INHABITANT_HOST),
                ItemDefinition::new(RING, "ring", ItemSlot::Accessory)
                    .with_flags(ItemFlags::SINGLE_EQUIP),
                ItemDefinition::new(LEASH, "medium leash", ItemSlot::FamiliarEquipment)
                    .with_requirement(Requirement::none().with_familiar(MEDIUM)),
            ],
            vec![
                FamiliarDefinition::new(DICE, "Dice"),
                FamiliarDefinition::new(MEDIUM, "Happy Medium"),
            ],
            Vec::new(),
        )
    }

    fn character(equipment: Equipment) -> CharacterState {
        CharacterState::new()
            .with_item(SLIPPERS, 1)
            .with_item(SWORD, 1)
            .with_item(SHIELD, 1)
            .with_item(WATCH, 1)
            .with_item(BAYWATCH, 1)
            .with_item(BJORN, 1)
            .with_item(RING, 3)
            .with_item(LEASH, 1)
            .with_familiar(DICE, 5)
            .with_familiar(MEDIUM, 5)
            .with_equipment(equipment)
    }

    fn check(character: &CharacterState, assignment: &Assignment, moxie: f64) -> Legality {
        let catalog = catalog();
        let stats = ModifierVector::new().with(ModifierId::BuffedMoxie, moxie);
        EquipabilityResolver::new(&catalog, character).check(assignment, &stats)
    }

    #[test]
    fn stat_requirements_use_buffed_stats() {
        let character = character(Equipment::empty());
        let assignment = Assignment::empty().with(Slot::Accessory1, Candidate::Item(SLIPPERS));
        assert!(!check(&character, &assignment, 0.0).is_legal());
        assert!(check(&character, &assignment, 125.0).is_legal());
    }

    #[test]
    fn current_gear_is_exempt_from_requirements() {
        let equipment = Equipment::builder().slot(Slot::Accessory1, SLIPPERS).build();
        let character = character(equipment);
        let kept = Assignment::empty().with(Slot::Accessory1, Candidate::Item(SLIPPERS));
        assert!(check(&character, &kept, 0.0).is_legal());
    }

    #[test]
    fn exemption_does_not_follow_the_item() {
        let equipment = Equipment::builder().slot(Slot::Accessory1, SLIPPERS).build();
        let character = character(equipment);

        // a second copy next to the worn pair
        let copy = Assignment::empty()
            .with(Slot::Accessory1, Candidate::Item(SLIPPERS))
            .with(Slot::Accessory2, Candidate::Item(SLIPPERS));
        let legality = check(&character, &copy, 0.0);
        assert_eq!(legality.violations(), 1);
        assert_eq!(legality.blocked(), Some(Slot::Accessory2));

        // the worn pair moved to another slot
        let moved = Assignment::empty().with(Slot::Accessory3, Candidate::Item(SLIPPERS));
        assert_eq!(check(&character, &moved, 0.0).blocked(), Some(Slot::Accessory3));
    }

    #[test]
    fn two_handed_weapons_need_a_free_offhand() {
        let character = character(Equipment::empty());
        let assignment = Assignment::empty()
            .with(Slot::Weapon, Candidate::Item(SWORD))
            .with(Slot::Offhand, Candidate::Item(SHIELD));
        let legality = check(&character, &assignment, 0.0);
        assert_eq!(legality.violations(), 1);
        assert_eq!(legality.blocked(), Some(Slot::Offhand));
    }

    #[test]
    fn exclusive_groups_and_single_equip() {
        let character = character(Equipment::empty());
        let watches = Assignment::empty()
            .with(Slot::Accessory1, Candidate::Item(WATCH))
            .with(Slot::Accessory2, Candidate::Item(BAYWATCH));
        assert_eq!(check(&character, &watches, 0.0).blocked(), Some(Slot::Accessory2));

        let rings = Assignment::empty()
            .with(Slot::Accessory1, Candidate::Item(RING))
            .with(Slot::Accessory3, Candidate::Item(RING));
        assert!(!check(&character, &rings, 0.0).is_legal());
    }

    #[test]
    fn copies_are_limited_by_availability() {
        let character = character(Equipment::empty());
        let assignment = Assignment::empty()
            .with(Slot::Accessory1, Candidate::Item(SLIPPERS))
            .with(Slot::Accessory2, Candidate::Item(SLIPPERS));
        assert_eq!(check(&character, &assignment, 200.0).violations(), 1);
    }

    #[test]
    fn familiars_must_be_distinct() {
        let character = character(Equipment::empty());
        let assignment = Assignment::empty()
            .with(Slot::Familiar, Candidate::Familiar(DICE))
            .with(
                Slot::Back,
                Candidate::InhabitedContainer { item: BJORN, inhabitant: Some(DICE) },
            );
        assert_eq!(check(&character, &assignment, 0.0).blocked(), Some(Slot::BuddyBjorn));

        let assignment = assignment.with(Slot::BuddyBjorn, Candidate::Familiar(MEDIUM));
        assert!(check(&character, &assignment, 0.0).is_legal());
    }

    #[test]
    fn familiar_equipment_follows_its_familiar() {
        let character = character(Equipment::empty());
        let assignment = Assignment::empty()
            .with(Slot::Familiar, Candidate::Familiar(DICE))
            .with(Slot::FamiliarEquipment, Candidate::Item(LEASH));
        assert!(!check(&character, &assignment, 0.0).is_legal());

        let assignment = assignment.with(Slot::Familiar, Candidate::Familiar(MEDIUM));
        assert!(check(&character, &assignment, 0.0).is_legal());
    }
}
