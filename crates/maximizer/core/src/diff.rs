//! Recommendation diff: the boosts that turn current gear into the winner.

use crate::candidates::Assignment;
use crate::catalog::CatalogOracle;
use crate::state::{Choice, Slot};

/// One recommended change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boost {
    pub slot: Slot,
    pub from: Choice,
    pub to: Choice,
}

impl Boost {
    pub fn new(slot: Slot, from: Choice, to: Choice) -> Self {
        Self { slot, from, to }
    }

    /// Host command line for this boost, e.g. `equip acc2 baywatch`.
    pub fn describe(&self, catalog: &dyn CatalogOracle) -> String {
        let name = |choice: Choice| match choice {
            Choice::Empty => "none".to_string(),
            Choice::Item(item) => catalog
                .item(item)
                .map_or_else(|| format!("item #{}", item.0), |definition| definition.name.clone()),
            Choice::Familiar(familiar) => catalog.familiar(familiar).map_or_else(
                || format!("familiar #{}", familiar.0),
                |definition| definition.name.clone(),
            ),
        };

        match (self.slot, self.to) {
            (Slot::Familiar, to) => format!("familiar {}", name(to)),
            (Slot::BuddyBjorn, to) => format!("bjornify {}", name(to)),
            (Slot::CrownOfThrones, to) => format!("enthrone {}", name(to)),
            (slot, Choice::Empty) => format!("unequip {slot}"),
            (slot, to) => format!("equip {slot} {}", name(to)),
        }
    }
}

/// Boosts from `current` to `winner`.
///
/// Unchanged slots are omitted. Boosts follow slot order, except that a
/// rider change comes right after its host slot.
pub fn emit_boosts(current: &Assignment, winner: &Assignment) -> Vec<Boost> {
    let mut boosts = Vec::new();
    let mut push = |slot: Slot| {
        let (from, to) = (current.choice(slot), winner.choice(slot));
        if from != to {
            boosts.push(Boost::new(slot, from, to));
        }
    };

    for slot in Slot::searchable() {
        push(slot);
        if let Some(inhabitant) = slot.inhabitant() {
            push(inhabitant);
        }
    }
    boosts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Candidate;
    use crate::catalog::{
        CatalogSnapshot, FamiliarDefinition, FamiliarId, ItemDefinition, ItemFlags, ItemId, ItemSlot,
    };

    const HELMET: ItemId = ItemId(1);
    const CROWN: ItemId = ItemId(2);
    const WATCH: ItemId = ItemId(3);
    const DICE: FamiliarId = FamiliarId(1);

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                ItemDefinition::new(HELMET, "helmet turtle", ItemSlot::Hat),
                ItemDefinition::new(CROWN, "Crown of Thrones", ItemSlot::Hat)
                    .with_flags(ItemFlags::INHABITANT_HOST),
                ItemDefinition::new(WATCH, "baywatch", ItemSlot::Accessory),
            ],
            vec![FamiliarDefinition::new(DICE, "Dice")],
            Vec::new(),
        )
    }

    #[test]
    fn identical_assignments_emit_nothing() {
        let current = Assignment::empty().with(Slot::Hat, Candidate::Item(HELMET));
        assert!(emit_boosts(&current, &current).is_empty());
    }

    #[test]
    fn riders_follow_their_host() {
        let current = Assignment::empty()
            .with(Slot::Hat, Candidate::Item(HELMET))
            .with(Slot::Familiar, Candidate::Familiar(FamiliarId(9)));
        let winner = current
            .with(
                Slot::Hat,
                Candidate::InhabitedContainer { item: CROWN, inhabitant: Some(DICE) },
            )
            .with(Slot::Accessory2, Candidate::Item(WATCH));

        let boosts = emit_boosts(&current, &winner);
        assert_eq!(
            boosts,
            vec![
                Boost::new(Slot::Hat, Choice::Item(HELMET), Choice::Item(CROWN)),
                Boost::new(Slot::CrownOfThrones, Choice::Empty, Choice::Familiar(DICE)),
                Boost::new(Slot::Accessory2, Choice::Empty, Choice::Item(WATCH)),
            ]
        );

        let catalog = catalog();
        let lines: Vec<String> = boosts.iter().map(|boost| boost.describe(&catalog)).collect();
        assert_eq!(
            lines,
            ["equip hat Crown of Thrones", "enthrone Dice", "equip acc2 baywatch"]
        );
    }

    #[test]
    fn unequip_is_described_per_slot() {
        let boost = Boost::new(Slot::Offhand, Choice::Item(HELMET), Choice::Empty);
        assert_eq!(boost.describe(&catalog()), "unequip off-hand");
    }
}
