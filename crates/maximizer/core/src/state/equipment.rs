//! What the character is wearing right now.
//!
//! Equipment is the input the maximizer diffs against and the state hosts
//! update after executing boosts.

use std::collections::BTreeMap;

use super::Slot;
use crate::catalog::{FamiliarId, ItemId};
use crate::diff::Boost;

/// Content of a single slot, as seen by hosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Choice {
    #[default]
    Empty,
    Item(ItemId),
    Familiar(FamiliarId),
}

impl Choice {
    pub fn item(self) -> Option<ItemId> {
        match self {
            Choice::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn familiar(self) -> Option<FamiliarId> {
        match self {
            Choice::Familiar(familiar) => Some(familiar),
            _ => None,
        }
    }
}

/// Equipment state of the character.
///
/// Item slots map to the item worn there. The familiar fields hold the active
/// familiar and the familiars riding in the Buddy Bjorn / Crown of Thrones.
/// A container's rider persists even while the container itself is not worn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub gear: BTreeMap<Slot, ItemId>,
    pub familiar: Option<FamiliarId>,
    pub bjorned: Option<FamiliarId>,
    pub enthroned: Option<FamiliarId>,
}

impl Equipment {
    /// Creates empty equipment (nothing worn, no familiar).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    pub fn item(&self, slot: Slot) -> Option<ItemId> {
        self.gear.get(&slot).copied()
    }

    /// Content of any slot, familiar slots included.
    pub fn choice(&self, slot: Slot) -> Choice {
        let familiar = match slot {
            Slot::Familiar => self.familiar,
            Slot::BuddyBjorn => self.bjorned,
            Slot::CrownOfThrones => self.enthroned,
            _ => return self.item(slot).map_or(Choice::Empty, Choice::Item),
        };
        familiar.map_or(Choice::Empty, Choice::Familiar)
    }

    /// Places `choice` in `slot`, returning what was there.
    ///
    /// Items are only stored in item slots and familiars only in familiar
    /// slots; a mismatched choice empties the slot.
    pub fn set(&mut self, slot: Slot, choice: Choice) -> Choice {
        let previous = self.choice(slot);
        match slot {
            Slot::Familiar => self.familiar = choice.familiar(),
            Slot::BuddyBjorn => self.bjorned = choice.familiar(),
            Slot::CrownOfThrones => self.enthroned = choice.familiar(),
            _ => match choice.item() {
                Some(item) => {
                    self.gear.insert(slot, item);
                }
                None => {
                    self.gear.remove(&slot);
                }
            },
        }
        previous
    }

    /// Equips an item, returning the previously equipped item if any.
    pub fn equip(&mut self, slot: Slot, item: ItemId) -> Option<ItemId> {
        self.set(slot, Choice::Item(item)).item()
    }

    /// Empties a slot, returning its item if any was equipped.
    pub fn unequip(&mut self, slot: Slot) -> Option<ItemId> {
        self.set(slot, Choice::Empty).item()
    }

    /// Number of slots currently wearing `item`.
    pub fn worn_count(&self, item: ItemId) -> u32 {
        self.gear.values().filter(|worn| **worn == item).count() as u32
    }

    /// Returns the equipment after executing `boosts` in order.
    pub fn apply(&self, boosts: &[Boost]) -> Self {
        let mut next = self.clone();
        for boost in boosts {
            next.set(boost.slot, boost.to);
        }
        next
    }
}

/// Builder for constructing equipment.
#[derive(Default)]
pub struct EquipmentBuilder {
    equipment: Equipment,
}

impl EquipmentBuilder {
    /// Wears an item in the given slot.
    pub fn slot(mut self, slot: Slot, item: ItemId) -> Self {
        self.equipment.equip(slot, item);
        self
    }

    pub fn hat(self, item: ItemId) -> Self {
        self.slot(Slot::Hat, item)
    }

    pub fn weapon(self, item: ItemId) -> Self {
        self.slot(Slot::Weapon, item)
    }

    pub fn back(self, item: ItemId) -> Self {
        self.slot(Slot::Back, item)
    }

    /// Sets the active familiar.
    pub fn familiar(mut self, familiar: FamiliarId) -> Self {
        self.equipment.familiar = Some(familiar);
        self
    }

    /// Sets the Buddy Bjorn rider.
    pub fn bjorned(mut self, familiar: FamiliarId) -> Self {
        self.equipment.bjorned = Some(familiar);
        self
    }

    /// Sets the Crown of Thrones rider.
    pub fn enthroned(mut self, familiar: FamiliarId) -> Self {
        self.equipment.enthroned = Some(familiar);
        self
    }

    /// Builds the equipment.
    pub fn build(self) -> Equipment {
        self.equipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn familiar_slots_read_familiar_fields() {
        let equipment = Equipment::builder()
            .hat(ItemId(1))
            .familiar(FamiliarId(3))
            .bjorned(FamiliarId(4))
            .build();
        assert_eq!(equipment.choice(Slot::Hat), Choice::Item(ItemId(1)));
        assert_eq!(equipment.choice(Slot::Familiar), Choice::Familiar(FamiliarId(3)));
        assert_eq!(equipment.choice(Slot::BuddyBjorn), Choice::Familiar(FamiliarId(4)));
        assert_eq!(equipment.choice(Slot::CrownOfThrones), Choice::Empty);
        assert_eq!(equipment.choice(Slot::Pants), Choice::Empty);
    }

    #[test]
    fn apply_executes_boosts_in_order() {
        let equipment = Equipment::builder().hat(ItemId(1)).build();
        let boosts = [
            Boost::new(Slot::Hat, Choice::Item(ItemId(1)), Choice::Item(ItemId(2))),
            Boost::new(Slot::Back, Choice::Empty, Choice::Item(ItemId(5))),
            Boost::new(Slot::BuddyBjorn, Choice::Empty, Choice::Familiar(FamiliarId(8))),
        ];
        let next = equipment.apply(&boosts);
        assert_eq!(next.item(Slot::Hat), Some(ItemId(2)));
        assert_eq!(next.item(Slot::Back), Some(ItemId(5)));
        assert_eq!(next.bjorned, Some(FamiliarId(8)));
        // original untouched
        assert_eq!(equipment.item(Slot::Hat), Some(ItemId(1)));
    }

    #[test]
    fn unequip_returns_previous_item() {
        let mut equipment = Equipment::builder().weapon(ItemId(4)).build();
        assert_eq!(equipment.unequip(Slot::Weapon), Some(ItemId(4)));
        assert_eq!(equipment.unequip(Slot::Weapon), None);
        assert_eq!(equipment.worn_count(ItemId(4)), 0);
    }
}
