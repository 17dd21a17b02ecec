use strum::{EnumCount, IntoEnumIterator};

use super::Candidate;
use crate::catalog::{CatalogOracle, FamiliarId, ItemId};
use crate::state::{Choice, Equipment, Slot};

/// A total mapping from slot to candidate.
///
/// Inhabitant slots hold the container's *resident* familiar. While the host
/// wears an [`Candidate::InhabitedContainer`] the resident always equals the
/// container's rider; when the host wears something else the resident is kept,
/// since the familiar stays in the unworn container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    slots: [Candidate; Slot::COUNT],
}

impl Assignment {
    /// Every slot empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads the character's current gear.
    pub fn from_equipment(equipment: &Equipment, catalog: &dyn CatalogOracle) -> Self {
        let mut assignment = Self::empty();
        for slot in Slot::iter() {
            let candidate = match (equipment.choice(slot), slot.inhabitant()) {
                (Choice::Item(item), Some(inhabitant))
                    if catalog.item(item).is_some_and(|def| def.hosts_inhabitant()) =>
                {
                    Candidate::InhabitedContainer {
                        item,
                        inhabitant: equipment.choice(inhabitant).familiar(),
                    }
                }
                (choice, _) => Candidate::from(choice),
            };
            assignment.slots[slot.index()] = candidate;
        }
        assignment
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> Candidate {
        self.slots[slot.index()]
    }

    /// Places `candidate` in `slot`, keeping host and resident in sync.
    pub fn set(&mut self, slot: Slot, candidate: Candidate) {
        self.slots[slot.index()] = candidate;

        if let (Some(inhabitant), Candidate::InhabitedContainer { inhabitant: rider, .. }) =
            (slot.inhabitant(), candidate)
        {
            self.slots[inhabitant.index()] = rider.map_or(Candidate::Empty, Candidate::Familiar);
        }

        if let Some(host) = slot.host() {
            if let Candidate::InhabitedContainer { item, .. } = self.get(host) {
                self.slots[host.index()] = Candidate::InhabitedContainer {
                    item,
                    inhabitant: candidate.familiar(),
                };
            }
        }
    }

    /// Copy with one slot replaced.
    pub fn with(mut self, slot: Slot, candidate: Candidate) -> Self {
        self.set(slot, candidate);
        self
    }

    /// Host-facing content of a slot; inhabitant slots report their resident.
    pub fn choice(&self, slot: Slot) -> Choice {
        self.get(slot).choice()
    }

    /// The active familiar.
    pub fn familiar(&self) -> Option<FamiliarId> {
        self.get(Slot::Familiar).familiar()
    }

    /// Familiars riding in containers that are actually worn.
    pub fn riders(&self) -> impl Iterator<Item = (Slot, FamiliarId)> + '_ {
        [Slot::Back, Slot::Hat].into_iter().filter_map(|host| {
            let rider = self.get(host).inhabitant()?;
            Some((host.inhabitant()?, rider))
        })
    }

    /// Items worn, in slot order.
    pub fn worn_items(&self) -> impl Iterator<Item = (Slot, ItemId)> + '_ {
        Slot::iter().filter_map(|slot| self.get(slot).item().map(|item| (slot, item)))
    }

    pub fn wears(&self, item: ItemId) -> bool {
        self.worn_items().any(|(_, worn)| worn == item)
    }

    pub fn worn_count(&self, item: ItemId) -> u32 {
        self.worn_items().filter(|(_, worn)| *worn == item).count() as u32
    }

    /// Number of slots whose host-facing content differs from `other`.
    pub fn changes(&self, other: &Assignment) -> u32 {
        Slot::iter()
            .filter(|slot| self.choice(*slot) != other.choice(*slot))
            .count() as u32
    }

    pub fn to_equipment(&self) -> Equipment {
        let mut equipment = Equipment::empty();
        for slot in Slot::iter() {
            equipment.set(slot, self.choice(slot));
        }
        equipment
    }
}
