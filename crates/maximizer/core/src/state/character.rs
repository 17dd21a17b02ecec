use std::collections::BTreeMap;

use super::Equipment;
use crate::catalog::{CharacterClass, EffectId, FamiliarId, ItemId, PathId, Stat};
use crate::modifiers::ModifierVector;

/// Unbuffed character stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub muscle: i32,
    pub mysticality: i32,
    pub moxie: i32,
}

impl BaseStats {
    pub fn new(muscle: i32, mysticality: i32, moxie: i32) -> Self {
        Self {
            muscle,
            mysticality,
            moxie,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Muscle => self.muscle,
            Stat::Mysticality => self.mysticality,
            Stat::Moxie => self.moxie,
        }
    }
}

/// A familiar in the terrarium, with its trained base weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedFamiliar {
    pub id: FamiliarId,
    pub weight: u32,
}

/// Immutable character snapshot captured at invocation start.
///
/// `baseline` carries everything that is not equipment: innate skills,
/// zodiac sign, active effects. `inventory` counts unequipped copies only;
/// worn copies are read from `equipment`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterState {
    pub class: Option<CharacterClass>,
    pub path: Option<PathId>,
    pub stats: BaseStats,
    pub baseline: ModifierVector,
    pub effects: Vec<EffectId>,
    pub inventory: BTreeMap<ItemId, u32>,
    pub familiars: Vec<OwnedFamiliar>,
    pub equipment: Equipment,
}

impl CharacterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_path(mut self, path: PathId) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_baseline(mut self, baseline: ModifierVector) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_effect(mut self, effect: EffectId) -> Self {
        self.effects.push(effect);
        self
    }

    /// Adds unequipped copies of an item to the inventory.
    pub fn with_item(mut self, item: ItemId, count: u32) -> Self {
        *self.inventory.entry(item).or_insert(0) += count;
        self
    }

    pub fn with_familiar(mut self, id: FamiliarId, weight: u32) -> Self {
        self.familiars.retain(|owned| owned.id != id);
        self.familiars.push(OwnedFamiliar { id, weight });
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Copies available for wearing: inventory plus currently worn copies.
    pub fn available(&self, item: ItemId) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0) + self.equipment.worn_count(item)
    }

    pub fn owned_familiar(&self, id: FamiliarId) -> Option<&OwnedFamiliar> {
        self.familiars.iter().find(|owned| owned.id == id)
    }

    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.effects.contains(&effect)
    }
}
