use bitflags::bitflags;
use strum::{Display, EnumString};

use super::{EffectId, FamiliarId, ItemId, PathId};
use crate::modifiers::{ModifierId, ModifierVector};
use crate::state::Slot;

/// Equipment category of an item, i.e. which slots accept it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSlot {
    Hat,
    Weapon,
    Offhand,
    Back,
    Shirt,
    Pants,
    Accessory,
    FamiliarEquipment,
}

impl ItemSlot {
    /// Slots that accept items of this category, in slot order.
    pub const fn slots(self) -> &'static [Slot] {
        match self {
            ItemSlot::Hat => &[Slot::Hat],
            ItemSlot::Weapon => &[Slot::Weapon],
            ItemSlot::Offhand => &[Slot::Offhand],
            ItemSlot::Back => &[Slot::Back],
            ItemSlot::Shirt => &[Slot::Shirt],
            ItemSlot::Pants => &[Slot::Pants],
            ItemSlot::Accessory => &[Slot::Accessory1, Slot::Accessory2, Slot::Accessory3],
            ItemSlot::FamiliarEquipment => &[Slot::FamiliarEquipment],
        }
    }

    pub fn accepts(self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }
}

bitflags! {
    /// Structural properties that constrain how an item may be worn.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// At most one copy may be worn even when several are owned.
        const SINGLE_EQUIP = 1 << 0;
        /// Occupies both hands; the off-hand slot must stay empty.
        const TWO_HANDED = 1 << 1;
        /// Carries a familiar (Buddy Bjorn on the back, Crown of Thrones on the head).
        const INHABITANT_HOST = 1 << 2;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ItemFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ItemFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

/// Mutually exclusive item family (e.g. watches): at most one member may be worn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusiveGroup(pub u16);

/// Character stats referenced by equip requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Muscle,
    Mysticality,
    Moxie,
}

impl Stat {
    /// The derived modifier holding this stat's buffed value.
    pub const fn buffed(self) -> ModifierId {
        match self {
            Stat::Muscle => ModifierId::BuffedMuscle,
            Stat::Mysticality => ModifierId::BuffedMysticality,
            Stat::Moxie => ModifierId::BuffedMoxie,
        }
    }

    /// Flat and percent bonus modifiers feeding this stat.
    pub const fn bonuses(self) -> (ModifierId, ModifierId) {
        match self {
            Stat::Muscle => (ModifierId::Muscle, ModifierId::MusclePercent),
            Stat::Mysticality => (ModifierId::Mysticality, ModifierId::MysticalityPercent),
            Stat::Moxie => (ModifierId::Moxie, ModifierId::MoxiePercent),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterClass {
    SealClubber,
    TurtleTamer,
    Pastamancer,
    Sauceror,
    DiscoBandit,
    AccordionThief,
}

/// Minimum buffed stat needed to wear an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRequirement {
    pub stat: Stat,
    pub minimum: i32,
}

/// Conditions under which an item may be worn.
///
/// `class`, `path` and `effect` depend only on the character snapshot and are
/// checked once when the candidate space is built. `stat` and `familiar`
/// depend on the assignment under test and are checked by the
/// [`crate::EquipabilityResolver`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirement {
    pub stat: Option<StatRequirement>,
    pub class: Option<CharacterClass>,
    pub path: Option<PathId>,
    pub effect: Option<EffectId>,
    /// Familiar equipment usable only by this familiar.
    pub familiar: Option<FamiliarId>,
}

impl Requirement {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn stat(stat: Stat, minimum: i32) -> Self {
        Self {
            stat: Some(StatRequirement { stat, minimum }),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_path(mut self, path: PathId) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_effect(mut self, effect: EffectId) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_familiar(mut self, familiar: FamiliarId) -> Self {
        self.familiar = Some(familiar);
        self
    }
}

/// A modifier whose value depends on another aggregated modifier,
/// e.g. `Meat Drop += 1 × Smithsness`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaling {
    pub target: ModifierId,
    pub source: ModifierId,
    pub ratio: f64,
}

/// Immutable catalog entry for an equippable (or not) item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    /// `None` for items that cannot be equipped at all.
    pub slot: Option<ItemSlot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ModifierVector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: Requirement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusive_group: Option<ExclusiveGroup>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Vec<Scaling>,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>, slot: ItemSlot) -> Self {
        Self {
            id,
            name: name.into(),
            slot: Some(slot),
            modifiers: ModifierVector::new(),
            requirement: Requirement::none(),
            flags: ItemFlags::empty(),
            exclusive_group: None,
            scaling: Vec::new(),
        }
    }

    /// An item that exists in the catalog but has no equipment slot.
    pub fn unequippable(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            slot: None,
            ..Self::new(id, name, ItemSlot::Hat)
        }
    }

    pub fn with_modifier(mut self, id: ModifierId, value: f64) -> Self {
        self.modifiers.add(id, value);
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_exclusive_group(mut self, group: ExclusiveGroup) -> Self {
        self.exclusive_group = Some(group);
        self
    }

    pub fn with_scaling(mut self, target: ModifierId, source: ModifierId, ratio: f64) -> Self {
        self.scaling.push(Scaling {
            target,
            source,
            ratio,
        });
        self
    }

    pub fn accepts(&self, slot: Slot) -> bool {
        self.slot.is_some_and(|category| category.accepts(slot))
    }

    pub fn hosts_inhabitant(&self) -> bool {
        self.flags.contains(ItemFlags::INHABITANT_HOST)
    }

    pub fn is_two_handed(&self) -> bool {
        self.flags.contains(ItemFlags::TWO_HANDED)
    }

    pub fn is_single_equip(&self) -> bool {
        self.flags.contains(ItemFlags::SINGLE_EQUIP)
    }

    /// Case-insensitive name match used by objective lookups.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
