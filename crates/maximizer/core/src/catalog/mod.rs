//! Read-only item, familiar and synergy data.
//!
//! The catalog is an external collaborator: hosts populate it from their
//! static databases and hand it to the maximizer behind [`CatalogOracle`].
//! [`CatalogSnapshot`] is the in-memory arena implementation, indexed by the
//! stable ids below rather than by pointers into mutable tables.
mod familiar;
mod item;
mod snapshot;
mod synergy;

pub use familiar::FamiliarDefinition;
pub use item::{
    CharacterClass, ExclusiveGroup, ItemDefinition, ItemFlags, ItemSlot, Requirement, Scaling,
    Stat, StatRequirement,
};
pub use snapshot::CatalogSnapshot;
pub use synergy::{Synergy, SynergyMember};

use crate::modifiers::{Combination, ModifierId};

/// Stable catalog id of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// Stable catalog id of a familiar species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamiliarId(pub u32);

/// Active effect (buff) id, referenced by "only while X is active" requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

/// Challenge path id, referenced by path-restricted items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathId(pub u16);

pub trait CatalogOracle: Send + Sync {
    fn item(&self, id: ItemId) -> Option<&ItemDefinition>;

    fn familiar(&self, id: FamiliarId) -> Option<&FamiliarDefinition>;

    /// Every item definition, in id order.
    fn items(&self) -> &[ItemDefinition];

    /// Every familiar definition, in id order.
    fn familiars(&self) -> &[FamiliarDefinition];

    fn synergies(&self) -> &[Synergy];

    /// Authoritative combination rule for a modifier.
    fn combination(&self, id: ModifierId) -> Combination {
        id.default_combination()
    }

    fn find_item(&self, name: &str) -> Option<&ItemDefinition> {
        self.items().iter().find(|item| item.is_named(name))
    }

    fn find_familiar(&self, name: &str) -> Option<&FamiliarDefinition> {
        self.familiars().iter().find(|familiar| familiar.is_named(name))
    }
}
