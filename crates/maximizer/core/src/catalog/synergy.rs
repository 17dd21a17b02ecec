use super::{FamiliarId, ItemId};
use crate::modifiers::{ModifierId, ModifierVector};

/// One participant of a synergy.
///
/// Item members are satisfied by the item being worn in any slot (including a
/// container); familiar members only by the *active* familiar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SynergyMember {
    Item(ItemId),
    Familiar(FamiliarId),
}

/// Extra modifiers granted only when every member is present (outfits,
/// item + familiar pairings). Arity is unrestricted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Synergy {
    pub name: String,
    pub members: Vec<SynergyMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ModifierVector,
}

impl Synergy {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = SynergyMember>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
            modifiers: ModifierVector::new(),
        }
    }

    pub fn with_modifier(mut self, id: ModifierId, value: f64) -> Self {
        self.modifiers.add(id, value);
        self
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.members.iter().filter_map(|member| match member {
            SynergyMember::Item(item) => Some(*item),
            SynergyMember::Familiar(_) => None,
        })
    }

    pub fn familiars(&self) -> impl Iterator<Item = FamiliarId> + '_ {
        self.members.iter().filter_map(|member| match member {
            SynergyMember::Familiar(familiar) => Some(*familiar),
            SynergyMember::Item(_) => None,
        })
    }
}
