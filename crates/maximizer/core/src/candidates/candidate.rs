use crate::catalog::{FamiliarId, ItemId};
use crate::state::Choice;

/// A choice for one slot.
///
/// Item slots hold [`Candidate::Item`] or [`Candidate::Empty`]; the familiar
/// slot holds [`Candidate::Familiar`]. A container worn on `Back`/`Hat` that
/// carries a familiar is a single [`Candidate::InhabitedContainer`] so that the
/// rider is chosen together with the item hosting it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Candidate {
    #[default]
    Empty,
    Item(ItemId),
    Familiar(FamiliarId),
    InhabitedContainer {
        item: ItemId,
        inhabitant: Option<FamiliarId>,
    },
}

impl Candidate {
    /// Item occupying the slot, containers included.
    pub fn item(self) -> Option<ItemId> {
        match self {
            Candidate::Item(item) | Candidate::InhabitedContainer { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn familiar(self) -> Option<FamiliarId> {
        match self {
            Candidate::Familiar(familiar) => Some(familiar),
            _ => None,
        }
    }

    /// Rider of a container candidate.
    pub fn inhabitant(self) -> Option<FamiliarId> {
        match self {
            Candidate::InhabitedContainer { inhabitant, .. } => inhabitant,
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Candidate::Empty)
    }

    /// What a host sees in the slot itself (riders are reported separately).
    pub fn choice(self) -> Choice {
        match self {
            Candidate::Empty => Choice::Empty,
            Candidate::Item(item) | Candidate::InhabitedContainer { item, .. } => Choice::Item(item),
            Candidate::Familiar(familiar) => Choice::Familiar(familiar),
        }
    }
}

impl From<Choice> for Candidate {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Empty => Candidate::Empty,
            Choice::Item(item) => Candidate::Item(item),
            Choice::Familiar(familiar) => Candidate::Familiar(familiar),
        }
    }
}
