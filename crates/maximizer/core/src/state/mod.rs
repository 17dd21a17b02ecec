//! Character-side inputs: slots, equipment, and the character snapshot.
mod character;
mod equipment;
mod slot;

pub use character::{BaseStats, CharacterState, OwnedFamiliar};
pub use equipment::{Choice, Equipment, EquipmentBuilder};
pub use slot::Slot;
