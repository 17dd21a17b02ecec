use super::FamiliarId;
use crate::modifiers::{ModifierId, ModifierVector};

/// Immutable catalog entry for a familiar.
///
/// A familiar contributes in one of two ways:
///
/// - **Active**: `modifiers` plus `per_pound × weight`, where the weight is the
///   owned familiar's base weight plus every `Familiar Weight` bonus in the
///   assignment.
/// - **Inhabitant**: carried in a Buddy Bjorn or Crown of Thrones, contributing
///   the fixed `inhabitant` vector regardless of weight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamiliarDefinition {
    pub id: FamiliarId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ModifierVector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_pound: ModifierVector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inhabitant: ModifierVector,
    #[cfg_attr(feature = "serde", serde(default = "default_can_inhabit"))]
    pub can_inhabit: bool,
}

#[cfg(feature = "serde")]
fn default_can_inhabit() -> bool {
    true
}

impl FamiliarDefinition {
    pub fn new(id: FamiliarId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            modifiers: ModifierVector::new(),
            per_pound: ModifierVector::new(),
            inhabitant: ModifierVector::new(),
            can_inhabit: true,
        }
    }

    pub fn with_modifier(mut self, id: ModifierId, value: f64) -> Self {
        self.modifiers.add(id, value);
        self
    }

    pub fn with_per_pound(mut self, id: ModifierId, value: f64) -> Self {
        self.per_pound.add(id, value);
        self
    }

    pub fn with_inhabitant(mut self, id: ModifierId, value: f64) -> Self {
        self.inhabitant.add(id, value);
        self
    }

    /// Marks the familiar as unable to ride in a container.
    pub fn stay_home(mut self) -> Self {
        self.can_inhabit = false;
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
