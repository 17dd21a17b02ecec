use super::{
    CatalogOracle, FamiliarDefinition, FamiliarId, ItemDefinition, ItemId, Synergy,
};
use crate::modifiers::{Combination, ModifierId};

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Immutable arena of catalog data captured for one or more invocations.
///
/// Items and familiars are kept sorted by id so lookups are a binary search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    items: Vec<ItemDefinition>,
    familiars: Vec<FamiliarDefinition>,
    synergies: Vec<Synergy>,
    combinations: Vec<(ModifierId, Combination)>,
}

impl CatalogSnapshot {
    pub fn new(
        mut items: Vec<ItemDefinition>,
        mut familiars: Vec<FamiliarDefinition>,
        synergies: Vec<Synergy>,
    ) -> Self {
        items.sort_by_key(|item| item.id);
        items.dedup_by_key(|item| item.id);
        familiars.sort_by_key(|familiar| familiar.id);
        familiars.dedup_by_key(|familiar| familiar.id);

        Self {
            items,
            familiars,
            synergies,
            combinations: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Overrides the built-in combination rule for one modifier.
    pub fn with_combination(mut self, id: ModifierId, rule: Combination) -> Self {
        self.combinations.retain(|(existing, _)| *existing != id);
        self.combinations.push((id, rule));
        self
    }

    /// Creates a snapshot by copying everything an oracle exposes.
    pub fn from_oracle(oracle: &dyn CatalogOracle) -> Self {
        let mut snapshot = Self::new(
            oracle.items().to_vec(),
            oracle.familiars().to_vec(),
            oracle.synergies().to_vec(),
        );
        for id in <ModifierId as strum::IntoEnumIterator>::iter() {
            let rule = oracle.combination(id);
            if rule != id.default_combination() {
                snapshot.combinations.push((id, rule));
            }
        }
        snapshot
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items
            .binary_search_by_key(&id, |item| item.id)
            .ok()
            .map(|index| &self.items[index])
    }

    fn familiar(&self, id: FamiliarId) -> Option<&FamiliarDefinition> {
        self.familiars
            .binary_search_by_key(&id, |familiar| familiar.id)
            .ok()
            .map(|index| &self.familiars[index])
    }

    fn items(&self) -> &[ItemDefinition] {
        &self.items
    }

    fn familiars(&self) -> &[FamiliarDefinition] {
        &self.familiars
    }

    fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    fn combination(&self, id: ModifierId) -> Combination {
        self.combinations
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, rule)| *rule)
            .unwrap_or_else(|| id.default_combination())
    }
}
