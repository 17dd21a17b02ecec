//! Item, familiar and synergy catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use maximizer_core::{
    CatalogSnapshot, Combination, FamiliarDefinition, FamiliarId, ItemDefinition, ItemId,
    ModifierId, Synergy, SynergyMember,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
///
/// ```ron
/// (
///     items: [
///         (id: ItemId(1), name: "helmet turtle", slot: Some(Hat), modifiers: { Muscle: 1.0 }),
///     ],
///     familiars: [
///         (id: FamiliarId(1), name: "Leprechaun", per_pound: { MeatDrop: 1.0 }),
///     ],
///     combinations: [(MeatDrop, Multiplicative)],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub items: Vec<ItemDefinition>,
    pub familiars: Vec<FamiliarDefinition>,
    pub synergies: Vec<Synergy>,
    /// Overrides of the built-in combination rule, per modifier.
    pub combinations: Vec<(ModifierId, Combination)>,
}

impl CatalogFile {
    /// Rejects duplicate ids and references to undefined items or familiars.
    pub fn validate(&self) -> LoadResult<()> {
        let mut items = BTreeSet::new();
        for item in &self.items {
            if !items.insert(item.id) {
                anyhow::bail!("Duplicate item id {} ('{}')", item.id.0, item.name);
            }
        }
        let mut familiars = BTreeSet::new();
        for familiar in &self.familiars {
            if !familiars.insert(familiar.id) {
                anyhow::bail!("Duplicate familiar id {} ('{}')", familiar.id.0, familiar.name);
            }
        }

        let known_item = |id: ItemId| items.contains(&id);
        let known_familiar = |id: FamiliarId| familiars.contains(&id);

        for item in &self.items {
            if let Some(required) = item.requirement.familiar {
                if !known_familiar(required) {
                    anyhow::bail!(
                        "Item '{}' requires undefined familiar {}",
                        item.name,
                        required.0
                    );
                }
            }
        }

        for synergy in &self.synergies {
            if synergy.members.is_empty() {
                anyhow::bail!("Synergy '{}' has no members", synergy.name);
            }
            for member in &synergy.members {
                let known = match member {
                    SynergyMember::Item(id) => known_item(*id),
                    SynergyMember::Familiar(id) => known_familiar(*id),
                };
                if !known {
                    anyhow::bail!("Synergy '{}' references undefined {:?}", synergy.name, member);
                }
            }
        }
        Ok(())
    }

    pub fn into_snapshot(self) -> CatalogSnapshot {
        let snapshot = CatalogSnapshot::new(self.items, self.familiars, self.synergies);
        self.combinations
            .into_iter()
            .fold(snapshot, |snapshot, (id, rule)| snapshot.with_combination(id, rule))
    }
}

/// Loader for catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a [`CatalogFile`]
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))?;
        Ok(catalog)
    }

    /// Parse and validate catalog RON text.
    pub fn parse(content: &str) -> LoadResult<CatalogSnapshot> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        file.validate()?;

        tracing::debug!(
            items = file.items.len(),
            familiars = file.familiars.len(),
            synergies = file.synergies.len(),
            "loaded catalog"
        );
        Ok(file.into_snapshot())
    }
}
