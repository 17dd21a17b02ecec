//! Character snapshot loader.

use std::path::Path;

use maximizer_core::{CatalogOracle, CharacterState, Slot};

use crate::loaders::{LoadResult, read_file};

/// Loader for character snapshots from RON files.
///
/// ```ron
/// (
///     class: Some(SealClubber),
///     stats: (muscle: 120, mysticality: 40, moxie: 60),
///     inventory: { ItemId(3): 1 },
///     familiars: [(id: FamiliarId(1), weight: 20)],
///     equipment: (gear: { Hat: ItemId(1) }, familiar: Some(FamiliarId(1))),
/// )
/// ```
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character snapshot from a RON file.
    pub fn load(path: &Path) -> LoadResult<CharacterState> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid character {}: {}", path.display(), e))
    }

    /// Load a character snapshot and check it against `catalog`.
    pub fn load_checked(path: &Path, catalog: &dyn CatalogOracle) -> LoadResult<CharacterState> {
        let character = Self::load(path)?;
        Self::validate(&character, catalog)
            .map_err(|e| anyhow::anyhow!("Invalid character {}: {}", path.display(), e))?;
        Ok(character)
    }

    pub fn parse(content: &str) -> LoadResult<CharacterState> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))
    }

    /// Every referenced item and familiar must exist in the catalog, worn
    /// items must fit their slot, and container riders must be owned.
    pub fn validate(character: &CharacterState, catalog: &dyn CatalogOracle) -> LoadResult<()> {
        for item in character.inventory.keys() {
            if catalog.item(*item).is_none() {
                anyhow::bail!("Inventory references undefined item {}", item.0);
            }
        }

        for (slot, item) in &character.equipment.gear {
            if slot.is_inhabitant() || *slot == Slot::Familiar {
                anyhow::bail!("Slot {} cannot hold an item", slot);
            }
            let definition = catalog
                .item(*item)
                .ok_or_else(|| anyhow::anyhow!("Slot {} wears undefined item {}", slot, item.0))?;
            if !definition.accepts(*slot) {
                anyhow::bail!("'{}' does not fit slot {}", definition.name, slot);
            }
        }

        for owned in &character.familiars {
            if catalog.familiar(owned.id).is_none() {
                anyhow::bail!("Owned familiar {} is undefined", owned.id.0);
            }
        }

        let equipment = &character.equipment;
        for (slot, familiar) in [
            (Slot::Familiar, equipment.familiar),
            (Slot::BuddyBjorn, equipment.bjorned),
            (Slot::CrownOfThrones, equipment.enthroned),
        ] {
            if let Some(id) = familiar {
                if character.owned_familiar(id).is_none() {
                    anyhow::bail!("Slot {} holds familiar {} which is not owned", slot, id.0);
                }
            }
        }

        tracing::debug!(
            inventory = character.inventory.len(),
            worn = equipment.gear.len(),
            familiars = character.familiars.len(),
            "validated character"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maximizer_core::{
        BaseStats, CatalogSnapshot, CharacterClass, FamiliarDefinition, FamiliarId,
        ItemDefinition, ItemId, ItemSlot, ModifierId,
    };

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                ItemDefinition::new(ItemId(1), "helmet turtle", ItemSlot::Hat),
                ItemDefinition::new(ItemId(2), "baywatch", ItemSlot::Accessory),
            ],
            vec![FamiliarDefinition::new(FamiliarId(1), "Leprechaun")],
            Vec::new(),
        )
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let character = CharacterLoader::parse(
            r#"(
                class: Some(TurtleTamer),
                stats: (muscle: 30, mysticality: 10, moxie: 12),
                baseline: { FamiliarWeight: 5.0 },
                inventory: { ItemId(2): 2 },
                familiars: [(id: FamiliarId(1), weight: 12)],
                equipment: (gear: { Hat: ItemId(1) }, familiar: Some(FamiliarId(1))),
            )"#,
        )
        .expect("character should parse");

        assert_eq!(character.class, Some(CharacterClass::TurtleTamer));
        assert_eq!(character.stats, BaseStats::new(30, 10, 12));
        assert_eq!(character.baseline.get(ModifierId::FamiliarWeight), 5.0);
        assert_eq!(character.available(ItemId(2)), 2);
        assert_eq!(character.equipment.item(Slot::Hat), Some(ItemId(1)));
        assert!(character.effects.is_empty());
        assert!(character.equipment.bjorned.is_none());

        CharacterLoader::validate(&character, &catalog()).expect("character should validate");
    }

    #[test]
    fn worn_items_must_fit_their_slot() {
        let character =
            CharacterLoader::parse(r#"(equipment: (gear: { Weapon: ItemId(1) }))"#).expect("parse");
        let err = CharacterLoader::validate(&character, &catalog()).expect_err("hat in weapon slot");
        assert!(err.to_string().contains("does not fit slot weapon"));
    }

    #[test]
    fn riders_must_be_owned() {
        let character =
            CharacterLoader::parse(r#"(equipment: (bjorned: Some(FamiliarId(1))))"#).expect("parse");
        let err = CharacterLoader::validate(&character, &catalog()).expect_err("unowned rider");
        assert!(err.to_string().contains("buddy-bjorn"));
    }
}
