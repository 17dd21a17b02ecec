//! Shared fixture catalog for the integration tests.
#![allow(dead_code)]

use maximizer_core::{
    Boost, CatalogSnapshot, CharacterClass, CharacterState, Choice, ExclusiveGroup,
    FamiliarDefinition, FamiliarId, ItemDefinition, ItemFlags, ItemId, ItemSlot, Maximizer,
    MaximizerConfig, ModifierId, Requirement, Slot, Solution, Stat, Synergy, SynergyMember,
};

// ===== hats =====
pub const HELMET_TURTLE: ItemId = ItemId(1);
pub const WREATH: ItemId = ItemId(2);
pub const MEAT_FEZ: ItemId = ItemId(3);
pub const TIME_HELMET: ItemId = ItemId(4);
pub const CROWN: ItemId = ItemId(5);
pub const STRAW_HAT: ItemId = ItemId(6);
pub const FEDORA: ItemId = ItemId(7);
pub const HAREM_VEIL: ItemId = ItemId(8);
pub const MOHAWK_WIG: ItemId = ItemId(9);
pub const MINERS_HELMET: ItemId = ItemId(10);

// ===== back =====
pub const BARSKIN_CLOAK: ItemId = ItemId(20);
pub const BJORN: ItemId = ItemId(21);
pub const VAMPYRIC_CLOAKE: ItemId = ItemId(22);
pub const SCOUT_BACKPACK: ItemId = ItemId(23);

// ===== hands =====
pub const CLUB: ItemId = ItemId(30);
pub const GREATSWORD: ItemId = ItemId(31);
pub const SHIELD: ItemId = ItemId(32);
pub const MINING_PICK: ItemId = ItemId(33);

// ===== pants =====
pub const HAREM_PANTS: ItemId = ItemId(40);
pub const LEATHER_PANTS: ItemId = ItemId(41);
pub const MINERS_PANTS: ItemId = ItemId(42);

// ===== accessories =====
pub const SLIPPERS: ItemId = ItemId(50);
pub const HALF_A_PURSE: ItemId = ItemId(51);
pub const COUNTERCLOCKWISE_WATCH: ItemId = ItemId(52);
pub const BAYWATCH: ItemId = ItemId(53);
pub const NUMBERWANG: ItemId = ItemId(54);
pub const CINCHO: ItemId = ItemId(55);
pub const RING: ItemId = ItemId(56);
pub const DISCO_EARRING: ItemId = ItemId(57);
pub const SHAMROCK: ItemId = ItemId(58);

// ===== familiars =====
pub const HAPPY_MEDIUM: FamiliarId = FamiliarId(1);
pub const DICE: FamiliarId = FamiliarId(2);
pub const MOSQUITO: FamiliarId = FamiliarId(3);
pub const LEPRECHAUN: FamiliarId = FamiliarId(4);

/// Watches share one exclusive group.
pub const WATCHES: ExclusiveGroup = ExclusiveGroup(1);

pub fn catalog() -> CatalogSnapshot {
    let items = vec![
        ItemDefinition::new(HELMET_TURTLE, "helmet turtle", ItemSlot::Hat)
            .with_modifier(ModifierId::Muscle, 1.0),
        ItemDefinition::new(WREATH, "wreath of laurels", ItemSlot::Hat)
            .with_modifier(ModifierId::Muscle, 25.0),
        ItemDefinition::new(MEAT_FEZ, "basic meat fez", ItemSlot::Hat)
            .with_modifier(ModifierId::Mysticality, 1.0)
            .with_modifier(ModifierId::Moxie, 2.0)
            .with_requirement(Requirement::stat(Stat::Moxie, 7)),
        ItemDefinition::new(TIME_HELMET, "time helmet", ItemSlot::Hat)
            .with_modifier(ModifierId::Adventures, 3.0),
        ItemDefinition::new(CROWN, "Crown of Thrones", ItemSlot::Hat)
            .with_flags(ItemFlags::INHABITANT_HOST),
        ItemDefinition::new(STRAW_HAT, "straw hat", ItemSlot::Hat)
            .with_modifier(ModifierId::MeatDrop, 5.0),
        ItemDefinition::new(FEDORA, "fedora", ItemSlot::Hat)
            .with_modifier(ModifierId::MeatDrop, 5.0)
            .with_modifier(ModifierId::Muscle, 5.0),
        ItemDefinition::new(HAREM_VEIL, "Knob Goblin harem veil", ItemSlot::Hat),
        ItemDefinition::new(MOHAWK_WIG, "mohawk wig", ItemSlot::Hat)
            .with_modifier(ModifierId::MeatDrop, 50.0)
            .with_requirement(Requirement::stat(Stat::Moxie, 10)),
        ItemDefinition::new(MINERS_HELMET, "miner's helmet", ItemSlot::Hat),
        ItemDefinition::new(BARSKIN_CLOAK, "barskin cloak", ItemSlot::Back)
            .with_modifier(ModifierId::Muscle, 7.0)
            .with_requirement(Requirement::stat(Stat::Mysticality, 75)),
        ItemDefinition::new(BJORN, "Buddy Bjorn", ItemSlot::Back)
            .with_flags(ItemFlags::INHABITANT_HOST),
        ItemDefinition::new(VAMPYRIC_CLOAKE, "vampyric cloake", ItemSlot::Back)
            .with_modifier(ModifierId::Adventures, 1.0),
        ItemDefinition::new(SCOUT_BACKPACK, "Camp Scout backpack", ItemSlot::Back)
            .with_modifier(ModifierId::ItemDrop, 5.0),
        ItemDefinition::new(CLUB, "seal-clubbing club", ItemSlot::Weapon)
            .with_modifier(ModifierId::WeaponDamage, 5.0)
            .with_requirement(Requirement::none().with_class(CharacterClass::SealClubber)),
        ItemDefinition::new(GREATSWORD, "greatsword", ItemSlot::Weapon)
            .with_modifier(ModifierId::WeaponDamage, 20.0)
            .with_flags(ItemFlags::TWO_HANDED),
        ItemDefinition::new(SHIELD, "buckler", ItemSlot::Offhand)
            .with_modifier(ModifierId::WeaponDamage, 8.0),
        ItemDefinition::new(MINING_PICK, "7-Foot Dwarven mattock", ItemSlot::Weapon),
        ItemDefinition::new(HAREM_PANTS, "Knob Goblin harem pants", ItemSlot::Pants),
        ItemDefinition::new(LEATHER_PANTS, "tight leather pants", ItemSlot::Pants)
            .with_modifier(ModifierId::Moxie, 10.0),
        ItemDefinition::new(MINERS_PANTS, "miner's pants", ItemSlot::Pants),
        ItemDefinition::new(SLIPPERS, "Fuzzy Slippers of Hatred", ItemSlot::Accessory)
            .with_modifier(ModifierId::CombatRate, -5.0)
            .with_requirement(Requirement::stat(Stat::Moxie, 125)),
        ItemDefinition::new(HALF_A_PURSE, "Half a Purse", ItemSlot::Accessory)
            .with_modifier(ModifierId::Smithsness, 5.0)
            .with_scaling(ModifierId::MeatDrop, ModifierId::Smithsness, 1.0),
        ItemDefinition::new(COUNTERCLOCKWISE_WATCH, "Counterclockwise Watch", ItemSlot::Accessory)
            .with_modifier(ModifierId::Adventures, 10.0)
            .with_exclusive_group(WATCHES),
        ItemDefinition::new(BAYWATCH, "baywatch", ItemSlot::Accessory)
            .with_modifier(ModifierId::Adventures, 7.0)
            .with_exclusive_group(WATCHES),
        ItemDefinition::new(NUMBERWANG, "numberwang", ItemSlot::Accessory)
            .with_modifier(ModifierId::Adventures, 5.0),
        ItemDefinition::new(CINCHO, "Cincho de Mayo", ItemSlot::Accessory),
        ItemDefinition::new(RING, "ring of detect boring doors", ItemSlot::Accessory)
            .with_modifier(ModifierId::MaximumHp, 10.0),
        ItemDefinition::new(DISCO_EARRING, "disco earring", ItemSlot::Accessory)
            .with_modifier(ModifierId::Moxie, 5.0),
        ItemDefinition::new(SHAMROCK, "shamrock", ItemSlot::Accessory),
    ];

    let familiars = vec![
        FamiliarDefinition::new(HAPPY_MEDIUM, "Happy Medium")
            .with_inhabitant(ModifierId::MeatDrop, 25.0),
        FamiliarDefinition::new(DICE, "Dice")
            .with_inhabitant(ModifierId::Muscle, 10.0)
            .with_inhabitant(ModifierId::Mysticality, 10.0)
            .with_inhabitant(ModifierId::Moxie, 10.0),
        FamiliarDefinition::new(MOSQUITO, "Mosquito").with_modifier(ModifierId::MaximumHp, 2.0),
        FamiliarDefinition::new(LEPRECHAUN, "Leprechaun")
            .with_per_pound(ModifierId::MeatDrop, 1.0),
    ];

    let synergies = vec![
        Synergy::new(
            "Knob Goblin Harem Girl Disguise",
            [SynergyMember::Item(HAREM_VEIL), SynergyMember::Item(HAREM_PANTS)],
        )
        .with_modifier(ModifierId::MeatDrop, 30.0),
        Synergy::new(
            "Mining Gear",
            [
                SynergyMember::Item(MINERS_HELMET),
                SynergyMember::Item(MINING_PICK),
                SynergyMember::Item(MINERS_PANTS),
            ],
        )
        .with_modifier(ModifierId::ItemDrop, 50.0),
        Synergy::new(
            "Luck of the Leprechaun",
            [SynergyMember::Item(SHAMROCK), SynergyMember::Familiar(LEPRECHAUN)],
        )
        .with_modifier(ModifierId::ItemDrop, 20.0),
    ];

    CatalogSnapshot::new(items, familiars, synergies)
}

/// Runs the maximizer with the default config.
pub fn solve(
    catalog: &CatalogSnapshot,
    character: &CharacterState,
    objective: &str,
) -> Solution {
    init_tracing();
    Maximizer::new(catalog, character, &MaximizerConfig::new())
        .solve(objective)
        .expect("objective should solve")
}

/// The boost touching `slot`, if any.
pub fn boost_for(solution: &Solution, slot: Slot) -> Option<Boost> {
    solution.boosts.iter().copied().find(|boost| boost.slot == slot)
}

pub fn recommends(solution: &Solution, slot: Slot, item: ItemId) -> bool {
    boost_for(solution, slot).is_some_and(|boost| boost.to == Choice::Item(item))
}

/// Character after executing `boosts`: worn copies leave the inventory and
/// removed ones return to it.
pub fn after(character: &CharacterState, boosts: &[Boost]) -> CharacterState {
    let mut next = character.clone();
    for boost in boosts {
        if let Some(removed) = boost.from.item() {
            *next.inventory.entry(removed).or_insert(0) += 1;
        }
        if let Some(added) = boost.to.item() {
            let count = next.inventory.entry(added).or_insert(0);
            *count = count.saturating_sub(1);
        }
    }
    next.inventory.retain(|_, count| *count > 0);
    next.equipment = character.equipment.apply(boosts);
    next
}

/// Opt-in log output: `RUST_LOG=maximizer_core=debug cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
