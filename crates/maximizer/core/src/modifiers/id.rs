//! The closed set of modifiers the maximizer understands.

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::Combination;

/// Identifier of a numeric modifier.
///
/// The set is fixed at build time so that aggregation runs over a dense array
/// instead of string-keyed maps. `Display` yields the canonical objective name;
/// parsing accepts the canonical name and the short aliases players type in
/// objective strings (`mus`, `meat`, `-combat`, `fites`, ...), ignoring case.
///
/// The `Buffed*` modifiers are derived: they are never contributed by items
/// directly but computed from base stats and the flat/percent stat bonuses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierId {
    // ===== stat bonuses (inputs to buffed stats) =====
    #[strum(to_string = "Muscle Bonus")]
    Muscle,
    #[strum(to_string = "Mysticality Bonus")]
    Mysticality,
    #[strum(to_string = "Moxie Bonus")]
    Moxie,
    #[strum(to_string = "Muscle Percent")]
    MusclePercent,
    #[strum(to_string = "Mysticality Percent")]
    MysticalityPercent,
    #[strum(to_string = "Moxie Percent")]
    MoxiePercent,

    // ===== derived stats =====
    #[strum(to_string = "Muscle", serialize = "mus", serialize = "buffed muscle")]
    BuffedMuscle,
    #[strum(
        to_string = "Mysticality",
        serialize = "mys",
        serialize = "myst",
        serialize = "buffed mysticality"
    )]
    BuffedMysticality,
    #[strum(to_string = "Moxie", serialize = "mox", serialize = "buffed moxie")]
    BuffedMoxie,

    // ===== survivability =====
    #[strum(to_string = "Maximum HP", serialize = "hp")]
    MaximumHp,
    #[strum(to_string = "Maximum MP", serialize = "mp")]
    MaximumMp,
    #[strum(to_string = "Damage Absorption", serialize = "da")]
    DamageAbsorption,
    #[strum(to_string = "Damage Reduction", serialize = "dr")]
    DamageReduction,
    #[strum(to_string = "Hot Resistance", serialize = "hot res")]
    HotResistance,
    #[strum(to_string = "Cold Resistance", serialize = "cold res")]
    ColdResistance,
    #[strum(to_string = "Stench Resistance", serialize = "stench res")]
    StenchResistance,
    #[strum(to_string = "Spooky Resistance", serialize = "spooky res")]
    SpookyResistance,
    #[strum(to_string = "Sleaze Resistance", serialize = "sleaze res")]
    SleazeResistance,

    // ===== offense =====
    #[strum(to_string = "Weapon Damage", serialize = "weapon dmg")]
    WeaponDamage,
    #[strum(to_string = "Spell Damage", serialize = "spell dmg")]
    SpellDamage,
    #[strum(to_string = "Spell Damage Percent", serialize = "spell dmg percent")]
    SpellDamagePercent,
    #[strum(to_string = "Critical Hit Percent", serialize = "crit")]
    CriticalHitPercent,
    #[strum(to_string = "Initiative", serialize = "init")]
    Initiative,

    // ===== adventuring =====
    #[strum(to_string = "Meat Drop", serialize = "meat")]
    MeatDrop,
    #[strum(to_string = "Item Drop", serialize = "item", serialize = "items")]
    ItemDrop,
    #[strum(to_string = "Food Drop", serialize = "food")]
    FoodDrop,
    #[strum(to_string = "Booze Drop", serialize = "booze")]
    BoozeDrop,
    #[strum(to_string = "Combat Rate", serialize = "combat")]
    CombatRate,
    #[strum(to_string = "Monster Level", serialize = "ml")]
    MonsterLevel,
    #[strum(to_string = "Experience", serialize = "exp")]
    Experience,
    #[strum(to_string = "Adventures", serialize = "adv")]
    Adventures,
    #[strum(to_string = "PvP Fights", serialize = "fites", serialize = "fights")]
    PvpFights,
    #[strum(to_string = "Smithsness")]
    Smithsness,

    // ===== familiars =====
    #[strum(to_string = "Familiar Weight", serialize = "fam weight", serialize = "weight")]
    FamiliarWeight,
}

impl ModifierId {
    /// Modifiers that are computed rather than contributed.
    pub const fn is_derived(self) -> bool {
        matches!(
            self,
            Self::BuffedMuscle | Self::BuffedMysticality | Self::BuffedMoxie
        )
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Built-in combination rule, used when the catalog does not override it.
    pub const fn default_combination(self) -> Combination {
        match self {
            Self::CombatRate => Combination::SoftCapped {
                soft: 20.0,
                hard: 25.0,
                excess_divisor: 5.0,
            },
            Self::SpellDamagePercent => Combination::Multiplicative,
            _ => Combination::Additive,
        }
    }

    /// Parses an objective keyword (canonical name or alias).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        keyword.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(ModifierId::from_keyword("mus"), Some(ModifierId::BuffedMuscle));
        assert_eq!(ModifierId::from_keyword("MEAT"), Some(ModifierId::MeatDrop));
        assert_eq!(ModifierId::from_keyword("fites"), Some(ModifierId::PvpFights));
        assert_eq!(
            ModifierId::from_keyword("Familiar Weight"),
            Some(ModifierId::FamiliarWeight)
        );
        assert_eq!(ModifierId::from_keyword("combat"), Some(ModifierId::CombatRate));
        assert_eq!(ModifierId::from_keyword("hat"), None);
    }

    #[test]
    fn canonical_names_round_trip() {
        for id in ModifierId::iter() {
            assert_eq!(ModifierId::from_keyword(&id.to_string()), Some(id));
        }
    }

    #[test]
    fn index_matches_declaration_order() {
        for (position, id) in ModifierId::iter().enumerate() {
            assert_eq!(id.index(), position);
        }
    }
}
