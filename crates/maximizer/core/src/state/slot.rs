use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Equipment positions considered by the maximizer.
///
/// Every slot holds at most one candidate. The three accessory slots accept
/// the same items. `Familiar` holds the active familiar, while `BuddyBjorn`
/// and `CrownOfThrones` are *inhabitant* slots: they hold the familiar riding
/// in the container worn on `Back` / `Hat` respectively, and are chosen
/// together with their host.
///
/// Parsing accepts the objective keywords (`acc1`, `-buddy-bjorn`, ...).
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
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    #[strum(to_string = "hat")]
    Hat,
    #[strum(to_string = "weapon")]
    Weapon,
    #[strum(to_string = "off-hand", serialize = "offhand")]
    Offhand,
    #[strum(to_string = "back", serialize = "container")]
    Back,
    #[strum(to_string = "shirt")]
    Shirt,
    #[strum(to_string = "pants")]
    Pants,
    #[strum(to_string = "acc1", serialize = "accessory1")]
    Accessory1,
    #[strum(to_string = "acc2", serialize = "accessory2")]
    Accessory2,
    #[strum(to_string = "acc3", serialize = "accessory3")]
    Accessory3,
    #[strum(to_string = "familiar")]
    Familiar,
    #[strum(to_string = "familiar-equipment", serialize = "famequip")]
    FamiliarEquipment,
    #[strum(to_string = "buddy-bjorn", serialize = "bjorn")]
    BuddyBjorn,
    #[strum(to_string = "crown-of-thrones", serialize = "throne")]
    CrownOfThrones,
}

impl Slot {
    pub const ACCESSORIES: [Slot; 3] = [Slot::Accessory1, Slot::Accessory2, Slot::Accessory3];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_accessory(self) -> bool {
        matches!(self, Slot::Accessory1 | Slot::Accessory2 | Slot::Accessory3)
    }

    pub const fn is_inhabitant(self) -> bool {
        matches!(self, Slot::BuddyBjorn | Slot::CrownOfThrones)
    }

    /// Host slot of an inhabitant slot.
    pub const fn host(self) -> Option<Slot> {
        match self {
            Slot::BuddyBjorn => Some(Slot::Back),
            Slot::CrownOfThrones => Some(Slot::Hat),
            _ => None,
        }
    }

    /// Inhabitant slot hosted by this slot.
    pub const fn inhabitant(self) -> Option<Slot> {
        match self {
            Slot::Back => Some(Slot::BuddyBjorn),
            Slot::Hat => Some(Slot::CrownOfThrones),
            _ => None,
        }
    }

    /// Slots chosen directly by the search, in slot order (inhabitants excluded).
    pub fn searchable() -> impl Iterator<Item = Slot> {
        Slot::iter().filter(|slot| !slot.is_inhabitant())
    }

    pub fn from_keyword(keyword: &str) -> Option<Slot> {
        keyword.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_parse_with_aliases() {
        assert_eq!(Slot::from_keyword("acc1"), Some(Slot::Accessory1));
        assert_eq!(Slot::from_keyword("Buddy-Bjorn"), Some(Slot::BuddyBjorn));
        assert_eq!(Slot::from_keyword("crown-of-thrones"), Some(Slot::CrownOfThrones));
        assert_eq!(Slot::from_keyword("offhand"), Some(Slot::Offhand));
        assert_eq!(Slot::from_keyword("acc4"), None);
    }

    #[test]
    fn inhabitants_pair_with_hosts() {
        for slot in Slot::iter() {
            if let Some(host) = slot.host() {
                assert_eq!(host.inhabitant(), Some(slot));
            }
        }
        assert_eq!(Slot::searchable().count(), Slot::COUNT - 2);
    }
}
