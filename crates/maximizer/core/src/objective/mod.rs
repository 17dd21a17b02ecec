//! Objective compilation and scoring.
//!
//! An objective is a free-form string such as
//! `"mus, 2 meat 500 max, -combat, -acc3, +equip Buddy Bjorn, +25 bonus time helmet, -tie"`.
//! [`Objective::compile`] turns it into weighted [`Term`]s, [`BonusTerm`]s and
//! the control flags consulted while building the candidate space and ranking
//! assignments.

mod parser;

use std::collections::BTreeSet;

use crate::catalog::{CatalogOracle, FamiliarId, ItemId};
use crate::error::Result;
use crate::modifiers::{ModifierId, ModifierVector};
use crate::state::Slot;

/// Secondary score used to order assignments that tie on score and on
/// number of changes. Disabled by `-tie`.
const TIEBREAK: &[(ModifierId, f64)] = &[
    (ModifierId::BuffedMuscle, 1.0),
    (ModifierId::BuffedMysticality, 1.0),
    (ModifierId::BuffedMoxie, 1.0),
    (ModifierId::FamiliarWeight, 1.0),
    (ModifierId::MaximumHp, 0.5),
    (ModifierId::MaximumMp, 0.5),
    (ModifierId::MeatDrop, 0.25),
    (ModifierId::ItemDrop, 0.25),
    (ModifierId::Initiative, 0.1),
    (ModifierId::DamageAbsorption, 0.1),
];

/// A weighted modifier term: contributes `weight × min(value, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub modifier: ModifierId,
    pub weight: f64,
    pub max: Option<f64>,
}

impl Term {
    pub fn value(&self, modifiers: &ModifierVector) -> f64 {
        let value = modifiers.get(self.modifier);
        let capped = self.max.map_or(value, |max| value.min(max));
        self.weight * capped
    }
}

/// `+n bonus <item>`: adds `value` to the score when `item` is worn anywhere.
///
/// The bonus feeds the score only; it never enters the modifier vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusTerm {
    pub item: ItemId,
    pub value: f64,
}

/// Compiled objective.
#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    terms: Vec<Term>,
    bonuses: Vec<BonusTerm>,
    excluded: BTreeSet<Slot>,
    forced: Vec<ItemId>,
    forbidden: Vec<ItemId>,
    switches: Vec<FamiliarId>,
    tiebreak: bool,
}

impl Objective {
    /// Parses an objective string against the catalog's item and familiar names.
    ///
    /// # Errors
    ///
    /// - [`crate::MaximizerError::ObjectiveSyntax`] for malformed terms or an
    ///   exclusion naming something that is not a slot
    /// - [`crate::MaximizerError::UnknownModifier`] for an unrecognized modifier
    /// - [`crate::MaximizerError::UnknownItem`] / [`crate::MaximizerError::UnknownFamiliar`]
    ///   for names that match nothing in the catalog
    /// - [`crate::MaximizerError::ForcedEquip`] when an item is both forced and forbidden
    pub fn compile(input: &str, catalog: &dyn CatalogOracle) -> Result<Self> {
        let objective = parser::ObjectiveParser::new(catalog).parse(input)?;
        tracing::debug!(
            terms = objective.terms.len(),
            bonuses = objective.bonuses.len(),
            excluded = objective.excluded.len(),
            forced = objective.forced.len(),
            tiebreak = objective.tiebreak,
            "compiled objective {:?}",
            input
        );
        Ok(objective)
    }

    fn empty() -> Self {
        Self {
            terms: Vec::new(),
            bonuses: Vec::new(),
            excluded: BTreeSet::new(),
            forced: Vec::new(),
            forbidden: Vec::new(),
            switches: Vec::new(),
            tiebreak: true,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn bonuses(&self) -> &[BonusTerm] {
        &self.bonuses
    }

    pub fn is_excluded(&self, slot: Slot) -> bool {
        self.excluded.contains(&slot)
    }

    pub fn excluded(&self) -> impl Iterator<Item = Slot> + '_ {
        self.excluded.iter().copied()
    }

    pub fn forced(&self) -> &[ItemId] {
        &self.forced
    }

    pub fn is_forbidden(&self, item: ItemId) -> bool {
        self.forbidden.contains(&item)
    }

    pub fn switches(&self) -> &[FamiliarId] {
        &self.switches
    }

    /// `false` when the objective carries `-tie`.
    pub fn uses_tiebreak(&self) -> bool {
        self.tiebreak
    }

    /// Weighted sum over the named terms. Unnamed modifiers do not contribute.
    pub fn score(&self, modifiers: &ModifierVector) -> f64 {
        self.terms.iter().map(|term| term.value(modifiers)).sum()
    }

    /// Sum of bonus terms whose item satisfies `worn`. Each term counts once.
    pub fn bonus(&self, mut worn: impl FnMut(ItemId) -> bool) -> f64 {
        self.bonuses
            .iter()
            .filter(|bonus| worn(bonus.item))
            .map(|bonus| bonus.value)
            .sum()
    }

    pub fn tiebreak_score(&self, modifiers: &ModifierVector) -> f64 {
        if !self.tiebreak {
            return 0.0;
        }
        TIEBREAK
            .iter()
            .map(|(id, weight)| weight * modifiers.get(*id))
            .sum()
    }
}
