//! Per-slot candidate enumeration.
//!
//! The space is built once per invocation from the immutable snapshot. Each
//! searchable slot gets an ordered list whose first entry is the slot's
//! current content (the "keep current" candidate), followed by every other
//! owned item that fits the slot in catalog order, followed by `Empty`.
//! Pinned slots (excluded or forced) collapse to a single candidate.

use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;
use strum::{EnumCount, IntoEnumIterator};

use super::{Assignment, Candidate};
use crate::catalog::{CatalogOracle, FamiliarId, ItemDefinition, ItemId};
use crate::error::{MaximizerError, Result};
use crate::objective::Objective;
use crate::state::{CharacterState, Slot};

/// Slots whose choices interact and are therefore also searched jointly.
///
/// - accessories: item counts, single-equip and exclusive groups span all three
/// - weapon + off-hand: two-handed weapons require an empty off-hand
/// - hat + back + familiar: the active familiar and both riders must differ
/// - familiar + familiar equipment: familiar-restricted equipment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CouplingGroup {
    slots: ArrayVec<Slot, 4>,
}

impl CouplingGroup {
    const DEFAULT: [&'static [Slot]; 4] = [
        &Slot::ACCESSORIES,
        &[Slot::Weapon, Slot::Offhand],
        &[Slot::Hat, Slot::Back, Slot::Familiar],
        &[Slot::Familiar, Slot::FamiliarEquipment],
    ];

    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().take(4).collect(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

/// Finite candidate sets for every searchable slot.
#[derive(Clone, Debug)]
pub struct CandidateSpace {
    current: Assignment,
    initial: Assignment,
    slots: [Vec<Candidate>; Slot::COUNT],
    groups: Vec<CouplingGroup>,
}

impl CandidateSpace {
    /// Builds the candidate sets for `objective` over the character snapshot.
    ///
    /// # Errors
    ///
    /// - [`MaximizerError::ForcedEquip`] when a `+equip` directive cannot be
    ///   honored (unequippable, not owned, restricted, or its slot is taken)
    /// - [`MaximizerError::NoSolution`] when a slot ends up with no candidate,
    ///   e.g. an excluded slot whose current item is forbidden
    pub fn build(
        catalog: &dyn CatalogOracle,
        character: &CharacterState,
        objective: &Objective,
    ) -> Result<Self> {
        let builder = SpaceBuilder::new(catalog, character, objective);
        let forced = builder.resolve_forced()?;

        let mut slots: [Vec<Candidate>; Slot::COUNT] = std::array::from_fn(|_| Vec::new());
        for slot in Slot::searchable() {
            let candidates = match forced.get(&slot) {
                Some(item) => builder.expand(slot, *item),
                None => builder.enumerate(slot),
            };
            if candidates.is_empty() {
                return Err(MaximizerError::NoSolution { slot });
            }
            tracing::debug!(%slot, candidates = candidates.len(), "candidate set");
            slots[slot.index()] = candidates;
        }

        let current = builder.current;
        let mut initial = current;
        for slot in Slot::searchable() {
            let candidates = &slots[slot.index()];
            if !candidates.contains(&initial.get(slot)) {
                initial.set(slot, candidates[0]);
            }
        }

        let groups = CouplingGroup::DEFAULT
            .iter()
            .map(|members| {
                CouplingGroup::new(
                    members
                        .iter()
                        .copied()
                        .filter(|slot| slots[slot.index()].len() > 1),
                )
            })
            .filter(|group| group.slots().len() > 1)
            .collect();

        Ok(Self {
            current,
            initial,
            slots,
            groups,
        })
    }

    /// The character's gear as an assignment.
    pub fn current(&self) -> &Assignment {
        &self.current
    }

    /// Starting point of the search: current gear with pinned slots applied.
    pub fn initial(&self) -> &Assignment {
        &self.initial
    }

    /// Ordered candidates for a searchable slot; empty for inhabitant slots,
    /// whose riders are part of the host's container candidates.
    pub fn candidates(&self, slot: Slot) -> &[Candidate] {
        &self.slots[slot.index()]
    }

    pub fn is_pinned(&self, slot: Slot) -> bool {
        self.slots[slot.index()].len() <= 1
    }

    pub fn groups(&self) -> &[CouplingGroup] {
        &self.groups
    }

    /// Total number of candidates across all slots.
    pub fn size(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

// ============================================================================
// Builder
// ============================================================================

struct SpaceBuilder<'a> {
    catalog: &'a dyn CatalogOracle,
    character: &'a CharacterState,
    objective: &'a Objective,
    current: Assignment,
}

impl<'a> SpaceBuilder<'a> {
    fn new(
        catalog: &'a dyn CatalogOracle,
        character: &'a CharacterState,
        objective: &'a Objective,
    ) -> Self {
        let current = Assignment::from_equipment(&character.equipment, catalog);
        Self {
            catalog,
            character,
            objective,
            current,
        }
    }

    /// Class, path and effect restrictions; these never change during search.
    /// An item staying in the slot it is worn in is exempt.
    fn meets_static_requirements(&self, slot: Slot, item: &ItemDefinition) -> bool {
        if self.current.get(slot).item() == Some(item.id) {
            return true;
        }
        let requirement = &item.requirement;
        requirement.class.is_none_or(|class| self.character.class == Some(class))
            && requirement.path.is_none_or(|path| self.character.path == Some(path))
            && requirement
                .effect
                .is_none_or(|effect| self.character.has_effect(effect))
    }

    /// Assigns every forced item to a slot.
    fn resolve_forced(&self) -> Result<BTreeMap<Slot, ItemId>> {
        let mut forced = BTreeMap::new();
        for item in self.objective.forced() {
            let definition = self
                .catalog
                .item(*item)
                .ok_or_else(|| MaximizerError::UnknownItem {
                    name: format!("{item:?}"),
                })?;
            let name = definition.name.as_str();
            let category = definition
                .slot
                .ok_or_else(|| MaximizerError::forced(name, "item cannot be equipped"))?;
            if self.character.available(*item) == 0 {
                return Err(MaximizerError::forced(name, "item is not owned"));
            }

            let slots = category.slots();
            let worn_in = slots
                .iter()
                .copied()
                .find(|slot| self.current.get(*slot).item() == Some(*item) && !forced.contains_key(slot));
            let restricted = match worn_in {
                Some(slot) => !self.meets_static_requirements(slot, definition),
                None => slots
                    .iter()
                    .all(|slot| !self.meets_static_requirements(*slot, definition)),
            };
            if restricted {
                return Err(MaximizerError::forced(name, "item is restricted for this character"));
            }
            let free = || {
                slots
                    .iter()
                    .copied()
                    .find(|slot| !self.objective.is_excluded(*slot) && !forced.contains_key(slot))
            };
            let Some(slot) = worn_in.or_else(free) else {
                let reason = if slots.iter().all(|slot| self.objective.is_excluded(*slot)) {
                    "target slot is excluded"
                } else {
                    "conflicts with another forced item"
                };
                return Err(MaximizerError::forced(name, reason));
            };
            tracing::debug!(item = name, %slot, "forced equip");
            forced.insert(slot, *item);
        }
        Ok(forced)
    }

    /// Rider options for the container hosted by `host`, current resident first.
    fn rider_options(&self, host: Slot) -> Vec<Option<FamiliarId>> {
        let Some(inhabitant) = host.inhabitant() else {
            return Vec::new();
        };
        let resident = self.current.get(inhabitant).familiar();
        if self.objective.is_excluded(inhabitant) {
            return vec![resident];
        }

        let mut options = vec![resident];
        if resident.is_some() {
            options.push(None);
        }
        options.extend(
            self.character
                .familiars
                .iter()
                .filter(|owned| Some(owned.id) != resident)
                .filter(|owned| {
                    self.catalog
                        .familiar(owned.id)
                        .is_some_and(|definition| definition.can_inhabit)
                })
                .map(|owned| Some(owned.id)),
        );
        options
    }

    /// Every candidate that places `item` in `slot`.
    fn expand(&self, slot: Slot, item: ItemId) -> Vec<Candidate> {
        let hosts = self
            .catalog
            .item(item)
            .is_some_and(|definition| definition.hosts_inhabitant());
        if hosts && slot.inhabitant().is_some() {
            self.rider_options(slot)
                .into_iter()
                .map(|inhabitant| Candidate::InhabitedContainer { item, inhabitant })
                .collect()
        } else {
            vec![Candidate::Item(item)]
        }
    }

    fn enumerate(&self, slot: Slot) -> Vec<Candidate> {
        let current = self.current.get(slot);
        let mut candidates = Vec::new();

        if slot == Slot::Familiar {
            candidates.push(current);
            if !self.objective.is_excluded(slot) {
                let switches = self
                    .objective
                    .switches()
                    .iter()
                    .filter(|familiar| self.character.owned_familiar(**familiar).is_some())
                    .map(|familiar| Candidate::Familiar(*familiar));
                candidates.extend(switches);
            }
            candidates.dedup();
            return candidates;
        }

        let current_item = current.item();
        let forbidden = current_item.is_some_and(|item| self.objective.is_forbidden(item));
        if self.objective.is_excluded(slot) {
            if !forbidden {
                candidates.push(current);
            }
            return candidates;
        }

        if !forbidden {
            candidates.push(current);
            if let Some(item) = current_item {
                candidates.extend(self.expand(slot, item));
            }
        }

        for definition in self.catalog.items() {
            if Some(definition.id) == current_item
                || !definition.accepts(slot)
                || self.objective.is_forbidden(definition.id)
                || self.character.available(definition.id) == 0
                || !self.meets_static_requirements(slot, definition)
            {
                continue;
            }
            candidates.extend(self.expand(slot, definition.id));
        }

        candidates.push(Candidate::Empty);
        dedup_stable(&mut candidates);
        candidates
    }
}

fn dedup_stable(candidates: &mut Vec<Candidate>) {
    let mut seen = BTreeSet::new();
    candidates.retain(|candidate| seen.insert(*candidate));
}
