//! Equipment and familiar maximizer.
//!
//! `maximizer-core` computes the equipment/familiar assignment that maximizes a
//! user-supplied objective over an immutable snapshot of the character and the
//! item catalog. The crate performs no I/O: hosts hand it a [`CatalogOracle`]
//! and a [`CharacterState`], call [`Maximizer::maximize`], and execute the
//! returned [`Boost`]s themselves.
//!
//! # Pipeline
//!
//! ```text
//! objective string ──► Objective ─┐
//!                                 ├──► SearchEngine ──► winning Assignment ──► Boosts
//! catalog + character ─► CandidateSpace ┘      │
//!                                   Evaluator (Aggregator + EquipabilityResolver)
//! ```
pub mod aggregate;
pub mod candidates;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod equip;
pub mod error;
pub mod maximizer;
pub mod modifiers;
pub mod objective;
pub mod search;
pub mod state;

pub use aggregate::{Aggregator, Evaluation, Evaluator};
pub use candidates::{Assignment, Candidate, CandidateSpace, CouplingGroup};
pub use catalog::{
    CatalogOracle, CatalogSnapshot, CharacterClass, EffectId, ExclusiveGroup, FamiliarDefinition,
    FamiliarId, ItemDefinition, ItemFlags, ItemId, ItemSlot, PathId, Requirement, Scaling, Stat,
    StatRequirement, Synergy, SynergyMember,
};
pub use config::MaximizerConfig;
pub use diff::{Boost, emit_boosts};
pub use equip::{EquipabilityResolver, Legality};
pub use error::{ErrorSeverity, MaximizerError, Result};
pub use maximizer::{Maximizer, Solution};
pub use modifiers::{Combination, CombinationTable, ModifierId, ModifierVector};
pub use objective::{BonusTerm, Objective, Term};
pub use search::{Budget, SearchEngine, SearchOutcome};
pub use state::{BaseStats, CharacterState, Choice, Equipment, EquipmentBuilder, OwnedFamiliar, Slot};
