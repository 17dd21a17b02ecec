//! Modifier identifiers, combination rules, and modifier vectors.
//!
//! This is the leaf layer of the maximizer: every item, familiar, synergy and
//! character baseline contributes a [`ModifierVector`], and the aggregator folds
//! them together with the per-modifier [`Combination`] rules.

mod id;
mod rule;
mod vector;

pub use id::ModifierId;
pub use rule::{Combination, CombinationTable};
pub use vector::ModifierVector;
