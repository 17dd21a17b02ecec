//! Search over the candidate space.
mod budget;
mod engine;

pub use budget::Budget;
pub use engine::{SearchEngine, SearchOutcome};
