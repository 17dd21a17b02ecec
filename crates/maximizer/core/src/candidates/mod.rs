//! Candidates, assignments and the per-invocation candidate space.
mod assignment;
mod candidate;
mod space;

pub use assignment::Assignment;
pub use candidate::Candidate;
pub use space::{CandidateSpace, CouplingGroup};
