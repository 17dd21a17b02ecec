//! Error taxonomy for a maximizer invocation.
//!
//! Every error is terminal to the invocation that produced it and is surfaced
//! to the caller verbatim. Candidates that fail their equip requirements are
//! *not* errors; they are silently excluded from the search.

use crate::state::Slot;

pub type Result<T> = std::result::Result<T, MaximizerError>;

/// Severity level of an error, used for categorization by hosts.
///
/// - **Validation**: the caller supplied something unusable (bad objective,
///   unknown catalog names, impossible directives). Fix the input and retry.
/// - **Fatal**: the snapshot admits no legal assignment under the objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Errors surfaced by [`crate::Maximizer`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MaximizerError {
    #[error("objective term `{term}` is invalid: {reason}")]
    ObjectiveSyntax { term: String, reason: &'static str },

    #[error("unknown modifier `{name}`")]
    UnknownModifier { name: String },

    #[error("unknown item `{name}`")]
    UnknownItem { name: String },

    #[error("unknown familiar `{name}`")]
    UnknownFamiliar { name: String },

    #[error("cannot force `{item}`: {reason}")]
    ForcedEquip { item: String, reason: &'static str },

    #[error("no legal candidate for slot {slot}")]
    NoSolution { slot: Slot },
}

impl MaximizerError {
    pub(crate) fn syntax(term: impl Into<String>, reason: &'static str) -> Self {
        Self::ObjectiveSyntax {
            term: term.into(),
            reason,
        }
    }

    pub(crate) fn forced(item: impl Into<String>, reason: &'static str) -> Self {
        Self::ForcedEquip {
            item: item.into(),
            reason,
        }
    }

    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSolution { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    /// The slot that blocked the search, if this is a [`MaximizerError::NoSolution`].
    pub const fn blocked_slot(&self) -> Option<Slot> {
        match self {
            Self::NoSolution { slot } => Some(*slot),
            _ => None,
        }
    }
}
