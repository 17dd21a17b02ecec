use super::Aggregator;
use crate::candidates::Assignment;
use crate::catalog::CatalogOracle;
use crate::equip::{EquipabilityResolver, Legality};
use crate::modifiers::ModifierVector;
use crate::objective::Objective;
use crate::state::CharacterState;

/// Scored, legality-checked assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub modifiers: ModifierVector,
    /// Weighted terms plus bonus terms.
    pub score: f64,
    /// Bonus-term share of `score`.
    pub bonus: f64,
    /// Secondary score; zero under `-tie`.
    pub tiebreak: f64,
    /// Slots that differ from current gear.
    pub changes: u32,
    pub legality: Legality,
}

impl Evaluation {
    pub fn is_legal(&self) -> bool {
        self.legality.is_legal()
    }

    /// Strict ranking used by the search.
    ///
    /// Order of keys: legal before illegal (then fewer violations), higher
    /// score, fewer changes, higher tiebreak. Differences within `epsilon`
    /// count as ties. Full ties return `false`, so the incumbent is kept.
    pub fn is_better_than(&self, other: &Evaluation, epsilon: f64) -> bool {
        match (self.is_legal(), other.is_legal()) {
            (true, false) => return true,
            (false, true) => return false,
            (false, false) if self.legality.violations() != other.legality.violations() => {
                return self.legality.violations() < other.legality.violations();
            }
            _ => {}
        }
        if (self.score - other.score).abs() > epsilon {
            return self.score > other.score;
        }
        if self.changes != other.changes {
            return self.changes < other.changes;
        }
        self.tiebreak - other.tiebreak > epsilon
    }
}

/// Aggregator, resolver and objective bound together for one invocation.
pub struct Evaluator<'a> {
    aggregator: Aggregator<'a>,
    resolver: EquipabilityResolver<'a>,
    objective: &'a Objective,
    reference: Assignment,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        catalog: &'a dyn CatalogOracle,
        character: &'a CharacterState,
        objective: &'a Objective,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(catalog, character),
            resolver: EquipabilityResolver::new(catalog, character),
            objective,
            reference: Assignment::from_equipment(&character.equipment, catalog),
        }
    }

    pub fn aggregator(&self) -> &Aggregator<'a> {
        &self.aggregator
    }

    pub fn objective(&self) -> &'a Objective {
        self.objective
    }

    /// Current gear, against which changes are counted.
    pub fn reference(&self) -> &Assignment {
        &self.reference
    }

    pub fn evaluate(&self, assignment: &Assignment) -> Evaluation {
        let modifiers = self.aggregator.aggregate(assignment);
        let legality = self.resolver.check(assignment, &modifiers);
        let bonus = self.objective.bonus(|item| assignment.wears(item));
        Evaluation {
            score: self.objective.score(&modifiers) + bonus,
            bonus,
            tiebreak: self.objective.tiebreak_score(&modifiers),
            changes: assignment.changes(&self.reference),
            legality,
            modifiers,
        }
    }
}
