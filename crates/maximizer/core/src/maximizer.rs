//! Entry point tying the pipeline together.

use crate::aggregate::{Aggregator, Evaluator};
use crate::candidates::{Assignment, CandidateSpace};
use crate::catalog::CatalogOracle;
use crate::config::MaximizerConfig;
use crate::diff::{Boost, emit_boosts};
use crate::error::{MaximizerError, Result};
use crate::modifiers::ModifierId;
use crate::objective::Objective;
use crate::search::SearchEngine;
use crate::state::CharacterState;

/// Outcome of a successful invocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub assignment: Assignment,
    /// Changes to execute, in order; empty when current gear already wins.
    pub boosts: Vec<Boost>,
    pub score: f64,
    pub evaluations: u64,
    /// The search budget ran out; `assignment` is the best found, not
    /// necessarily a fixed point.
    pub truncated: bool,
}

/// Maximizer bound to one immutable snapshot of catalog and character.
///
/// Every method is a pure computation; nothing is mutated, so an invocation
/// can be abandoned at any point.
pub struct Maximizer<'a> {
    catalog: &'a dyn CatalogOracle,
    character: &'a CharacterState,
    config: MaximizerConfig,
}

impl<'a> Maximizer<'a> {
    pub fn new(
        catalog: &'a dyn CatalogOracle,
        character: &'a CharacterState,
        config: &MaximizerConfig,
    ) -> Self {
        Self {
            catalog,
            character,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &MaximizerConfig {
        &self.config
    }

    pub fn compile(&self, objective: &str) -> Result<Objective> {
        Objective::compile(objective, self.catalog)
    }

    /// Runs the full pipeline for `objective`.
    ///
    /// # Errors
    ///
    /// Any compile error from [`Objective::compile`], a
    /// [`MaximizerError::ForcedEquip`] from candidate construction, or
    /// [`MaximizerError::NoSolution`] when no legal assignment was found.
    pub fn solve(&self, objective: &str) -> Result<Solution> {
        let objective = self.compile(objective)?;
        self.solve_compiled(&objective)
    }

    /// Same as [`Maximizer::solve`] for an already compiled objective.
    pub fn solve_compiled(&self, objective: &Objective) -> Result<Solution> {
        let space = CandidateSpace::build(self.catalog, self.character, objective)?;
        let evaluator = Evaluator::new(self.catalog, self.character, objective);
        tracing::debug!(candidates = space.size(), groups = space.groups().len(), "candidate space built");

        let outcome = SearchEngine::new(&space, &evaluator, &self.config).run();
        if let Some(slot) = outcome.evaluation.legality.blocked() {
            tracing::info!(%slot, violations = outcome.evaluation.legality.violations(), "no legal assignment");
            return Err(MaximizerError::NoSolution { slot });
        }

        let boosts = emit_boosts(space.current(), &outcome.assignment);
        tracing::info!(
            score = outcome.evaluation.score,
            boosts = boosts.len(),
            evaluations = outcome.evaluations,
            passes = outcome.passes,
            truncated = outcome.truncated,
            "maximized"
        );

        Ok(Solution {
            assignment: outcome.assignment,
            boosts,
            score: outcome.evaluation.score,
            evaluations: outcome.evaluations,
            truncated: outcome.truncated,
        })
    }

    /// Boosts that move current gear to the best assignment for `objective`.
    pub fn maximize(&self, objective: &str) -> Result<Vec<Boost>> {
        self.solve(objective).map(|solution| solution.boosts)
    }

    /// Score of the gear currently worn, bonus terms included.
    pub fn current_score(&self, objective: &str) -> Result<f64> {
        let objective = self.compile(objective)?;
        let evaluator = Evaluator::new(self.catalog, self.character, &objective);
        Ok(evaluator.evaluate(evaluator.reference()).score)
    }

    pub fn current_assignment(&self) -> Assignment {
        Assignment::from_equipment(&self.character.equipment, self.catalog)
    }

    /// Aggregated value of one modifier for `assignment`.
    pub fn modifier_value(&self, assignment: &Assignment, id: ModifierId) -> f64 {
        Aggregator::new(self.catalog, self.character)
            .aggregate(assignment)
            .get(id)
    }
}
