//! Hill climbing over the candidate space.
//!
//! Each pass runs three move families against the incumbent:
//!
//! 1. **single-slot**: for every unpinned slot, the best substitution of that
//!    slot alone (best-improvement within the slot, accepted immediately)
//! 2. **coupled groups**: the joint product of each slot's shortlist within a
//!    [`CouplingGroup`](crate::CouplingGroup); the shortlist is the top
//!    `group_fanout` candidates ranked by single-substitution score, plus the
//!    incumbent and `Empty`
//! 3. **synergy placement**: every way of placing all members of an inactive
//!    synergy at once, for synergies of any arity
//! 4. **stat enablers**: a candidate whose stat requirement is unmet, placed
//!    together with candidates from other slots that raise that stat; first
//!    one enabler at a time, then the strongest enabler of each slot added
//!    cumulatively
//!
//! Passes repeat until none of them improves the incumbent, or a budget runs
//! out. Moves are accepted only when strictly better under
//! [`Evaluation::is_better_than`], so the incumbent never gets worse.

use arrayvec::ArrayVec;

use super::Budget;
use crate::aggregate::{self, Evaluation, Evaluator};
use crate::candidates::{Assignment, Candidate, CandidateSpace};
use crate::catalog::{StatRequirement, Synergy, SynergyMember};
use crate::config::MaximizerConfig;
use crate::state::Slot;

/// Result of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub assignment: Assignment,
    pub evaluation: Evaluation,
    pub evaluations: u64,
    pub passes: u32,
    /// A budget ran out before the climb reached a fixed point.
    pub truncated: bool,
}

pub struct SearchEngine<'a> {
    space: &'a CandidateSpace,
    evaluator: &'a Evaluator<'a>,
    config: &'a MaximizerConfig,
}

/// Incumbent state of one climb.
struct Climb {
    best: Assignment,
    evaluation: Evaluation,
    budget: Budget,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        space: &'a CandidateSpace,
        evaluator: &'a Evaluator<'a>,
        config: &'a MaximizerConfig,
    ) -> Self {
        Self {
            space,
            evaluator,
            config,
        }
    }

    pub fn run(&self) -> SearchOutcome {
        let mut budget = Budget::new(self.config);
        budget.charge();
        let best = *self.space.initial();
        let mut climb = Climb {
            evaluation: self.evaluator.evaluate(&best),
            best,
            budget,
        };

        let mut passes = 0;
        while passes < self.config.max_passes {
            passes += 1;
            let mut improved = self.single_slot_pass(&mut climb);
            improved |= self.group_pass(&mut climb);
            improved |= self.synergy_pass(&mut climb);
            improved |= self.requirement_pass(&mut climb);

            tracing::debug!(
                pass = passes,
                score = climb.evaluation.score,
                changes = climb.evaluation.changes,
                evaluations = climb.budget.evaluations(),
                "search pass"
            );

            if !improved || climb.budget.is_exhausted() {
                break;
            }
            if passes == self.config.max_passes {
                climb.budget.exhaust("pass limit reached");
            }
        }

        let truncated = climb.budget.is_exhausted();
        if truncated {
            tracing::warn!(
                reason = climb.budget.reason().unwrap_or("budget exhausted"),
                evaluations = climb.budget.evaluations(),
                elapsed_ms = climb.budget.elapsed().as_millis() as u64,
                "search truncated; returning best assignment found so far"
            );
        }

        SearchOutcome {
            assignment: climb.best,
            evaluation: climb.evaluation,
            evaluations: climb.budget.evaluations(),
            passes,
            truncated,
        }
    }

    /// Evaluates `trial` if the budget allows.
    fn evaluate(&self, climb: &mut Climb, trial: &Assignment) -> Option<Evaluation> {
        climb
            .budget
            .charge()
            .then(|| self.evaluator.evaluate(trial))
    }

    /// Tries every trial, then accepts the best one if it beats the incumbent.
    fn climb_to_best(
        &self,
        climb: &mut Climb,
        trials: impl IntoIterator<Item = Assignment>,
        kind: &'static str,
    ) -> bool {
        let epsilon = self.config.score_epsilon;
        let mut winner: Option<(Assignment, Evaluation)> = None;
        for trial in trials {
            if trial == climb.best {
                continue;
            }
            let Some(evaluation) = self.evaluate(climb, &trial) else {
                break;
            };
            let incumbent = winner
                .as_ref()
                .map_or(&climb.evaluation, |(_, evaluation)| evaluation);
            if evaluation.is_better_than(incumbent, epsilon) {
                winner = Some((trial, evaluation));
            }
        }

        match winner {
            Some((assignment, evaluation)) => {
                tracing::trace!(
                    kind,
                    from = climb.evaluation.score,
                    to = evaluation.score,
                    "accepted move"
                );
                climb.best = assignment;
                climb.evaluation = evaluation;
                true
            }
            None => false,
        }
    }

    fn single_slot_pass(&self, climb: &mut Climb) -> bool {
        let mut improved = false;
        for slot in Slot::searchable() {
            if self.space.is_pinned(slot) || climb.budget.is_exhausted() {
                continue;
            }
            let base = climb.best;
            let trials = self
                .space
                .candidates(slot)
                .iter()
                .map(|candidate| base.with(slot, *candidate));
            improved |= self.climb_to_best(climb, trials, "slot");
        }
        improved
    }

    fn group_pass(&self, climb: &mut Climb) -> bool {
        let mut improved = false;
        for group in self.space.groups() {
            if climb.budget.is_exhausted() {
                break;
            }
            let shortlists: ArrayVec<(Slot, Vec<Candidate>), 4> = group
                .slots()
                .iter()
                .map(|slot| (*slot, self.shortlist(climb, *slot)))
                .collect();
            let base = climb.best;
            let trials = Product::new(&shortlists, self.config.max_group_combinations).map(
                |combination| {
                    let mut trial = base;
                    for (slot, candidate) in combination {
                        trial.set(slot, candidate);
                    }
                    trial
                },
            );
            improved |= self.climb_to_best(climb, trials, "group");
        }
        improved
    }

    /// Top candidates of `slot` by single-substitution score, ignoring
    /// legality (a two-handed weapon is illegal alone but legal with an empty
    /// off-hand). The incumbent candidate and `Empty` are always kept.
    fn shortlist(&self, climb: &mut Climb, slot: Slot) -> Vec<Candidate> {
        let incumbent = climb.best.get(slot);
        let mut ranked: Vec<(Candidate, f64)> = Vec::new();
        for candidate in self.space.candidates(slot) {
            if *candidate == incumbent || candidate.is_empty() {
                continue;
            }
            let trial = climb.best.with(slot, *candidate);
            let Some(evaluation) = self.evaluate(climb, &trial) else {
                break;
            };
            ranked.push((*candidate, evaluation.score));
        }
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut shortlist = vec![incumbent];
        shortlist.extend(
            ranked
                .into_iter()
                .take(self.config.group_fanout)
                .map(|(candidate, _)| candidate),
        );
        if !incumbent.is_empty() && self.space.candidates(slot).contains(&Candidate::Empty) {
            shortlist.push(Candidate::Empty);
        }
        shortlist
    }

    fn synergy_pass(&self, climb: &mut Climb) -> bool {
        let mut improved = false;
        let synergies = self.evaluator.aggregator().catalog().synergies();
        for synergy in synergies {
            if climb.budget.is_exhausted() {
                break;
            }
            if aggregate::is_active(synergy, &climb.best) {
                continue;
            }
            let placements = self.placements(&climb.best, synergy);
            if !placements.is_empty() {
                tracing::trace!(synergy = %synergy.name, placements = placements.len(), "synergy move");
            }
            improved |= self.climb_to_best(climb, placements, "synergy");
        }
        improved
    }

    /// Every assignment that makes `synergy` active by changing only the slots
    /// its missing members need, capped at `max_group_combinations`.
    fn placements(&self, base: &Assignment, synergy: &Synergy) -> Vec<Assignment> {
        let missing: Vec<SynergyMember> = synergy
            .members
            .iter()
            .copied()
            .filter(|member| match member {
                SynergyMember::Item(item) => !base.wears(*item),
                SynergyMember::Familiar(familiar) => base.familiar() != Some(*familiar),
            })
            .collect();

        let mut placements = Vec::new();
        let mut used = Vec::with_capacity(missing.len());
        self.place(*base, &missing, &mut used, &mut placements);
        placements
    }

    fn place(
        &self,
        partial: Assignment,
        missing: &[SynergyMember],
        used: &mut Vec<Slot>,
        out: &mut Vec<Assignment>,
    ) {
        if out.len() >= self.config.max_group_combinations {
            return;
        }
        let Some((member, rest)) = missing.split_first() else {
            out.push(partial);
            return;
        };

        for slot in Slot::searchable() {
            if used.contains(&slot) || self.space.is_pinned(slot) {
                continue;
            }
            let fits = self.space.candidates(slot).iter().copied().find(|candidate| {
                match member {
                    SynergyMember::Item(item) => candidate.item() == Some(*item),
                    SynergyMember::Familiar(familiar) => candidate.familiar() == Some(*familiar),
                }
            });
            if let Some(candidate) = fits {
                used.push(slot);
                self.place(partial.with(slot, candidate), rest, used, out);
                used.pop();
            }
        }
    }

    fn requirement_pass(&self, climb: &mut Climb) -> bool {
        let mut improved = false;
        let catalog = self.evaluator.aggregator().catalog();
        for slot in Slot::searchable() {
            if self.space.is_pinned(slot) {
                continue;
            }
            for candidate in self.space.candidates(slot) {
                if climb.budget.is_exhausted() {
                    return improved;
                }
                if *candidate == climb.best.get(slot) {
                    continue;
                }
                let Some(requirement) = candidate
                    .item()
                    .and_then(|item| catalog.item(item))
                    .and_then(|definition| definition.requirement.stat)
                else {
                    continue;
                };

                let gated = climb.best.with(slot, *candidate);
                let Some(trials) = self.enabled(climb, &gated, slot, requirement) else {
                    continue;
                };
                improved |= self.climb_to_best(climb, trials, "requirement");
            }
        }
        improved
    }

    /// Assignments that add stat enablers to `gated`, or `None` when the
    /// requirement is already met there (single-slot moves cover that case).
    fn enabled(
        &self,
        climb: &mut Climb,
        gated: &Assignment,
        gated_slot: Slot,
        requirement: StatRequirement,
    ) -> Option<Vec<Assignment>> {
        let aggregator = self.evaluator.aggregator();
        let buffed = requirement.stat.buffed();
        let base = aggregator.aggregate(gated).get(buffed);
        if base >= f64::from(requirement.minimum) {
            return None;
        }

        let mut enablers: Vec<(Slot, Candidate, f64)> = Vec::new();
        for slot in Slot::searchable() {
            if slot == gated_slot || self.space.is_pinned(slot) {
                continue;
            }
            for candidate in self.space.candidates(slot) {
                if *candidate == gated.get(slot) {
                    continue;
                }
                if !climb.budget.charge() {
                    return Some(Vec::new());
                }
                let gain = aggregator.aggregate(&gated.with(slot, *candidate)).get(buffed) - base;
                if gain > 0.0 {
                    enablers.push((slot, *candidate, gain));
                }
            }
        }
        enablers.sort_by(|a, b| b.2.total_cmp(&a.2));

        let limit = self.config.max_group_combinations;
        let mut trials: Vec<Assignment> = enablers
            .iter()
            .take(limit)
            .map(|(slot, candidate, _)| gated.with(*slot, *candidate))
            .collect();

        let mut stacked = *gated;
        let mut used: Vec<Slot> = Vec::new();
        for (slot, candidate, _) in &enablers {
            if trials.len() >= limit {
                break;
            }
            let exhausted = candidate.item().is_some_and(|item| {
                stacked.worn_count(item) >= aggregator.character().available(item)
            });
            if used.contains(slot) || exhausted {
                continue;
            }
            used.push(*slot);
            stacked.set(*slot, *candidate);
            if used.len() > 1 {
                trials.push(stacked);
            }
        }
        Some(trials)
    }
}

// ============================================================================
// Cartesian product
// ============================================================================

/// Odometer over per-slot shortlists, yielding at most `limit` combinations.
struct Product<'s> {
    lists: &'s [(Slot, Vec<Candidate>)],
    indices: ArrayVec<usize, 4>,
    remaining: usize,
}

impl<'s> Product<'s> {
    fn new(lists: &'s [(Slot, Vec<Candidate>)], limit: usize) -> Self {
        let total = lists
            .iter()
            .fold(1usize, |acc, (_, list)| acc.saturating_mul(list.len()));
        Self {
            lists,
            indices: lists.iter().map(|_| 0).collect(),
            remaining: total.min(limit),
        }
    }
}

impl Iterator for Product<'_> {
    type Item = ArrayVec<(Slot, Candidate), 4>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let combination = self
            .lists
            .iter()
            .zip(&self.indices)
            .map(|((slot, list), index)| (*slot, list[*index]))
            .collect();

        for (position, (_, list)) in self.lists.iter().enumerate().rev() {
            self.indices[position] += 1;
            if self.indices[position] < list.len() {
                break;
            }
            self.indices[position] = 0;
        }
        Some(combination)
    }
}
