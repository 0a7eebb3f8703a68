//! Planner facade
//!
//! Owns the catalog, the taken ledger and every plan. Each public action is
//! one transaction: mutate a clone of the plan state, widen the affected
//! set, recompute it, and only then swap the clone in. A consistency error
//! anywhere leaves every plan and the ledger untouched.

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::plan::{PlanDependencyState, PlanId};
use reqplan_course::CourseId;
use reqplan_eval::{recompute_affected, CourseTaken, EvalContext, TermOrder};
use reqplan_grammar::Group;
use reqplan_graph::{
    add_courses, add_equivalence_rule, courses_referencing, credit_dependents, delete_courses,
    move_courses, remove_equivalence_rule, AffectedSet, CourseCatalog, EquivalenceRule,
    GraphConsistencyError, InMemoryCatalog, TermId,
};
use std::collections::BTreeMap;

/// Registry of plans over one catalog and one taken ledger
#[derive(Debug)]
pub struct Planner<C: CourseCatalog = InMemoryCatalog> {
    config: PlannerConfig,
    catalog: C,
    taken: CourseTaken,
    plans: BTreeMap<PlanId, PlanDependencyState>,
    next_plan: u64,
}

impl Planner<InMemoryCatalog> {
    /// Build a planner over a JSON catalog
    ///
    /// Requisite text is parsed with the configured nesting limit.
    ///
    /// # Errors
    /// Returns [`PlannerError::Config`] for an invalid configuration and
    /// [`PlannerError::Catalog`] for a malformed catalog.
    pub fn from_catalog_json(config: PlannerConfig, json: &str) -> PlannerResult<Self> {
        config.validate()?;
        let catalog = InMemoryCatalog::from_json(json, &config.parser())?;
        Ok(Self::new(config, catalog))
    }
}

impl<C: CourseCatalog> Planner<C> {
    /// Create planner with no plans and an empty ledger
    #[must_use]
    pub fn new(config: PlannerConfig, catalog: C) -> Self {
        Self {
            config,
            catalog,
            taken: CourseTaken::new(),
            plans: BTreeMap::new(),
            next_plan: 1,
        }
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Taken ledger
    #[inline]
    #[must_use]
    pub fn taken(&self) -> &CourseTaken {
        &self.taken
    }

    /// State of a plan
    #[must_use]
    pub fn plan(&self, plan: PlanId) -> Option<&PlanDependencyState> {
        self.plans.get(&plan)
    }

    /// Ids of every plan, oldest first
    pub fn plan_ids(&self) -> impl Iterator<Item = PlanId> + '_ {
        self.plans.keys().copied()
    }

    /// Parse requisite text with the configured nesting limit
    ///
    /// # Errors
    /// Returns [`PlannerError::Parse`] for malformed text.
    pub fn parse_requisite(&self, raw: &str) -> PlannerResult<Group> {
        Ok(self.config.parser().parse(raw)?)
    }

    /// Create an empty plan over the given terms, in chronological order
    pub fn create_plan(&mut self, terms: impl IntoIterator<Item = TermId>) -> PlanId {
        let plan = PlanId::new(self.next_plan);
        self.next_plan += 1;
        let state = PlanDependencyState::new(TermOrder::from_terms(terms));
        tracing::debug!(%plan, terms = state.term_order.len(), "plan created");
        self.plans.insert(plan, state);
        plan
    }

    /// Remove a plan, returning its final state
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan.
    pub fn delete_plan(&mut self, plan: PlanId) -> PlannerResult<PlanDependencyState> {
        let state = self
            .plans
            .remove(&plan)
            .ok_or(PlannerError::PlanNotFound(plan))?;
        tracing::debug!(%plan, courses = state.deps.len(), "plan deleted");
        Ok(state)
    }

    /// Place courses into a term
    ///
    /// Returns the ids whose verdicts were recomputed.
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan and
    /// [`PlannerError::Consistency`] when the term has no position; the plan
    /// is unchanged in both cases.
    pub fn add_courses(
        &mut self,
        plan: PlanId,
        term: &TermId,
        ids: &[CourseId],
    ) -> PlannerResult<AffectedSet> {
        let widen = self.config.widen_credit_dependents;
        self.commit(plan, "add_courses", |state, catalog| {
            let (deps, mut affected) = add_courses(&state.deps, ids, term, catalog);
            let next = PlanDependencyState {
                deps,
                ..state.clone()
            };
            affected.extend(change_dependents(&next, catalog, ids, widen));
            Ok((next, affected))
        })
    }

    /// Remove courses from the plan
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan and
    /// [`PlannerError::Consistency`] when recomputation fails.
    pub fn delete_courses(&mut self, plan: PlanId, ids: &[CourseId]) -> PlannerResult<AffectedSet> {
        let widen = self.config.widen_credit_dependents;
        self.commit(plan, "delete_courses", |state, catalog| {
            let (deps, mut affected) = delete_courses(&state.deps, ids);
            let next = PlanDependencyState {
                deps,
                ..state.clone()
            };
            affected.extend(change_dependents(&next, catalog, ids, widen));
            Ok((next, affected))
        })
    }

    /// Move planned courses to another term
    ///
    /// # Errors
    /// Returns [`PlannerError::Consistency`] when a course is not planned or
    /// the term has no position; the plan is unchanged.
    pub fn move_courses(
        &mut self,
        plan: PlanId,
        ids: &[CourseId],
        term: &TermId,
    ) -> PlannerResult<AffectedSet> {
        let widen = self.config.widen_credit_dependents;
        self.commit(plan, "move_courses", |state, catalog| {
            let (deps, mut affected) = move_courses(&state.deps, ids, term)?;
            let next = PlanDependencyState {
                deps,
                ..state.clone()
            };
            affected.extend(change_dependents(&next, catalog, ids, widen));
            Ok((next, affected))
        })
    }

    /// Replace the plan's term order and recompute every planned course
    ///
    /// # Errors
    /// Returns [`PlannerError::Consistency`] when a planned course sits in a
    /// term missing from `terms`; the plan is unchanged.
    pub fn reorder_terms(
        &mut self,
        plan: PlanId,
        terms: impl IntoIterator<Item = TermId>,
    ) -> PlannerResult<AffectedSet> {
        let term_order = TermOrder::from_terms(terms);
        self.commit(plan, "reorder_terms", |state, _| {
            let affected: AffectedSet = state.deps.course_ids().cloned().collect();
            let next = PlanDependencyState {
                term_order,
                ..state.clone()
            };
            Ok((next, affected))
        })
    }

    /// Let two courses stand in for each other in this plan
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan and
    /// [`PlannerError::Consistency`] when recomputation fails.
    pub fn add_equivalence(
        &mut self,
        plan: PlanId,
        rule: &EquivalenceRule,
    ) -> PlannerResult<AffectedSet> {
        self.commit(plan, "add_equivalence", |state, catalog| {
            let (equivalences, affected) =
                add_equivalence_rule(&state.deps, &state.equivalences, rule, catalog);
            let next = PlanDependencyState {
                equivalences,
                ..state.clone()
            };
            Ok((next, affected))
        })
    }

    /// Drop an equivalence rule from this plan
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan and
    /// [`PlannerError::Consistency`] when recomputation fails.
    pub fn remove_equivalence(
        &mut self,
        plan: PlanId,
        rule: &EquivalenceRule,
    ) -> PlannerResult<AffectedSet> {
        self.commit(plan, "remove_equivalence", |state, catalog| {
            let (equivalences, affected) =
                remove_equivalence_rule(&state.deps, &state.equivalences, rule, catalog);
            let next = PlanDependencyState {
                equivalences,
                ..state.clone()
            };
            Ok((next, affected))
        })
    }

    /// Record completed courses and update every plan
    ///
    /// # Errors
    /// Returns [`PlannerError::Consistency`] when any plan fails to
    /// recompute; neither the ledger nor any plan changes in that case.
    pub fn record_taken(&mut self, ids: &[CourseId]) -> PlannerResult<()> {
        let mut taken = self.taken.clone();
        let changed: Vec<CourseId> = ids
            .iter()
            .filter(|id| taken.record((*id).clone()))
            .cloned()
            .collect();
        self.commit_ledger(taken, &changed, "record_taken")
    }

    /// Forget completed courses and update every plan
    ///
    /// # Errors
    /// See [`Planner::record_taken`].
    pub fn forget_taken(&mut self, ids: &[CourseId]) -> PlannerResult<()> {
        let mut taken = self.taken.clone();
        let changed: Vec<CourseId> = ids.iter().filter(|id| taken.forget(id)).cloned().collect();
        self.commit_ledger(taken, &changed, "forget_taken")
    }

    /// Stored verdict of a course; unplanned courses are unsatisfied
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan.
    pub fn is_satisfied(&self, plan: PlanId, id: &CourseId) -> PlannerResult<bool> {
        Ok(self.state(plan)?.deps.is_satisfied(id))
    }

    /// Planned courses whose requisites are not met, in id order
    ///
    /// # Errors
    /// Returns [`PlannerError::PlanNotFound`] for an unknown plan.
    pub fn unsatisfied_courses(&self, plan: PlanId) -> PlannerResult<Vec<CourseId>> {
        let mut unsatisfied: Vec<CourseId> = self
            .state(plan)?
            .deps
            .nodes()
            .filter(|(_, node)| !node.is_satisfied)
            .map(|(id, _)| id.clone())
            .collect();
        unsatisfied.sort();
        Ok(unsatisfied)
    }

    fn state(&self, plan: PlanId) -> PlannerResult<&PlanDependencyState> {
        self.plans.get(&plan).ok_or(PlannerError::PlanNotFound(plan))
    }

    /// Run one action against a clone of the plan and swap it in on success
    fn commit(
        &mut self,
        plan: PlanId,
        action: &'static str,
        step: impl FnOnce(
            &PlanDependencyState,
            &dyn CourseCatalog,
        ) -> PlannerResult<(PlanDependencyState, AffectedSet)>,
    ) -> PlannerResult<AffectedSet> {
        let current = self.state(plan)?;
        let (mut next, affected) = step(current, &self.catalog)?;
        settle(&mut next, &affected, &self.taken, &self.catalog)?;

        tracing::debug!(%plan, action, affected = affected.len(), "action committed");
        self.plans.insert(plan, next);
        Ok(affected)
    }

    /// Apply a ledger change to every plan, all or nothing
    fn commit_ledger(
        &mut self,
        taken: CourseTaken,
        changed: &[CourseId],
        action: &'static str,
    ) -> PlannerResult<()> {
        let mut staged = Vec::with_capacity(self.plans.len());
        for (plan, state) in &self.plans {
            let affected = ledger_dependents(state, &self.catalog, changed);
            let mut next = state.clone();
            settle(&mut next, &affected, &taken, &self.catalog)?;
            staged.push((*plan, next));
        }

        tracing::debug!(action, changed = changed.len(), plans = staged.len(), "ledger committed");
        self.plans.extend(staged);
        self.taken = taken;
        Ok(())
    }
}

/// Recompute `affected` within one plan state
fn settle(
    state: &mut PlanDependencyState,
    affected: &AffectedSet,
    taken: &CourseTaken,
    catalog: &dyn CourseCatalog,
) -> Result<(), GraphConsistencyError> {
    let ctx = EvalContext::new(&state.term_order, taken, catalog).with_equivalences(&state.equivalences);
    recompute_affected(&mut state.deps, affected, &ctx)
}

/// Extra ids to recompute when `ids` enter, leave or move within a plan
///
/// Courses naming an equivalent of a changed id depend on it through the
/// rule; credit-rule holders over a changed subject depend on it when
/// widening is on.
fn change_dependents(
    state: &PlanDependencyState,
    catalog: &dyn CourseCatalog,
    ids: &[CourseId],
    widen_credit: bool,
) -> AffectedSet {
    let mut extra = AffectedSet::new();
    if widen_credit {
        extra.extend(credit_dependents(&state.deps, ids.iter().map(CourseId::subject)));
    }

    let equivalents: Vec<CourseId> = ids
        .iter()
        .flat_map(|id| state.equivalences.equivalents(id).cloned())
        .collect();
    if !equivalents.is_empty() {
        extra.extend(courses_referencing(&state.deps, catalog, &equivalents));
    }
    extra
}

/// Planned courses whose verdict can change when `changed` enter or leave
/// the taken ledger
fn ledger_dependents(
    state: &PlanDependencyState,
    catalog: &dyn CourseCatalog,
    changed: &[CourseId],
) -> AffectedSet {
    if changed.is_empty() {
        return AffectedSet::new();
    }

    let mut targets = changed.to_vec();
    for id in changed {
        targets.extend(state.equivalences.equivalents(id).cloned());
    }

    // one target at a time: a planned course may itself be a target
    let mut affected: AffectedSet = targets
        .iter()
        .flat_map(|target| courses_referencing(&state.deps, catalog, std::slice::from_ref(target)))
        .collect();
    affected.extend(credit_dependents(&state.deps, changed.iter().map(CourseId::subject)));
    affected
}
