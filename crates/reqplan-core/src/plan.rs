//! Per-plan state

use reqplan_eval::TermOrder;
use reqplan_graph::{CourseDepData, EquivalenceRules};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Plan identifier, unique within one [`Planner`](crate::Planner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(u64);

impl PlanId {
    /// Create from a raw number
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw number
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for PlanId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "plan-{}", self.0)
    }
}

/// Everything the evaluator needs about one plan
///
/// Cloning is cheap; the planner works on a clone and swaps it in only when
/// the whole action succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDependencyState {
    /// Dependency graph with verdicts
    pub deps: CourseDepData,
    /// Chronological order of the plan's terms
    pub term_order: TermOrder,
    /// Course substitutions
    pub equivalences: EquivalenceRules,
}

impl PlanDependencyState {
    /// Empty plan over the given term order
    #[must_use]
    pub fn new(term_order: TermOrder) -> Self {
        Self {
            term_order,
            ..Self::default()
        }
    }
}
