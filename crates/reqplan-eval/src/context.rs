//! Evaluation context

use crate::taken::CourseTaken;
use crate::term_order::TermOrder;
use reqplan_course::CourseId;
use reqplan_graph::{CourseCatalog, CourseDepData, EquivalenceRules, GraphConsistencyError};

/// Everything a verdict depends on besides the graph itself
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub(crate) term_order: &'a TermOrder,
    pub(crate) taken: &'a CourseTaken,
    pub(crate) catalog: &'a dyn CourseCatalog,
    pub(crate) equivalences: Option<&'a EquivalenceRules>,
}

impl<'a> EvalContext<'a> {
    /// Context without equivalence rules
    #[must_use]
    pub fn new(
        term_order: &'a TermOrder,
        taken: &'a CourseTaken,
        catalog: &'a dyn CourseCatalog,
    ) -> Self {
        Self {
            term_order,
            taken,
            catalog,
            equivalences: None,
        }
    }

    /// With the plan's equivalence rules
    #[must_use]
    pub fn with_equivalences(mut self, equivalences: &'a EquivalenceRules) -> Self {
        self.equivalences = Some(equivalences);
        self
    }

    /// Term order
    #[inline]
    #[must_use]
    pub fn term_order(&self) -> &'a TermOrder {
        self.term_order
    }

    /// Taken ledger
    #[inline]
    #[must_use]
    pub fn taken(&self) -> &'a CourseTaken {
        self.taken
    }

    /// Catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'a dyn CourseCatalog {
        self.catalog
    }

    /// Chronological position of a planned course; `None` when unplanned
    ///
    /// # Errors
    /// Returns [`GraphConsistencyError::TermNotOrdered`] when the course's
    /// term has no position.
    pub fn planned_order(
        &self,
        deps: &CourseDepData,
        id: &CourseId,
    ) -> Result<Option<i32>, GraphConsistencyError> {
        let Some(term) = deps.term_of(id) else {
            return Ok(None);
        };
        self.term_order
            .order(term)
            .map(Some)
            .ok_or_else(|| GraphConsistencyError::TermNotOrdered {
                course: id.clone(),
                term: term.clone(),
            })
    }

    pub(crate) fn equivalents(&self, id: &CourseId) -> Vec<&'a CourseId> {
        self.equivalences
            .map(|rules| rules.equivalents(id).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("term_order", self.term_order)
            .field("taken", self.taken)
            .field("equivalences", &self.equivalences)
            .finish_non_exhaustive()
    }
}
