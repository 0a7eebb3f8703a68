//! Chronological order of a plan's terms

use im::HashMap;
use reqplan_graph::TermId;
use serde::{Deserialize, Serialize};

/// Term id to chronological position
///
/// Positions are strictly increasing in chronological order. The caller
/// rebuilds the map when terms are reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOrder {
    orders: HashMap<TermId, i32>,
}

impl TermOrder {
    /// Empty order
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number terms `0, 1, 2, ...` in the given order
    ///
    /// A term listed twice keeps its first position.
    #[must_use]
    pub fn from_terms(terms: impl IntoIterator<Item = TermId>) -> Self {
        let mut orders = HashMap::new();
        let mut next = 0;
        for term in terms {
            if !orders.contains_key(&term) {
                orders.insert(term, next);
                next += 1;
            }
        }
        Self { orders }
    }

    /// With an explicit position for one term
    #[must_use]
    pub fn with_order(mut self, term: TermId, order: i32) -> Self {
        self.orders.insert(term, order);
        self
    }

    /// Position of a term
    #[inline]
    #[must_use]
    pub fn order(&self, term: &TermId) -> Option<i32> {
        self.orders.get(term).copied()
    }

    /// Terms in chronological order
    #[must_use]
    pub fn terms(&self) -> Vec<&TermId> {
        let mut terms: Vec<(&TermId, i32)> = self.orders.iter().map(|(t, o)| (t, *o)).collect();
        terms.sort_by_key(|(_, o)| *o);
        terms.into_iter().map(|(t, _)| t).collect()
    }

    /// Number of terms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// True when no term is ordered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
