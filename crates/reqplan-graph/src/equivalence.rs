//! Equivalence rules
//!
//! An equivalence rule lets one course stand in for another in requisite
//! leaves, in both directions. Rules are one hop: `A ~ B` and `B ~ C` do not
//! make `A` satisfy a leaf naming `C`.

use crate::catalog::CourseCatalog;
use crate::graph::{AffectedSet, CourseDepData};
use crate::mutate::courses_referencing;
use im::{HashMap, HashSet};
use reqplan_course::CourseId;
use serde::{Deserialize, Serialize};

/// Unordered pair of mutually substitutable courses
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquivalenceRule {
    first: CourseId,
    second: CourseId,
}

impl EquivalenceRule {
    /// Create rule; the pair is stored in id order
    #[must_use]
    pub fn new(a: CourseId, b: CourseId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Both sides, in id order
    #[inline]
    #[must_use]
    pub fn sides(&self) -> [&CourseId; 2] {
        [&self.first, &self.second]
    }

    fn into_sides(self) -> [CourseId; 2] {
        [self.first, self.second]
    }
}

/// Persistent set of equivalence rules, indexed by course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceRules {
    links: HashMap<CourseId, HashSet<CourseId>>,
}

impl EquivalenceRules {
    /// No rules
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with `rule` added
    #[must_use]
    pub fn with_rule(&self, rule: &EquivalenceRule) -> Self {
        let mut links = self.links.clone();
        let [a, b] = rule.clone().into_sides();
        if a != b {
            links
                .entry(a.clone())
                .or_insert_with(HashSet::new)
                .insert(b.clone());
            links.entry(b).or_insert_with(HashSet::new).insert(a);
        }
        Self { links }
    }

    /// Copy with `rule` removed
    #[must_use]
    pub fn without_rule(&self, rule: &EquivalenceRule) -> Self {
        let mut links = self.links.clone();
        let [a, b] = rule.sides();
        for (from, to) in [(a, b), (b, a)] {
            if let Some(set) = links.get_mut(from) {
                set.remove(to);
                if set.is_empty() {
                    links.remove(from);
                }
            }
        }
        Self { links }
    }

    /// True when the rule is present
    #[must_use]
    pub fn contains(&self, rule: &EquivalenceRule) -> bool {
        let [a, b] = rule.sides();
        self.links.get(a).is_some_and(|set| set.contains(b))
    }

    /// Courses directly equivalent to `id`
    pub fn equivalents(&self, id: &CourseId) -> impl Iterator<Item = &CourseId> {
        self.links.get(id).into_iter().flatten()
    }

    /// Every rule, in id order
    #[must_use]
    pub fn rules(&self) -> Vec<EquivalenceRule> {
        let mut rules: Vec<EquivalenceRule> = self
            .links
            .iter()
            .flat_map(|(a, set)| {
                set.iter()
                    .filter(move |b| a < *b)
                    .map(move |b| EquivalenceRule::new(a.clone(), b.clone()))
            })
            .collect();
        rules.sort();
        rules
    }

    /// True when there are no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Add a rule to a plan's rule set
///
/// Returns the new rule set and every planned course whose requisites
/// reference either side.
#[must_use]
pub fn add_equivalence_rule(
    data: &CourseDepData,
    rules: &EquivalenceRules,
    rule: &EquivalenceRule,
    catalog: &dyn CourseCatalog,
) -> (EquivalenceRules, AffectedSet) {
    let affected = rule_dependents(data, rule, catalog);
    tracing::debug!(rule = ?rule.sides(), affected = affected.len(), "equivalence added");
    (rules.with_rule(rule), affected)
}

/// Remove a rule from a plan's rule set
///
/// Returns the new rule set and every planned course whose requisites
/// reference either side.
#[must_use]
pub fn remove_equivalence_rule(
    data: &CourseDepData,
    rules: &EquivalenceRules,
    rule: &EquivalenceRule,
    catalog: &dyn CourseCatalog,
) -> (EquivalenceRules, AffectedSet) {
    let affected = rule_dependents(data, rule, catalog);
    tracing::debug!(rule = ?rule.sides(), affected = affected.len(), "equivalence removed");
    (rules.without_rule(rule), affected)
}

fn rule_dependents(
    data: &CourseDepData,
    rule: &EquivalenceRule,
    catalog: &dyn CourseCatalog,
) -> AffectedSet {
    let [a, b] = rule.sides();
    let mut affected = courses_referencing(data, catalog, &[a.clone(), b.clone()]);
    // a side may reference the other in its own requisites
    for side in [a, b] {
        let other = if side == a { b } else { a };
        if data.contains(side) && catalog.requisites(side).is_some_and(|r| r.references(other)) {
            affected.insert(side.clone());
        }
    }
    affected
}
