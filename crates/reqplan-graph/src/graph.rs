//! Per-plan dependency graph
//!
//! All maps are persistent (`im`), so cloning a [`CourseDepData`] is O(1)
//! and every mutator can return a new value while the caller keeps the old
//! one until its transaction commits.

use crate::term::TermId;
use im::{HashMap, HashSet};
use reqplan_course::{CourseId, SubjectCode};
use serde::{Deserialize, Serialize};

/// Ids that need their satisfaction recomputed, in id order
pub type AffectedSet = std::collections::BTreeSet<CourseId>;

/// A planned course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraphNode {
    /// Term the course is planned in
    pub term_id: TermId,
    /// Last computed verdict
    pub is_satisfied: bool,
    /// Planned courses whose requisites reference this one
    pub affected_course_ids: HashSet<CourseId>,
}

impl DependencyGraphNode {
    /// Fresh, unsatisfied node
    #[must_use]
    pub fn new(term_id: TermId) -> Self {
        Self {
            term_id,
            is_satisfied: false,
            affected_course_ids: HashSet::new(),
        }
    }
}

/// Dependency state of one plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDepData {
    pub(crate) dep_graph: HashMap<CourseId, DependencyGraphNode>,
    pub(crate) subject_map: HashMap<SubjectCode, HashSet<CourseId>>,
    pub(crate) credits_req_map: HashMap<SubjectCode, HashSet<CourseId>>,
}

impl CourseDepData {
    /// Empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Node of a planned course
    #[inline]
    #[must_use]
    pub fn node(&self, id: &CourseId) -> Option<&DependencyGraphNode> {
        self.dep_graph.get(id)
    }

    /// True when the course is planned
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &CourseId) -> bool {
        self.dep_graph.contains_key(id)
    }

    /// Term a course is planned in
    #[must_use]
    pub fn term_of(&self, id: &CourseId) -> Option<&TermId> {
        self.dep_graph.get(id).map(|n| &n.term_id)
    }

    /// Last computed verdict; unplanned courses are unsatisfied
    #[must_use]
    pub fn is_satisfied(&self, id: &CourseId) -> bool {
        self.dep_graph.get(id).is_some_and(|n| n.is_satisfied)
    }

    /// Every planned course with its node
    pub fn nodes(&self) -> impl Iterator<Item = (&CourseId, &DependencyGraphNode)> {
        self.dep_graph.iter()
    }

    /// Every planned course id
    pub fn course_ids(&self) -> impl Iterator<Item = &CourseId> {
        self.dep_graph.keys()
    }

    /// Planned courses of a subject
    pub fn courses_of_subject(&self, subject: &SubjectCode) -> impl Iterator<Item = &CourseId> {
        self.subject_map.get(subject).into_iter().flatten()
    }

    /// Planned courses carrying a credit rule over `subject`
    pub fn credit_requirers(&self, subject: &SubjectCode) -> impl Iterator<Item = &CourseId> {
        self.credits_req_map.get(subject).into_iter().flatten()
    }

    /// Number of planned courses
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dep_graph.len()
    }

    /// True when nothing is planned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dep_graph.is_empty()
    }

    /// Write a verdict; returns false when the course is not planned
    pub fn set_satisfied(&mut self, id: &CourseId, satisfied: bool) -> bool {
        match self.dep_graph.get_mut(id) {
            Some(node) => {
                node.is_satisfied = satisfied;
                true
            }
            None => false,
        }
    }

    pub(crate) fn index_insert(
        map: &mut HashMap<SubjectCode, HashSet<CourseId>>,
        subject: &SubjectCode,
        id: &CourseId,
    ) {
        map.entry(subject.clone())
            .or_insert_with(HashSet::new)
            .insert(id.clone());
    }

    /// Remove `id` from every entry, dropping entries that become empty
    pub(crate) fn index_remove(map: &mut HashMap<SubjectCode, HashSet<CourseId>>, id: &CourseId) {
        let subjects: Vec<SubjectCode> = map
            .iter()
            .filter(|(_, ids)| ids.contains(id))
            .map(|(subject, _)| subject.clone())
            .collect();

        for subject in subjects {
            if let Some(ids) = map.get_mut(&subject) {
                ids.remove(id);
                if ids.is_empty() {
                    map.remove(&subject);
                }
            }
        }
    }
}
