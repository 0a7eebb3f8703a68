//! Graph mutators
//!
//! Each mutator takes the current [`CourseDepData`] by reference and returns
//! the next value together with the ids whose satisfaction must be
//! recomputed. Mutators change structure only; satisfaction flags are left
//! to the propagator.

use crate::catalog::CourseCatalog;
use crate::error::GraphConsistencyError;
use crate::graph::{AffectedSet, CourseDepData, DependencyGraphNode};
use crate::term::TermId;
use reqplan_course::{CourseId, SubjectCode};

/// Place courses into a term
///
/// Creates or overwrites each node, keeping any existing reverse edges,
/// then links it both ways: referenced planned courses learn about the new
/// id, and planned courses referencing the new id are attached to it.
///
/// Returns the added ids, their successor parts already in the plan, and the
/// planned courses referencing them.
#[must_use]
pub fn add_courses(
    data: &CourseDepData,
    ids: &[CourseId],
    term_id: &TermId,
    catalog: &dyn CourseCatalog,
) -> (CourseDepData, AffectedSet) {
    let mut next = data.clone();
    let mut affected = AffectedSet::new();

    for id in ids {
        let referencing = courses_referencing(&next, catalog, std::slice::from_ref(id));

        let mut node = DependencyGraphNode::new(term_id.clone());
        if let Some(existing) = next.dep_graph.get(id) {
            node.affected_course_ids = existing.affected_course_ids.clone();
        }
        node.affected_course_ids.extend(referencing.iter().cloned());
        next.dep_graph.insert(id.clone(), node);
        CourseDepData::index_insert(&mut next.subject_map, id.subject(), id);

        if let Some(requisites) = catalog.requisites(id) {
            for referenced in requisites.referenced_courses() {
                if referenced == id {
                    continue;
                }
                if let Some(target) = next.dep_graph.get_mut(referenced) {
                    target.affected_course_ids.insert(id.clone());
                }
            }
            for rule in requisites.credit_rules() {
                for subject in &rule.subjects {
                    CourseDepData::index_insert(&mut next.credits_req_map, subject, id);
                }
            }
        }

        affected.insert(id.clone());
        affected.extend(referencing);
        if let Some(part) = id.successor_part().filter(|p| next.contains(p)) {
            affected.insert(part);
        }
    }

    tracing::debug!(term = %term_id, added = ids.len(), affected = affected.len(), "courses added");
    (next, affected)
}

/// Remove courses from the plan
///
/// Ids that are not planned are ignored. Returns the planned courses that
/// referenced a deleted id, plus successor parts of deleted multi-term ids.
#[must_use]
pub fn delete_courses(data: &CourseDepData, ids: &[CourseId]) -> (CourseDepData, AffectedSet) {
    let mut next = data.clone();
    let mut affected = AffectedSet::new();

    for id in ids {
        let Some(node) = next.dep_graph.remove(id) else {
            tracing::trace!(course = %id, "delete of unplanned course ignored");
            continue;
        };
        affected.extend(node.affected_course_ids.iter().cloned());
        CourseDepData::index_remove(&mut next.subject_map, id);
        CourseDepData::index_remove(&mut next.credits_req_map, id);
        if let Some(part) = id.successor_part() {
            affected.insert(part);
        }
    }

    let holders: Vec<CourseId> = next
        .dep_graph
        .iter()
        .filter(|(_, node)| ids.iter().any(|id| node.affected_course_ids.contains(id)))
        .map(|(holder, _)| holder.clone())
        .collect();
    for holder in holders {
        if let Some(node) = next.dep_graph.get_mut(&holder) {
            for id in ids {
                node.affected_course_ids.remove(id);
            }
        }
    }

    affected.retain(|a| next.contains(a));
    tracing::debug!(deleted = ids.len(), affected = affected.len(), "courses deleted");
    (next, affected)
}

/// Move planned courses to another term
///
/// Returns the moved ids, their dependents and their successor parts.
///
/// # Errors
/// Returns [`GraphConsistencyError::CourseNotPlanned`] when any id is not
/// planned; nothing is moved in that case.
pub fn move_courses(
    data: &CourseDepData,
    ids: &[CourseId],
    new_term_id: &TermId,
) -> Result<(CourseDepData, AffectedSet), GraphConsistencyError> {
    if let Some(missing) = ids.iter().find(|id| !data.contains(id)) {
        return Err(GraphConsistencyError::CourseNotPlanned(missing.clone()));
    }

    let mut next = data.clone();
    let mut affected = AffectedSet::new();

    for id in ids {
        if let Some(node) = next.dep_graph.get_mut(id) {
            node.term_id = new_term_id.clone();
            affected.extend(node.affected_course_ids.iter().cloned());
        }
        affected.insert(id.clone());
        if let Some(part) = id.successor_part().filter(|p| next.contains(p)) {
            affected.insert(part);
        }
    }

    tracing::debug!(term = %new_term_id, moved = ids.len(), affected = affected.len(), "courses moved");
    Ok((next, affected))
}

/// Planned courses carrying a credit rule over any of `subjects`
///
/// Callers widen an affected set with this when the taken ledger or the
/// planned courses of a subject change.
#[must_use]
pub fn credit_dependents<'a>(
    data: &CourseDepData,
    subjects: impl IntoIterator<Item = &'a SubjectCode>,
) -> AffectedSet {
    subjects
        .into_iter()
        .flat_map(|subject| data.credit_requirers(subject).cloned())
        .collect()
}

/// Planned courses whose requisites reference any of `targets`
///
/// Scans the catalog entries of every planned course, so it also finds
/// references to courses that are not planned themselves. The targets are
/// never part of the result.
#[must_use]
pub fn courses_referencing(
    data: &CourseDepData,
    catalog: &dyn CourseCatalog,
    targets: &[CourseId],
) -> AffectedSet {
    data.course_ids()
        .filter(|planned| !targets.contains(planned))
        .filter(|planned| {
            catalog
                .requisites(planned)
                .is_some_and(|reqs| targets.iter().any(|t| reqs.references(t)))
        })
        .cloned()
        .collect()
}
