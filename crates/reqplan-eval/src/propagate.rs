//! Update propagator
//!
//! Recomputes exactly the ids a mutator reported. Every verdict of a batch
//! is computed before any is written, so a consistency error leaves the
//! graph as it was.

use crate::context::EvalContext;
use crate::evaluate::is_satisfied;
use reqplan_graph::{AffectedSet, CourseDepData, GraphConsistencyError};

/// Recompute and store the verdicts of `affected`
///
/// Ids no longer in the graph are skipped. The set is never widened; callers
/// widen it beforehand (for example through
/// [`reqplan_graph::credit_dependents`]).
///
/// # Errors
/// Returns the first [`GraphConsistencyError`] met; no verdict is written in
/// that case.
pub fn recompute_affected(
    deps: &mut CourseDepData,
    affected: &AffectedSet,
    ctx: &EvalContext<'_>,
) -> Result<(), GraphConsistencyError> {
    let mut verdicts = Vec::with_capacity(affected.len());

    for id in affected {
        if !deps.contains(id) {
            tracing::trace!(course = %id, "skipping course no longer planned");
            continue;
        }
        match is_satisfied(id, deps, ctx) {
            Ok(verdict) => verdicts.push((id, verdict)),
            Err(error) => {
                tracing::error!(course = %id, %error, "recomputation batch aborted");
                return Err(error);
            }
        }
    }

    let changed = verdicts
        .iter()
        .filter(|(id, verdict)| deps.is_satisfied(id) != *verdict)
        .count();
    for (id, verdict) in verdicts {
        deps.set_satisfied(id, verdict);
    }

    tracing::debug!(recomputed = affected.len(), changed, "verdicts updated");
    Ok(())
}

/// Recompute every planned course
///
/// # Errors
/// See [`recompute_affected`].
pub fn recompute_all(
    deps: &mut CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<(), GraphConsistencyError> {
    let all: AffectedSet = deps.course_ids().cloned().collect();
    recompute_affected(deps, &all, ctx)
}
