//! Satisfiability evaluator
//!
//! Interprets requisite groups against a plan's graph, term order and taken
//! ledger. Absence is never an error here: a course that is neither planned
//! nor taken simply does not satisfy anything. The only failure is a planned
//! course whose term has no position, which means the caller's state is
//! inconsistent.

use crate::context::EvalContext;
use reqplan_course::CourseId;
use reqplan_grammar::{CreditRule, Group, Node};
use reqplan_graph::{CourseDepData, GraphConsistencyError};
use std::collections::HashSet;

/// Where a group is evaluated
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s> {
    /// Course whose requisites are being evaluated
    pub course: &'s CourseId,
    /// Position of that course's term
    pub current_order: i32,
    /// Whether courses planned in the same term count
    pub include_current_term: bool,
}

impl Scope<'_> {
    /// Whether a course planned at `order` counts as done
    #[inline]
    #[must_use]
    pub fn admits(&self, order: i32) -> bool {
        order < self.current_order || (self.include_current_term && order == self.current_order)
    }

    fn previous_order(&self) -> Option<i32> {
        self.current_order.checked_sub(1)
    }
}

/// Evaluate a course leaf or nested group
///
/// # Errors
/// Returns [`GraphConsistencyError::TermNotOrdered`] when a planned course's
/// term has no position.
pub fn is_node_satisfied(
    node: &Node,
    scope: Scope<'_>,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    match node {
        Node::Course(id) => is_leaf_satisfied(id, scope, deps, ctx),
        Node::Group(group) => is_group_satisfied(group, scope, deps, ctx),
    }
}

/// Evaluate a group
///
/// # Errors
/// See [`is_node_satisfied`].
pub fn is_group_satisfied(
    group: &Group,
    scope: Scope<'_>,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    match group {
        Group::Empty => Ok(true),
        Group::Single(children) | Group::Or(children) => {
            for child in children {
                if is_node_satisfied(child, scope, deps, ctx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Group::And(children) => {
            for child in children {
                if !is_node_satisfied(child, scope, deps, ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Group::Pair(children) => {
            let mut held = 0;
            for child in children {
                if is_node_satisfied(child, scope, deps, ctx)? {
                    held += 1;
                    if held >= 2 {
                        return Ok(true);
                    }
                }
            }
            Ok(false)
        }
        Group::Credit(rule) => is_credit_satisfied(rule, scope, deps, ctx),
    }
}

/// Evaluate a course leaf, falling back to its direct equivalents
fn is_leaf_satisfied(
    id: &CourseId,
    scope: Scope<'_>,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    if satisfies_leaf(id, scope, deps, ctx)? {
        return Ok(true);
    }
    for equivalent in ctx.equivalents(id) {
        if satisfies_leaf(equivalent, scope, deps, ctx)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn satisfies_leaf(
    id: &CourseId,
    scope: Scope<'_>,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    // a later part only counts when it directly follows its predecessor
    if id.is_multi_term() {
        let planned = ctx.planned_order(deps, id)?;
        return Ok(planned.is_some() && planned == scope.previous_order());
    }
    if ctx.taken().contains(id) {
        return Ok(true);
    }
    Ok(ctx
        .planned_order(deps, id)?
        .is_some_and(|order| scope.admits(order)))
}

/// Accumulate qualifying credits until the threshold is met
///
/// Each course counts once even if it is both taken and planned. The course
/// being evaluated never counts toward its own rule.
fn is_credit_satisfied(
    rule: &CreditRule,
    scope: Scope<'_>,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    if rule.is_vacuous() {
        return Ok(true);
    }

    let required = f64::from(rule.required_credits);
    let mut accumulated = 0.0;
    let mut seen = HashSet::new();

    for subject in &rule.subjects {
        let taken = ctx.taken().courses_of_subject(subject).iter();
        for id in taken.chain(deps.courses_of_subject(subject)) {
            if id == scope.course || !rule.counts(id) || !seen.insert(id) {
                continue;
            }
            let done = ctx.taken().contains(id)
                || ctx
                    .planned_order(deps, id)?
                    .is_some_and(|order| scope.admits(order));
            if done {
                accumulated += ctx.catalog().credits(id);
                if accumulated >= required {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// Whole-course verdict
///
/// A course that is not planned is unsatisfied. A planned course is
/// satisfied when its restriction is not matched, its prerequisites and
/// corequisites hold, and, for a later multi-term part, its predecessor part
/// sits in the immediately preceding term.
///
/// # Errors
/// Returns [`GraphConsistencyError::TermNotOrdered`] when the course or a
/// referenced planned course sits in a term without a position.
pub fn is_satisfied(
    course: &CourseId,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    let Some(current_order) = ctx.planned_order(deps, course)? else {
        return Ok(false);
    };

    let verdict = requisites_hold(course, current_order, deps, ctx)?
        && predecessor_in_place(course, current_order, deps, ctx)?;
    tracing::trace!(%course, satisfied = verdict, "course evaluated");
    Ok(verdict)
}

fn requisites_hold(
    course: &CourseId,
    current_order: i32,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    let Some(requisites) = ctx.catalog().requisites(course) else {
        return Ok(true);
    };

    for requirement in requisites.iter() {
        let met = requirement.is_met_by(|group, include_current_term| {
            let scope = Scope {
                course,
                current_order,
                include_current_term,
            };
            is_group_satisfied(group, scope, deps, ctx)
        })?;
        if !met {
            return Ok(false);
        }
    }
    Ok(true)
}

fn predecessor_in_place(
    course: &CourseId,
    current_order: i32,
    deps: &CourseDepData,
    ctx: &EvalContext<'_>,
) -> Result<bool, GraphConsistencyError> {
    let Some(previous_part) = course.predecessor_part() else {
        return Ok(true);
    };
    let planned = ctx.planned_order(deps, &previous_part)?;
    Ok(matches!(
        (planned, current_order.checked_sub(1)),
        (Some(a), Some(b)) if a == b
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taken::CourseTaken;
    use crate::term_order::TermOrder;
    use reqplan_grammar::{parse_requisite_text, Requisites};
    use reqplan_graph::{add_courses, CourseInfo, EquivalenceRule, EquivalenceRules, InMemoryCatalog, TermId};

    fn id(s: &str) -> CourseId {
        CourseId::parse(s).unwrap()
    }

    fn terms() -> TermOrder {
        TermOrder::from_terms(["T0", "T1", "T2"].map(TermId::from))
    }

    fn catalog(entries: &[(&str, Option<&str>, Option<&str>, Option<&str>)]) -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for (code, pre, co, re) in entries {
            let (reqs, errors) = Requisites::parse(*pre, *co, *re);
            assert!(errors.is_empty(), "{errors:?}");
            catalog.insert(CourseInfo::new(id(code), 3.0).with_requisites(reqs));
        }
        catalog
    }

    fn plan(catalog: &InMemoryCatalog, placements: &[(&str, &str)]) -> CourseDepData {
        placements.iter().fold(CourseDepData::new(), |deps, (code, term)| {
            add_courses(&deps, &[id(code)], &TermId::from(*term), catalog).0
        })
    }

    fn scope(course: &CourseId, current_order: i32, include_current_term: bool) -> Scope<'_> {
        Scope {
            course,
            current_order,
            include_current_term,
        }
    }

    #[test]
    fn empty_group_always_holds() {
        let cat = catalog(&[]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);
        let me = id("COMP 999");

        assert!(is_group_satisfied(&Group::Empty, scope(&me, 0, false), &CourseDepData::new(), &ctx).unwrap());
    }

    #[test]
    fn corequisite_counts_same_term() {
        let cat = catalog(&[("COMP 250", None, None, None), ("COMP 251", None, Some("COMP 250"), None)]);
        let deps = plan(&cat, &[("COMP 250", "T1"), ("COMP 251", "T1")]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        assert!(is_satisfied(&id("COMP 251"), &deps, &ctx).unwrap());
    }

    #[test]
    fn prerequisite_excludes_same_term() {
        let cat = catalog(&[("COMP 250", None, None, None), ("COMP 251", Some("COMP 250"), None, None)]);
        let deps = plan(&cat, &[("COMP 250", "T1"), ("COMP 251", "T1")]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        assert!(!is_satisfied(&id("COMP 251"), &deps, &ctx).unwrap());
    }

    #[test]
    fn restriction_blocks_when_matched() {
        let cat = catalog(&[("COMP 202", None, None, None), ("COMP 204", None, None, Some("COMP 202"))]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        let alone = plan(&cat, &[("COMP 204", "T1")]);
        assert!(is_satisfied(&id("COMP 204"), &alone, &ctx).unwrap());

        let both = plan(&cat, &[("COMP 202", "T1"), ("COMP 204", "T1")]);
        assert!(!is_satisfied(&id("COMP 204"), &both, &ctx).unwrap());
    }

    #[test]
    fn pair_needs_two() {
        let group = parse_requisite_text("MATH 222 | MATH 223 | MATH 240").unwrap();
        let cat = catalog(&[]);
        let order = terms();
        let me = id("COMP 400");

        let one: CourseTaken = [id("MATH 222")].into_iter().collect();
        let ctx = EvalContext::new(&order, &one, &cat);
        assert!(!is_group_satisfied(&group, scope(&me, 1, false), &CourseDepData::new(), &ctx).unwrap());

        let two: CourseTaken = [id("MATH 222"), id("MATH 240")].into_iter().collect();
        let ctx = EvalContext::new(&order, &two, &cat);
        assert!(is_group_satisfied(&group, scope(&me, 1, false), &CourseDepData::new(), &ctx).unwrap());
    }

    #[test]
    fn later_part_needs_predecessor_in_previous_term() {
        let cat = catalog(&[("COMP 361D1", None, None, None), ("COMP 361D2", None, None, None)]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        let adjacent = plan(&cat, &[("COMP 361D1", "T0"), ("COMP 361D2", "T1")]);
        assert!(is_satisfied(&id("COMP 361D2"), &adjacent, &ctx).unwrap());

        let gap = plan(&cat, &[("COMP 361D1", "T0"), ("COMP 361D2", "T2")]);
        assert!(!is_satisfied(&id("COMP 361D2"), &gap, &ctx).unwrap());
    }

    #[test]
    fn equivalent_course_satisfies_leaf() {
        let cat = catalog(&[("MATH 235", None, None, None), ("COMP 252", Some("MATH 240"), None, None)]);
        let deps = plan(&cat, &[("MATH 235", "T0"), ("COMP 252", "T1")]);
        let (order, taken) = (terms(), CourseTaken::new());
        let rules = EquivalenceRules::new().with_rule(&EquivalenceRule::new(id("MATH 240"), id("MATH 235")));

        let without = EvalContext::new(&order, &taken, &cat);
        assert!(!is_satisfied(&id("COMP 252"), &deps, &without).unwrap());

        let with = without.with_equivalences(&rules);
        assert!(is_satisfied(&id("COMP 252"), &deps, &with).unwrap());
    }

    #[test]
    fn credit_rule_ignores_evaluated_course() {
        let group = parse_requisite_text("(3-0-COMP)").unwrap();
        let cat = catalog(&[("COMP 400", None, None, None)]);
        let deps = plan(&cat, &[("COMP 400", "T0")]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);
        let me = id("COMP 400");

        assert!(!is_group_satisfied(&group, scope(&me, 1, true), &deps, &ctx).unwrap());
    }

    #[test]
    fn vacuous_credit_rule_holds() {
        let group = parse_requisite_text("(0-0-COMP)").unwrap();
        let cat = catalog(&[]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);
        let me = id("COMP 400");

        assert!(is_group_satisfied(&group, scope(&me, 0, false), &CourseDepData::new(), &ctx).unwrap());
    }

    #[test]
    fn unordered_term_is_consistency_error() {
        let cat = catalog(&[("COMP 250", None, None, None)]);
        let deps = plan(&cat, &[("COMP 250", "LOST")]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        assert!(matches!(
            is_satisfied(&id("COMP 250"), &deps, &ctx),
            Err(GraphConsistencyError::TermNotOrdered { .. })
        ));
    }

    #[test]
    fn never_planned_is_unsatisfied() {
        let cat = catalog(&[("COMP 250", None, None, None)]);
        let (order, taken) = (terms(), CourseTaken::new());
        let ctx = EvalContext::new(&order, &taken, &cat);

        assert!(!is_satisfied(&id("COMP 250"), &CourseDepData::new(), &ctx).unwrap());
    }
}
