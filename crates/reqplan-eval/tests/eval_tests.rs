//! Evaluator and propagator integration tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use reqplan_eval::{
    is_group_satisfied, is_satisfied, recompute_affected, recompute_all, CourseTaken, EvalContext,
    Scope, TermOrder,
};
use reqplan_grammar::parse_requisite_text;
use reqplan_graph::{delete_courses, move_courses, CourseDepData, TermId};
use reqplan_test_utils::{affected, id, ids, sample_catalog, CatalogBuilder, PlanBuilder};

#[test]
fn moving_a_prerequisite_later_flips_dependent() {
    let catalog = sample_catalog();
    let mut plan = PlanBuilder::new(&catalog)
        .term("T0", &["COMP 250"])
        .term("T1", &["COMP 251"])
        .term("T2", &[])
        .build();
    assert!(plan.deps.is_satisfied(&id("COMP 251")));

    let (mut deps, returned) = move_courses(&plan.deps, &ids(&["COMP 250"]), &"T2".into()).unwrap();
    assert!(returned.contains(&id("COMP 251")));

    recompute_affected(&mut deps, &returned, &plan.ctx(&catalog)).unwrap();
    plan.deps = deps;
    assert!(!plan.deps.is_satisfied(&id("COMP 251")));
}

#[test]
fn positions_need_not_be_contiguous() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 202"])
        .term("F2024", &["COMP 250"])
        .term("W2025", &["COMP 251"])
        .build();
    let recomputed = |order: &TermOrder| {
        let mut deps = plan.deps.clone();
        recompute_all(&mut deps, &EvalContext::new(order, &plan.taken, &catalog)).unwrap();
        deps
    };

    let spread = TermOrder::new()
        .with_order("F2024".into(), 10)
        .with_order("W2025".into(), 30);
    assert!(recomputed(&spread).is_satisfied(&id("COMP 251")));

    let swapped = spread.with_order("F2024".into(), 40);
    assert!(!recomputed(&swapped).is_satisfied(&id("COMP 251")));
}

#[test]
fn taken_course_satisfies_prerequisite_without_planning() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 250"])
        .term("T0", &["COMP 251"])
        .build();

    assert!(plan.deps.is_satisfied(&id("COMP 251")));
}

#[test]
fn later_part_is_never_satisfied_by_the_ledger() {
    let catalog = CatalogBuilder::new()
        .course("COMP 361D1", 3.0)
        .course("COMP 361D2", 3.0)
        .with_prereq("COMP 499", 3.0, "COMP 361D2")
        .build();

    let taken_only = PlanBuilder::new(&catalog)
        .taken(&["COMP 361D1", "COMP 361D2"])
        .term("T0", &["COMP 499"])
        .build();
    assert!(!taken_only.deps.is_satisfied(&id("COMP 499")));

    let adjacent = PlanBuilder::new(&catalog)
        .term("T0", &["COMP 361D1"])
        .term("T1", &["COMP 361D2"])
        .term("T2", &["COMP 499"])
        .build();
    assert!(adjacent.deps.is_satisfied(&id("COMP 361D2")));
    assert!(adjacent.deps.is_satisfied(&id("COMP 499")));

    let gap = PlanBuilder::new(&catalog)
        .term("T0", &["COMP 361D1"])
        .term("T1", &["COMP 361D2"])
        .term("T2", &[])
        .term("T3", &["COMP 499"])
        .build();
    assert!(!gap.deps.is_satisfied(&id("COMP 499")));
}

#[test]
fn credit_rule_counts_qualifying_subjects_only() {
    let mut builder = CatalogBuilder::new();
    for code in ["MATH 101", "MATH 102", "MATH 103", "COMP 101", "COMP 102", "COMP 103", "COMP 104"] {
        builder = builder.course(code, 1.0);
    }
    let catalog = builder.course("BIOL 101", 1.0).course("BIOL 102", 1.0).build();

    let group = parse_requisite_text("(6-0-MATH-COMP)").unwrap();
    let order = TermOrder::from_terms([TermId::new("T0")]);
    let deps = CourseDepData::new();
    let me = id("COMP 499");
    let scope = Scope {
        course: &me,
        current_order: 0,
        include_current_term: false,
    };

    let verdict_with = |codes: &[&str]| {
        let taken: CourseTaken = ids(codes).into_iter().collect();
        is_group_satisfied(&group, scope, &deps, &EvalContext::new(&order, &taken, &catalog)).unwrap()
    };

    assert!(!verdict_with(&["MATH 101", "MATH 102", "MATH 103", "COMP 101", "COMP 102"]));
    assert!(!verdict_with(&[
        "MATH 101", "MATH 102", "MATH 103", "COMP 101", "COMP 102", "BIOL 101", "BIOL 102"
    ]));
    assert!(verdict_with(&["MATH 101", "MATH 102", "MATH 103", "COMP 101", "COMP 102", "COMP 103"]));
    assert!(verdict_with(&[
        "MATH 101", "MATH 102", "MATH 103", "COMP 101", "COMP 102", "COMP 103", "COMP 104"
    ]));
}

#[test]
fn credit_rule_mixes_planned_and_taken() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 302"])
        .term("T0", &["MATH 340"])
        .term("T1", &["COMP 400"])
        .build();

    assert!(plan.deps.is_satisfied(&id("COMP 400")));
}

#[test]
fn credit_rule_respects_level_scope() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 202", "COMP 250", "MATH 133", "MATH 240"])
        .term("T0", &["COMP 400"])
        .build();

    assert!(!plan.deps.is_satisfied(&id("COMP 400")));
}

#[test]
fn deleting_returns_dependents_which_then_fail() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .term("T0", &["COMP 202"])
        .term("T1", &["COMP 250"])
        .term("T2", &["COMP 251"])
        .build();
    assert!(plan.deps.is_satisfied(&id("COMP 251")));

    let (mut deps, returned) = delete_courses(&plan.deps, &ids(&["COMP 250"]));
    assert_eq!(returned, affected(&["COMP 251"]));

    recompute_affected(&mut deps, &returned, &plan.ctx(&catalog)).unwrap();
    assert!(!deps.is_satisfied(&id("COMP 251")));
    assert!(deps.is_satisfied(&id("COMP 202")));
}

#[test]
fn deleting_keeps_dependents_with_an_alternative() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 202", "COMP 250"])
        .term("T0", &["COMP 251", "MATH 240"])
        .term("T1", &["COMP 252"])
        .build();
    assert!(plan.deps.is_satisfied(&id("COMP 252")));

    let (mut deps, returned) = delete_courses(&plan.deps, &ids(&["COMP 251"]));
    assert_eq!(returned, affected(&["COMP 252"]));

    recompute_affected(&mut deps, &returned, &plan.ctx(&catalog)).unwrap();
    assert!(deps.is_satisfied(&id("COMP 252")));
}

#[test]
fn restricted_course_is_blocked_by_taken_course() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 202"])
        .term("T0", &["COMP 204"])
        .build();

    assert!(!plan.deps.is_satisfied(&id("COMP 204")));
}

#[test]
fn unplanned_course_is_unsatisfied() {
    let catalog = sample_catalog();
    let plan = PlanBuilder::new(&catalog)
        .taken(&["COMP 202", "COMP 250"])
        .term("T0", &["COMP 252"])
        .build();

    assert!(!is_satisfied(&id("COMP 251"), &plan.deps, &plan.ctx(&catalog)).unwrap());
}

proptest! {
    #[test]
    fn prop_credit_verdict_never_regresses(
        required in 1..12u32,
        credits in proptest::collection::vec((any::<bool>(), 0..4u8), 1..15),
    ) {
        let mut builder = CatalogBuilder::new();
        let mut codes = Vec::new();
        for (i, (qualifies, weight)) in credits.iter().enumerate() {
            let subject = if *qualifies { "MATH" } else { "BIOL" };
            let code = format!("{subject} {}", 100 + i);
            builder = builder.course(&code, f64::from(*weight));
            codes.push(code);
        }
        let catalog = builder.build();

        let group = parse_requisite_text(&format!("({required}-0-MATH)")).unwrap();
        let order = TermOrder::from_terms([TermId::new("T0")]);
        let deps = CourseDepData::new();
        let me = id("COMP 499");
        let scope = Scope { course: &me, current_order: 0, include_current_term: false };

        let mut taken = CourseTaken::new();
        let mut was_satisfied = false;
        for code in &codes {
            taken.record(id(code));
            let ctx = EvalContext::new(&order, &taken, &catalog);
            let now = is_group_satisfied(&group, scope, &deps, &ctx).unwrap();
            prop_assert!(now || !was_satisfied, "verdict regressed after {}", code);
            was_satisfied = now;
        }
    }

    #[test]
    fn prop_unplanned_courses_are_unsatisfied(taken in proptest::sample::subsequence(
        vec!["COMP 202", "COMP 250", "COMP 251", "MATH 240", "COMP 302"], 0..=5,
    )) {
        let catalog = sample_catalog();
        let plan = PlanBuilder::new(&catalog).taken(&taken).term("T0", &[]).build();
        let ctx = plan.ctx(&catalog);

        for code in ["COMP 250", "COMP 251", "COMP 252", "COMP 400", "COMP 361D2"] {
            prop_assert!(!is_satisfied(&id(code), &plan.deps, &ctx).unwrap());
        }
    }
}
