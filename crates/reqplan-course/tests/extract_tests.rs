use proptest::prelude::*;
use reqplan_course::{extract_course_ids, CourseId};

fn course_id_strategy() -> impl Strategy<Value = (String, String, Option<(char, u8)>)> {
    (
        "[A-Z]{4}",
        "[0-9]{3}",
        proptest::option::of((proptest::char::range('A', 'Z'), 1..=9u8)),
    )
}

proptest! {
    #[test]
    fn prop_rendered_id_extracts_to_itself((subject, number, suffix) in course_id_strategy()) {
        prop_assume!(!["FALL", "WINT", "SUMM", "SPRI"].contains(&subject.as_str()));

        let raw = match suffix {
            Some((letter, part)) => format!("{subject} {number}{letter}{part}"),
            None => format!("{subject} {number}"),
        };
        let id = CourseId::parse(&raw).unwrap();

        prop_assert_eq!(extract_course_ids(&raw, true), vec![id.clone()]);
        prop_assert_eq!(extract_course_ids(&id.to_string(), false), vec![id]);
    }

    #[test]
    fn prop_find_one_is_prefix_of_find_all(text in "[A-Z ,/0-9]{0,40}") {
        let all = extract_course_ids(&text, true);
        let one = extract_course_ids(&text, false);

        prop_assert!(one.len() <= 1);
        prop_assert_eq!(one.first(), all.first());
    }
}

#[test]
fn extracts_from_catalog_prose() {
    let text = "Prerequisites: COMP 250 and MATH 235 or MATH 240; NRSC/BIOL 451.";
    let ids: Vec<String> = extract_course_ids(text, true)
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    assert_eq!(
        ids,
        vec!["COMP 250", "MATH 235", "MATH 240", "NRSC 451", "BIOL 451"]
    );
}

#[test]
fn multi_term_scenario() {
    let ids = extract_course_ids("COMP 361D1/D2", true);
    assert_eq!(
        ids,
        vec![
            CourseId::parse("COMP361D1").unwrap(),
            CourseId::parse("COMP361D2").unwrap()
        ]
    );
}
