//! Course id extraction
//!
//! Finds course codes in catalog text and expands the compact notations used
//! by catalogs into one canonical [`CourseId`] per course:
//!
//! - multi-term suffixes: `COMP 361D1/D2` → `COMP 361D1`, `COMP 361D2`
//! - cross-listed subjects: `NRSC/BIOL 451` → `NRSC 451`, `BIOL 451`
//! - run-on numbers: `COMP 579, 550, 330` → `COMP 579`, `COMP 550`, `COMP 330`

use crate::course_id::{CourseId, SubjectCode, TermSuffix};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use smallvec::SmallVec;

/// Subject-shaped words that are never course subjects
const SEASON_WORDS: &[&str] = &["FALL", "WINT", "SUMM", "SPRI"];

/// Master pattern: subjects, number, suffix list, run-on numbers
///
/// The body must not follow a letter nor precede a digit. A letter may follow
/// it, so ids run together by space skipping (`COMP250MATH240`) still split.
static COURSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:^|[^A-Z])(?P<body>(?P<subjects>[A-Z]{4}(?:\s*/\s*[A-Z]{4})*)",
        r"[\s-]*(?P<number>\d{3})",
        r"(?P<suffixes>[A-Z]\d(?:\s*/\s*[A-Z]?\d)*)?",
        r"(?P<runon>(?:\s*,\s*\d{3}(?:[A-Z]\d(?:\s*/\s*[A-Z]?\d)*)?)*))(?:[^0-9]|$)",
    ))
    .expect("course pattern compiles")
});

/// One number (with optional suffix list) inside a run-on match
static PIECE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<number>\d{3})(?P<suffixes>[A-Z]\d(?:\s*/\s*[A-Z]?\d)*)?")
        .expect("piece pattern compiles")
});

/// A course number with the suffixes listed after it
#[derive(Debug)]
struct Piece<'a> {
    number: &'a str,
    suffixes: SmallVec<[TermSuffix; 3]>,
}

impl<'a> Piece<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let number = caps.name("number")?.as_str();
        let suffixes = caps
            .name("suffixes")
            .map(|m| expand_suffixes(m.as_str()))
            .unwrap_or_default();
        Some(Self { number, suffixes })
    }

    /// One id per suffix, or the bare id when there is none
    fn expand(&self, subject: &SubjectCode) -> SmallVec<[CourseId; 3]> {
        if self.suffixes.is_empty() {
            return CourseId::from_parts(subject.clone(), self.number, None)
                .into_iter()
                .collect();
        }
        self.suffixes
            .iter()
            .filter_map(|s| CourseId::from_parts(subject.clone(), self.number, Some(*s)).ok())
            .collect()
    }
}

/// `D1/D2` or `D1/2` → `[D1, D2]`; a bare digit reuses the first letter
fn expand_suffixes(raw: &str) -> SmallVec<[TermSuffix; 3]> {
    let mut out = SmallVec::new();
    let mut letter = None;

    for part in raw.split('/').map(str::trim) {
        let suffix = match (part.len(), letter) {
            (1, Some(l)) => part
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .and_then(|d| u8::try_from(d).ok())
                .and_then(|d| TermSuffix::new(l, d)),
            _ => TermSuffix::parse(part),
        };

        if let Some(s) = suffix {
            letter.get_or_insert(s.letter());
            out.push(s);
        }
    }

    out
}

fn subjects_of(raw: &str) -> SmallVec<[SubjectCode; 2]> {
    raw.split('/')
        .map(str::trim)
        .filter(|s| !SEASON_WORDS.contains(s))
        .filter_map(|s| SubjectCode::new(s).ok())
        .collect()
}

/// Extract canonical course ids from free text
///
/// Matching ignores case. Returns ids deduplicated in order of first
/// appearance. With `find_all = false` at most one id is returned. Text
/// without course codes yields an empty list.
///
/// # Example
/// ```
/// use reqplan_course::{extract_course_ids, CourseId};
///
/// let ids = extract_course_ids("COMP 361D1/D2", true);
/// assert_eq!(ids, vec![
///     CourseId::parse("COMP361D1").unwrap(),
///     CourseId::parse("COMP361D2").unwrap(),
/// ]);
/// ```
#[must_use]
pub fn extract_course_ids(raw: &str, find_all: bool) -> Vec<CourseId> {
    let text = raw.to_ascii_uppercase();
    let mut found: IndexSet<CourseId> = IndexSet::new();
    let mut start = 0;

    while let Some(caps) = COURSE_PATTERN.captures_at(&text, start) {
        let Some(body) = caps.name("body") else {
            break;
        };
        // resume on the body's last digit, which can open the next match
        start = body.end() - 1;

        let subjects = caps
            .name("subjects")
            .map(|m| subjects_of(m.as_str()))
            .unwrap_or_default();
        if subjects.is_empty() {
            continue;
        }

        let mut pieces: SmallVec<[Piece<'_>; 4]> = Piece::from_captures(&caps).into_iter().collect();
        if let Some(runon) = caps.name("runon") {
            pieces.extend(
                PIECE_PATTERN
                    .captures_iter(runon.as_str())
                    .filter_map(|c| Piece::from_captures(&c)),
            );
        }

        for subject in &subjects {
            for piece in &pieces {
                found.extend(piece.expand(subject));
            }
        }

        if !find_all && !found.is_empty() {
            break;
        }
    }

    let mut ids: Vec<CourseId> = found.into_iter().collect();
    if !find_all {
        ids.truncate(1);
    }
    ids
}
