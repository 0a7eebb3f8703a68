//! Course-taken ledger

use im::HashMap;
use reqplan_course::{CourseId, SubjectCode};
use serde::{Deserialize, Serialize};

/// Courses a student has already completed, grouped by subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTaken {
    by_subject: HashMap<SubjectCode, Vec<CourseId>>,
}

impl CourseTaken {
    /// Empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed course; returns false if it was already recorded
    pub fn record(&mut self, id: CourseId) -> bool {
        let courses = self
            .by_subject
            .entry(id.subject().clone())
            .or_insert_with(Vec::new);
        if courses.contains(&id) {
            return false;
        }
        courses.push(id);
        true
    }

    /// Forget a course; returns false if it was not recorded
    pub fn forget(&mut self, id: &CourseId) -> bool {
        let Some(courses) = self.by_subject.get_mut(id.subject()) else {
            return false;
        };
        let before = courses.len();
        courses.retain(|c| c != id);
        let removed = courses.len() != before;
        if courses.is_empty() {
            self.by_subject.remove(id.subject());
        }
        removed
    }

    /// True when the course was completed
    #[must_use]
    pub fn contains(&self, id: &CourseId) -> bool {
        self.by_subject
            .get(id.subject())
            .is_some_and(|courses| courses.contains(id))
    }

    /// Completed courses of a subject, in recording order
    #[must_use]
    pub fn courses_of_subject(&self, subject: &SubjectCode) -> &[CourseId] {
        self.by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every completed course
    pub fn iter(&self) -> impl Iterator<Item = &CourseId> {
        self.by_subject.values().flatten()
    }

    /// Number of completed courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_subject.values().map(Vec::len).sum()
    }

    /// True when nothing is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }
}

impl FromIterator<CourseId> for CourseTaken {
    fn from_iter<I: IntoIterator<Item = CourseId>>(iter: I) -> Self {
        let mut taken = Self::new();
        for id in iter {
            taken.record(id);
        }
        taken
    }
}
