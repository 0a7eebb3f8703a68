//! Error types for the dependency graph and catalog

use crate::term::TermId;
use reqplan_course::{CourseId, CourseIdError};

/// A plan, term or course assumed present is absent
///
/// Indicates a caller state-management bug. Fatal to the current batch only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphConsistencyError {
    /// Course is not in the plan's dependency graph
    #[error("course {0} is not planned")]
    CourseNotPlanned(CourseId),

    /// Course sits in a term missing from the term order
    #[error("course {course} is planned in term {term}, which has no order")]
    TermNotOrdered {
        /// Course being evaluated
        course: CourseId,
        /// Term without an order entry
        term: TermId,
    },
}

/// Catalog ingestion failures
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog document is not valid JSON of the expected shape
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// A record carries an id that is not a course code
    #[error("invalid course id {raw:?}: {source}")]
    InvalidCourseId {
        /// Raw id text
        raw: String,
        /// Underlying failure
        #[source]
        source: CourseIdError,
    },
}
