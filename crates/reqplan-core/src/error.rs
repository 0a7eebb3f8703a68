//! Error types for the planner
//!
//! Wraps the failures of every layer below so callers handle one type.

use crate::config::ConfigError;
use crate::plan::PlanId;
use reqplan_grammar::ParseError;
use reqplan_graph::{CatalogError, GraphConsistencyError};

/// Main planner error type
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Requisite text did not parse
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Caller state is inconsistent; the action was rolled back
    #[error("consistency error: {0}")]
    Consistency(#[from] GraphConsistencyError),

    /// Catalog could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// No plan with this id
    #[error("plan {0} not found")]
    PlanNotFound(PlanId),
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqplan_course::CourseId;

    #[test]
    fn wraps_consistency_errors() {
        let id = CourseId::parse("COMP 250").unwrap();
        let err: PlannerError = GraphConsistencyError::CourseNotPlanned(id).into();

        assert!(matches!(err, PlannerError::Consistency(_)));
        assert_eq!(err.to_string(), "consistency error: course COMP 250 is not planned");
    }
}
