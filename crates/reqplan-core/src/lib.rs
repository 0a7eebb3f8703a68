//! Reqplan Core - requisite planner
//!
//! The entry point for applications:
//! - Loads a course catalog and parses its requisite text
//! - Keeps one dependency state per plan
//! - Runs every user action as a single transaction
//! - Keeps each planned course's verdict current
//!
//! # Example
//!
//! ```rust
//! use reqplan_core::{Planner, PlannerConfig};
//! use reqplan_course::CourseId;
//! use reqplan_graph::TermId;
//!
//! let catalog = r#"[
//!     {"id": "COMP 250", "credits": 3},
//!     {"id": "COMP 251", "credits": 3, "prerequisites": "COMP 250"}
//! ]"#;
//! let mut planner = Planner::from_catalog_json(PlannerConfig::default(), catalog).unwrap();
//! let plan = planner.create_plan(["F2024", "W2025"].map(TermId::from));
//!
//! let comp250 = CourseId::parse("COMP 250").unwrap();
//! let comp251 = CourseId::parse("COMP 251").unwrap();
//! planner.add_courses(plan, &"W2025".into(), &[comp251.clone()]).unwrap();
//! assert!(!planner.is_satisfied(plan, &comp251).unwrap());
//!
//! planner.add_courses(plan, &"F2024".into(), &[comp250]).unwrap();
//! assert!(planner.is_satisfied(plan, &comp251).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod telemetry;

// Re-exports for convenience
pub use config::{ConfigError, PlannerConfig};
pub use error::{PlannerError, PlannerResult};
pub use plan::{PlanDependencyState, PlanId};
pub use planner::Planner;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the planner
    pub use crate::{PlanId, Planner, PlannerConfig, PlannerError, PlannerResult};
    pub use reqplan_course::CourseId;
    pub use reqplan_graph::{EquivalenceRule, TermId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
