//! Reqplan Dependency Graph
//!
//! Per-plan structure mapping each planned course to its term, its last
//! computed verdict and the planned courses that depend on it.
//!
//! # Overview
//!
//! - [`CourseDepData`]: persistent graph plus subject and credit indices
//! - [`add_courses`], [`delete_courses`], [`move_courses`]: copy-on-write
//!   mutators returning the ids that need recomputation
//! - [`EquivalenceRules`]: one-hop course substitutions owned by a plan
//! - [`CourseCatalog`]: read access to parsed course metadata
//!
//! # Example
//!
//! ```rust
//! use reqplan_course::CourseId;
//! use reqplan_graph::{add_courses, CourseDepData, CourseInfo, InMemoryCatalog, TermId};
//!
//! let comp250 = CourseId::parse("COMP 250").unwrap();
//! let mut catalog = InMemoryCatalog::new();
//! catalog.insert(CourseInfo::new(comp250.clone(), 3.0));
//!
//! let (graph, affected) = add_courses(
//!     &CourseDepData::new(),
//!     &[comp250.clone()],
//!     &TermId::new("F2024"),
//!     &catalog,
//! );
//! assert!(graph.contains(&comp250));
//! assert!(affected.contains(&comp250));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod equivalence;
pub mod error;
pub mod graph;
pub mod mutate;
pub mod term;

// Re-exports
pub use catalog::{CourseCatalog, CourseInfo, InMemoryCatalog, RawCourse};
pub use equivalence::{
    add_equivalence_rule, remove_equivalence_rule, EquivalenceRule, EquivalenceRules,
};
pub use error::{CatalogError, GraphConsistencyError};
pub use graph::{AffectedSet, CourseDepData, DependencyGraphNode};
pub use mutate::{add_courses, courses_referencing, credit_dependents, delete_courses, move_courses};
pub use term::TermId;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
