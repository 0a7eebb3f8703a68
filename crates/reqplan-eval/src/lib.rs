//! Reqplan Evaluator
//!
//! Decides whether each planned course's requisites are met and keeps the
//! graph's verdicts current after a mutation.
//!
//! # Overview
//!
//! - [`is_satisfied`]: whole-course verdict (restriction, prerequisites,
//!   corequisites, multi-term ordering)
//! - [`is_group_satisfied`]: verdict of one requisite group in a [`Scope`]
//! - [`recompute_affected`]: write fresh verdicts for a mutator's affected set
//! - [`TermOrder`], [`CourseTaken`]: caller-owned inputs
//!
//! # Example
//!
//! ```rust
//! use reqplan_course::CourseId;
//! use reqplan_eval::{recompute_affected, CourseTaken, EvalContext, TermOrder};
//! use reqplan_graph::{add_courses, CourseDepData, InMemoryCatalog, RawCourse, TermId};
//! use reqplan_grammar::RequisiteParser;
//!
//! let catalog = InMemoryCatalog::from_records(
//!     [
//!         RawCourse { id: "COMP 250".into(), credits: 3.0, ..RawCourse::default() },
//!         RawCourse {
//!             id: "COMP 251".into(),
//!             credits: 3.0,
//!             prerequisites: Some("COMP 250".into()),
//!             ..RawCourse::default()
//!         },
//!     ],
//!     &RequisiteParser::new(),
//! )
//! .unwrap();
//!
//! let comp250 = CourseId::parse("COMP 250").unwrap();
//! let comp251 = CourseId::parse("COMP 251").unwrap();
//! let (deps, _) = add_courses(&CourseDepData::new(), &[comp250], &"F".into(), &catalog);
//! let (mut deps, affected) = add_courses(&deps, &[comp251.clone()], &"W".into(), &catalog);
//!
//! let order = TermOrder::from_terms(["F", "W"].map(TermId::from));
//! let taken = CourseTaken::new();
//! recompute_affected(&mut deps, &affected, &EvalContext::new(&order, &taken, &catalog)).unwrap();
//! assert!(deps.is_satisfied(&comp251));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod context;
pub mod evaluate;
pub mod propagate;
pub mod taken;
pub mod term_order;

// Re-exports
pub use context::EvalContext;
pub use evaluate::{is_group_satisfied, is_node_satisfied, is_satisfied, Scope};
pub use propagate::{recompute_affected, recompute_all};
pub use taken::CourseTaken;
pub use term_order::TermOrder;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
