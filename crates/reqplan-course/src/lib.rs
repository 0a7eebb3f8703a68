//! Reqplan Course Identifiers
//!
//! Canonical course ids and the extractor that finds them in catalog text.
//!
//! # Overview
//!
//! - **SubjectCode**: four-character subject (`COMP`)
//! - **CourseId**: subject + number + optional consecutive-term suffix
//! - **extract_course_ids**: expands compact catalog notations into ids
//!
//! # Example
//!
//! ```rust
//! use reqplan_course::{extract_course_ids, CourseId};
//!
//! let ids = extract_course_ids("NRSC/BIOL 451", true);
//! assert_eq!(ids.len(), 2);
//! assert_eq!(ids[1], CourseId::parse("BIOL 451").unwrap());
//! ```

#![warn(missing_docs)]

pub mod course_id;
pub mod extract;

// Re-exports
pub use course_id::{CourseId, CourseIdError, SubjectCode, TermSuffix};
pub use extract::extract_course_ids;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
