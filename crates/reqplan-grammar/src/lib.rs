//! Reqplan Requisite Grammar
//!
//! Turns canonical requisite strings into logical expression trees.
//!
//! # Core Concepts
//!
//! - [`Group`]: AND / OR / SINGLE / PAIR / CREDIT / EMPTY expression tree
//! - [`RequisiteParser`]: recursive-descent parser for the requisite grammar
//! - [`Requirement`]: a group tagged with its [`RequirementKind`]
//! - [`Requisites`]: the prerequisite, corequisite and restriction fields of
//!   one course
//!
//! # Example
//!
//! ```rust
//! use reqplan_grammar::{parse_requisite_text, Group};
//!
//! let group = parse_requisite_text("COMP 250 + (MATH 235 / MATH 240)").unwrap();
//!
//! // canonical text parses back to the same tree
//! let again = parse_requisite_text(&group.to_string()).unwrap();
//! assert_eq!(group, again);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod group;
pub mod parser;
pub mod requirement;

// Re-exports
pub use error::ParseError;
pub use group::{CreditRule, Group, GroupKind, Node};
pub use parser::{parse_requisite_text, RequisiteParser};
pub use requirement::{Requirement, RequirementKind, Requisites};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with requisite groups
    pub use crate::{
        parse_requisite_text, CreditRule, Group, GroupKind, Node, ParseError, Requirement,
        RequirementKind, Requisites, RequisiteParser,
    };
    pub use reqplan_course::{CourseId, SubjectCode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
