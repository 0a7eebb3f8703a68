//! Typed requirements
//!
//! A [`Requirement`] pairs a parsed [`Group`] with the [`RequirementKind`]
//! it came from. The kind decides how a group verdict turns into a
//! requirement verdict, so callers never invert restriction results by hand.

use crate::error::ParseError;
use crate::group::{CreditRule, Group};
use crate::parser::RequisiteParser;
use reqplan_course::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Which requisite field a requirement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Must be completed in an earlier term
    Prerequisite,
    /// Must be completed in an earlier or the same term
    Corequisite,
    /// Must NOT be completed in an earlier or the same term
    Restriction,
}

impl RequirementKind {
    /// All kinds, in evaluation order
    pub const ALL: [Self; 3] = [Self::Restriction, Self::Prerequisite, Self::Corequisite];

    /// Whether courses in the current term count
    #[inline]
    #[must_use]
    pub fn includes_current_term(self) -> bool {
        !matches!(self, Self::Prerequisite)
    }

    /// Whether a matched group blocks the course
    #[inline]
    #[must_use]
    pub fn is_exclusion(self) -> bool {
        matches!(self, Self::Restriction)
    }
}

impl Display for RequirementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prerequisite => "prerequisite",
            Self::Corequisite => "corequisite",
            Self::Restriction => "restriction",
        };
        f.write_str(name)
    }
}

/// A parsed group tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Field the group came from
    pub kind: RequirementKind,
    /// Parsed expression
    pub group: Group,
}

impl Requirement {
    /// Create requirement from a parsed group
    #[inline]
    #[must_use]
    pub fn new(kind: RequirementKind, group: Group) -> Self {
        Self { kind, group }
    }

    /// Parse requisite text with the default parser
    ///
    /// # Errors
    /// Propagates [`ParseError`] from the parser.
    pub fn parse(kind: RequirementKind, raw: &str) -> Result<Self, ParseError> {
        RequisiteParser::new().parse(raw).map(|group| Self::new(kind, group))
    }

    /// Requirement verdict from a group evaluator
    ///
    /// `eval` receives the group and the include-current-term flag. An empty
    /// restriction never blocks.
    ///
    /// # Errors
    /// Propagates errors from `eval`.
    pub fn is_met_by<E>(
        &self,
        eval: impl FnOnce(&Group, bool) -> Result<bool, E>,
    ) -> Result<bool, E> {
        let include_current = self.kind.includes_current_term();
        if self.kind.is_exclusion() {
            if self.group.is_empty() {
                return Ok(true);
            }
            return eval(&self.group, include_current).map(|matched| !matched);
        }
        eval(&self.group, include_current)
    }
}

/// The three requisite fields of one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisites {
    /// Prerequisites, if any
    pub prerequisites: Option<Requirement>,
    /// Corequisites, if any
    pub corequisites: Option<Requirement>,
    /// Restrictions, if any
    pub restrictions: Option<Requirement>,
}

impl Requisites {
    /// Parse each field with the default parser; see [`Requisites::parse_fields`]
    #[must_use]
    pub fn parse(
        prerequisites: Option<&str>,
        corequisites: Option<&str>,
        restrictions: Option<&str>,
    ) -> (Self, Vec<(RequirementKind, ParseError)>) {
        Self::parse_fields(&RequisiteParser::new(), prerequisites, corequisites, restrictions)
    }

    /// Parse each field independently
    ///
    /// A malformed field is dropped and reported; the other fields are kept.
    #[must_use]
    pub fn parse_fields(
        parser: &RequisiteParser,
        prerequisites: Option<&str>,
        corequisites: Option<&str>,
        restrictions: Option<&str>,
    ) -> (Self, Vec<(RequirementKind, ParseError)>) {
        let mut errors = Vec::new();
        let mut field = |kind: RequirementKind, raw: Option<&str>| {
            let raw = raw?;
            match parser.parse(raw) {
                Ok(group) => Some(Requirement::new(kind, group)),
                Err(e) => {
                    errors.push((kind, e));
                    None
                }
            }
        };

        let requisites = Self {
            prerequisites: field(RequirementKind::Prerequisite, prerequisites),
            corequisites: field(RequirementKind::Corequisite, corequisites),
            restrictions: field(RequirementKind::Restriction, restrictions),
        };
        (requisites, errors)
    }

    /// Requirement of the given kind
    #[must_use]
    pub fn get(&self, kind: RequirementKind) -> Option<&Requirement> {
        match kind {
            RequirementKind::Prerequisite => self.prerequisites.as_ref(),
            RequirementKind::Corequisite => self.corequisites.as_ref(),
            RequirementKind::Restriction => self.restrictions.as_ref(),
        }
    }

    /// Present requirements in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        RequirementKind::ALL.into_iter().filter_map(|kind| self.get(kind))
    }

    /// Every course referenced by any field
    #[must_use]
    pub fn referenced_courses(&self) -> BTreeSet<&CourseId> {
        self.iter().flat_map(|r| r.group.courses()).collect()
    }

    /// True when any field references `id`
    #[must_use]
    pub fn references(&self, id: &CourseId) -> bool {
        self.iter().any(|r| r.group.references(id))
    }

    /// Every credit rule in any field
    #[must_use]
    pub fn credit_rules(&self) -> Vec<&CreditRule> {
        self.iter().flat_map(|r| r.group.credit_rules()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_flags() {
        assert!(!RequirementKind::Prerequisite.includes_current_term());
        assert!(RequirementKind::Corequisite.includes_current_term());
        assert!(RequirementKind::Restriction.includes_current_term());
        assert!(RequirementKind::Restriction.is_exclusion());
    }

    #[test]
    fn restriction_inverts_verdict() {
        let req = Requirement::parse(RequirementKind::Restriction, "COMP 202").unwrap();

        let blocked: Result<bool, ()> = req.is_met_by(|_, include| {
            assert!(include);
            Ok(true)
        });
        assert_eq!(blocked, Ok(false));
    }

    #[test]
    fn empty_restriction_never_blocks() {
        let req = Requirement::new(RequirementKind::Restriction, Group::Empty);
        let verdict: Result<bool, ()> = req.is_met_by(|_, _| Ok(true));
        assert_eq!(verdict, Ok(true));
    }

    #[test]
    fn prerequisite_excludes_current_term() {
        let req = Requirement::parse(RequirementKind::Prerequisite, "COMP 250").unwrap();
        let verdict: Result<bool, ()> = req.is_met_by(|_, include| Ok(!include));
        assert_eq!(verdict, Ok(true));
    }

    #[test]
    fn parse_fields_keeps_good_fields() {
        let parser = RequisiteParser::new();
        let (reqs, errors) = Requisites::parse_fields(
            &parser,
            Some("COMP 250 + MATH 240"),
            Some("COMP 250 + MATH 240 / MATH 235"),
            None,
        );

        assert!(reqs.prerequisites.is_some());
        assert!(reqs.corequisites.is_none());
        assert!(reqs.restrictions.is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, RequirementKind::Corequisite);
    }

    #[test]
    fn referenced_courses_spans_fields() {
        let parser = RequisiteParser::new();
        let (reqs, _) = Requisites::parse_fields(
            &parser,
            Some("COMP 250"),
            Some("MATH 240"),
            Some("COMP 250 / COMP 202"),
        );

        let refs = reqs.referenced_courses();
        assert_eq!(refs.len(), 3);
        assert!(reqs.references(&CourseId::parse("COMP 202").unwrap()));
    }
}
