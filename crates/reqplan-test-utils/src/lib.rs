//! Testing utilities for the reqplan workspace
//!
//! Catalog and plan fixtures shared by the integration tests.

#![allow(missing_docs)]

use reqplan_course::CourseId;
use reqplan_eval::{recompute_all, CourseTaken, EvalContext, TermOrder};
use reqplan_grammar::RequisiteParser;
use reqplan_graph::{add_courses, AffectedSet, CourseDepData, InMemoryCatalog, RawCourse, TermId};

pub fn id(code: &str) -> CourseId {
    CourseId::parse(code).unwrap()
}

pub fn ids(codes: &[&str]) -> Vec<CourseId> {
    codes.iter().map(|c| id(c)).collect()
}

pub fn affected(codes: &[&str]) -> AffectedSet {
    codes.iter().map(|c| id(c)).collect()
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<RawCourse>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course(self, code: &str, credits: f64) -> Self {
        self.record(RawCourse {
            id: code.to_string(),
            credits,
            ..RawCourse::default()
        })
    }

    pub fn with_prereq(self, code: &str, credits: f64, prereq: &str) -> Self {
        self.record(RawCourse {
            id: code.to_string(),
            credits,
            prerequisites: Some(prereq.to_string()),
            ..RawCourse::default()
        })
    }

    pub fn with_coreq(self, code: &str, credits: f64, coreq: &str) -> Self {
        self.record(RawCourse {
            id: code.to_string(),
            credits,
            corequisites: Some(coreq.to_string()),
            ..RawCourse::default()
        })
    }

    pub fn with_restriction(self, code: &str, credits: f64, restriction: &str) -> Self {
        self.record(RawCourse {
            id: code.to_string(),
            credits,
            restrictions: Some(restriction.to_string()),
            ..RawCourse::default()
        })
    }

    pub fn record(mut self, raw: RawCourse) -> Self {
        self.records.push(raw);
        self
    }

    pub fn build(self) -> InMemoryCatalog {
        InMemoryCatalog::from_records(self.records, &RequisiteParser::new()).unwrap()
    }
}

/// A small computer-science catalog
///
/// - COMP 202 → COMP 250 → COMP 251 → COMP 252 (`COMP 251 / MATH 240`)
/// - COMP 361D1 / COMP 361D2 multi-term pair
/// - COMP 400 needs 6 credits of 3xx COMP/MATH
/// - COMP 204 is restricted against COMP 202
pub fn sample_catalog() -> InMemoryCatalog {
    CatalogBuilder::new()
        .course("COMP 202", 3.0)
        .with_restriction("COMP 204", 3.0, "COMP 202")
        .with_prereq("COMP 250", 3.0, "COMP 202")
        .with_prereq("COMP 251", 3.0, "COMP 250")
        .with_prereq("COMP 252", 3.0, "COMP 251 / MATH 240")
        .course("COMP 302", 3.0)
        .course("COMP 330", 3.0)
        .course("COMP 361D1", 3.0)
        .course("COMP 361D2", 3.0)
        .with_prereq("COMP 400", 3.0, "(6-3-COMP-MATH)")
        .course("MATH 133", 3.0)
        .course("MATH 235", 3.0)
        .course("MATH 240", 3.0)
        .course("MATH 340", 3.0)
        .course("BIOL 301", 3.0)
        .build()
}

/// Plan built term by term, with every verdict computed
#[derive(Debug, Clone)]
pub struct PlanFixture {
    pub deps: CourseDepData,
    pub order: TermOrder,
    pub taken: CourseTaken,
}

impl PlanFixture {
    pub fn ctx<'a>(&'a self, catalog: &'a InMemoryCatalog) -> EvalContext<'a> {
        EvalContext::new(&self.order, &self.taken, catalog)
    }
}

pub struct PlanBuilder<'c> {
    catalog: &'c InMemoryCatalog,
    deps: CourseDepData,
    terms: Vec<TermId>,
    taken: CourseTaken,
}

impl<'c> PlanBuilder<'c> {
    pub fn new(catalog: &'c InMemoryCatalog) -> Self {
        Self {
            catalog,
            deps: CourseDepData::new(),
            terms: Vec::new(),
            taken: CourseTaken::new(),
        }
    }

    /// Append a term holding `codes`
    pub fn term(mut self, name: &str, codes: &[&str]) -> Self {
        let term = TermId::new(name);
        self.deps = add_courses(&self.deps, &ids(codes), &term, self.catalog).0;
        self.terms.push(term);
        self
    }

    pub fn taken(mut self, codes: &[&str]) -> Self {
        for code in codes {
            self.taken.record(id(code));
        }
        self
    }

    pub fn build(self) -> PlanFixture {
        let mut plan = PlanFixture {
            deps: self.deps,
            order: TermOrder::from_terms(self.terms),
            taken: self.taken,
        };
        let mut deps = plan.deps.clone();
        recompute_all(&mut deps, &plan.ctx(self.catalog)).unwrap();
        plan.deps = deps;
        plan
    }
}
