//! Catalog reader
//!
//! The graph and evaluator only need three facts per course: its parsed
//! requisites, its credit weight, and (through the id) its subject and level.
//! [`CourseCatalog`] is the seam to whatever store the caller loads those
//! from; [`InMemoryCatalog`] is a ready-made implementation fed from
//! [`RawCourse`] records.

use crate::error::CatalogError;
use reqplan_course::CourseId;
use reqplan_grammar::{RequisiteParser, Requisites};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course id
    pub id: CourseId,
    /// Credit weight
    pub credits: f64,
    /// Parsed requisite fields
    pub requisites: Requisites,
}

impl CourseInfo {
    /// Create entry without requisites
    #[must_use]
    pub fn new(id: CourseId, credits: f64) -> Self {
        Self {
            id,
            credits,
            requisites: Requisites::default(),
        }
    }

    /// With requisites
    #[must_use]
    pub fn with_requisites(mut self, requisites: Requisites) -> Self {
        self.requisites = requisites;
        self
    }
}

/// Catalog record as delivered by the upstream normalizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    /// Course code in any accepted spelling
    #[serde(alias = "code")]
    pub id: String,
    /// Credit weight
    #[serde(default)]
    pub credits: f64,
    /// Canonical prerequisite text
    #[serde(default)]
    pub prerequisites: Option<String>,
    /// Canonical corequisite text
    #[serde(default)]
    pub corequisites: Option<String>,
    /// Canonical restriction text
    #[serde(default)]
    pub restrictions: Option<String>,
}

/// Read access to course metadata
pub trait CourseCatalog {
    /// Entry for a course, if known
    fn course(&self, id: &CourseId) -> Option<&CourseInfo>;

    /// Parsed requisites of a course, if known
    fn requisites(&self, id: &CourseId) -> Option<&Requisites> {
        self.course(id).map(|c| &c.requisites)
    }

    /// Credit weight; unknown courses weigh nothing
    fn credits(&self, id: &CourseId) -> f64 {
        self.course(id).map_or(0.0, |c| c.credits)
    }
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: BTreeMap<CourseId, CourseInfo>,
}

impl InMemoryCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parsed entry, replacing any previous one
    pub fn insert(&mut self, info: CourseInfo) {
        self.courses.insert(info.id.clone(), info);
    }

    /// Parse and insert a raw record
    ///
    /// A malformed requisite field is logged and dropped; the rest of the
    /// record is kept.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidCourseId`] when the id is not a course code.
    pub fn ingest(
        &mut self,
        raw: RawCourse,
        parser: &RequisiteParser,
    ) -> Result<CourseId, CatalogError> {
        let id = CourseId::parse(&raw.id).map_err(|source| CatalogError::InvalidCourseId {
            raw: raw.id.clone(),
            source,
        })?;

        let (requisites, errors) = Requisites::parse_fields(
            parser,
            raw.prerequisites.as_deref(),
            raw.corequisites.as_deref(),
            raw.restrictions.as_deref(),
        );
        for (kind, error) in errors {
            tracing::warn!(course = %id, field = %kind, %error, "dropping malformed requisite field");
        }

        self.insert(CourseInfo::new(id.clone(), raw.credits).with_requisites(requisites));
        Ok(id)
    }

    /// Build from raw records
    ///
    /// # Errors
    /// Stops at the first record with an invalid id.
    pub fn from_records(
        records: impl IntoIterator<Item = RawCourse>,
        parser: &RequisiteParser,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for raw in records {
            catalog.ingest(raw, parser)?;
        }
        tracing::debug!(courses = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Build from a JSON array of [`RawCourse`] records
    ///
    /// # Errors
    /// Returns [`CatalogError`] for malformed JSON or an invalid id.
    pub fn from_json(json: &str, parser: &RequisiteParser) -> Result<Self, CatalogError> {
        let records: Vec<RawCourse> = serde_json::from_str(json)?;
        Self::from_records(records, parser)
    }

    /// Number of courses
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// True when empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All entries in id order
    pub fn iter(&self) -> impl Iterator<Item = &CourseInfo> {
        self.courses.values()
    }
}

impl CourseCatalog for InMemoryCatalog {
    fn course(&self, id: &CourseId) -> Option<&CourseInfo> {
        self.courses.get(id)
    }
}
