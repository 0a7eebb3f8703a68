//! Plan term identifiers

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Opaque id of a term within a plan (e.g. `"F2024"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(String);

impl TermId {
    /// Create term id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TermId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
