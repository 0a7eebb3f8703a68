//! Planner configuration

use reqplan_grammar::RequisiteParser;
use serde::{Deserialize, Serialize};

/// Planner configuration
///
/// Every field has a default, so a TOML document only needs the keys it
/// changes:
///
/// ```toml
/// max_nesting_depth = 16
/// widen_credit_dependents = false
/// log_filter = "reqplan_core=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Deepest parenthesis nesting accepted in requisite text
    pub max_nesting_depth: usize,
    /// Also recompute credit-rule holders when a course of their subject is
    /// added, deleted or moved
    pub widen_credit_dependents: bool,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl PlannerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError`] for malformed TOML or out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_nesting_depth",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// With nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// With credit-dependent widening on or off
    #[inline]
    #[must_use]
    pub fn with_widen_credit_dependents(mut self, widen: bool) -> Self {
        self.widen_credit_dependents = widen;
        self
    }

    /// With log filter directive
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Requisite parser honouring the nesting limit
    #[must_use]
    pub fn parser(&self) -> RequisiteParser {
        RequisiteParser::new().with_max_depth(self.max_nesting_depth)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: RequisiteParser::DEFAULT_MAX_DEPTH,
            widen_credit_dependents: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document is not valid TOML of the expected shape
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// What is wrong
        reason: String,
    },
}
