//! Error types for requisite parsing

use reqplan_course::CourseIdError;

/// Errors raised while parsing canonical requisite text
///
/// Parsing is all-or-nothing: on error no partial group is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input holds nothing but quotes and whitespace, or an operator has no
    /// operands
    #[error("requisite text is empty")]
    Empty,

    /// Two different operators at the same nesting level
    #[error("mixed operators at position {position}: group is '{expected}', found '{found}'")]
    MixedOperators {
        /// Operator the group was typed with
        expected: char,
        /// Conflicting operator
        found: char,
        /// Character index of the conflicting operator
        position: usize,
    },

    /// A leaf that does not resolve to a course id
    #[error("'{chunk}' at position {position} is not a course id")]
    UnresolvedCourse {
        /// Accumulated chunk text
        chunk: String,
        /// Character index where the chunk ended
        position: usize,
    },

    /// Credit amount chunk is malformed
    #[error("invalid credit amount: '{0}'")]
    InvalidCreditAmount(String),

    /// Credit level scope is missing or not digits
    #[error("invalid credit level scope: '{0}'")]
    InvalidCreditScope(String),

    /// Credit subject list holds a bad subject code
    #[error("invalid subject in credit group: {0}")]
    InvalidSubject(#[from] CourseIdError),

    /// Credit group mixed with courses or nested groups
    #[error("credit group at position {0} may only hold credit chunks")]
    NestedCreditGroup(usize),

    /// `)` without `(` or `(` without `)`
    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParenthesis(usize),

    /// Nesting deeper than the configured limit
    #[error("nesting exceeds maximum depth of {0}")]
    TooDeep(usize),
}

impl ParseError {
    /// Create mixed operator error
    pub fn mixed(expected: char, found: char, position: usize) -> Self {
        Self::MixedOperators {
            expected,
            found,
            position,
        }
    }

    /// Create unresolved course error
    pub fn unresolved(chunk: impl Into<String>, position: usize) -> Self {
        Self::UnresolvedCourse {
            chunk: chunk.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_error_display() {
        let err = ParseError::mixed('+', '/', 12);
        assert_eq!(
            err.to_string(),
            "mixed operators at position 12: group is '+', found '/'"
        );
    }

    #[test]
    fn unresolved_error_display() {
        let err = ParseError::unresolved("XYZ", 3);
        assert!(err.to_string().contains("'XYZ'"));
    }
}
