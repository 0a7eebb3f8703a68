//! Canonical course identifiers
//!
//! Provides [`SubjectCode`], [`TermSuffix`] and [`CourseId`]. Every id is held
//! in normalized form, so two spellings of the same course (`comp-250`,
//! `COMP250`, `COMP  250`) compare equal.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Four-character subject code (e.g. `COMP`, `MATH`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectCode(String);

impl SubjectCode {
    /// Length of every subject code
    pub const LEN: usize = 4;

    /// Create a subject code, normalizing to uppercase
    ///
    /// # Errors
    /// Returns [`CourseIdError::InvalidSubject`] unless the input is exactly
    /// four ASCII alphanumerics starting with a letter.
    pub fn new(raw: &str) -> Result<Self, CourseIdError> {
        let upper = raw.trim().to_ascii_uppercase();
        let valid = upper.len() == Self::LEN
            && upper.starts_with(|c: char| c.is_ascii_alphabetic())
            && upper.chars().all(|c| c.is_ascii_alphanumeric());

        if valid {
            Ok(Self(upper))
        } else {
            Err(CourseIdError::InvalidSubject(raw.to_string()))
        }
    }

    /// Subject code as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SubjectCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubjectCode {
    type Err = CourseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SubjectCode {
    type Error = CourseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SubjectCode> for String {
    fn from(value: SubjectCode) -> Self {
        value.0
    }
}

/// Consecutive-term suffix of a multi-term course (`D1`, `D2`, `J3`, ...)
///
/// A course split over consecutive terms is listed once per term; part `n`
/// requires part `n - 1` in the immediately preceding term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermSuffix {
    letter: char,
    part: u8,
}

impl TermSuffix {
    /// Create a suffix from its letter and part number (1-9)
    #[must_use]
    pub fn new(letter: char, part: u8) -> Option<Self> {
        if letter.is_ascii_alphabetic() && (1..=9).contains(&part) {
            Some(Self {
                letter: letter.to_ascii_uppercase(),
                part,
            })
        } else {
            None
        }
    }

    /// Parse a two-character suffix such as `D1`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        let letter = chars.next()?;
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        Self::new(letter, u8::try_from(digit).ok()?)
    }

    /// Suffix letter
    #[inline]
    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Part number within the sequence
    #[inline]
    #[must_use]
    pub fn part(&self) -> u8 {
        self.part
    }

    /// Suffix of the part taken one term earlier
    #[inline]
    #[must_use]
    pub fn predecessor(&self) -> Option<Self> {
        Self::new(self.letter, self.part - 1)
    }

    /// Suffix of the part taken one term later
    #[inline]
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        Self::new(self.letter, self.part + 1)
    }
}

impl Display for TermSuffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.part)
    }
}

/// Canonical course identifier
///
/// Subject + three-digit number + optional [`TermSuffix`], rendered as
/// `COMP 361D1`.
///
/// # Example
/// ```
/// use reqplan_course::CourseId;
///
/// let a: CourseId = "comp-361d1".parse().unwrap();
/// let b: CourseId = "COMP361D1".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "COMP 361D1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId {
    subject: SubjectCode,
    number: String,
    suffix: Option<TermSuffix>,
}

impl CourseId {
    /// Number of digits in a course number
    pub const NUMBER_LEN: usize = 3;

    /// Build an id from already separated parts
    ///
    /// # Errors
    /// Returns [`CourseIdError::InvalidNumber`] unless `number` is exactly
    /// three ASCII digits.
    pub fn from_parts(
        subject: SubjectCode,
        number: &str,
        suffix: Option<TermSuffix>,
    ) -> Result<Self, CourseIdError> {
        if number.len() != Self::NUMBER_LEN || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(CourseIdError::InvalidNumber(number.to_string()));
        }
        Ok(Self {
            subject,
            number: number.to_string(),
            suffix,
        })
    }

    /// Parse any spelling of a single course id
    ///
    /// Dashes and whitespace between parts are ignored, letters are
    /// uppercased.
    ///
    /// # Errors
    /// Returns [`CourseIdError`] if the compacted text is not
    /// `SUBJ` + `NNN` + optional `L#`.
    pub fn parse(raw: &str) -> Result<Self, CourseIdError> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if !compact.is_ascii() || compact.len() < SubjectCode::LEN + Self::NUMBER_LEN {
            return Err(CourseIdError::InvalidFormat(raw.to_string()));
        }

        let (subject, rest) = compact.split_at(SubjectCode::LEN);
        let (number, suffix) = rest.split_at(Self::NUMBER_LEN);

        let suffix = match suffix {
            "" => None,
            s => Some(
                TermSuffix::parse(s).ok_or_else(|| CourseIdError::InvalidSuffix(s.to_string()))?,
            ),
        };

        Self::from_parts(SubjectCode::new(subject)?, number, suffix)
    }

    /// Subject code
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &SubjectCode {
        &self.subject
    }

    /// Three-digit course number
    #[inline]
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Consecutive-term suffix, if any
    #[inline]
    #[must_use]
    pub fn suffix(&self) -> Option<TermSuffix> {
        self.suffix
    }

    /// True for ids carrying a consecutive-term suffix
    #[inline]
    #[must_use]
    pub fn is_multi_term(&self) -> bool {
        self.suffix.is_some()
    }

    /// Course level: the leading digit of the number
    #[must_use]
    pub fn level(&self) -> u8 {
        self.number
            .bytes()
            .next()
            .map_or(0, |b| b.saturating_sub(b'0'))
    }

    /// Same course with a different suffix
    #[inline]
    #[must_use]
    pub fn with_suffix(&self, suffix: Option<TermSuffix>) -> Self {
        Self {
            subject: self.subject.clone(),
            number: self.number.clone(),
            suffix,
        }
    }

    /// Part of a multi-term course taken one term earlier
    #[must_use]
    pub fn predecessor_part(&self) -> Option<Self> {
        let prev = self.suffix?.predecessor()?;
        Some(self.with_suffix(Some(prev)))
    }

    /// Part of a multi-term course taken one term later
    #[must_use]
    pub fn successor_part(&self) -> Option<Self> {
        let next = self.suffix?.successor()?;
        Some(self.with_suffix(Some(next)))
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl FromStr for CourseId {
    type Err = CourseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CourseId {
    type Error = CourseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.to_string()
    }
}

/// Errors for course id construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseIdError {
    /// Text is not shaped like a course id
    #[error("invalid course id: '{0}'")]
    InvalidFormat(String),

    /// Subject is not four alphanumerics
    #[error("invalid subject code: '{0}'")]
    InvalidSubject(String),

    /// Number is not three digits
    #[error("invalid course number: '{0}'")]
    InvalidNumber(String),

    /// Suffix is not letter + digit
    #[error("invalid term suffix: '{0}'")]
    InvalidSuffix(String),
}
