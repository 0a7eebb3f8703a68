//! Requisite group AST
//!
//! A parsed requisite is a tree of [`Group`]s whose leaves are course ids.
//! Every group is built from a single operator; [`Group::simplify`] keeps
//! trees in flattened canonical form.

use crate::error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqplan_course::{CourseId, SubjectCode};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Accepted shape of a credit amount chunk
static CREDIT_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((\d){1,7}|[A-Za-z0-9]{4})$").expect("credit pattern compiles"));

/// Group type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupKind {
    /// Every child must hold
    And,
    /// Any child must hold
    Or,
    /// Not yet typed by an operator; behaves like `Or`
    Single,
    /// At least two children must hold
    Pair,
    /// Credit accumulation rule
    Credit,
    /// Always holds
    Empty,
}

impl GroupKind {
    /// Grammar operator that types a group, if any
    #[inline]
    #[must_use]
    pub fn operator(self) -> Option<char> {
        match self {
            Self::And => Some('+'),
            Self::Or => Some('/'),
            Self::Pair => Some('|'),
            Self::Credit => Some('-'),
            Self::Single | Self::Empty => None,
        }
    }

    /// Kind typed by a grammar operator
    #[inline]
    #[must_use]
    pub fn from_operator(op: char) -> Option<Self> {
        match op {
            '+' => Some(Self::And),
            '/' => Some(Self::Or),
            '|' => Some(Self::Pair),
            '-' => Some(Self::Credit),
            _ => None,
        }
    }
}

/// "At least N credits from subjects {S} at level scope {L}"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditRule {
    /// Credits required
    pub required_credits: u32,
    /// Level digits a course number must start with; `0` accepts any level
    pub level_scope: String,
    /// Subjects whose courses count
    pub subjects: Vec<SubjectCode>,
}

impl CreditRule {
    /// Build from the flushed chunks `[credits, scope, subjects...]`
    ///
    /// A subject chunk may hold several codes run together (`MATHCOMP`),
    /// which happens when spaces between codes are skipped.
    ///
    /// # Errors
    /// Returns [`ParseError`] for a malformed amount, scope or subject.
    pub fn from_chunks(chunks: &[String]) -> Result<Self, ParseError> {
        let amount = chunks.first().map(String::as_str).unwrap_or_default();
        if !CREDIT_AMOUNT.is_match(amount) {
            return Err(ParseError::InvalidCreditAmount(amount.to_string()));
        }
        // the four-character alphanumeric form passes the pattern but is not a number
        let required_credits = amount
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidCreditAmount(amount.to_string()))?;

        let level_scope = chunks.get(1).cloned().unwrap_or_default();
        if level_scope.is_empty() || !level_scope.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidCreditScope(level_scope));
        }

        let mut subjects = Vec::new();
        for chunk in chunks.iter().skip(2) {
            let bytes = chunk.as_bytes();
            if bytes.len() % SubjectCode::LEN != 0 {
                return Err(reqplan_course::CourseIdError::InvalidSubject(chunk.clone()).into());
            }
            for code in bytes.chunks(SubjectCode::LEN) {
                let code = std::str::from_utf8(code).unwrap_or_default();
                let subject = SubjectCode::new(code)?;
                if !subjects.contains(&subject) {
                    subjects.push(subject);
                }
            }
        }

        Ok(Self {
            required_credits,
            level_scope,
            subjects,
        })
    }

    /// True when the rule cannot fail (no subjects or zero credits)
    #[inline]
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.subjects.is_empty() || self.required_credits == 0
    }

    /// Whether a course of this level counts toward the rule
    #[must_use]
    pub fn matches_level(&self, level: u8) -> bool {
        self.level_scope.chars().any(|c| {
            c == '0' || c.to_digit(10).is_some_and(|d| d == u32::from(level))
        })
    }

    /// Whether a course counts toward the rule
    #[must_use]
    pub fn counts(&self, course: &CourseId) -> bool {
        self.subjects.contains(course.subject()) && self.matches_level(course.level())
    }
}

impl Display for CreditRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.required_credits, self.level_scope)?;
        for subject in &self.subjects {
            write!(f, "-{subject}")?;
        }
        Ok(())
    }
}

/// Child of a group: a course leaf or a nested group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Course leaf
    Course(CourseId),
    /// Nested group
    Group(Group),
}

impl From<CourseId> for Node {
    fn from(value: CourseId) -> Self {
        Self::Course(value)
    }
}

impl From<Group> for Node {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

/// Parsed requisite expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "inner", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Group {
    /// `( )`: always satisfied
    Empty,
    /// Untyped group; any child
    Single(Vec<Node>),
    /// `a + b`: all children
    And(Vec<Node>),
    /// `a / b`: any child
    Or(Vec<Node>),
    /// `a | b | c`: at least two children
    Pair(Vec<Node>),
    /// `6-0-MATH-COMP`: credit accumulation
    Credit(CreditRule),
}

impl Group {
    /// Build a group of the given kind
    ///
    /// `Credit` and `Empty` ignore `children`; use [`Group::Credit`] to build
    /// credit rules.
    #[must_use]
    pub fn from_kind(kind: GroupKind, children: Vec<Node>) -> Self {
        match kind {
            GroupKind::And => Self::And(children),
            GroupKind::Or => Self::Or(children),
            GroupKind::Pair => Self::Pair(children),
            GroupKind::Single => Self::Single(children),
            GroupKind::Credit | GroupKind::Empty => Self::Empty,
        }
    }

    /// Single-course group
    #[inline]
    #[must_use]
    pub fn course(id: CourseId) -> Self {
        Self::Single(vec![Node::Course(id)])
    }

    /// Type tag
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        match self {
            Self::Empty => GroupKind::Empty,
            Self::Single(_) => GroupKind::Single,
            Self::And(_) => GroupKind::And,
            Self::Or(_) => GroupKind::Or,
            Self::Pair(_) => GroupKind::Pair,
            Self::Credit(_) => GroupKind::Credit,
        }
    }

    /// Direct children (empty for `Credit` and `Empty`)
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Single(c) | Self::And(c) | Self::Or(c) | Self::Pair(c) => c,
            Self::Empty | Self::Credit(_) => &[],
        }
    }

    fn into_children(self) -> Vec<Node> {
        match self {
            Self::Single(c) | Self::And(c) | Self::Or(c) | Self::Pair(c) => c,
            Self::Empty | Self::Credit(_) => Vec::new(),
        }
    }

    /// True for the `Empty` group
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Flatten and collapse into canonical form
    ///
    /// - a child group of the same kind, or `Single`, is merged into its parent
    /// - a group whose only child is a group is replaced by that child
    ///
    /// Idempotent.
    #[must_use]
    pub fn simplify(self) -> Self {
        let kind = self.kind();
        if matches!(kind, GroupKind::Empty | GroupKind::Credit) {
            return self;
        }

        let mut flat = Vec::new();
        for child in self.into_children() {
            let child = match child {
                Node::Group(g) => Node::Group(g.simplify()),
                course => course,
            };
            absorb(kind, child, &mut flat);
        }

        if flat.len() == 1 && matches!(flat[0], Node::Group(_)) {
            if let Some(Node::Group(only)) = flat.pop() {
                return only;
            }
        }

        Self::from_kind(kind, flat)
    }

    /// Every course leaf, depth first, skipping credit rules
    #[must_use]
    pub fn courses(&self) -> Vec<&CourseId> {
        let mut out = Vec::new();
        self.collect_courses(&mut out);
        out
    }

    fn collect_courses<'a>(&'a self, out: &mut Vec<&'a CourseId>) {
        for child in self.children() {
            match child {
                Node::Course(id) => out.push(id),
                Node::Group(g) => g.collect_courses(out),
            }
        }
    }

    /// Every credit rule in the tree
    #[must_use]
    pub fn credit_rules(&self) -> Vec<&CreditRule> {
        let mut out = Vec::new();
        self.collect_credit_rules(&mut out);
        out
    }

    fn collect_credit_rules<'a>(&'a self, out: &mut Vec<&'a CreditRule>) {
        if let Self::Credit(rule) = self {
            out.push(rule);
        }
        for child in self.children() {
            if let Node::Group(g) = child {
                g.collect_credit_rules(out);
            }
        }
    }

    /// True when a course id appears among the leaves
    #[must_use]
    pub fn references(&self, id: &CourseId) -> bool {
        self.children().iter().any(|child| match child {
            Node::Course(c) => c == id,
            Node::Group(g) => g.references(id),
        })
    }
}

/// Push `node` into `out`, splicing in the children of mergeable groups
fn absorb(parent: GroupKind, node: Node, out: &mut Vec<Node>) {
    match node {
        Node::Group(g) if g.kind() == parent || g.kind() == GroupKind::Single => {
            for grandchild in g.into_children() {
                absorb(parent, grandchild, out);
            }
        }
        other => out.push(other),
    }
}

/// Canonical text; parses back to an equal group
impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (separator, children) = match self {
            Self::Empty => return f.write_str("()"),
            Self::Credit(rule) => return write!(f, "{rule}"),
            Self::Single(children) => {
                // courses juxtaposed without an operator would merge into one chunk
                if children.len() > 1 {
                    for child in children {
                        match child {
                            Node::Course(id) => write!(f, "({id})")?,
                            Node::Group(g) => write_nested(f, g)?,
                        }
                    }
                    return Ok(());
                }
                ("", children)
            }
            Self::And(children) => (" + ", children),
            Self::Or(children) => (" / ", children),
            Self::Pair(children) => (" | ", children),
        };

        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            match child {
                Node::Course(id) => write!(f, "{id}")?,
                Node::Group(g) => write_nested(f, g)?,
            }
        }

        // a trailing operator keeps the type of a group with fewer than two children
        if children.len() < 2 {
            if let Some(op) = self.kind().operator() {
                if children.is_empty() {
                    write!(f, "{op}")?;
                } else {
                    write!(f, " {op}")?;
                }
            }
        }
        Ok(())
    }
}

fn write_nested(f: &mut Formatter<'_>, group: &Group) -> fmt::Result {
    match group {
        Group::Empty => f.write_str("()"),
        g => write!(f, "({g})"),
    }
}
