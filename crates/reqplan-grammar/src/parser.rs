//! Requisite grammar parser
//!
//! Single-pass recursive descent over the characters of a canonical
//! requisite string:
//!
//! | char          | meaning                                   |
//! |---------------|-------------------------------------------|
//! | `(` `)`       | open / close a nested group               |
//! | `+`           | AND                                       |
//! | `/`           | OR                                        |
//! | `\|`          | PAIR (two of the following)               |
//! | `-`           | CREDIT (`credits-levels-SUBJ-SUBJ`)       |
//! | `"` `'` space | skipped, the pending chunk continues      |
//!
//! Everything else accumulates into the pending chunk, which is flushed as a
//! course leaf (or credit chunk) when an operator or `)` is reached.

use crate::error::ParseError;
use crate::group::{CreditRule, Group, GroupKind, Node};
use reqplan_course::extract_course_ids;

/// Characters skipped without ending the pending chunk
#[inline]
fn is_skipped(c: char) -> bool {
    matches!(c, '"' | '\'' | ' ' | '\t' | '\n' | '\r')
}

/// Requisite parser with a nesting limit
#[derive(Debug, Clone, Copy)]
pub struct RequisiteParser {
    max_depth: usize,
}

impl Default for RequisiteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequisiteParser {
    /// Default nesting limit
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Create parser with the default nesting limit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// With nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a canonical requisite string into a simplified [`Group`]
    ///
    /// # Errors
    /// Returns [`ParseError`] for empty input, mixed operators, unresolvable
    /// leaves, malformed credit groups, unbalanced parentheses or excessive
    /// nesting.
    pub fn parse(&self, raw: &str) -> Result<Group, ParseError> {
        let chars: Vec<char> = raw.chars().collect();
        if chars.iter().all(|c| is_skipped(*c)) {
            return Err(ParseError::Empty);
        }

        let mut cursor = Cursor::new(&chars);
        self.parse_group(&mut cursor, 0)
    }

    fn parse_group(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Group, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::TooDeep(self.max_depth));
        }

        let mut builder = GroupBuilder::default();
        let mut pending = String::new();

        while let Some((position, c)) = cursor.advance() {
            match c {
                '(' => {
                    builder.flush(&mut pending, position)?;
                    if builder.kind == Some(GroupKind::Credit) {
                        return Err(ParseError::NestedCreditGroup(position));
                    }
                    let child = self.parse_group(cursor, depth + 1)?;
                    builder.children.push(Node::Group(child));
                }
                ')' => {
                    if depth == 0 {
                        return Err(ParseError::UnbalancedParenthesis(position));
                    }
                    builder.flush(&mut pending, position)?;
                    return builder.finish();
                }
                '+' | '/' | '|' | '-' => {
                    builder.set_operator(c, position)?;
                    builder.flush(&mut pending, position)?;
                }
                c if is_skipped(c) => {}
                other => pending.push(other),
            }
        }

        if depth > 0 {
            return Err(ParseError::UnbalancedParenthesis(cursor.position()));
        }

        builder.flush(&mut pending, cursor.position())?;
        builder.finish()
    }
}

/// Parse a canonical requisite string with the default parser
///
/// # Example
/// ```
/// use reqplan_grammar::{parse_requisite_text, GroupKind};
///
/// let group = parse_requisite_text("COMP 250 + (MATH 235 / MATH 240)").unwrap();
/// assert_eq!(group.kind(), GroupKind::And);
/// assert_eq!(group.to_string(), "COMP 250 + (MATH 235 / MATH 240)");
/// ```
///
/// # Errors
/// See [`RequisiteParser::parse`].
pub fn parse_requisite_text(raw: &str) -> Result<Group, ParseError> {
    RequisiteParser::new().parse(raw)
}

/// Index cursor over an immutable character slice
#[derive(Debug)]
struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let c = *self.chars.get(self.pos)?;
        self.pos += 1;
        Some((self.pos - 1, c))
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Group under construction; its operator is unknown until the first
/// separator is read
#[derive(Debug, Default)]
struct GroupBuilder {
    kind: Option<GroupKind>,
    children: Vec<Node>,
    credit_chunks: Vec<String>,
}

impl GroupBuilder {
    fn set_operator(&mut self, op: char, position: usize) -> Result<(), ParseError> {
        let Some(kind) = GroupKind::from_operator(op) else {
            return Ok(());
        };

        match self.kind {
            None => {
                if kind == GroupKind::Credit && !self.children.is_empty() {
                    return Err(ParseError::NestedCreditGroup(position));
                }
                self.kind = Some(kind);
                Ok(())
            }
            Some(current) if current == kind => Ok(()),
            Some(current) => Err(ParseError::mixed(
                current.operator().unwrap_or(op),
                op,
                position,
            )),
        }
    }

    /// Turn the pending chunk into a leaf; an empty chunk is dropped
    fn flush(&mut self, pending: &mut String, position: usize) -> Result<(), ParseError> {
        if pending.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::take(pending);

        if self.kind == Some(GroupKind::Credit) {
            self.credit_chunks.push(chunk.to_ascii_uppercase());
            return Ok(());
        }

        let id = extract_course_ids(&chunk.to_ascii_uppercase(), false)
            .into_iter()
            .next()
            .ok_or_else(|| ParseError::unresolved(chunk, position))?;
        self.children.push(Node::Course(id));
        Ok(())
    }

    fn finish(self) -> Result<Group, ParseError> {
        let group = match self.kind {
            None if self.children.is_empty() => Group::Empty,
            None => Group::Single(self.children),
            Some(GroupKind::Credit) => Group::Credit(CreditRule::from_chunks(&self.credit_chunks)?),
            // an operator with no operands; only `( )` spells an empty group
            Some(_) if self.children.is_empty() => return Err(ParseError::Empty),
            Some(kind) => Group::from_kind(kind, self.children),
        };
        Ok(group.simplify())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqplan_course::CourseId;

    fn id(s: &str) -> Node {
        Node::Course(CourseId::parse(s).unwrap())
    }

    #[test]
    fn parses_single_course() {
        assert_eq!(
            parse_requisite_text("COMP 250").unwrap(),
            Group::Single(vec![id("COMP 250")])
        );
    }

    #[test]
    fn parses_and_with_nested_or() {
        assert_eq!(
            parse_requisite_text("COMP 250 + (MATH 235 / MATH 240)").unwrap(),
            Group::And(vec![
                id("COMP 250"),
                Node::Group(Group::Or(vec![id("MATH 235"), id("MATH 240")])),
            ])
        );
    }

    #[test]
    fn parses_pair() {
        assert_eq!(
            parse_requisite_text("MATH 222 | MATH 223 | MATH 240").unwrap(),
            Group::Pair(vec![id("MATH 222"), id("MATH 223"), id("MATH 240")])
        );
    }

    #[test]
    fn parses_credit_group() {
        let group = parse_requisite_text("(6-0-MATH-COMP)").unwrap();
        let Group::Credit(rule) = group else {
            panic!("expected credit group");
        };
        assert_eq!(rule.required_credits, 6);
        assert_eq!(rule.level_scope, "0");
        assert_eq!(rule.subjects.len(), 2);
    }

    #[test]
    fn credit_group_inside_or() {
        let group = parse_requisite_text("COMP 250 / (6-3-MATH COMP)").unwrap();
        assert_eq!(group.kind(), GroupKind::Or);
        assert_eq!(group.credit_rules()[0].subjects.len(), 2);
    }

    #[test]
    fn empty_parentheses_are_empty_group() {
        assert_eq!(parse_requisite_text("( )").unwrap(), Group::Empty);
        assert_eq!(
            parse_requisite_text("COMP 250 + ()").unwrap(),
            Group::And(vec![id("COMP 250"), Node::Group(Group::Empty)])
        );
    }

    #[test]
    fn skips_quotes_and_newlines_inside_chunks() {
        assert_eq!(
            parse_requisite_text("\"COMP\n 250\" / 'MATH 240'").unwrap(),
            Group::Or(vec![id("COMP 250"), id("MATH 240")])
        );
    }

    #[test]
    fn flattens_same_operator_nesting() {
        assert_eq!(
            parse_requisite_text("COMP 250 + (COMP 251 + COMP 206)").unwrap(),
            Group::And(vec![id("COMP 250"), id("COMP 251"), id("COMP 206")])
        );
    }

    #[test]
    fn rejects_mixed_operators() {
        let err = parse_requisite_text("COMP 250 + MATH 240 / MATH 235").unwrap_err();
        assert_eq!(err, ParseError::mixed('+', '/', 20));
    }

    #[test]
    fn mixed_operators_allowed_across_levels() {
        assert!(parse_requisite_text("(COMP 250 + MATH 240) / MATH 235").is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_requisite_text(""), Err(ParseError::Empty));
        assert_eq!(parse_requisite_text("  \n \"\" "), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_operators_without_operands() {
        for text in ["+", "/", "|", " + + "] {
            assert_eq!(parse_requisite_text(text), Err(ParseError::Empty), "{text:?}");
        }
    }

    #[test]
    fn rejects_nested_operator_without_operands() {
        assert_eq!(parse_requisite_text("( + )"), Err(ParseError::Empty));
        assert_eq!(parse_requisite_text("COMP 250 / ( | )"), Err(ParseError::Empty));
        assert_eq!(parse_requisite_text("( )"), Ok(Group::Empty));
    }

    #[test]
    fn run_together_leaf_resolves_to_first_course() {
        assert_eq!(
            parse_requisite_text("COMP 250 MATH 240").unwrap(),
            Group::Single(vec![id("COMP 250")])
        );
        assert_eq!(
            parse_requisite_text("comp 250 / math 240").unwrap(),
            Group::Or(vec![id("COMP 250"), id("MATH 240")])
        );
    }

    #[test]
    fn rejects_unresolvable_leaf() {
        assert!(matches!(
            parse_requisite_text("COMP 250 + permission"),
            Err(ParseError::UnresolvedCourse { .. })
        ));
    }

    #[test]
    fn rejects_bad_credit_amount() {
        assert!(matches!(
            parse_requisite_text("(12345678-0-MATH)"),
            Err(ParseError::InvalidCreditAmount(_))
        ));
        assert_eq!(
            parse_requisite_text("(ABCD-0-MATH)"),
            Err(ParseError::InvalidCreditAmount("ABCD".to_string()))
        );
    }

    #[test]
    fn rejects_group_inside_credit() {
        assert!(matches!(
            parse_requisite_text("(6-0-(MATH))"),
            Err(ParseError::NestedCreditGroup(_))
        ));
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(matches!(
            parse_requisite_text("(COMP 250"),
            Err(ParseError::UnbalancedParenthesis(_))
        ));
        assert!(matches!(
            parse_requisite_text("COMP 250)"),
            Err(ParseError::UnbalancedParenthesis(8))
        ));
    }

    #[test]
    fn enforces_max_depth() {
        let parser = RequisiteParser::new().with_max_depth(2);
        assert!(parser.parse("((COMP 250))").is_ok());
        assert_eq!(parser.parse("(((COMP 250)))"), Err(ParseError::TooDeep(2)));
    }

    #[test]
    fn empty_pending_chunk_is_dropped() {
        assert_eq!(
            parse_requisite_text("COMP 250 + + MATH 240").unwrap(),
            Group::And(vec![id("COMP 250"), id("MATH 240")])
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "COMP 250 + (MATH 235 / MATH 240) + (6-0-MATH-COMP)";
        assert_eq!(parse_requisite_text(text), parse_requisite_text(text));
    }
}
