//! Free-text filter expressions for the listing search box.
//!
//! A filter string such as `acme AND "health services"` is parsed into a
//! [`FilterExpression`]: an [`Operator`] plus the literal terms to look for.
//! Matching is case-insensitive substring containment per term.
//!
//! ## Grammar
//!
//! Keywords are case-sensitive and must stand alone as words.
//!
//! - blank input: no terms, `AND`
//! - `a AND b` or `a,b`: terms `[a, b]`, `AND`
//! - `a OR b`: terms `[a, b]`, `OR`
//! - `"a b" AND c`: a quoted span is literal text, separators included
//!
//! `OR` and `AND` do not mix. As soon as a standalone `OR` appears outside
//! quotes the whole expression is a disjunction, and any `AND` or comma is
//! ordinary text inside its terms. There is no grouping.
//!
//! Parsing never fails. Unbalanced quotes run to the end of the input and
//! stray separators only produce empty segments, which are dropped.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bOR\b").expect("valid regex literal"));

static AND_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAND\b|,").expect("valid regex literal"));

/// How the terms of an expression combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parsed search-box input.
///
/// Built fresh per request and never mutated. An expression with no terms
/// matches everything under `AND` and nothing under `OR`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpression {
    terms: Vec<String>,
    operator: Operator,
}

impl FilterExpression {
    #[must_use]
    pub fn new(terms: Vec<String>, operator: Operator) -> Self {
        Self { terms, operator }
    }

    /// Parse a raw `filter` query value. See the module docs for the grammar.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parse(input)
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Test `candidate` against this expression.
    ///
    /// Every term must be contained for `AND`, at least one for `OR`. The
    /// empty cases follow from `all`/`any`: zero terms is `true` for `AND`
    /// and `false` for `OR`.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let folded = candidate.to_lowercase();
        let mut terms = self.terms.iter().map(|term| term.to_lowercase());
        match self.operator {
            Operator::And => terms.all(|term| folded.contains(term.as_str())),
            Operator::Or => terms.any(|term| folded.contains(term.as_str())),
        }
    }

    /// Keep the items whose candidate field matches, preserving order.
    pub fn retain_matching<T, F>(&self, items: Vec<T>, candidate: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        items
            .into_iter()
            .filter(|item| self.matches(candidate(item)))
            .collect()
    }
}

/// Canonical form: terms joined by the operator keyword, quoting any term
/// that would otherwise be split. Parsing the output gives back an equal
/// expression, including the zero- and one-term `OR` cases.
impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator, self.terms.as_slice()) {
            (Operator::Or, []) => return f.write_str("OR"),
            (Operator::Or, [only]) => {
                write_term(f, only)?;
                return f.write_str(" OR");
            }
            _ => {}
        }

        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " {} ", self.operator)?;
            }
            write_term(f, term)?;
        }
        Ok(())
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &str) -> fmt::Result {
    if OR_SEPARATOR.is_match(term) || AND_SEPARATOR.is_match(term) {
        write!(f, "\"{term}\"")
    } else {
        f.write_str(term)
    }
}

enum Span<'a> {
    Text(&'a str),
    Quoted(&'a str),
}

/// Cut the input into unquoted text and quoted spans (quotes removed).
fn split_quoted(input: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find('"') {
        if open > 0 {
            spans.push(Span::Text(&rest[..open]));
        }
        let inner = &rest[open + 1..];
        if let Some(close) = inner.find('"') {
            spans.push(Span::Quoted(&inner[..close]));
            rest = &inner[close + 1..];
        } else {
            spans.push(Span::Quoted(inner));
            rest = "";
        }
    }
    if !rest.is_empty() {
        spans.push(Span::Text(rest));
    }

    spans
}

fn push_segment(terms: &mut Vec<String>, segment: &mut String) {
    let term = segment.trim();
    if !term.is_empty() {
        terms.push(term.to_string());
    }
    segment.clear();
}

/// Parse a raw filter string into a [`FilterExpression`].
#[must_use]
pub fn parse(input: &str) -> FilterExpression {
    let input = input.trim();
    if input.is_empty() {
        return FilterExpression::default();
    }

    let spans = split_quoted(input);
    let operator = if spans
        .iter()
        .any(|span| matches!(span, Span::Text(text) if OR_SEPARATOR.is_match(text)))
    {
        Operator::Or
    } else {
        Operator::And
    };
    let separator: &Regex = match operator {
        Operator::Or => &OR_SEPARATOR,
        Operator::And => &AND_SEPARATOR,
    };

    let mut terms = Vec::new();
    let mut segment = String::new();
    for span in spans {
        match span {
            Span::Quoted(text) => segment.push_str(text),
            Span::Text(text) => {
                let mut pieces = separator.split(text);
                if let Some(first) = pieces.next() {
                    segment.push_str(first);
                }
                for piece in pieces {
                    push_segment(&mut terms, &mut segment);
                    segment.push_str(piece);
                }
            }
        }
    }
    push_segment(&mut terms, &mut segment);

    FilterExpression { terms, operator }
}

/// Free-function form of [`FilterExpression::matches`].
#[must_use]
pub fn matches(candidate: &str, expression: &FilterExpression) -> bool {
    expression.matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(terms: &[&str], operator: Operator) -> FilterExpression {
        FilterExpression::new(terms.iter().map(ToString::to_string).collect(), operator)
    }

    #[test]
    fn test_blank_input_is_empty_and() {
        assert_eq!(parse(""), expr(&[], Operator::And));
        assert_eq!(parse("   "), expr(&[], Operator::And));
        assert_eq!(parse("\t\n"), expr(&[], Operator::And));
    }

    #[test]
    fn test_single_term() {
        assert_eq!(parse("  acme  "), expr(&["acme"], Operator::And));
    }

    #[test]
    fn test_and_keyword() {
        assert_eq!(parse("foo AND bar"), expr(&["foo", "bar"], Operator::And));
    }

    #[test]
    fn test_or_keyword() {
        assert_eq!(parse("foo OR bar"), expr(&["foo", "bar"], Operator::Or));
    }

    #[test]
    fn test_comma_is_and() {
        assert_eq!(parse("foo,bar"), expr(&["foo", "bar"], Operator::And));
        assert_eq!(parse("foo , bar AND baz"), expr(&["foo", "bar", "baz"], Operator::And));
    }

    #[test]
    fn test_quoted_phrase() {
        assert_eq!(
            parse(r#""foo bar" AND baz"#),
            expr(&["foo bar", "baz"], Operator::And)
        );
    }

    #[test]
    fn test_quoted_separators_are_literal() {
        assert_eq!(
            parse(r#""Smith, Jones OR Partners" AND legal"#),
            expr(&["Smith, Jones OR Partners", "legal"], Operator::And)
        );
        assert_eq!(
            parse(r#""Research AND Development" OR grants"#),
            expr(&["Research AND Development", "grants"], Operator::Or)
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(parse("rock and roll"), expr(&["rock and roll"], Operator::And));
        assert_eq!(parse("this or that"), expr(&["this or that"], Operator::And));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert_eq!(parse("ORACLE"), expr(&["ORACLE"], Operator::And));
        assert_eq!(parse("BRANDON"), expr(&["BRANDON"], Operator::And));
        assert_eq!(parse("CORP OR LLC"), expr(&["CORP", "LLC"], Operator::Or));
    }

    #[test]
    fn test_or_takes_precedence_over_and() {
        assert_eq!(
            parse("a AND b OR c"),
            expr(&["a AND b", "c"], Operator::Or)
        );
        assert_eq!(parse("a,b OR c"), expr(&["a,b", "c"], Operator::Or));
    }

    #[test]
    fn test_stray_separators_are_dropped() {
        assert_eq!(parse(","), expr(&[], Operator::And));
        assert_eq!(parse("AND foo AND"), expr(&["foo"], Operator::And));
        assert_eq!(parse(",,foo,,bar,"), expr(&["foo", "bar"], Operator::And));
        assert_eq!(parse("OR foo"), expr(&["foo"], Operator::Or));
        assert_eq!(parse("OR"), expr(&[], Operator::Or));
    }

    #[test]
    fn test_unbalanced_quote_runs_to_end() {
        assert_eq!(parse(r#"foo AND "bar, baz"#), expr(&["foo", "bar, baz"], Operator::And));
        assert_eq!(parse(r#"""#), expr(&[], Operator::And));
    }

    #[test]
    fn test_quoted_text_joins_adjacent_text() {
        assert_eq!(parse(r#"x"y z"w"#), expr(&["xy zw"], Operator::And));
    }

    #[test]
    fn test_terms_keep_input_order() {
        assert_eq!(
            parse("zeta, alpha, mu"),
            expr(&["zeta", "alpha", "mu"], Operator::And)
        );
    }

    #[test]
    fn test_and_match_requires_every_term() {
        let filter = parse("acme AND services");
        assert!(filter.matches("Acme Services"));
        assert!(filter.matches("ACME FIELD SERVICES INC"));
        assert!(!filter.matches("Acme Corp"));
        assert!(!filter.matches("Other Services"));
    }

    #[test]
    fn test_and_match_flips_when_a_term_is_removed() {
        let filter = parse("alpha, beta, gamma");
        let candidate = "Alpha Beta Gamma Holdings";
        assert!(filter.matches(candidate));
        for term in ["Alpha", "Beta", "Gamma"] {
            let without = candidate.replace(term, "");
            assert!(!filter.matches(&without), "removing {term} should fail: {without}");
        }
    }

    #[test]
    fn test_or_match_requires_any_term() {
        let filter = parse("caltrans OR transportation");
        assert!(filter.matches("Department of Transportation"));
        assert!(filter.matches("CALTRANS District 4"));
        assert!(!filter.matches("Department of Education"));
    }

    #[test]
    fn test_empty_and_is_vacuously_true() {
        let filter = expr(&[], Operator::And);
        assert!(filter.matches(""));
        assert!(filter.matches("anything at all"));
    }

    #[test]
    fn test_empty_or_is_vacuously_false() {
        let filter = expr(&[], Operator::Or);
        assert!(!filter.matches(""));
        assert!(!filter.matches("anything at all"));
    }

    #[test]
    fn test_matching_is_case_insensitive_both_ways() {
        let filter = expr(&["ÉCOLE"], Operator::And);
        assert!(filter.matches("petite école"));
        assert!(matches("PETITE ÉCOLE", &parse("école")));
    }

    #[test]
    fn test_retain_matching_keeps_order() {
        let vendors = vec!["Acme Corp", "Acme Services", "Other Vendor"];
        let kept = parse("acme").retain_matching(vendors.clone(), |v| *v);
        assert_eq!(kept, vec!["Acme Corp", "Acme Services"]);

        let kept = parse("acme AND services").retain_matching(vendors, |v| *v);
        assert_eq!(kept, vec!["Acme Services"]);
    }

    #[test]
    fn test_display_round_trips() {
        let inputs = [
            "",
            "acme",
            "foo AND bar",
            "foo OR bar",
            "foo,bar",
            r#""foo bar" AND baz"#,
            r#""Smith, Jones OR Partners" AND legal"#,
            "a AND b OR c",
            "a,b OR c",
            "OR foo",
            "OR",
            r#"x"y z"w"#,
        ];
        for input in inputs {
            let parsed = parse(input);
            let rendered = parsed.to_string();
            assert_eq!(parse(&rendered), parsed, "{input:?} rendered as {rendered:?}");
        }
    }

    #[test]
    fn test_display_quotes_only_when_needed() {
        assert_eq!(parse("foo bar AND baz").to_string(), "foo bar AND baz");
        assert_eq!(parse("a AND b OR c").to_string(), r#""a AND b" OR c"#);
        assert_eq!(parse("a,b OR c").to_string(), r#""a,b" OR c"#);
    }
}
