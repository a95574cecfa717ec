use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};

use super::expression::{FilterExpression, Operator};

// Basic safety limits
const MAX_TERM_LENGTH: usize = 200;

/// Escape LIKE wildcards so a term like `100%` matches literally.
/// Escapes: % (match any) and _ (match single char)
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\") // Escape backslash first
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Truncate on a char boundary so oversized terms cannot blow up the query.
fn truncate_term(term: &str) -> &str {
    if term.len() <= MAX_TERM_LENGTH {
        return term;
    }
    let mut end = MAX_TERM_LENGTH;
    while !term.is_char_boundary(end) {
        end -= 1;
    }
    &term[..end]
}

/// `UPPER(column) LIKE '%TERM%' ESCAPE '\'` for one term.
///
/// Only ASCII is upper-cased on the Rust side so the pattern agrees with
/// `SQLite`'s ASCII-only `UPPER`.
#[must_use]
pub fn build_like_condition<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!(
        "%{}%",
        escape_like_wildcards(truncate_term(term)).to_ascii_uppercase()
    );
    Expr::expr(Func::upper(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Narrow a table scan to rows that could match `expression` on `column`.
///
/// The database only sees a coarse version of the filter: terms containing
/// non-ASCII text are left out because database case folding differs from
/// Rust's. Callers must still run [`FilterExpression::matches`] on the rows
/// that come back. Returns `None` when no useful condition can be built.
#[must_use]
pub fn build_prefilter<C: ColumnTrait + Copy>(
    column: C,
    expression: &FilterExpression,
) -> Option<Condition> {
    let ascii_terms: Vec<&String> = expression
        .terms()
        .iter()
        .filter(|term| term.is_ascii())
        .collect();

    match expression.operator() {
        Operator::And => {
            if ascii_terms.is_empty() {
                return None;
            }
            let condition = ascii_terms
                .into_iter()
                .fold(Condition::all(), |condition, term| {
                    condition.add(build_like_condition(column, term))
                });
            Some(condition)
        }
        Operator::Or => {
            // A single term the database cannot check could match anything
            if ascii_terms.is_empty() || ascii_terms.len() != expression.terms().len() {
                return None;
            }
            let condition = ascii_terms
                .into_iter()
                .fold(Condition::any(), |condition, term| {
                    condition.add(build_like_condition(column, term))
                });
            Some(condition)
        }
    }
}
