//! Filter-to-predicate rendering.
//!
//! The storage engine evaluates SQL-style predicate strings. Filters reach
//! this crate as structured `(column, value)` pairs and are rendered here,
//! in one place, so that values containing the quote delimiter cannot break
//! out of their literal.

use recall_types::SearchFilter;

/// Render a filter as an engine predicate string.
///
/// Clauses become single-quoted equality comparisons joined with AND.
/// Returns an empty string for an empty filter; callers skip the predicate
/// entirely in that case.
pub fn render_predicate(filter: &SearchFilter) -> String {
    filter
        .clauses()
        .iter()
        .map(|(column, value)| format!("{} = '{}'", column, escape_value(value)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Escape a value for inclusion in a single-quoted SQL literal.
fn escape_value(value: &str) -> String {
    value.replace('\'', "''")
}
