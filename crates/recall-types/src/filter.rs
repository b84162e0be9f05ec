//! Structured search filters.
//!
//! A filter is a conjunction of per-column equality constraints. It is
//! carried as plain `(column, value)` pairs so that only the storage layer
//! decides how to render them into an engine predicate, including any
//! escaping the engine's expression syntax needs.

/// Conjunctive equality constraints for filtered retrieval.
///
/// Supports only `column = value` clauses joined with AND. Disjunction,
/// negation, and range constraints are out of scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    clauses: Vec<(String, String)>,
}

impl SearchFilter {
    /// Create an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` clause
    pub fn equals(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((column.into(), value.into()));
        self
    }

    /// True when no clauses have been added
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The accumulated `(column, value)` pairs, in insertion order
    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }
}
