//! Root query container and clause builders.

use crate::ast::QueryPart;
use crate::error::QueryResult;

use super::renderer::Renderer;
use super::validate;

/// An Elasticsearch query under construction.
///
/// Holds the ordered top-level clauses and offers one builder per supported
/// clause kind. The builders do not attach anything; compose the returned
/// parts and hand the top-level ones to [`add_part`](Self::add_part).
///
/// # Example
///
/// ```rust
/// use esquery::Query;
///
/// let mut query = Query::new();
/// let term = query.term("user", "kimchy");
/// query.add_part(term);
///
/// assert_eq!(
///     query.render(),
///     r#"{ "query" :  { "term" :  { "user" : "kimchy" }  }  } "#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    parts: Vec<QueryPart>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level clause.
    pub fn add_part(&mut self, part: QueryPart) {
        self.parts.push(part);
    }

    /// Append several top-level clauses, keeping their order.
    pub fn add_parts(&mut self, parts: impl IntoIterator<Item = QueryPart>) {
        self.parts.extend(parts);
    }

    /// Top-level clauses in insertion order.
    pub fn parts(&self) -> &[QueryPart] {
        &self.parts
    }

    /// Number of top-level clauses.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render the request body.
    pub fn render(&self) -> String {
        Renderer::render_query(self)
    }

    /// Check every node for empty descriptors or values.
    pub fn validate(&self) -> QueryResult<()> {
        validate::validate_parts(&self.parts)
    }

    // =========================================================================
    // Clause builders
    // =========================================================================

    /// Build a `term` clause. See [`QueryPart::term`].
    pub fn term(&self, field: impl Into<String>, value: impl Into<String>) -> QueryPart {
        QueryPart::term(field, value)
    }

    /// Build a `match` clause. See [`QueryPart::match`](QueryPart::r#match).
    pub fn r#match(&self, field: impl Into<String>, value: impl Into<String>) -> QueryPart {
        QueryPart::r#match(field, value)
    }

    /// Build a `bool` clause.
    pub fn bool(&self, children: Vec<QueryPart>) -> QueryPart {
        QueryPart::bool(children)
    }

    /// Build a `must` clause.
    pub fn must(&self, children: Vec<QueryPart>) -> QueryPart {
        QueryPart::must(children)
    }

    /// Build a `should` clause.
    pub fn should(&self, children: Vec<QueryPart>) -> QueryPart {
        QueryPart::should(children)
    }

    /// Build a `must_not` clause.
    pub fn must_not(&self, children: Vec<QueryPart>) -> QueryPart {
        QueryPart::must_not(children)
    }

    /// Build a `filter` clause.
    pub fn filter(&self, children: Vec<QueryPart>) -> QueryPart {
        QueryPart::filter(children)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<QueryPart> for Query {
    fn from_iter<I: IntoIterator<Item = QueryPart>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl Extend<QueryPart> for Query {
    fn extend<I: IntoIterator<Item = QueryPart>>(&mut self, iter: I) {
        self.parts.extend(iter);
    }
}

impl From<QueryPart> for Query {
    fn from(part: QueryPart) -> Self {
        Self { parts: vec![part] }
    }
}

// =============================================================================
// Tests
// =============================================================================
