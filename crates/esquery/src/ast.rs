//! Query tree node types.
//!
//! A query is a tree of [`QueryPart`] nodes. Each node is either a leaf
//! (a field/value pair) or a composite (a named clause holding ordered
//! children). Whether a composite frames its children as an array or as an
//! object is decided once, when the node is built.

/// Boolean connectives supported by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connective {
    /// Container of named sub-clauses (`must`, `should`, ...).
    Bool,
    /// All child clauses must match.
    Must,
    /// At least one child clause should match.
    Should,
    /// No child clause may match.
    MustNot,
    /// All child clauses must match, without scoring.
    Filter,
}

impl Connective {
    /// Returns the descriptor emitted for this connective.
    pub fn as_str(self) -> &'static str {
        match self {
            Connective::Bool => "bool",
            Connective::Must => "must",
            Connective::Should => "should",
            Connective::MustNot => "must_not",
            Connective::Filter => "filter",
        }
    }

    /// Whether this connective switches to array framing for multiple children.
    ///
    /// `bool` holds a flat object of named sub-clauses and is never an array.
    pub fn allows_array(self) -> bool {
        !matches!(self, Connective::Bool)
    }

    /// Looks up a connective by its descriptor.
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        match descriptor {
            "bool" => Some(Connective::Bool),
            "must" => Some(Connective::Must),
            "should" => Some(Connective::Should),
            "must_not" => Some(Connective::MustNot),
            "filter" => Some(Connective::Filter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single clause in a query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum QueryPart {
    /// Field/value pair, e.g. the `"user" : "kimchy"` inside a `term`.
    Leaf {
        /// Field name.
        descriptor: String,
        /// Literal value. An empty value renders as nothing.
        value: String,
    },
    /// Named clause with ordered children.
    Composite {
        /// Clause name (`bool`, `must`, `term`, ...).
        descriptor: String,
        /// Child clauses in caller order.
        children: Vec<QueryPart>,
        /// Render children as `[ {..} , {..} ]` instead of `{ .. }`.
        array_shape: bool,
    },
}

// =============================================================================
// Constructors
// =============================================================================

impl QueryPart {
    /// Creates a leaf node holding a literal value.
    pub fn leaf(descriptor: impl Into<String>, value: impl Into<String>) -> Self {
        QueryPart::Leaf {
            descriptor: descriptor.into(),
            value: value.into(),
        }
    }

    /// Creates a composite node with an explicit framing flag.
    ///
    /// Prefer the clause builders; this exists for callers emitting clause
    /// kinds the builders do not cover.
    pub fn composite(
        descriptor: impl Into<String>,
        children: Vec<QueryPart>,
        array_shape: bool,
    ) -> Self {
        QueryPart::Composite {
            descriptor: descriptor.into(),
            children,
            array_shape,
        }
    }

    /// Creates a connective clause.
    ///
    /// Array framing is chosen from the child count: more than one child
    /// gives an array, zero or one child gives a plain object. A single
    /// clause passed to `must`/`should`/`filter` therefore renders as an
    /// object, not as a one-element array. `bool` is never array framed.
    pub fn connective(kind: Connective, children: Vec<QueryPart>) -> Self {
        let array_shape = kind.allows_array() && children.len() > 1;
        QueryPart::Composite {
            descriptor: kind.as_str().to_string(),
            children,
            array_shape,
        }
    }

    /// `term` clause matching `field` against an exact `value`.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut part = QueryPart::composite("term", Vec::new(), false);
        part.set_nested_query_part(field, value);
        part
    }

    /// `match` clause running a full-text match of `value` on `field`.
    pub fn r#match(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut part = QueryPart::composite("match", Vec::new(), false);
        part.set_nested_query_part(field, value);
        part
    }

    /// `bool` clause.
    pub fn bool(children: Vec<QueryPart>) -> Self {
        Self::connective(Connective::Bool, children)
    }

    /// `must` clause.
    pub fn must(children: Vec<QueryPart>) -> Self {
        Self::connective(Connective::Must, children)
    }

    /// `should` clause.
    pub fn should(children: Vec<QueryPart>) -> Self {
        Self::connective(Connective::Should, children)
    }

    /// `must_not` clause.
    pub fn must_not(children: Vec<QueryPart>) -> Self {
        Self::connective(Connective::MustNot, children)
    }

    /// `filter` clause.
    pub fn filter(children: Vec<QueryPart>) -> Self {
        Self::connective(Connective::Filter, children)
    }
}

// =============================================================================
// Accessors and mutation
// =============================================================================

impl QueryPart {
    /// Returns the clause or field name.
    pub fn descriptor(&self) -> &str {
        match self {
            QueryPart::Leaf { descriptor, .. } | QueryPart::Composite { descriptor, .. } => {
                descriptor
            }
        }
    }

    /// Returns the literal value of a leaf.
    pub fn value(&self) -> Option<&str> {
        match self {
            QueryPart::Leaf { value, .. } => Some(value),
            QueryPart::Composite { .. } => None,
        }
    }

    /// Returns the children of a composite, or an empty slice for a leaf.
    pub fn children(&self) -> &[QueryPart] {
        match self {
            QueryPart::Leaf { .. } => &[],
            QueryPart::Composite { children, .. } => children,
        }
    }

    /// Whether children are framed as an array.
    pub fn is_array_shape(&self) -> bool {
        matches!(
            self,
            QueryPart::Composite {
                array_shape: true,
                ..
            }
        )
    }

    /// Returns true for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, QueryPart::Leaf { .. })
    }

    /// Replaces this node's children with a single leaf.
    ///
    /// The node ends up as a non-array composite with exactly one child.
    /// Called on a leaf, the leaf becomes a composite and its value is dropped.
    pub fn set_nested_query_part(
        &mut self,
        descriptor: impl Into<String>,
        value: impl Into<String>,
    ) {
        let nested = vec![QueryPart::leaf(descriptor, value)];
        let name = std::mem::take(match self {
            QueryPart::Leaf { descriptor, .. } | QueryPart::Composite { descriptor, .. } => {
                descriptor
            }
        });
        *self = QueryPart::Composite {
            descriptor: name,
            children: nested,
            array_shape: false,
        };
    }
}

// =============================================================================
// Tests
// =============================================================================
