//! Request body renderer.
//!
//! Turns a [`Query`] into the text body sent to the search backend. Output is
//! built by direct concatenation and its whitespace is fixed: consumers and
//! snapshot tests compare bodies byte for byte.
//!
//! ```text
//! { "query" :  { "must" :  [  { "term" :  { "f1" : "v1" }  } , { "term" :  { "f2" : "v2" }  }  ]  }  }
//! ```
//!
//! Values are emitted verbatim between quotes. Nothing is escaped.

use crate::ast::QueryPart;
use crate::error::QueryResult;

use super::builder::Query;

const ENVELOPE_OPEN: &str = r#"{ "query" : "#;
const OBJECT_OPEN: &str = " { ";
const OBJECT_CLOSE: &str = " } ";
const ARRAY_OPEN: &str = " [ ";
const ARRAY_CLOSE: &str = " ] ";
const SEPARATOR: &str = ",";

/// Query body renderer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    _private: (),
}

impl Renderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a query.
    pub fn render(&self, query: &Query) -> String {
        Self::render_query(query)
    }

    /// Render a query (static method).
    ///
    /// Never fails: empty descriptors and values are written out as they are.
    pub fn render_query(query: &Query) -> String {
        let mut out = String::new();
        out.push_str(ENVELOPE_OPEN);
        out.push_str(OBJECT_OPEN);
        Self::write_parts(&mut out, query.parts(), false);
        out.push_str(OBJECT_CLOSE);
        out.push_str(OBJECT_CLOSE);
        out
    }

    /// Validate the query, then render it.
    pub fn render_strict(query: &Query) -> QueryResult<String> {
        query.validate()?;
        Ok(Self::render_query(query))
    }

    /// Render a sequence of sibling parts without the query envelope.
    ///
    /// `array_framed` states whether the parent opened an array, in which case
    /// each sibling gets its own object wrapper.
    pub fn render_parts(parts: &[QueryPart], array_framed: bool) -> String {
        let mut out = String::new();
        Self::write_parts(&mut out, parts, array_framed);
        out
    }

    fn write_parts(out: &mut String, parts: &[QueryPart], array_framed: bool) {
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                out.push_str(SEPARATOR);
            }
            if array_framed {
                out.push_str(OBJECT_OPEN);
            }
            Self::write_part(out, part);
            if array_framed {
                out.push_str(OBJECT_CLOSE);
            }
        }
    }

    fn write_part(out: &mut String, part: &QueryPart) {
        out.push('"');
        out.push_str(part.descriptor());
        out.push_str(r#"" : "#);

        match part {
            QueryPart::Leaf { value, .. } => {
                if !value.is_empty() {
                    out.push('"');
                    out.push_str(value);
                    out.push('"');
                }
            }
            QueryPart::Composite {
                children,
                array_shape,
                ..
            } => {
                let (open, close) = if *array_shape {
                    (ARRAY_OPEN, ARRAY_CLOSE)
                } else {
                    (OBJECT_OPEN, OBJECT_CLOSE)
                };
                out.push_str(open);
                Self::write_parts(out, children, *array_shape);
                out.push_str(close);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
