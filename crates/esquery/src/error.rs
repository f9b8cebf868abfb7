//! Error types for query validation and body parsing.

use thiserror::Error;

/// Errors reported by strict validation and by the body parser.
///
/// Building and rendering never fail; these only surface from
/// [`Query::validate`](crate::Query::validate),
/// [`Renderer::render_strict`](crate::Renderer::render_strict) and
/// [`parse`](crate::parse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A node has an empty descriptor.
    #[error("empty descriptor at {path}")]
    EmptyDescriptor {
        /// Dotted path of the offending node.
        path: String,
    },

    /// A leaf has an empty value.
    #[error("empty value at {path}")]
    EmptyValue {
        /// Dotted path of the offending leaf.
        path: String,
    },

    /// Parse error at a specific position in the body.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Byte offset in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// Empty body provided.
    #[error("empty request body")]
    EmptyBody,
}

/// Result type for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
