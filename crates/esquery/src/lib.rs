//! # esquery
//!
//! A small composable builder for Elasticsearch boolean queries and a
//! renderer that turns the built tree into a `_search` request body.
//!
//! This crate provides:
//! - **Query tree**: [`QueryPart`] leaves and composites, and the [`Query`] root
//! - **Renderer**: byte-stable text output for the request body
//! - **Strict mode**: optional validation before rendering
//! - **Body parser**: read a rendered body back into a [`Query`]
//!
//! ## Usage
//!
//! ```rust
//! use esquery::Query;
//!
//! let mut query = Query::new();
//! let t1 = query.term("f1", "v1");
//! let t2 = query.term("f2", "v2");
//! let must = query.must(vec![t1, t2]);
//! query.add_part(must);
//!
//! assert_eq!(
//!     query.render(),
//!     r#"{ "query" :  { "must" :  [  { "term" :  { "f1" : "v1" }  } , { "term" :  { "f2" : "v2" }  }  ]  }  } "#
//! );
//! ```
//!
//! ## Array framing
//!
//! `must`, `should`, `must_not` and `filter` frame their children as an array
//! only when built with **more than one** child. A single child renders as a
//! plain object:
//!
//! ```rust
//! use esquery::{Query, QueryPart};
//!
//! let query = Query::from(QueryPart::must(vec![QueryPart::term("f1", "v1")]));
//! assert_eq!(
//!     query.render(),
//!     r#"{ "query" :  { "must" :  { "term" :  { "f1" : "v1" }  }  }  } "#
//! );
//! ```
//!
//! `bool` is never array framed.
//!
//! ## Clause Quick Reference
//!
//! | Builder | Descriptor | Children | Array framed |
//! |---------|------------|----------|--------------|
//! | `term(f, v)` | `term` | one leaf `f = v` | never |
//! | `match(f, v)` | `match` | one leaf `f = v` | never |
//! | `bool(..)` | `bool` | any | never |
//! | `must(..)` | `must` | any | when > 1 |
//! | `should(..)` | `should` | any | when > 1 |
//! | `must_not(..)` | `must_not` | any | when > 1 |
//! | `filter(..)` | `filter` | any | when > 1 |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod error;
mod parser;
pub mod query;

pub use ast::{Connective, QueryPart};
pub use error::{QueryError, QueryResult};
pub use parser::{parse, MAX_DEPTH};
pub use query::{Query, Renderer};
