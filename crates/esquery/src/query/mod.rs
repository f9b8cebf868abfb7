//! Query building and rendering.
//!
//! ## Example
//!
//! ```rust
//! use esquery::Query;
//!
//! let mut query = Query::new();
//! let t1 = query.term("status", "active");
//! let t2 = query.term("role", "admin");
//! let t3 = query.term("banned", "true");
//!
//! let must = query.must(vec![t1, t2]);
//! let must_not = query.must_not(vec![t3]);
//! let root = query.bool(vec![must, must_not]);
//! query.add_part(root);
//!
//! let body = query.render();
//! assert!(body.starts_with(r#"{ "query" :  { "bool" : "#));
//! assert!(body.contains(r#""must" :  [ "#));
//! assert!(body.contains(r#""must_not" :  { "term""#));
//! ```

mod builder;
mod renderer;
mod validate;

pub use builder::Query;
pub use renderer::Renderer;
