//! # esquery-client
//!
//! Sends [`esquery`] request bodies to an Elasticsearch-compatible backend
//! and decodes the responses.
//!
//! The query crate knows nothing about the network; this crate is the other
//! half. It renders a [`Query`](esquery::Query), hands the text to a
//! [`SearchTransport`], and decodes what comes back into a
//! [`SearchResponse`].
//!
//! ## Key Features
//!
//! - **Owned client** - no global handle; create, connect, use, close
//! - **Pluggable transport** - implement [`SearchTransport`] or enable `http`
//! - **Response caching** - optional LRU + TTL cache, cleared on writes
//! - **Strict mode** - validate queries and raw bodies before sending
//!
//! ## Quick Start
//!
//! ```ignore
//! use esquery::Query;
//! use esquery_client::{ClientConfig, HttpTransport, SearchClient};
//!
//! let config = ClientConfig::builder()
//!     .with_url("http://localhost:9200")
//!     .with_index("person")
//!     .build();
//!
//! let client = SearchClient::open(HttpTransport::new(&config)?, config)?;
//!
//! let mut query = Query::new();
//! query.add_part(query.term("Gender", "male"));
//!
//! let response = client.search(&query)?;
//! println!("{} matches", response.total());
//! ```
//!
//! ## Feature Flags
//!
//! - `http` - Enables [`HttpTransport`] using reqwest's blocking client
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     esquery-client                        │
//! │                                                           │
//! │  SearchClient                                             │
//! │  ├── render Query → request body (esquery)                │
//! │  ├── check ResponseCache                                  │
//! │  ├── send via SearchTransport                             │
//! │  └── decode SearchResponse (serde_json)                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod client;
mod config;
mod error;
#[cfg(feature = "http")]
mod http;
mod response;
mod traits;

// Public re-exports
pub use cache::{cache_key, CacheStats, ResponseCache};
pub use client::SearchClient;
pub use config::{CacheConfig, ClientConfig, ClientConfigBuilder, DEFAULT_URL};
pub use error::{ClientError, ClientResult};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use response::{Hit, Hits, RequestStats, SearchResponse, TotalHits, TotalRelation};
pub use traits::{Refresh, SearchTransport};

// Re-export commonly used types from dependencies for convenience
pub use esquery::{Query, QueryPart};
