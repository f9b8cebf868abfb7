//! Search response types.

use std::time::Duration;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::ClientResult;

/// Decoded `_search` response.
///
/// # Example
///
/// ```ignore
/// let response = client.search(&query)?;
///
/// println!("{} hits in {}ms", response.total(), response.took);
///
/// for hit in response.iter() {
///     let person: Person = hit.source_as()?.unwrap();
///     println!("{}: {}", hit.id, person.name);
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Milliseconds the backend spent on the search.
    #[serde(default)]
    pub took: u64,
    /// Whether the backend hit its own timeout.
    #[serde(default)]
    pub timed_out: bool,
    /// Matching documents.
    pub hits: Hits,
    /// Client-side statistics for the request that produced this response.
    #[serde(skip)]
    pub stats: RequestStats,
}

impl SearchResponse {
    /// Total number of matching documents.
    pub fn total(&self) -> u64 {
        self.hits.total.value
    }

    /// Returns true if no document was returned.
    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }

    /// Returns an iterator over returned hits.
    pub fn iter(&self) -> impl Iterator<Item = &Hit> {
        self.hits.hits.iter()
    }

    /// Document IDs in ranking order.
    pub fn ids(&self) -> Vec<&str> {
        self.hits.hits.iter().map(|h| h.id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a SearchResponse {
    type Item = &'a Hit;
    type IntoIter = std::slice::Iter<'a, Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.hits.iter()
    }
}

/// The `hits` section of a response.
#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    /// Total hit count.
    #[serde(default)]
    pub total: TotalHits,
    /// Best score among the hits.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Returned documents.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A single matching document.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Index the document lives in.
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// Raw document source.
    #[serde(rename = "_source", default)]
    pub source: Option<Box<RawValue>>,
    /// Raw highlighting fragments.
    #[serde(default)]
    pub highlight: Option<Box<RawValue>>,
    /// Sort key values.
    #[serde(default)]
    pub sort: Vec<serde_json::Value>,
}

impl Hit {
    /// Decodes the document source.
    ///
    /// Returns `Ok(None)` when the response carried no source.
    pub fn source_as<T: DeserializeOwned>(&self) -> ClientResult<Option<T>> {
        match &self.source {
            Some(raw) => Ok(Some(serde_json::from_str(raw.get())?)),
            None => Ok(None),
        }
    }
}

/// Whether a total hit count is exact or a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalRelation {
    /// Exact count.
    #[default]
    Eq,
    /// Lower bound; the backend stopped counting.
    Gte,
}

/// Total hit count.
///
/// Older backends send a bare number, newer ones an object with `value` and
/// `relation`. Both decode to this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TotalHits {
    /// Number of matching documents.
    pub value: u64,
    /// Exactness of `value`.
    pub relation: TotalRelation,
}

impl<'de> Deserialize<'de> for TotalHits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(u64),
            Object {
                value: u64,
                #[serde(default)]
                relation: TotalRelation,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Count(value) => TotalHits {
                value,
                relation: TotalRelation::Eq,
            },
            Repr::Object { value, relation } => TotalHits { value, relation },
        })
    }
}

/// Statistics from a search request.
#[derive(Debug, Clone, Default)]
pub struct RequestStats {
    /// Wall time including transport and decoding.
    pub duration: Duration,
    /// Whether the response was served from cache.
    pub cache_hit: bool,
}

impl RequestStats {
    /// Creates new request stats.
    pub fn new(duration: Duration, cache_hit: bool) -> Self {
        Self {
            duration,
            cache_hit,
        }
    }
}
