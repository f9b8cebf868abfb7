//! Integration tests for the search client.
//!
//! The backend here is an in-memory document store that parses the request
//! body with `esquery::parse` and evaluates term/match/bool clauses.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use esquery::{Query, QueryPart};
use esquery_client::{
    CacheConfig, ClientConfig, ClientError, ClientResult, Refresh, SearchClient, SearchTransport,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Person {
    name: String,
    age: String,
    gender: String,
}

/// In-memory search backend.
#[derive(Default)]
struct MemoryBackend {
    /// index -> (id -> source)
    indices: Mutex<BTreeMap<String, BTreeMap<String, Value>>>,
    searches: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryBackend {
    fn evaluate(part: &QueryPart, doc: &Value) -> bool {
        match part.descriptor() {
            "term" => part.children().iter().all(|leaf| {
                field(doc, leaf.descriptor()) == Some(leaf.value().unwrap_or_default())
            }),
            "match" => part.children().iter().all(|leaf| {
                let wanted = leaf.value().unwrap_or_default().to_lowercase();
                field(doc, leaf.descriptor())
                    .map(|v| v.to_lowercase().split_whitespace().any(|w| w == wanted))
                    .unwrap_or(false)
            }),
            "bool" => part.children().iter().all(|c| Self::evaluate(c, doc)),
            "must" | "filter" => part.children().iter().all(|c| Self::evaluate(c, doc)),
            "should" => part.children().iter().any(|c| Self::evaluate(c, doc)),
            "must_not" => !part.children().iter().any(|c| Self::evaluate(c, doc)),
            _ => false,
        }
    }
}

fn field<'a>(doc: &'a Value, name: &str) -> Option<&'a str> {
    doc.get(name).and_then(Value::as_str)
}

impl SearchTransport for MemoryBackend {
    fn info(&self) -> ClientResult<()> {
        Ok(())
    }

    fn search(&self, index: &str, body: &str) -> ClientResult<String> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let query = esquery::parse(body).map_err(|e| ClientError::Status {
            status: 400,
            body: e.to_string(),
        })?;

        let indices = self.indices.lock().unwrap();
        let docs = indices.get(index).ok_or_else(|| ClientError::Status {
            status: 404,
            body: format!("no such index [{index}]"),
        })?;

        let hits: Vec<Value> = docs
            .iter()
            .filter(|(_, doc)| query.parts().iter().all(|p| Self::evaluate(p, doc)))
            .map(|(id, doc)| json!({ "_index": index, "_id": id, "_score": 1.0, "_source": doc }))
            .collect();

        let max_score = if hits.is_empty() {
            Value::Null
        } else {
            json!(1.0)
        };

        Ok(json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": max_score,
                "hits": hits
            }
        })
        .to_string())
    }

    fn index(&self, index: &str, body: &str, _refresh: Refresh) -> ClientResult<()> {
        let doc: Value = serde_json::from_str(body)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .insert(id, doc);
        Ok(())
    }
}

fn person(name: &str, age: &str, gender: &str) -> Person {
    Person {
        name: name.to_string(),
        age: age.to_string(),
        gender: gender.to_string(),
    }
}

fn seeded_client(config: ClientConfig) -> SearchClient<MemoryBackend> {
    let client = SearchClient::open(MemoryBackend::default(), config).unwrap();
    for p in [
        person("test", "20", "male"),
        person("alice smith", "31", "female"),
        person("bob", "45", "male"),
    ] {
        client.index_json(&p, Refresh::True).unwrap();
    }
    client
}

fn person_config() -> ClientConfig {
    ClientConfig::builder().with_index("person").build()
}

#[test]
fn test_search_person_by_name() {
    let client = seeded_client(person_config());

    let mut query = Query::new();
    let term = query.term("Name", "test");
    query.add_part(term);

    let response = client.search(&query).unwrap();
    assert_eq!(response.total(), 1);

    let found: Person = response.hits.hits[0].source_as().unwrap().unwrap();
    assert_eq!(found, person("test", "20", "male"));
}

#[test]
fn test_search_person_by_gender() {
    let client = seeded_client(person_config());

    let mut query = Query::new();
    let term = query.term("Gender", "male");
    query.add_part(term);

    let response = client.search(&query).unwrap();
    assert_eq!(response.total(), 2);
    assert_eq!(response.ids(), vec!["0", "2"]);
}

#[test]
fn test_bool_query_end_to_end() {
    let client = seeded_client(person_config());

    let mut query = Query::new();
    let male = query.term("Gender", "male");
    let bob = query.term("Name", "bob");
    let smith = query.r#match("Name", "Smith");

    let root = query.bool(vec![
        query.should(vec![male, smith]),
        query.must_not(vec![bob]),
    ]);
    query.add_part(root);

    let response = client.search(&query).unwrap();
    let names: Vec<String> = response
        .iter()
        .map(|h| h.source_as::<Person>().unwrap().unwrap().name)
        .collect();
    assert_eq!(names, vec!["test", "alice smith"]);
}

#[test]
fn test_search_unknown_index() {
    let config = ClientConfig::builder().with_index("nobody").build();
    let client = SearchClient::open(MemoryBackend::default(), config).unwrap();

    let err = client
        .search(&Query::from(QueryPart::term("a", "b")))
        .unwrap_err();
    match err {
        ClientError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_cache_serves_repeated_searches() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_cache(CacheConfig::default())
        .build();
    let client = seeded_client(config);
    let query = Query::from(QueryPart::term("Gender", "male"));

    let first = client.search(&query).unwrap();
    let second = client.search(&query).unwrap();

    assert!(!first.stats.cache_hit);
    assert!(second.stats.cache_hit);
    assert_eq!(second.total(), first.total());
    assert_eq!(client.transport().searches.load(Ordering::SeqCst), 1);

    let stats = client.cache().unwrap().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_cache_ignores_structural_whitespace() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_cache(CacheConfig::default())
        .build();
    let client = seeded_client(config);

    client
        .search_body(r#"{ "query" :  { "term" :  { "Name" : "bob" }  }  } "#)
        .unwrap();
    let again = client
        .search_body(r#"{ "query" : { "term" : { "Name" : "bob" } } }"#)
        .unwrap();
    let compact = client
        .search_body(r#"{"query":{"term":{"Name":"bob"}}}"#)
        .unwrap();

    assert!(again.stats.cache_hit);
    assert!(compact.stats.cache_hit);
    assert_eq!(client.transport().searches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_write_invalidates_cache() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_cache(CacheConfig::default())
        .build();
    let client = seeded_client(config);
    let query = Query::from(QueryPart::term("Gender", "female"));

    assert_eq!(client.search(&query).unwrap().total(), 1);

    client
        .index_json(&person("carol", "28", "female"), Refresh::WaitFor)
        .unwrap();
    assert!(client.cache().unwrap().is_empty());

    let after = client.search(&query).unwrap();
    assert!(!after.stats.cache_hit);
    assert_eq!(after.total(), 2);
}

#[test]
fn test_strict_mode_rejects_invalid_query() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_strict(true)
        .build();
    let client = seeded_client(config);

    let err = client
        .search(&Query::from(QueryPart::term("Name", "")))
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidQuery(_)));
    assert_eq!(client.transport().searches.load(Ordering::SeqCst), 0);
}

#[test]
fn test_strict_mode_rejects_malformed_body() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_strict(true)
        .build();
    let client = seeded_client(config);

    let err = client.search_body(r#"{ "size": 10 }"#).unwrap_err();
    assert!(matches!(
        err,
        ClientError::InvalidQuery(esquery::QueryError::ParseError { .. })
    ));
}

#[test]
fn test_strict_mode_rejects_deeply_nested_body() {
    let config = ClientConfig::builder()
        .with_index("person")
        .with_strict(true)
        .build();
    let client = seeded_client(config);

    let depth = 5000;
    let body = format!(
        r#"{{ "query" : {{ {} {} }} }}"#,
        r#""bool" : { "#.repeat(depth),
        " } ".repeat(depth)
    );
    let err = client.search_body(&body).unwrap_err();
    assert!(matches!(
        err,
        ClientError::InvalidQuery(esquery::QueryError::ParseError { .. })
    ));
    assert_eq!(client.transport().searches.load(Ordering::SeqCst), 0);
}

#[test]
fn test_lenient_mode_forwards_degenerate_query() {
    let client = seeded_client(person_config());

    // Rendered as `"Name" : ` with no value and sent as-is
    let response = client
        .search(&Query::from(QueryPart::term("Name", "")))
        .unwrap();
    assert_eq!(response.total(), 0);
    assert_eq!(client.transport().searches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_index_document_requires_connection() {
    let client = SearchClient::with_config(MemoryBackend::default(), person_config());
    let err = client
        .index_document(r#"{"Name":"x"}"#, Refresh::False)
        .unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));
}

#[test]
fn test_index_document_rejects_bad_json() {
    let client = SearchClient::open(MemoryBackend::default(), person_config()).unwrap();
    let err = client
        .index_document("not json", Refresh::False)
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[test]
fn test_close_returns_transport() {
    let client = seeded_client(person_config());
    let backend = client.close();
    let indices = backend.indices.lock().unwrap();
    assert_eq!(indices["person"].len(), 3);
}
