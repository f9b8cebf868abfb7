//! Serialization of the query tree (requires the `serde` feature).

#![cfg(feature = "serde")]

use esquery::{Connective, Query, QueryPart};

#[test]
fn test_query_part_json_shape() {
    let value = serde_json::to_value(QueryPart::term("user", "kimchy")).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "kind": "composite",
            "descriptor": "term",
            "children": [
                { "kind": "leaf", "descriptor": "user", "value": "kimchy" }
            ],
            "array_shape": false
        })
    );
}

#[test]
fn test_query_survives_json() {
    let query = Query::from(QueryPart::bool(vec![QueryPart::should(vec![
        QueryPart::term("a", "1"),
        QueryPart::r#match("b", "2"),
    ])]));
    let json = serde_json::to_string(&query).unwrap();
    let back: Query = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
    assert_eq!(back.render(), query.render());
}

#[test]
fn test_connective_names() {
    assert_eq!(
        serde_json::to_value(Connective::MustNot).unwrap(),
        serde_json::json!("must_not")
    );
}
