//! Strict validation of a query tree.
//!
//! Paths use the descriptors from the root down, with an `[index]` suffix for
//! elements of array-framed clauses, e.g. `bool.should[1].term.user`.

use crate::ast::QueryPart;
use crate::error::{QueryError, QueryResult};

pub(crate) fn validate_parts(parts: &[QueryPart]) -> QueryResult<()> {
    visit(parts, "", false)
}

fn visit(parts: &[QueryPart], prefix: &str, indexed: bool) -> QueryResult<()> {
    for (index, part) in parts.iter().enumerate() {
        let base = if indexed {
            format!("{}[{}]", prefix, index)
        } else {
            prefix.to_string()
        };
        let path = join(&base, part.descriptor());

        if part.descriptor().is_empty() {
            return Err(QueryError::EmptyDescriptor { path });
        }

        match part {
            QueryPart::Leaf { value, .. } => {
                if value.is_empty() {
                    return Err(QueryError::EmptyValue { path });
                }
            }
            QueryPart::Composite {
                children,
                array_shape,
                ..
            } => visit(children, &path, *array_shape)?,
        }
    }
    Ok(())
}

fn join(base: &str, descriptor: &str) -> String {
    if base.is_empty() {
        descriptor.to_string()
    } else {
        format!("{}.{}", base, descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Query;

    #[test]
    fn test_valid_tree() {
        let query = Query::from(QueryPart::bool(vec![
            QueryPart::must(vec![QueryPart::term("a", "1")]),
            QueryPart::should(vec![QueryPart::term("b", "2"), QueryPart::term("c", "3")]),
        ]));
        assert_eq!(query.validate(), Ok(()));
    }

    #[test]
    fn test_empty_value_path() {
        let query = Query::from(QueryPart::bool(vec![QueryPart::should(vec![
            QueryPart::term("a", "1"),
            QueryPart::term("b", ""),
        ])]));
        assert_eq!(
            query.validate(),
            Err(QueryError::EmptyValue {
                path: "bool.should[1].term.b".to_string()
            })
        );
    }

    #[test]
    fn test_empty_descriptor_path() {
        let query = Query::from(QueryPart::must(vec![QueryPart::r#match("", "x")]));
        assert_eq!(
            query.validate(),
            Err(QueryError::EmptyDescriptor {
                path: "must.match.".to_string()
            })
        );
    }

    #[test]
    fn test_empty_composites_are_valid() {
        let query = Query::from(QueryPart::bool(vec![QueryPart::filter(vec![])]));
        assert!(query.validate().is_ok());
    }
}
