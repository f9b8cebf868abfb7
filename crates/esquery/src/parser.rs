//! Request body parser implementation using nom.
//!
//! Reads a rendered body back into a [`Query`]. Whitespace between tokens is
//! insignificant, so hand-written bodies in the same grammar are accepted too:
//!
//! ```text
//! Query           := '{' '"query"' ':' '{' PartList '}' '}'
//! PartList        := Part (',' Part)*  |  <empty>
//! Part            := '"' descriptor '"' ':' (Scalar | Object | Array)?
//! Scalar          := '"' value '"'
//! Object          := '{' PartList '}'
//! Array           := '[' WrappedPart (',' WrappedPart)* ']'  |  '[' ']'
//! WrappedPart     := '{' Part '}'
//! ```
//!
//! A part with nothing after the colon is read as a leaf with an empty value,
//! which is how the renderer writes such a leaf.
//!
//! Objects and arrays may nest at most [`MAX_DEPTH`] levels; deeper input is
//! rejected with a [`QueryError::ParseError`].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, tuple},
    IResult,
};

use crate::ast::QueryPart;
use crate::error::{QueryError, QueryResult};
use crate::query::Query;

/// Deepest object/array nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 128;

/// Parse a request body into a [`Query`].
///
/// # Examples
///
/// ```rust
/// use esquery::{parse, Query, QueryPart};
///
/// let query = parse(r#"{ "query" :  { "term" :  { "user" : "kimchy" }  }  } "#).unwrap();
/// assert_eq!(query, Query::from(QueryPart::term("user", "kimchy")));
///
/// // Whitespace is free-form
/// let query = parse(r#"{"query":{"must":[{"term":{"a":"1"}},{"term":{"b":"2"}}]}}"#).unwrap();
/// assert!(query.parts()[0].is_array_shape());
/// ```
pub fn parse(input: &str) -> QueryResult<Query> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QueryError::EmptyBody);
    }

    match all_consuming(envelope)(input) {
        Ok((_, query)) => Ok(query),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(QueryError::ParseError {
                position: input.len() - e.input.len(),
                message: format!("nesting too deep (limit {MAX_DEPTH})"),
            })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = input.len() - e.input.len();
            Err(QueryError::ParseError {
                position,
                message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
            })
        }
        // Only complete combinators are used, so this means the input ran out.
        Err(nom::Err::Incomplete(_)) => Err(QueryError::ParseError {
            position: input.len(),
            message: "unexpected end of input".to_string(),
        }),
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

// ============================================================================
// Envelope
// ============================================================================

fn envelope(input: &str) -> IResult<&str, Query> {
    let (input, _) = tuple((token('{'), tag("\"query\""), token(':')))(input)?;
    let (input, parts) = object(input, 1)?;
    let (input, _) = token('}')(input)?;
    Ok((input, parts.into_iter().collect()))
}

// ============================================================================
// Parts
// ============================================================================

enum Body<'a> {
    Scalar(&'a str),
    Object(Vec<QueryPart>),
    Array(Vec<QueryPart>),
}

fn part(input: &str, depth: usize) -> IResult<&str, QueryPart> {
    let (input, descriptor) = delimited(ws, quoted, ws)(input)?;
    let (input, _) = token(':')(input)?;
    let (input, body) = opt(alt((
        map(delimited(ws, quoted, ws), Body::Scalar),
        map(|i| object(i, depth + 1), Body::Object),
        map(|i| array(i, depth + 1), Body::Array),
    )))(input)?;

    let part = match body {
        Some(Body::Scalar(value)) => QueryPart::leaf(descriptor, value),
        Some(Body::Object(children)) => QueryPart::composite(descriptor, children, false),
        Some(Body::Array(children)) => QueryPart::composite(descriptor, children, true),
        None => QueryPart::leaf(descriptor, ""),
    };
    Ok((input, part))
}

fn part_list(input: &str, depth: usize) -> IResult<&str, Vec<QueryPart>> {
    separated_list0(token(','), |i| part(i, depth))(input)
}

fn object(input: &str, depth: usize) -> IResult<&str, Vec<QueryPart>> {
    let (input, _) = token('{')(input)?;
    let (input, _) = check_depth(input, depth)?;
    let (input, parts) = part_list(input, depth)?;
    let (input, _) = token('}')(input)?;
    Ok((input, parts))
}

fn array(input: &str, depth: usize) -> IResult<&str, Vec<QueryPart>> {
    let (input, _) = token('[')(input)?;
    let (input, _) = check_depth(input, depth)?;
    let (input, parts) = separated_list0(token(','), |i| wrapped_part(i, depth))(input)?;
    let (input, _) = token(']')(input)?;
    Ok((input, parts))
}

fn wrapped_part(input: &str, depth: usize) -> IResult<&str, QueryPart> {
    delimited(token('{'), |i| part(i, depth), token('}'))(input)
}

/// Fails hard past [`MAX_DEPTH`] so `alt` does not try other branches.
fn check_depth(input: &str, depth: usize) -> IResult<&str, ()> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    Ok((input, ()))
}

// ============================================================================
// Lexical helpers
// ============================================================================

/// Double-quoted text. No escape sequences.
fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_until("\""), char('"'))(input)
}

fn token<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(ws, char(c), ws)
}

/// Optional whitespace
fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

// =============================================================================
// Tests
// =============================================================================
