//! Filter expressions for narrowing the browsed document.
//!
//! A filter is a pipeline of path expressions and builtins separated by `|`.
//! Evaluation never mutates the source document; the result is a new value
//! that the viewer renders in place of the source.
//!
//! # Supported Syntax
//!
//! - `.` - The whole input (`$` is accepted as an alias)
//! - `.name` or `."name"` - Object member
//! - `['name']` / `["name"]` - Bracket notation
//! - `[n]` - Array element, negative counts from the end
//! - `[a:b]` - Array slice
//! - `[]`, `[*]` or `.*` - All children
//! - `..name` - Every `name` member at any depth; `..` alone is every descendant
//! - `['a','b']` - Object with only the listed members
//! - `| keys`, `| values`, `| length` - Builtins
//!
//! Missing members and out-of-range indices evaluate to `Undefined` rather
//! than failing. After the first `[]`, `.*` or `..` segment the result is an
//! array, and later segments apply to each element.
//!
//! # Examples
//!
//! ```
//! use peekjson::document::parser::parse_json_str;
//! use peekjson::query::evaluate;
//!
//! let doc = parse_json_str(r#"{"users": [{"name": "ana"}, {"name": "bo"}]}"#).unwrap();
//! let names = evaluate(&doc, ".users[].name").unwrap();
//! assert_eq!(names, parse_json_str(r#"["ana", "bo"]"#).unwrap());
//!
//! let count = evaluate(&doc, ".users | length").unwrap();
//! assert_eq!(count.scalar_text(), Some("2".to_string()));
//! ```

pub mod ast;
pub mod complete;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Builtin, Query, Segment, Stage};
pub use complete::complete;
pub use error::QueryError;
pub use evaluator::Evaluator;
pub use parser::Parser;

use crate::document::value::Value;

/// Parses and evaluates `expression` against `document`.
pub fn evaluate(document: &Value, expression: &str) -> Result<Value, QueryError> {
    let query = Parser::parse(expression)?;
    Evaluator::new(document).evaluate(&query)
}
