//! Key completion for the filter prompt.

use crate::document::path::is_identifier;
use crate::document::value::Value;

use super::evaluate;

/// Completes the trailing `.partial` of `input` against the keys of the
/// object that the rest of the expression selects.
///
/// Returns full replacement strings in document order. Keys that are not
/// plain identifiers complete to bracket form. An input whose prefix fails to
/// evaluate, or does not select an object, has no completions.
///
/// # Example
///
/// ```
/// use peekjson::document::parser::parse_json_str;
/// use peekjson::query::complete;
///
/// let doc = parse_json_str(r#"{"user": {"name": 1, "nick": 2, "full name": 4}}"#).unwrap();
/// assert_eq!(complete(&doc, ".user.n"), vec![".user.name", ".user.nick"]);
/// assert_eq!(complete(&doc, ".user.f"), vec![".user[\"full name\"]"]);
/// ```
pub fn complete(document: &Value, input: &str) -> Vec<String> {
    let Some(dot) = input.rfind('.') else {
        return Vec::new();
    };
    let (prefix, partial) = (&input[..dot], &input[dot + 1..]);
    if !partial.is_empty() && !is_identifier(partial) {
        return Vec::new();
    }

    let evaluated;
    let target = if prefix.trim().is_empty() || prefix.trim() == "$" {
        document
    } else {
        match evaluate(document, prefix) {
            Ok(value) => {
                evaluated = value;
                &evaluated
            }
            Err(_) => return Vec::new(),
        }
    };
    let Value::Object(fields) = target else {
        return Vec::new();
    };

    fields
        .iter()
        .filter(|(key, value)| !value.is_undefined() && key.starts_with(partial))
        .map(|(key, _)| {
            if is_identifier(key) {
                format!("{}.{}", prefix, key)
            } else {
                let quoted = serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key));
                format!("{}[{}]", prefix, quoted)
            }
        })
        .collect()
}
