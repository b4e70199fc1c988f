//! Conversion of JSON and YAML text into [`Value`] trees.
//!
//! JSON is split into [`RawValue`] slices one container level at a time, so
//! every number keeps the exact text it was written with (`1E3` stays `1E3`,
//! never `1e+3`). YAML goes through
//! `serde_yaml`; its numbers keep the text `serde_yaml` prints for them.
//! Object member order is preserved for both formats.
//!
//! # Example
//!
//! ```
//! use peekjson::document::parser::parse_json_str;
//! use peekjson::document::value::{Number, Value};
//!
//! let doc = parse_json_str(r#"{"price": 1.10}"#).unwrap();
//! match &doc {
//!     Value::Object(fields) => {
//!         assert_eq!(fields["price"], Value::Number(Number::Decimal("1.10".to_string())));
//!     }
//!     _ => panic!("expected object"),
//! }
//! ```

use indexmap::IndexMap;
use serde_json::value::RawValue;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

use super::path::CANONICAL_SEPARATOR;
use super::value::{Number, Value};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("object key {0:?} contains a NUL character")]
    NulInKey(String),
}

/// Parses a JSON document.
///
/// Keys containing a NUL character are rejected.
///
/// ```
/// use peekjson::document::parser::parse_json_str;
///
/// assert!(parse_json_str(r#"{"unclosed": "#).is_err());
/// assert!(parse_json_str("{\"a\\u0000b\": 1}").is_err());
/// ```
pub fn parse_json_str(input: &str) -> Result<Value, DocumentError> {
    let raw: &RawValue = serde_json::from_str(input)?;
    from_raw_value(raw)
}

/// Converts one validated JSON slice. Containers are split into raw members
/// and converted recursively; scalars are decoded from their own text.
fn from_raw_value(raw: &RawValue) -> Result<Value, DocumentError> {
    let text = raw.get().trim();
    Ok(match text.as_bytes().first() {
        Some(b'{') => {
            let members: IndexMap<String, &RawValue> = serde_json::from_str(text)?;
            let mut fields = IndexMap::with_capacity(members.len());
            for (k, v) in members {
                fields.insert(checked_key(k)?, from_raw_value(v)?);
            }
            Value::Object(fields)
        }
        Some(b'[') => {
            let items: Vec<&RawValue> = serde_json::from_str(text)?;
            Value::Array(
                items
                    .into_iter()
                    .map(from_raw_value)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
        Some(b'"') => Value::String(serde_json::from_str(text)?),
        Some(b't') => Value::Bool(true),
        Some(b'f') => Value::Bool(false),
        Some(b'n') => Value::Null,
        _ => Value::Number(Number::Decimal(text.to_string())),
    })
}

/// Parses a YAML document. Only the first document of a stream is read.
pub fn parse_yaml_str(input: &str) -> Result<Value, DocumentError> {
    let raw: YamlValue = serde_yaml::from_str(input)?;
    from_yaml_value(&raw)
}

/// Converts an already parsed `serde_json::Value`.
///
/// Numbers take the text `serde_json` prints for them, which normalizes
/// exponents. Use [`parse_json_str`] when the literal text matters.
pub fn from_json_value(value: &JsonValue) -> Result<Value, DocumentError> {
    Ok(match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Number(Number::Decimal(n.to_string())),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::Array(
            items
                .iter()
                .map(from_json_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        JsonValue::Object(map) => {
            let mut fields = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                fields.insert(checked_key(k.clone())?, from_json_value(v)?);
            }
            Value::Object(fields)
        }
    })
}

/// Converts an already parsed `serde_yaml::Value`.
///
/// Non-string mapping keys are converted to their scalar text. Tags are
/// dropped and the tagged value is kept.
pub fn from_yaml_value(value: &YamlValue) -> Result<Value, DocumentError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && !f.is_finite() => Value::Number(Number::Float(f)),
            _ => Value::Number(Number::Decimal(n.to_string())),
        },
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(
            items
                .iter()
                .map(from_yaml_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut fields = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                fields.insert(checked_key(yaml_key_text(k))?, from_yaml_value(v)?);
            }
            Value::Object(fields)
        }
        YamlValue::Tagged(tagged) => from_yaml_value(&tagged.value)?,
    })
}

fn yaml_key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn checked_key(key: String) -> Result<String, DocumentError> {
    if key.contains(CANONICAL_SEPARATOR) {
        Err(DocumentError::NulInKey(key))
    } else {
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_json_str("null").unwrap(), Value::Null);
        assert_eq!(parse_json_str("true").unwrap(), Value::Bool(true));
        assert_eq!(
            parse_json_str(r#""hello""#).unwrap(),
            Value::String("hello".to_string())
        );
    }

    #[test]
    fn test_numbers_keep_their_text() {
        let doc =
            parse_json_str("[1.10, 1e3, 1E3, 2.5E-7, 4e+2, -0, 12345678901234567890123]").unwrap();
        let texts: Vec<String> = match doc {
            Value::Array(items) => items.iter().filter_map(|v| v.scalar_text()).collect(),
            _ => panic!("Expected array"),
        };
        assert_eq!(
            texts,
            vec!["1.10", "1e3", "1E3", "2.5E-7", "4e+2", "-0", "12345678901234567890123"]
        );
    }

    #[test]
    fn test_nested_scalars_decode() {
        let doc =
            parse_json_str(r#" { "a" : [ "x\ty" , true , null , { "b" : false } ] } "#).unwrap();
        let mut inner = IndexMap::new();
        inner.insert("b".to_string(), Value::Bool(false));
        let mut outer = IndexMap::new();
        outer.insert(
            "a".to_string(),
            Value::Array(vec![
                Value::String("x\ty".to_string()),
                Value::Bool(true),
                Value::Null,
                Value::Object(inner),
            ]),
        );
        assert_eq!(doc, Value::Object(outer));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse_json_str("[1] [2]").is_err());
        assert!(parse_json_str("").is_err());
    }

    #[test]
    fn test_object_order_preserved() {
        let doc = parse_json_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        match doc {
            Value::Object(fields) => {
                let keys: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
                assert_eq!(keys, vec!["z", "a", "m"]);
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_nul_in_key_rejected() {
        let err = parse_json_str("{\"a\\u0000b\": 1}").unwrap_err();
        assert!(matches!(err, DocumentError::NulInKey(_)));
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let doc = parse_yaml_str("name: peek\ncount: 3\n1: one\nlist:\n  - a\n  - ~\n").unwrap();
        match doc {
            Value::Object(fields) => {
                let keys: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
                assert_eq!(keys, vec!["name", "count", "1", "list"]);
                assert_eq!(
                    fields["list"],
                    Value::Array(vec![Value::String("a".to_string()), Value::Null])
                );
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_invalid_input_errors() {
        assert!(matches!(
            parse_json_str("{").unwrap_err(),
            DocumentError::Json(_)
        ));
        assert!(matches!(
            parse_yaml_str("a: [1,").unwrap_err(),
            DocumentError::Yaml(_)
        ));
    }
}
