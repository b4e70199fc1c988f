//! Value representation for browsed documents.
//!
//! This module provides the tagged [`Value`] type used everywhere in peekjson.
//! Objects keep insertion order through [`IndexMap`], and numbers keep their
//! original decimal text when it was available at parse time so that a value
//! like `1.10` is displayed exactly as written.
//!
//! # Example
//!
//! ```
//! use peekjson::document::value::{Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::String("peekjson".to_string()));
//! fields.insert("version".to_string(), Value::Number(Number::Decimal("1.10".to_string())));
//! let object = Value::Object(fields);
//!
//! assert!(object.is_container());
//! assert_eq!(object.child_count(), 2);
//! ```

use indexmap::IndexMap;

use super::path::{Path, PathComponent};

/// A numeric leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// A double-precision value, typically computed rather than parsed.
    Float(f64),
    /// Decimal text preserved verbatim from the input.
    Decimal(String),
}

impl Number {
    /// Returns the literal text displayed for this number.
    ///
    /// Non-finite floats have no literal form and display as `null`.
    pub fn literal(&self) -> String {
        match self {
            Number::Decimal(text) => text.clone(),
            Number::Float(f) if f.is_finite() => format!("{}", f),
            Number::Float(_) => "null".to_string(),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Float(f) => *f,
            Number::Decimal(text) => text.parse().unwrap_or(f64::NAN),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.literal())
    }
}

/// A document value.
///
/// `Undefined` never comes out of the parser. It is the filter evaluator's
/// "no value" result: a missing member or an out-of-range index. The renderer
/// emits nothing for a top-level `Undefined`, prints `null` for one inside an
/// array, and drops object members holding it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Short type name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Number of direct children; zero for scalars.
    pub fn child_count(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(fields) => fields.len(),
            _ => 0,
        }
    }

    /// Returns the literal text of a scalar as it is shown to the user.
    ///
    /// Strings are returned unquoted. Containers and `Undefined` return `None`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.literal()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Returns the direct child addressed by a single path component.
    pub fn child(&self, component: &PathComponent) -> Option<&Value> {
        match (self, component) {
            (Value::Array(items), PathComponent::Index(i)) => items.get(*i),
            (Value::Object(fields), PathComponent::Key(k)) => fields.get(k),
            _ => None,
        }
    }

    /// Resolves `path` from this value.
    ///
    /// # Example
    ///
    /// ```
    /// use peekjson::document::parser::parse_json_str;
    /// use peekjson::document::path::Path;
    ///
    /// let doc = parse_json_str(r#"{"a": [10, 20]}"#).unwrap();
    /// let path = Path::root().key("a").index(1);
    /// assert_eq!(doc.get(&path).and_then(|v| v.scalar_text()), Some("20".to_string()));
    /// ```
    pub fn get(&self, path: &Path) -> Option<&Value> {
        path.components()
            .iter()
            .try_fold(self, |node, component| node.child(component))
    }

    /// Returns the child components of a container in display order.
    ///
    /// Object members whose value is `Undefined` are skipped.
    pub fn child_components(&self) -> Vec<PathComponent> {
        match self {
            Value::Array(items) => (0..items.len()).map(PathComponent::Index).collect(),
            Value::Object(fields) => fields
                .iter()
                .filter(|(_, v)| !v.is_undefined())
                .map(|(k, _)| PathComponent::Key(k.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Collects the paths of every container under `base` (resolved from
    /// this value, so call it on the document root), in pre-order,
    /// stopping after `limit` paths.
    pub fn container_paths(&self, base: &Path, limit: usize) -> Vec<Path> {
        let mut out = Vec::new();
        let mut stack = vec![base.clone()];
        while let Some(path) = stack.pop() {
            if out.len() >= limit {
                break;
            }
            let Some(node) = self.get(&path) else {
                continue;
            };
            if !node.is_container() {
                continue;
            }
            for component in node.child_components().into_iter().rev() {
                stack.push(path.child(component));
            }
            out.push(path);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_literal() {
        assert_eq!(Number::Decimal("1.10".to_string()).literal(), "1.10");
        assert_eq!(Number::Float(2.5).literal(), "2.5");
        assert_eq!(Number::Float(3.0).literal(), "3");
        assert_eq!(Number::Float(f64::NAN).literal(), "null");
        assert_eq!(Number::Float(f64::INFINITY).literal(), "null");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Value::Null.scalar_text(), Some("null".to_string()));
        assert_eq!(Value::Bool(false).scalar_text(), Some("false".to_string()));
        assert_eq!(
            Value::String("a\"b".to_string()).scalar_text(),
            Some("a\"b".to_string())
        );
        assert_eq!(Value::Array(vec![]).scalar_text(), None);
        assert_eq!(Value::Undefined.scalar_text(), None);
    }

    #[test]
    fn test_container_paths_preorder_with_limit() {
        let mut inner = IndexMap::new();
        inner.insert("x".to_string(), Value::Array(vec![Value::Null]));
        let doc = Value::Array(vec![
            Value::Object(inner),
            Value::Bool(true),
            Value::Array(vec![]),
        ]);

        let all = doc.container_paths(&Path::root(), 100);
        let rendered: Vec<String> = all.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["", "[0]", "[0].x", "[2]"]);

        let limited = doc.container_paths(&Path::root(), 2);
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_child_components_skip_undefined() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), Value::Null);
        fields.insert("b".to_string(), Value::Undefined);
        let obj = Value::Object(fields);
        assert_eq!(
            obj.child_components(),
            vec![PathComponent::Key("a".to_string())]
        );
    }
}
