use std::borrow::Cow;

use indexmap::IndexMap;

use super::ast::{Builtin, Query, Segment, Stage};
use super::error::QueryError;
use crate::document::value::{Number, Value};

/// Result of applying one segment to one value.
enum Applied<'v> {
    /// Exactly one result, borrowed from the input; `None` is Undefined.
    One(Option<&'v Value>),
    /// Zero or more borrowed results.
    Many(Vec<&'v Value>),
    /// A freshly built result.
    Built(Value),
}

impl<'v> Applied<'v> {
    fn borrowed(self) -> Vec<Cow<'v, Value>> {
        match self {
            Applied::One(Some(v)) => vec![Cow::Borrowed(v)],
            Applied::One(None) => vec![Cow::Owned(Value::Undefined)],
            Applied::Many(vs) => vs.into_iter().map(Cow::Borrowed).collect(),
            Applied::Built(v) => vec![Cow::Owned(v)],
        }
    }

    fn owned<'b>(self) -> Vec<Cow<'b, Value>> {
        match self {
            Applied::One(Some(v)) => vec![Cow::Owned(v.clone())],
            Applied::One(None) => vec![Cow::Owned(Value::Undefined)],
            Applied::Many(vs) => vs.into_iter().map(|v| Cow::Owned(v.clone())).collect(),
            Applied::Built(v) => vec![Cow::Owned(v)],
        }
    }
}

/// Evaluates parsed filter queries against a document.
pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Runs every stage of `query` in order, feeding each stage's result into the next.
    pub fn evaluate(&self, query: &Query) -> Result<Value, QueryError> {
        let mut current: Cow<'a, Value> = Cow::Borrowed(self.root);
        for stage in &query.stages {
            current = match stage {
                Stage::Path(segments) => evaluate_path(current, segments),
                Stage::Builtin(builtin) => Cow::Owned(apply_builtin(*builtin, &current)?),
            };
        }
        Ok(current.into_owned())
    }
}

fn evaluate_path<'a>(input: Cow<'a, Value>, segments: &[Segment]) -> Cow<'a, Value> {
    if segments.is_empty() {
        return input;
    }

    let mut items = vec![input];
    let mut fanned = false;
    for segment in segments {
        fanned |= segment.fans_out();
        items = items
            .into_iter()
            .flat_map(|item| match item {
                Cow::Borrowed(v) => apply_segment(v, segment).borrowed(),
                Cow::Owned(v) => apply_segment(&v, segment).owned(),
            })
            .collect();
    }

    if fanned {
        Cow::Owned(Value::Array(
            items.into_iter().map(Cow::into_owned).collect(),
        ))
    } else {
        items
            .into_iter()
            .next()
            .unwrap_or(Cow::Owned(Value::Undefined))
    }
}

fn apply_segment<'v>(node: &'v Value, segment: &Segment) -> Applied<'v> {
    match segment {
        Segment::Child(name) => Applied::One(member(node, name)),
        Segment::Index(idx) => Applied::One(element(node, *idx)),
        Segment::Wildcard => Applied::Many(children(node)),
        Segment::RecursiveDescent(name) => {
            let mut results = Vec::new();
            descend(node, name.as_deref(), &mut results);
            Applied::Many(results)
        }
        Segment::Slice(start, end) => match node {
            Value::Array(items) => {
                let (from, to) = slice_bounds(items.len(), *start, *end);
                Applied::Built(Value::Array(items[from..to].to_vec()))
            }
            _ => Applied::One(None),
        },
        Segment::MultiProperty(props) => match node {
            Value::Object(fields) => {
                let projected: IndexMap<String, Value> = props
                    .iter()
                    .map(|p| (p.clone(), fields.get(p).cloned().unwrap_or_default()))
                    .collect();
                Applied::Built(Value::Object(projected))
            }
            _ => Applied::One(None),
        },
    }
}

fn member<'v>(node: &'v Value, name: &str) -> Option<&'v Value> {
    match node {
        Value::Object(fields) => fields.get(name),
        _ => None,
    }
}

fn element(node: &Value, idx: isize) -> Option<&Value> {
    let Value::Array(items) = node else {
        return None;
    };
    let len = items.len() as isize;
    let normalized = if idx < 0 { len + idx } else { idx };
    if normalized < 0 {
        return None;
    }
    items.get(normalized as usize)
}

fn children(node: &Value) -> Vec<&Value> {
    match node {
        Value::Array(items) => items.iter().collect(),
        Value::Object(fields) => fields.values().filter(|v| !v.is_undefined()).collect(),
        _ => Vec::new(),
    }
}

/// Collects descendants of `node` in pre-order: every member named `name`,
/// or every descendant when `name` is `None`.
fn descend<'v>(node: &'v Value, name: Option<&str>, results: &mut Vec<&'v Value>) {
    match node {
        Value::Object(fields) => {
            for (key, child) in fields {
                if child.is_undefined() {
                    continue;
                }
                if name.map_or(true, |n| n == key) {
                    results.push(child);
                }
                descend(child, name, results);
            }
        }
        Value::Array(items) => {
            for item in items {
                if name.is_none() {
                    results.push(item);
                }
                descend(item, name, results);
            }
        }
        _ => {}
    }
}

fn slice_bounds(len: usize, start: Option<isize>, end: Option<isize>) -> (usize, usize) {
    let len = len as isize;
    let clamp = |i: isize| -> usize {
        if i < 0 {
            (len + i).max(0) as usize
        } else {
            i.min(len) as usize
        }
    };
    let from = start.map_or(0, clamp);
    let to = end.map_or(len as usize, clamp);
    (from, to.max(from))
}

fn apply_builtin(builtin: Builtin, input: &Value) -> Result<Value, QueryError> {
    let mismatch = || QueryError::TypeMismatch {
        function: builtin.name(),
        kind: input.kind_name(),
    };
    match builtin {
        Builtin::Keys => match input {
            Value::Object(fields) => Ok(Value::Array(
                fields
                    .iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, _)| Value::String(k.clone()))
                    .collect(),
            )),
            Value::Array(items) => Ok(Value::Array(
                (0..items.len()).map(integer).collect(),
            )),
            _ => Err(mismatch()),
        },
        Builtin::Values => match input {
            Value::Object(fields) => Ok(Value::Array(
                fields
                    .values()
                    .filter(|v| !v.is_undefined())
                    .cloned()
                    .collect(),
            )),
            Value::Array(items) => Ok(Value::Array(items.clone())),
            _ => Err(mismatch()),
        },
        Builtin::Length => match input {
            Value::Array(_) | Value::Object(_) => Ok(integer(input.child_count())),
            Value::String(s) => Ok(integer(s.chars().count())),
            Value::Null => Ok(integer(0)),
            _ => Err(mismatch()),
        },
    }
}

fn integer(n: usize) -> Value {
    Value::Number(Number::Decimal(n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json_str;
    use crate::query::evaluate;

    fn store() -> Value {
        parse_json_str(
            r#"{
                "store": {
                    "book": [
                        {"title": "A", "price": 8.95},
                        {"title": "B", "price": 12.99, "isbn": "x-1"},
                        {"title": "C", "price": 8.99}
                    ],
                    "bicycle": {"color": "red", "price": 19.95}
                }
            }"#,
        )
        .unwrap()
    }

    fn json(s: &str) -> Value {
        parse_json_str(s).unwrap()
    }

    #[test]
    fn test_identity_returns_input() {
        let doc = store();
        assert_eq!(evaluate(&doc, ".").unwrap(), doc);
        assert_eq!(evaluate(&doc, "").unwrap(), doc);
    }

    #[test]
    fn test_member_and_index() {
        let doc = store();
        assert_eq!(
            evaluate(&doc, ".store.book[1].title").unwrap(),
            json(r#""B""#)
        );
        assert_eq!(
            evaluate(&doc, ".store.book[-1].price").unwrap(),
            json("8.99")
        );
    }

    #[test]
    fn test_missing_is_undefined() {
        let doc = store();
        assert_eq!(evaluate(&doc, ".nope").unwrap(), Value::Undefined);
        assert_eq!(evaluate(&doc, ".store.book[10]").unwrap(), Value::Undefined);
        assert_eq!(evaluate(&doc, ".store.book.title").unwrap(), Value::Undefined);
    }

    #[test]
    fn test_wildcard_keeps_holes() {
        let doc = store();
        let result = evaluate(&doc, ".store.book[].isbn").unwrap();
        assert_eq!(
            result,
            Value::Array(vec![
                Value::Undefined,
                Value::String("x-1".to_string()),
                Value::Undefined
            ])
        );
    }

    #[test]
    fn test_recursive_descent() {
        let doc = store();
        assert_eq!(
            evaluate(&doc, "..price").unwrap(),
            json("[8.95, 12.99, 8.99, 19.95]")
        );
        assert_eq!(evaluate(&json("[[1]]"), "..").unwrap(), json("[[1], 1]"));
    }

    #[test]
    fn test_slice() {
        let doc = json("[0, 1, 2, 3, 4]");
        assert_eq!(evaluate(&doc, "[1:3]").unwrap(), json("[1, 2]"));
        assert_eq!(evaluate(&doc, "[-2:]").unwrap(), json("[3, 4]"));
        assert_eq!(evaluate(&doc, "[:10]").unwrap(), doc);
    }

    #[test]
    fn test_multi_property() {
        let doc = store();
        let result = evaluate(&doc, ".store.bicycle['color', 'size']").unwrap();
        match result {
            Value::Object(fields) => {
                assert_eq!(fields["color"], json(r#""red""#));
                assert_eq!(fields["size"], Value::Undefined);
            }
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_builtins() {
        let doc = store();
        assert_eq!(
            evaluate(&doc, ".store.bicycle | keys").unwrap(),
            json(r#"["color", "price"]"#)
        );
        assert_eq!(evaluate(&doc, ".store.book | keys").unwrap(), json("[0, 1, 2]"));
        assert_eq!(
            evaluate(&doc, ".store.bicycle | values").unwrap(),
            json(r#"["red", 19.95]"#)
        );
        assert_eq!(evaluate(&doc, ".store.book | length").unwrap(), json("3"));
        assert_eq!(
            evaluate(&doc, ".store.bicycle.color | length").unwrap(),
            json("3")
        );
        assert_eq!(
            evaluate(&doc, ".store | keys | .[0]").unwrap(),
            json(r#""book""#)
        );
    }

    #[test]
    fn test_builtin_type_mismatch() {
        let doc = store();
        assert_eq!(
            evaluate(&doc, ".store.bicycle.price | keys").unwrap_err(),
            QueryError::TypeMismatch {
                function: "keys",
                kind: "number"
            }
        );
        assert!(evaluate(&doc, ".nope | length").is_err());
    }
}
