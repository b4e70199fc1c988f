use std::rc::Rc;

use peekjson::document::parser::parse_json_str;
use peekjson::document::path::Path;
use peekjson::render::expand::ExpandState;
use peekjson::render::{render, RenderOptions};
use peekjson::search::{parse_pattern, SearchError, SearchHandle};
use pretty_assertions::assert_eq;

#[test]
fn test_matches_come_in_document_order_then_stop() {
    let doc = Rc::new(parse_json_str(r#"{"foo": {"bar": 1}, "baz": "foobar"}"#).unwrap());
    let mut search = SearchHandle::create(doc, "/foo/").unwrap();

    assert_eq!(search.next(), Some(Path::root().key("foo")));
    assert_eq!(search.next(), Some(Path::root().key("baz")));
    assert_eq!(search.next(), None);
    assert_eq!(search.next(), None);
    assert!(search.is_exhausted());
}

#[test]
fn test_finds_matches_inside_collapsed_containers() {
    let doc = Rc::new(parse_json_str(r#"{"outer": {"inner": [{"deep": "needle"}]}}"#).unwrap());

    // Nothing below the root is open, yet the search still reaches the leaf.
    let expanded = ExpandState::new();
    let rendered = render(
        &doc,
        &RenderOptions {
            expanded: Some(&expanded),
            ..Default::default()
        },
    );
    assert_eq!(rendered.line_count(), 3);

    let matches: Vec<Path> = SearchHandle::create(Rc::clone(&doc), "needle")
        .unwrap()
        .collect();
    assert_eq!(
        matches,
        vec![Path::root().key("outer").key("inner").index(0).key("deep")]
    );
}

#[test]
fn test_restarting_gives_the_same_sequence() {
    let doc = Rc::new(
        parse_json_str(r#"[{"a": "x1"}, "x2", {"xkey": null}, [true, "x3"]]"#).unwrap(),
    );
    let first: Vec<Path> = SearchHandle::create(Rc::clone(&doc), "x").unwrap().collect();
    let second: Vec<Path> = SearchHandle::create(doc, "x").unwrap().collect();

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn test_key_match_and_value_match_both_reported() {
    let doc = Rc::new(parse_json_str(r#"{"name": "name"}"#).unwrap());
    let matches: Vec<Path> = SearchHandle::create(doc, "name").unwrap().collect();
    assert_eq!(matches, vec![Path::root().key("name"), Path::root().key("name")]);
}

#[test]
fn test_array_indices_are_not_searched() {
    let doc = Rc::new(parse_json_str(r#"["a", "b", "c"]"#).unwrap());
    let matches: Vec<Path> = SearchHandle::create(doc, "/1/").unwrap().collect();
    assert!(matches.is_empty());
}

#[test]
fn test_scalars_match_on_literal_text() {
    let doc = Rc::new(parse_json_str(r#"[1.50, null, false, "quoted"]"#).unwrap());
    let find = |pattern: &str| -> Vec<Path> {
        SearchHandle::create(Rc::clone(&doc), pattern)
            .unwrap()
            .collect()
    };

    assert_eq!(find("/1\\.50/"), vec![Path::root().index(0)]);
    assert_eq!(find("/^null$/"), vec![Path::root().index(1)]);
    assert_eq!(find("/false/"), vec![Path::root().index(2)]);
    assert!(find("/\"quoted/").is_empty());
}

#[test]
fn test_pattern_syntax() {
    assert!(parse_pattern("/Key/").unwrap().is_match("Key"));
    assert!(!parse_pattern("/Key/").unwrap().is_match("key"));
    assert!(parse_pattern("key").unwrap().is_match("KEY"));
    assert!(parse_pattern("/a.b/s").unwrap().is_match("a\nb"));
    assert!(parse_pattern("/x/gu").is_ok());

    assert_eq!(parse_pattern("").unwrap_err(), SearchError::Empty);
    assert!(parse_pattern("/api/v1").unwrap().is_match("GET /API/v1/users"));
    assert!(matches!(
        parse_pattern("/(/").unwrap_err(),
        SearchError::InvalidRegex(_)
    ));
}
