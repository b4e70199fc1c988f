//! Pattern search across keys and values.
//!
//! A [`SearchHandle`] walks the whole document in render order and yields the
//! path of every match, one per call to [`Iterator::next`]. The walk ignores
//! expand state, so matches inside collapsed subtrees are found too.
//!
//! - Object keys are tested before their value is visited; a key match yields
//!   the member's path.
//! - Array indices are never tested.
//! - Scalars are tested on their literal text (strings unquoted).
//!
//! Traversal state lives in an explicit stack held by the handle, so a search
//! can be suspended between keypresses and resumed without re-deriving the
//! position. Once exhausted a handle stays exhausted.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use peekjson::document::parser::parse_json_str;
//! use peekjson::document::path::Path;
//! use peekjson::search::SearchHandle;
//!
//! let doc = Rc::new(parse_json_str(r#"{"foo": {"bar": 1}, "baz": "foobar"}"#).unwrap());
//! let mut search = SearchHandle::create(doc, "/foo/").unwrap();
//!
//! assert_eq!(search.next(), Some(Path::root().key("foo")));
//! assert_eq!(search.next(), Some(Path::root().key("baz")));
//! assert_eq!(search.next(), None);
//! ```

pub mod pattern;

use std::rc::Rc;

use regex::Regex;

use crate::document::path::{Path, PathComponent};
use crate::document::value::Value;

pub use pattern::{parse_pattern, SearchError};

/// One container being walked: its path and the position of the next child.
#[derive(Debug)]
struct Frame {
    path: Path,
    children: Vec<PathComponent>,
    next: usize,
}

/// Resumable search over a document.
#[derive(Debug)]
pub struct SearchHandle {
    document: Rc<Value>,
    pattern: Regex,
    stack: Vec<Frame>,
    /// Node to visit before popping more children off the stack.
    pending: Option<Path>,
}

impl SearchHandle {
    /// Starts a search for an already compiled pattern.
    pub fn new(document: Rc<Value>, pattern: Regex) -> Self {
        Self {
            document,
            pattern,
            stack: Vec::new(),
            pending: Some(Path::root()),
        }
    }

    /// Compiles `input` with [`parse_pattern`] and starts a search.
    pub fn create(document: Rc<Value>, input: &str) -> Result<Self, SearchError> {
        Ok(Self::new(document, parse_pattern(input)?))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_none() && self.stack.is_empty()
    }

    /// Visits the node at `path`. Returns true if a scalar at `path` matched.
    fn visit(&mut self, path: Path) -> bool {
        let document = Rc::clone(&self.document);
        let Some(node) = document.get(&path) else {
            return false;
        };
        if node.is_container() {
            self.stack.push(Frame {
                children: node.child_components(),
                path,
                next: 0,
            });
            return false;
        }
        match node.scalar_text() {
            Some(text) => self.pattern.is_match(&text),
            None => false,
        }
    }
}

impl Iterator for SearchHandle {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if let Some(path) = self.pending.take() {
                if self.visit(path.clone()) {
                    return Some(path);
                }
                continue;
            }

            let frame = self.stack.last_mut()?;
            if frame.next >= frame.children.len() {
                self.stack.pop();
                continue;
            }
            let component = frame.children[frame.next].clone();
            frame.next += 1;
            let child = frame.path.child(component);

            self.pending = Some(child.clone());
            if let Some(PathComponent::Key(key)) = child.last() {
                if self.pattern.is_match(key) {
                    return Some(child);
                }
            }
        }
    }
}

impl std::iter::FusedIterator for SearchHandle {}
