//! Path addressing for document nodes.
//!
//! A [`Path`] is the sequence of array indices and object keys leading from
//! the root to a node. The empty path is the root. Paths are values: they are
//! built by copy-on-extend through [`Path::child`] and never edited in place.
//!
//! Two serializations exist:
//!
//! - the human-readable form (`Display`): `.key` for keys and `[n]` for
//!   indices, empty for the root;
//! - the canonical set key ([`CanonicalKey`]): one tagged component per
//!   segment joined with NUL, used for expand-state membership.
//!
//! # Example
//!
//! ```
//! use peekjson::document::path::Path;
//!
//! let path = Path::root().key("users").index(3).key("name");
//! assert_eq!(path.to_string(), ".users[3].name");
//! assert_eq!(path.parent().unwrap().to_string(), ".users[3]");
//! assert!(Path::root().parent().is_none());
//! ```

use std::fmt;

/// Separator between canonical components. The parser refuses documents
/// whose keys contain it.
pub const CANONICAL_SEPARATOR: char = '\0';

const INDEX_TAG: char = '#';
const KEY_TAG: char = '.';

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathComponent {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Index(i) => write!(f, "[{}]", i),
            PathComponent::Key(k) => write!(f, ".{}", k),
        }
    }
}

/// Location of a node inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathComponent>);

/// Injective string encoding of a [`Path`] for set membership.
///
/// Components are tagged by kind so that index `0` and key `"0"` never
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Path {
    /// The empty path addressing the document root.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn from_components(components: Vec<PathComponent>) -> Self {
        Path(components)
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<&PathComponent> {
        self.0.last()
    }

    /// Returns a new path extended by `component`.
    pub fn child(&self, component: PathComponent) -> Path {
        let mut components = Vec::with_capacity(self.0.len() + 1);
        components.extend_from_slice(&self.0);
        components.push(component);
        Path(components)
    }

    pub fn key(&self, key: impl Into<String>) -> Path {
        self.child(PathComponent::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> Path {
        self.child(PathComponent::Index(index))
    }

    /// Returns the path with its last component removed, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        match self.0.split_last() {
            Some((_, rest)) => Some(Path(rest.to_vec())),
            None => None,
        }
    }

    /// Every proper prefix of this path, shortest first, starting at the root.
    pub fn ancestors(&self) -> Vec<Path> {
        (0..self.0.len()).map(|n| Path(self.0[..n].to_vec())).collect()
    }

    /// True when `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Human-readable form, identical to `Display`.
    pub fn to_human_readable(&self) -> String {
        self.to_string()
    }

    /// Form that can be typed back into the filter prompt.
    ///
    /// Keys that are not plain identifiers are written as `["..."]`; the root
    /// is `.`.
    pub fn to_filter_expression(&self) -> String {
        if self.is_root() {
            return ".".to_string();
        }
        let mut out = String::new();
        for component in &self.0 {
            match component {
                PathComponent::Index(i) => out.push_str(&format!("[{}]", i)),
                PathComponent::Key(k) if is_identifier(k) => {
                    out.push('.');
                    out.push_str(k);
                }
                PathComponent::Key(k) => {
                    out.push('[');
                    out.push_str(&quote(k));
                    out.push(']');
                }
            }
        }
        out
    }

    /// Canonical set key for this path.
    ///
    /// # Panics
    ///
    /// Panics if a key contains [`CANONICAL_SEPARATOR`]. Documents holding
    /// such keys are rejected when parsed, so reaching this is a bug.
    pub fn canonical_key(&self) -> CanonicalKey {
        let mut out = String::new();
        for (n, component) in self.0.iter().enumerate() {
            if n > 0 {
                out.push(CANONICAL_SEPARATOR);
            }
            match component {
                PathComponent::Index(i) => {
                    out.push(INDEX_TAG);
                    out.push_str(&i.to_string());
                }
                PathComponent::Key(k) => {
                    assert!(
                        !k.contains(CANONICAL_SEPARATOR),
                        "object key contains the canonical separator: {:?}",
                        k
                    );
                    out.push(KEY_TAG);
                    out.push_str(k);
                }
            }
        }
        CanonicalKey(out)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.0 {
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

/// Structural equality over optional paths. Two absent paths are equal.
pub fn equal(a: Option<&Path>, b: Option<&Path>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
