//! Expand state: the set of container paths rendered open.

use std::collections::HashSet;

use crate::document::path::{CanonicalKey, Path};

/// Set of open container paths, keyed by [`Path::canonical_key`].
///
/// The root is always a member. Removing it is refused and [`clear`]
/// leaves it in place.
///
/// [`clear`]: ExpandState::clear
///
/// # Example
///
/// ```
/// use peekjson::document::path::Path;
/// use peekjson::render::expand::ExpandState;
///
/// let mut state = ExpandState::new();
/// assert!(state.contains(&Path::root()));
///
/// let users = Path::root().key("users");
/// state.insert(&users);
/// assert!(state.contains(&users));
///
/// state.clear();
/// assert!(!state.contains(&users));
/// assert!(state.contains(&Path::root()));
/// ```
#[derive(Debug, Clone)]
pub struct ExpandState {
    open: HashSet<CanonicalKey>,
}

impl ExpandState {
    pub fn new() -> Self {
        let mut open = HashSet::new();
        open.insert(Path::root().canonical_key());
        Self { open }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.open.contains(&path.canonical_key())
    }

    /// Marks `path` open. Returns true if it was not open before.
    pub fn insert(&mut self, path: &Path) -> bool {
        self.open.insert(path.canonical_key())
    }

    /// Marks `path` closed. Returns true if it was open. The root stays open.
    pub fn remove(&mut self, path: &Path) -> bool {
        if path.is_root() {
            return false;
        }
        self.open.remove(&path.canonical_key())
    }

    /// Closes everything except the root.
    pub fn clear(&mut self) {
        self.open.clear();
        self.open.insert(Path::root().canonical_key());
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Always false: the root is a member.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl Default for ExpandState {
    fn default() -> Self {
        Self::new()
    }
}
