//! Viewer modes.
//!
//! The viewer is modal: keys move the cursor in `Normal` mode, edit the
//! prompt line in `Filter` and `Search` mode, and scroll the key reference in
//! `Help` mode.
//!
//! ```
//! use peekjson::viewer::mode::Mode;
//!
//! assert_eq!(Mode::default(), Mode::Normal);
//! assert_eq!(Mode::Filter.to_string(), "FILTER");
//! assert!(Mode::Search.is_prompt());
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Cursor movement, expand and collapse.
    #[default]
    Normal,
    /// Editing the filter expression; the view follows as it is typed.
    Filter,
    /// Editing a search pattern.
    Search,
    /// Key reference overlay.
    Help,
}

impl Mode {
    /// Whether the bottom line is an editable prompt in this mode.
    pub fn is_prompt(&self) -> bool {
        matches!(self, Mode::Filter | Mode::Search)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "NORMAL"),
            Mode::Filter => write!(f, "FILTER"),
            Mode::Search => write!(f, "SEARCH"),
            Mode::Help => write!(f, "HELP"),
        }
    }
}
