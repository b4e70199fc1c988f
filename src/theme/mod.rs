//! Theme system for peekjson.
//!
//! Themes are fixed palettes compiled into the binary and selected by name
//! from the config file or the `--theme` flag.
//!
//! # Built-in Themes
//!
//! - `"default-dark"`: ANSI colors, follows the terminal palette
//! - `"default-light"`: for light terminal backgrounds
//! - `"gruvbox-dark"`
//! - `"nord"`
//! - `"dracula"`
//! - `"monokai"`
//!
//! # Examples
//!
//! ```
//! use peekjson::theme::get_builtin_theme;
//!
//! let theme = get_builtin_theme("nord").unwrap();
//! assert_eq!(theme.name, "nord");
//! assert!(get_builtin_theme("nonexistent").is_none());
//! ```

pub mod colors;

use colors::ThemeColors;

/// Built-in theme names, sorted.
pub const BUILTIN_THEMES: &[&str] = &[
    "default-dark",
    "default-light",
    "dracula",
    "gruvbox-dark",
    "monokai",
    "nord",
];

/// A named color theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Returns a built-in theme by name, or `None` if the name is unknown.
pub fn get_builtin_theme(name: &str) -> Option<Theme> {
    let colors = match name {
        "default-dark" => ThemeColors::default_dark(),
        "default-light" => ThemeColors::default_light(),
        "gruvbox-dark" => ThemeColors::gruvbox_dark(),
        "nord" => ThemeColors::nord(),
        "dracula" => ThemeColors::dracula(),
        "monokai" => ThemeColors::monokai(),
        _ => return None,
    };
    Some(Theme {
        name: name.to_string(),
        colors,
    })
}

/// Returns the names accepted by [`get_builtin_theme`].
pub fn list_builtin_themes() -> Vec<String> {
    BUILTIN_THEMES.iter().map(|s| s.to_string()).collect()
}
