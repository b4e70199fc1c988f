//! Configuration for peekjson.
//!
//! Settings are read from `~/.config/peekjson/config.toml`. Every field has a
//! default, so the file may set any subset of them, and a missing or broken
//! file leaves the viewer on its defaults.
//!
//! # Example
//!
//! ```
//! use peekjson::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.expand_limit, 1000);
//!
//! let custom: Config = toml::from_str("indent_size = 4\nshow_ruler = false").unwrap();
//! assert_eq!(custom.indent_size, 4);
//! assert!(!custom.show_ruler);
//! assert_eq!(custom.theme, "default-dark");
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the peekjson viewer.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `indent_size` - Spaces per nesting level (default: 2)
/// * `show_ruler` - Show the path and position ruler (default: true)
/// * `enable_mouse` - Mouse wheel scrolling and click to toggle (default: true)
/// * `expand_limit` - Cap on containers opened by a bulk expand (default: 1000)
/// * `live_update_threshold` - Rendered row count at or above which the filter
///   is only applied on Enter (default: 10000)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    #[serde(default = "default_true")]
    pub show_ruler: bool,

    #[serde(default = "default_true")]
    pub enable_mouse: bool,

    #[serde(default = "default_expand_limit")]
    pub expand_limit: usize,

    #[serde(default = "default_live_update_threshold")]
    pub live_update_threshold: usize,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_indent_size() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_expand_limit() -> usize {
    1000
}

fn default_live_update_threshold() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            indent_size: default_indent_size(),
            show_ruler: true,
            enable_mouse: true,
            expand_limit: default_expand_limit(),
            live_update_threshold: default_live_update_threshold(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/peekjson/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("peekjson");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be parsed; parse failures are logged.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Self::default();
        };
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => {
                tracing::debug!(path = %config_path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Clamps values that would make the viewer unusable.
    fn normalized(mut self) -> Self {
        self.indent_size = self.indent_size.min(16);
        self.expand_limit = self.expand_limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps() {
        let config = Config {
            indent_size: 100,
            expand_limit: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.indent_size, 16);
        assert_eq!(config.expand_limit, 1);
    }
}
