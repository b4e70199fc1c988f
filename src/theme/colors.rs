//! Color definitions for peekjson themes.
//!
//! [`ThemeColors`] holds every color the viewer draws with. Syntax colors
//! are turned into render styles by [`crate::render::RenderStyle`]; the rest
//! are used by the ruler, the prompt line and the help overlay.

use ratatui::style::Color;

/// All colors used by a peekjson theme.
///
/// # Examples
///
/// ```
/// use peekjson::theme::colors::ThemeColors;
/// use ratatui::style::Color;
///
/// let dark = ThemeColors::default_dark();
/// assert_eq!(dark.background, Color::Reset);
/// assert_ne!(dark.search_highlight, dark.search_current);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    // Syntax colors
    /// Object keys.
    pub key: Color,
    /// String values.
    pub string: Color,
    /// Number values.
    pub number: Color,
    /// `true` and `false`.
    pub boolean: Color,
    /// `null`.
    pub null: Color,
    /// The `…` marker inside collapsed containers.
    pub preview: Color,

    // UI colors
    pub background: Color,
    /// Text, brackets and punctuation.
    pub foreground: Color,
    /// Background of the row under the cursor.
    pub cursor: Color,
    pub status_line_bg: Color,
    pub status_line_fg: Color,

    // Semantic colors
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    /// Background of every search match.
    pub search_highlight: Color,
    /// Background of the match the cursor is on.
    pub search_current: Color,
    /// Text drawn over either search background.
    pub search_fg: Color,
}

impl ThemeColors {
    /// ANSI palette that follows the terminal's own color scheme.
    pub fn default_dark() -> Self {
        Self {
            key: Color::Blue,
            string: Color::Green,
            number: Color::Cyan,
            boolean: Color::Yellow,
            null: Color::DarkGray,
            preview: Color::DarkGray,

            background: Color::Reset,
            foreground: Color::Reset,
            cursor: Color::DarkGray,
            status_line_bg: Color::Gray,
            status_line_fg: Color::Black,

            error: Color::Red,
            warning: Color::Yellow,
            info: Color::LightBlue,
            search_highlight: Color::Yellow,
            search_current: Color::LightRed,
            search_fg: Color::Black,
        }
    }

    /// High-contrast palette for light terminal backgrounds.
    pub fn default_light() -> Self {
        Self {
            key: Color::Rgb(166, 38, 164),
            string: Color::Rgb(80, 161, 79),
            number: Color::Rgb(152, 104, 1),
            boolean: Color::Rgb(1, 132, 188),
            null: Color::Rgb(160, 161, 167),
            preview: Color::Rgb(160, 161, 167),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            cursor: Color::Rgb(229, 229, 230),
            status_line_bg: Color::Rgb(238, 238, 238),
            status_line_fg: Color::Rgb(56, 58, 66),

            error: Color::Rgb(202, 18, 67),
            warning: Color::Rgb(152, 104, 1),
            info: Color::Rgb(1, 132, 188),
            search_highlight: Color::Rgb(255, 229, 143),
            search_current: Color::Rgb(255, 160, 122),
            search_fg: Color::Rgb(56, 58, 66),
        }
    }

    /// Gruvbox dark (morhetz).
    pub fn gruvbox_dark() -> Self {
        Self {
            key: Color::Rgb(131, 165, 152),
            string: Color::Rgb(184, 187, 38),
            number: Color::Rgb(211, 134, 155),
            boolean: Color::Rgb(254, 128, 25),
            null: Color::Rgb(146, 131, 116),
            preview: Color::Rgb(146, 131, 116),

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            cursor: Color::Rgb(60, 56, 54),
            status_line_bg: Color::Rgb(80, 73, 69),
            status_line_fg: Color::Rgb(235, 219, 178),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(250, 189, 47),
            info: Color::Rgb(131, 165, 152),
            search_highlight: Color::Rgb(215, 153, 33),
            search_current: Color::Rgb(254, 128, 25),
            search_fg: Color::Rgb(40, 40, 40),
        }
    }

    /// Nord (Arctic Ice Studio).
    pub fn nord() -> Self {
        Self {
            key: Color::Rgb(136, 192, 208),
            string: Color::Rgb(163, 190, 140),
            number: Color::Rgb(180, 142, 173),
            boolean: Color::Rgb(129, 161, 193),
            null: Color::Rgb(76, 86, 106),
            preview: Color::Rgb(76, 86, 106),

            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            cursor: Color::Rgb(67, 76, 94),
            status_line_bg: Color::Rgb(59, 66, 82),
            status_line_fg: Color::Rgb(216, 222, 233),

            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
            info: Color::Rgb(136, 192, 208),
            search_highlight: Color::Rgb(235, 203, 139),
            search_current: Color::Rgb(208, 135, 112),
            search_fg: Color::Rgb(46, 52, 64),
        }
    }

    /// Dracula (Zeno Rocha).
    pub fn dracula() -> Self {
        Self {
            key: Color::Rgb(139, 233, 253),
            string: Color::Rgb(241, 250, 140),
            number: Color::Rgb(189, 147, 249),
            boolean: Color::Rgb(255, 121, 198),
            null: Color::Rgb(98, 114, 164),
            preview: Color::Rgb(98, 114, 164),

            background: Color::Rgb(40, 42, 54),
            foreground: Color::Rgb(248, 248, 242),
            cursor: Color::Rgb(68, 71, 90),
            status_line_bg: Color::Rgb(68, 71, 90),
            status_line_fg: Color::Rgb(248, 248, 242),

            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(255, 184, 108),
            info: Color::Rgb(139, 233, 253),
            search_highlight: Color::Rgb(241, 250, 140),
            search_current: Color::Rgb(255, 121, 198),
            search_fg: Color::Rgb(40, 42, 54),
        }
    }

    /// Monokai.
    pub fn monokai() -> Self {
        Self {
            key: Color::Rgb(102, 217, 239),
            string: Color::Rgb(230, 219, 116),
            number: Color::Rgb(174, 129, 255),
            boolean: Color::Rgb(253, 151, 31),
            null: Color::Rgb(117, 113, 94),
            preview: Color::Rgb(117, 113, 94),

            background: Color::Rgb(39, 40, 34),
            foreground: Color::Rgb(248, 248, 240),
            cursor: Color::Rgb(73, 72, 62),
            status_line_bg: Color::Rgb(73, 72, 62),
            status_line_fg: Color::Rgb(248, 248, 240),

            error: Color::Rgb(249, 38, 114),
            warning: Color::Rgb(253, 151, 31),
            info: Color::Rgb(102, 217, 239),
            search_highlight: Color::Rgb(230, 219, 116),
            search_current: Color::Rgb(249, 38, 114),
            search_fg: Color::Rgb(39, 40, 34),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::default_dark()
    }
}
