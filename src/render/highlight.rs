//! Pattern highlighting for rendered tokens.
//!
//! Matching always runs on the raw text of a key or value. For strings the
//! escaping and quoting happen after the text has been split into matched and
//! unmatched segments, so a match can never straddle a quote or an escape.

use ratatui::style::Style;
use ratatui::text::Span;
use regex::Regex;

/// Styles applied to pattern matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchStyles {
    pub matched: Style,
    pub current: Style,
}

/// Splits `text` into spans, styling every non-empty match of `pattern`.
///
/// `is_current` selects [`MatchStyles::current`] over [`MatchStyles::matched`].
/// Each segment is passed through `transform` before it becomes a span.
/// With no pattern the result is a single span in `base`.
pub fn highlight(
    text: &str,
    pattern: Option<&Regex>,
    base: Style,
    styles: &MatchStyles,
    is_current: bool,
    transform: fn(&str) -> String,
) -> Vec<Span<'static>> {
    let Some(pattern) = pattern else {
        return vec![Span::styled(transform(text), base)];
    };

    let mark = if is_current {
        styles.current
    } else {
        styles.matched
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        if m.start() > last {
            spans.push(Span::styled(transform(&text[last..m.start()]), base));
        }
        spans.push(Span::styled(transform(m.as_str()), mark));
        last = m.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(Span::styled(transform(&text[last..]), base));
    }
    spans
}

/// Identity transform for literal tokens.
pub fn verbatim(s: &str) -> String {
    s.to_string()
}

/// JSON string escaping without the surrounding quotes.
pub fn escape_json(s: &str) -> String {
    match serde_json::to_string(s) {
        Ok(quoted) => quoted[1..quoted.len() - 1].to_string(),
        Err(_) => s.to_string(),
    }
}
