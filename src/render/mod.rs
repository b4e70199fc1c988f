//! Document rendering and row indexing.
//!
//! [`render`] walks a document in pre-order and produces one styled
//! [`Line`] per output row together with a [`RowIndex`] that maps the row on
//! which each node opens back to that node's [`Path`]. Closing-bracket rows
//! have no index entry.
//!
//! A container whose path is absent from the [`ExpandState`] renders as
//! `[…]` or `{…}` on a single row and its children are never visited, so the
//! cost of rendering does not depend on the size of collapsed subtrees.
//!
//! # Example
//!
//! ```
//! use peekjson::document::parser::parse_json_str;
//! use peekjson::document::path::Path;
//! use peekjson::render::{render, RenderOptions};
//! use peekjson::render::expand::ExpandState;
//!
//! let doc = parse_json_str(r#"[1, {"x": "hi"}, 3]"#).unwrap();
//! let expanded = ExpandState::new();
//! let rendered = render(&doc, &RenderOptions { expanded: Some(&expanded), ..Default::default() });
//!
//! assert_eq!(rendered.text(), "[\n  1,\n  {…},\n  3\n]");
//! assert_eq!(rendered.index.path_at(2), Some(&Path::root().index(1)));
//! assert_eq!(rendered.index.path_at(4), None);
//! ```

pub mod expand;
pub mod highlight;

use std::collections::{BTreeMap, HashMap};

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;

use crate::document::path::{Path, PathComponent};
use crate::document::value::Value;
use crate::theme::colors::ThemeColors;

use expand::ExpandState;
use highlight::{escape_json, highlight, verbatim, MatchStyles};

/// Marker shown inside a collapsed container.
pub const ELLIPSIS: &str = "\u{2026}";

/// Styles for every token kind the renderer emits.
///
/// The default is unstyled, which is what non-interactive printing uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStyle {
    pub key: Style,
    pub string: Style,
    pub number: Style,
    pub boolean: Style,
    pub null: Style,
    pub bracket: Style,
    pub punctuation: Style,
    pub ellipsis: Style,
    pub matches: MatchStyles,
}

impl From<&ThemeColors> for RenderStyle {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            key: Style::default().fg(colors.key),
            string: Style::default().fg(colors.string),
            number: Style::default().fg(colors.number),
            boolean: Style::default().fg(colors.boolean),
            null: Style::default().fg(colors.null),
            bracket: Style::default().fg(colors.foreground),
            punctuation: Style::default().fg(colors.foreground),
            ellipsis: Style::default().fg(colors.preview),
            matches: MatchStyles {
                matched: Style::default()
                    .fg(colors.search_fg)
                    .bg(colors.search_highlight),
                current: Style::default()
                    .fg(colors.search_fg)
                    .bg(colors.search_current)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }
}

/// Inputs to a render besides the document itself.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Open containers; `None` renders everything expanded.
    pub expanded: Option<&'a ExpandState>,
    /// Pattern to highlight in keys and scalar values.
    pub highlight: Option<&'a Regex>,
    /// Path whose matches get the current-match style.
    pub current_match: Option<&'a Path>,
    pub style: RenderStyle,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            expanded: None,
            highlight: None,
            current_match: None,
            style: RenderStyle::default(),
            indent: 2,
        }
    }
}

/// Mapping from output row to the path of the node opening on that row,
/// and back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowIndex {
    rows: BTreeMap<usize, Path>,
    by_path: HashMap<Path, usize>,
}

impl RowIndex {
    fn insert(&mut self, row: usize, path: &Path) {
        self.rows.insert(row, path.clone());
        self.by_path.insert(path.clone(), row);
    }

    pub fn path_at(&self, row: usize) -> Option<&Path> {
        self.rows.get(&row)
    }

    /// Row on which `path` opens, if it was emitted.
    pub fn row_of(&self, path: &Path) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    /// First indexed row strictly after `row`.
    pub fn next_row(&self, row: usize) -> Option<usize> {
        self.rows.range(row + 1..).next().map(|(r, _)| *r)
    }

    /// Last indexed row strictly before `row`.
    pub fn prev_row(&self, row: usize) -> Option<usize> {
        self.rows.range(..row).next_back().map(|(r, _)| *r)
    }

    /// Nearest indexed row at or before `row`, falling back to the first.
    pub fn at_or_before(&self, row: usize) -> Option<usize> {
        self.rows
            .range(..=row)
            .next_back()
            .or_else(|| self.rows.iter().next())
            .map(|(r, _)| *r)
    }

    pub fn first_row(&self) -> Option<usize> {
        self.rows.keys().next().copied()
    }

    pub fn last_row(&self) -> Option<usize> {
        self.rows.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.rows.iter().map(|(r, p)| (*r, p))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub lines: Vec<Line<'static>>,
    pub index: RowIndex,
}

impl Rendered {
    /// Plain text of the rendering, rows joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Concatenated content of a line's spans.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Renders `document` into lines and a row index.
pub fn render(document: &Value, options: &RenderOptions<'_>) -> Rendered {
    if document.is_undefined() {
        return Rendered::default();
    }
    let mut writer = Writer::new(options);
    writer.start_line(0);
    writer.node(document, &Path::root(), 0);
    writer.finish()
}

struct Writer<'o, 'a> {
    options: &'o RenderOptions<'a>,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    index: RowIndex,
    row: usize,
}

impl<'o, 'a> Writer<'o, 'a> {
    fn new(options: &'o RenderOptions<'a>) -> Self {
        Self {
            options,
            lines: Vec::new(),
            current: Vec::new(),
            index: RowIndex::default(),
            row: 0,
        }
    }

    fn finish(mut self) -> Rendered {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        Rendered {
            lines: self.lines,
            index: self.index,
        }
    }

    fn start_line(&mut self, depth: usize) {
        let width = depth * self.options.indent;
        if width > 0 {
            self.current.push(Span::raw(" ".repeat(width)));
        }
    }

    fn end_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        self.row += 1;
    }

    fn push(&mut self, text: &str, style: Style) {
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn is_current(&self, path: &Path) -> bool {
        self.options.current_match == Some(path)
    }

    fn is_collapsed(&self, path: &Path) -> bool {
        self.options
            .expanded
            .is_some_and(|expanded| !expanded.contains(path))
    }

    fn literal(&mut self, text: &str, style: Style, path: &Path) {
        let spans = highlight(
            text,
            self.options.highlight,
            style,
            &self.options.style.matches,
            self.is_current(path),
            verbatim,
        );
        self.current.extend(spans);
    }

    fn quoted(&mut self, text: &str, style: Style, path: &Path) {
        let spans = highlight(
            text,
            self.options.highlight,
            style,
            &self.options.style.matches,
            self.is_current(path),
            escape_json,
        );
        self.push("\"", style);
        self.current.extend(spans);
        self.push("\"", style);
    }

    fn node(&mut self, value: &Value, path: &Path, depth: usize) {
        self.index.insert(self.row, path);
        let style = self.options.style;

        match value {
            Value::Undefined | Value::Null => self.literal("null", style.null, path),
            Value::Bool(b) => self.literal(if *b { "true" } else { "false" }, style.boolean, path),
            Value::Number(n) => self.literal(&n.literal(), style.number, path),
            Value::String(s) => self.quoted(s, style.string, path),
            Value::Array(items) => {
                let children: Vec<(PathComponent, &Value)> = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (PathComponent::Index(i), v))
                    .collect();
                self.container(children, path, depth, ("[", "]"));
            }
            Value::Object(fields) => {
                let children: Vec<(PathComponent, &Value)> = fields
                    .iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (PathComponent::Key(k.clone()), v))
                    .collect();
                self.container(children, path, depth, ("{", "}"));
            }
        }
    }

    fn container(
        &mut self,
        children: Vec<(PathComponent, &Value)>,
        path: &Path,
        depth: usize,
        (open, close): (&str, &str),
    ) {
        let style = self.options.style;
        self.push(open, style.bracket);

        if children.is_empty() {
            self.push(close, style.bracket);
            return;
        }
        if self.is_collapsed(path) {
            self.push(ELLIPSIS, style.ellipsis);
            self.push(close, style.bracket);
            return;
        }

        self.end_line();
        let last = children.len() - 1;
        for (n, (component, child)) in children.into_iter().enumerate() {
            let child_path = path.child(component);
            self.start_line(depth + 1);
            if let Some(PathComponent::Key(key)) = child_path.last() {
                let key = key.clone();
                self.quoted(&key, style.key, &child_path);
                self.push(": ", style.punctuation);
            }
            self.node(child, &child_path, depth + 1);
            if n < last {
                self.push(",", style.punctuation);
            }
            self.end_line();
        }
        self.start_line(depth);
        self.push(close, style.bracket);
    }
}
