//! Viewer state and navigation.
//!
//! [`Viewer`] owns everything the interactive view needs between keypresses:
//! the loaded document and the current (possibly filtered) one, the expand
//! state, the cursor path, the scroll position, the active search and the
//! prompt line. Every transition that changes what is drawn re-renders the
//! document and re-resolves the cursor against the fresh row index: when the
//! cursor's path is no longer emitted, the nearest emitted ancestor takes its
//! place, and failing that the first row.
//!
//! # Example
//!
//! ```
//! use peekjson::config::Config;
//! use peekjson::document::parser::parse_json_str;
//! use peekjson::document::path::Path;
//! use peekjson::render::RenderStyle;
//! use peekjson::viewer::Viewer;
//!
//! let doc = parse_json_str(r#"{"a": {"b": 1}, "c": 2}"#).unwrap();
//! let mut viewer = Viewer::new(doc, &Config::default(), RenderStyle::default());
//! assert_eq!(viewer.rendered().text(), "{\n  \"a\": {…},\n  \"c\": 2\n}");
//!
//! viewer.move_cursor_down();
//! viewer.expand_at_cursor();
//! assert_eq!(viewer.cursor(), &Path::root().key("a"));
//! assert_eq!(viewer.rendered().line_count(), 6);
//! ```

use std::rc::Rc;

use anyhow::{bail, Result};
use arboard::Clipboard;
use regex::Regex;

use super::mode::Mode;
use crate::config::Config;
use crate::document::path::Path;
use crate::document::value::Value;
use crate::query;
use crate::render::expand::ExpandState;
use crate::render::{render, RenderOptions, RenderStyle, Rendered};
use crate::search::{parse_pattern, SearchHandle};

/// Represents a message to display to the user.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

pub struct Viewer {
    source: Rc<Value>,
    document: Rc<Value>,
    filename: Option<String>,

    expanded: ExpandState,
    cursor: Path,
    scroll_offset: usize,
    viewport_height: usize,
    rendered: Rendered,

    search: Option<SearchHandle>,
    highlight: Option<Regex>,
    current_match: Option<Path>,

    /// Expression that produced `document`.
    filter: String,
    /// Filter text and document to return to when the filter prompt is cancelled.
    filter_origin: Option<(String, Rc<Value>)>,

    mode: Mode,
    prompt: String,
    message: Option<Message>,
    help_scroll: usize,
    pending_print: Option<String>,

    completion_candidates: Vec<String>,
    completion_index: usize,
    completion_prefix: String,

    style: RenderStyle,
    indent: usize,
    expand_limit: usize,
    live_update_threshold: usize,
    show_ruler: bool,
    enable_mouse: bool,
}

impl Viewer {
    /// Creates a viewer with only the root open and the cursor on the first row.
    pub fn new(document: Value, config: &Config, style: RenderStyle) -> Self {
        let source = Rc::new(document);
        let mut viewer = Self {
            document: Rc::clone(&source),
            source,
            filename: None,
            expanded: ExpandState::new(),
            cursor: Path::root(),
            scroll_offset: 0,
            viewport_height: 0,
            rendered: Rendered::default(),
            search: None,
            highlight: None,
            current_match: None,
            filter: String::new(),
            filter_origin: None,
            mode: Mode::Normal,
            prompt: String::new(),
            message: None,
            help_scroll: 0,
            pending_print: None,
            completion_candidates: Vec::new(),
            completion_index: 0,
            completion_prefix: String::new(),
            style,
            indent: config.indent_size,
            expand_limit: config.expand_limit,
            live_update_threshold: config.live_update_threshold,
            show_ruler: config.show_ruler,
            enable_mouse: config.enable_mouse,
        };
        viewer.rerender();
        viewer
    }

    pub fn source(&self) -> &Value {
        &self.source
    }

    /// The document on screen: the source, or the result of the filter.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: String) {
        self.filename = Some(filename);
    }

    pub fn expanded(&self) -> &ExpandState {
        &self.expanded
    }

    pub fn cursor(&self) -> &Path {
        &self.cursor
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn current_match(&self) -> Option<&Path> {
        self.current_match.as_ref()
    }

    /// The active search pattern, if any.
    pub fn highlight(&self) -> Option<&Regex> {
        self.highlight.as_ref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn show_ruler(&self) -> bool {
        self.show_ruler
    }

    pub fn enable_mouse(&self) -> bool {
        self.enable_mouse
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Renders the current document and re-resolves the cursor.
    fn rerender(&mut self) {
        let options = RenderOptions {
            expanded: Some(&self.expanded),
            highlight: self.highlight.as_ref(),
            current_match: self.current_match.as_ref(),
            style: self.style,
            indent: self.indent,
        };
        self.rendered = render(&self.document, &options);
        self.resolve_cursor();
    }

    fn resolve_cursor(&mut self) {
        let index = &self.rendered.index;
        if index.row_of(&self.cursor).is_some() {
            return;
        }
        let mut candidate = self.cursor.parent();
        while let Some(path) = candidate {
            if index.row_of(&path).is_some() {
                self.cursor = path;
                return;
            }
            candidate = path.parent();
        }
        self.cursor = index
            .first_row()
            .and_then(|row| index.path_at(row))
            .cloned()
            .unwrap_or_else(Path::root);
    }

    fn is_container(&self, path: &Path) -> bool {
        self.document.get(path).is_some_and(Value::is_container)
    }

    // Expand state

    pub fn expand(&mut self, path: &Path) {
        if self.is_container(path) && self.expanded.insert(path) {
            self.rerender();
        }
    }

    /// Closes `path` if it is open. Otherwise closes its parent and moves the
    /// cursor there, so repeated collapses walk up the tree.
    pub fn collapse(&mut self, path: &Path) {
        if !self.expanded.remove(path) {
            if let Some(parent) = path.parent() {
                if self.expanded.contains(&parent) {
                    self.expanded.remove(&parent);
                    self.cursor = parent;
                }
            }
        }
        self.rerender();
    }

    pub fn toggle(&mut self, path: &Path) {
        if !self.is_container(path) {
            return;
        }
        if !self.expanded.remove(path) {
            self.expanded.insert(path);
        }
        self.rerender();
    }

    /// Opens containers in pre-order until `limit` are open.
    pub fn expand_all(&mut self, limit: usize) {
        self.expanded.clear();
        let mut paths = self
            .document
            .container_paths(&Path::root(), limit.saturating_add(1));
        let truncated = paths.len() > limit;
        paths.truncate(limit);
        for path in &paths {
            self.expanded.insert(path);
        }
        tracing::debug!(opened = paths.len(), truncated, "expand all");
        if truncated {
            self.warn_expand_limit(limit);
        }
        self.rerender();
    }

    fn warn_expand_limit(&mut self, limit: usize) {
        self.set_message(
            format!("Expanded the first {} containers", limit),
            MessageLevel::Warning,
        );
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.rerender();
    }

    /// Opens `path` and the containers below it in pre-order. The expand
    /// state as a whole never grows past `limit` entries.
    pub fn expand_subtree(&mut self, path: &Path, limit: usize) {
        let before = self.expanded.len();
        // Enough candidates to fill the budget, skip the already open ones
        // and still see whether anything was left out.
        let cap = limit.saturating_add(before).saturating_add(1);
        let candidates = self.document.container_paths(path, cap);
        if candidates.is_empty() {
            return;
        }

        let mut truncated = false;
        for candidate in &candidates {
            if self.expanded.contains(candidate) {
                continue;
            }
            if self.expanded.len() >= limit {
                truncated = true;
                break;
            }
            self.expanded.insert(candidate);
        }
        tracing::debug!(
            path = %path,
            opened = self.expanded.len() - before,
            truncated,
            "expand subtree"
        );
        if truncated {
            self.warn_expand_limit(limit);
        }
        self.rerender();
    }

    pub fn expand_at_cursor(&mut self) {
        let path = self.cursor.clone();
        self.expand(&path);
    }

    pub fn collapse_at_cursor(&mut self) {
        let path = self.cursor.clone();
        self.collapse(&path);
    }

    pub fn toggle_at_cursor(&mut self) {
        let path = self.cursor.clone();
        self.toggle(&path);
    }

    pub fn expand_subtree_at_cursor(&mut self) {
        let path = self.cursor.clone();
        self.expand_subtree(&path, self.expand_limit);
    }

    pub fn expand_all_default(&mut self) {
        self.expand_all(self.expand_limit);
    }

    // Search

    /// Compiles `input` and starts a search over the current document.
    ///
    /// An empty input clears the search. A malformed pattern is reported and
    /// the previous search, if any, stays active.
    pub fn apply_pattern(&mut self, input: &str) {
        if input.is_empty() {
            self.search = None;
            self.highlight = None;
            self.current_match = None;
            self.rerender();
            return;
        }

        let pattern = match parse_pattern(input) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::debug!(input, error = %err, "rejected search pattern");
                self.set_message(err.to_string(), MessageLevel::Error);
                return;
            }
        };

        tracing::debug!(pattern = %pattern, "starting search");
        self.highlight = Some(pattern.clone());
        self.search = Some(SearchHandle::new(Rc::clone(&self.document), pattern));
        self.current_match = None;
        self.rerender();
        self.advance_search();
    }

    /// Moves to the next match, opening every container above it.
    pub fn advance_search(&mut self) {
        let Some(search) = self.search.as_mut() else {
            self.set_message("No previous search pattern".to_string(), MessageLevel::Warning);
            return;
        };
        let Some(path) = search.next() else {
            self.set_message("Pattern not found".to_string(), MessageLevel::Warning);
            return;
        };

        for ancestor in path.ancestors() {
            self.expanded.insert(&ancestor);
        }
        tracing::trace!(path = %path, "search match");
        self.cursor = path.clone();
        self.current_match = Some(path);
        self.clear_message();
        self.rerender();
        self.scroll_offset = self.cursor_row().saturating_sub(1).min(self.max_scroll());
    }

    // Filter

    fn evaluate_filter(&self, code: &str) -> Result<Rc<Value>> {
        if code.trim().is_empty() {
            return Ok(Rc::clone(&self.source));
        }
        match query::evaluate(&self.source, code)? {
            Value::Undefined => bail!("Filter selects nothing"),
            value => Ok(Rc::new(value)),
        }
    }

    fn show_document(&mut self, code: &str, document: Rc<Value>) {
        self.filter = code.to_string();
        if Rc::ptr_eq(&document, &self.document) || *document == *self.document {
            return;
        }
        self.document = document;
        self.current_match = None;
        if let Some(pattern) = self.highlight.clone() {
            self.search = Some(SearchHandle::new(Rc::clone(&self.document), pattern));
        }
        self.rerender();
    }

    /// Live filter update while typing. Failures leave the view unchanged,
    /// and large views are not re-evaluated until the filter is submitted.
    pub fn update_filter(&mut self, code: &str) {
        if self.rendered.line_count() >= self.live_update_threshold {
            tracing::trace!(rows = self.rendered.line_count(), "skipping live filter update");
            return;
        }
        if let Ok(document) = self.evaluate_filter(code) {
            self.show_document(code, document);
        }
    }

    /// Evaluates `code` against the loaded document and shows the result.
    /// Returns false, with an error message set, when evaluation fails.
    pub fn apply_filter(&mut self, code: &str) -> bool {
        match self.evaluate_filter(code) {
            Ok(document) => {
                tracing::debug!(filter = code, "applied filter");
                self.show_document(code, document);
                true
            }
            Err(err) => {
                tracing::debug!(filter = code, error = %err, "filter failed");
                self.set_message(err.to_string(), MessageLevel::Error);
                false
            }
        }
    }

    // Prompt line

    pub fn start_filter(&mut self) {
        self.filter_origin = Some((self.filter.clone(), Rc::clone(&self.document)));
        self.prompt = self.filter.clone();
        self.reset_completion();
        self.clear_message();
        self.mode = Mode::Filter;
    }

    pub fn start_search(&mut self) {
        self.prompt.clear();
        self.clear_message();
        self.mode = Mode::Search;
    }

    pub fn push_prompt_char(&mut self, ch: char) {
        self.prompt.push(ch);
        self.prompt_changed();
    }

    pub fn pop_prompt_char(&mut self) {
        self.prompt.pop();
        self.prompt_changed();
    }

    pub fn clear_prompt(&mut self) {
        self.prompt.clear();
        self.prompt_changed();
    }

    /// Ctrl-w: drops the trailing `.key` or `[...]` segment of the prompt.
    pub fn delete_prompt_segment(&mut self) {
        let cut = self.prompt.rfind(|c| c == '.' || c == '[').unwrap_or(0);
        self.prompt.truncate(cut);
        self.prompt_changed();
    }

    fn prompt_changed(&mut self) {
        self.reset_completion();
        if self.mode == Mode::Filter {
            let code = self.prompt.clone();
            self.update_filter(&code);
        }
    }

    /// Enter on the prompt line.
    pub fn submit_prompt(&mut self) {
        let input = std::mem::take(&mut self.prompt);
        let mode = std::mem::replace(&mut self.mode, Mode::Normal);
        self.reset_completion();
        match mode {
            Mode::Filter if input.starts_with('/') => {
                // A regex typed into the filter prompt searches the unfiltered document.
                self.filter_origin = None;
                if self.apply_filter("") {
                    self.apply_pattern(&input);
                }
            }
            Mode::Filter => {
                self.filter_origin = None;
                self.apply_filter(&input);
            }
            Mode::Search => self.apply_pattern(&input),
            Mode::Normal | Mode::Help => {}
        }
    }

    /// Esc on the prompt line. A cancelled filter puts back the view it started from.
    pub fn cancel_prompt(&mut self) {
        if self.mode == Mode::Filter {
            if let Some((code, document)) = self.filter_origin.take() {
                self.show_document(&code, document);
            }
        }
        self.prompt.clear();
        self.reset_completion();
        self.mode = Mode::Normal;
    }

    /// Tab in the filter prompt: completes the trailing `.key`, cycling
    /// through the candidates on repeated presses.
    pub fn complete_filter(&mut self) {
        if self.completion_candidates.is_empty() {
            self.completion_prefix = self.prompt.clone();
            self.completion_candidates = query::complete(&self.source, &self.completion_prefix);
            self.completion_index = 0;
        } else {
            self.completion_index = (self.completion_index + 1) % self.completion_candidates.len();
        }

        if let Some(candidate) = self.completion_candidates.get(self.completion_index) {
            self.prompt = candidate.clone();
            let code = self.prompt.clone();
            self.update_filter(&code);
        }
    }

    pub fn reset_completion(&mut self) {
        self.completion_candidates.clear();
        self.completion_index = 0;
        self.completion_prefix.clear();
    }

    // Cursor motion

    /// Row on which the cursor's node opens.
    pub fn cursor_row(&self) -> usize {
        self.rendered.index.row_of(&self.cursor).unwrap_or(0)
    }

    fn set_cursor_row(&mut self, row: usize) {
        if let Some(path) = self.rendered.index.path_at(row) {
            self.cursor = path.clone();
        }
    }

    /// Moves the cursor to the nearest indexed row at or above `row`.
    fn set_cursor_near(&mut self, row: usize) {
        if let Some(row) = self.rendered.index.at_or_before(row) {
            self.set_cursor_row(row);
        }
    }

    fn max_scroll(&self) -> usize {
        self.rendered
            .line_count()
            .saturating_sub(self.viewport_height)
    }

    fn last_line(&self) -> usize {
        self.rendered.line_count().saturating_sub(1)
    }

    pub fn move_cursor_down(&mut self) {
        if let Some(row) = self.rendered.index.next_row(self.cursor_row()) {
            self.set_cursor_row(row);
        }
    }

    pub fn move_cursor_up(&mut self) {
        if let Some(row) = self.rendered.index.prev_row(self.cursor_row()) {
            self.set_cursor_row(row);
        }
    }

    pub fn jump_to_top(&mut self) {
        if let Some(row) = self.rendered.index.first_row() {
            self.set_cursor_row(row);
        }
        self.scroll_offset = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        if let Some(row) = self.rendered.index.last_row() {
            self.set_cursor_row(row);
        }
        self.scroll_offset = self.max_scroll();
    }

    /// Scrolls down half a page, carrying the cursor along.
    pub fn page_down(&mut self) {
        self.scroll_down_by(self.viewport_height / 2);
    }

    pub fn page_up(&mut self) {
        self.scroll_up_by(self.viewport_height / 2);
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down_by(self.viewport_height);
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up_by(self.viewport_height);
    }

    fn scroll_down_by(&mut self, amount: usize) {
        if amount == 0 || self.rendered.index.is_empty() {
            return;
        }
        self.scroll_offset = (self.scroll_offset + amount).min(self.max_scroll());
        let target = (self.cursor_row() + amount).min(self.last_line());
        self.set_cursor_near(target);
    }

    fn scroll_up_by(&mut self, amount: usize) {
        if amount == 0 || self.rendered.index.is_empty() {
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        let target = self.cursor_row().saturating_sub(amount);
        self.set_cursor_near(target);
    }

    /// Moves the cursor to the first node shown on screen.
    pub fn cursor_to_top_of_screen(&mut self) {
        let index = &self.rendered.index;
        let row = index
            .path_at(self.scroll_offset)
            .map(|_| self.scroll_offset)
            .or_else(|| index.next_row(self.scroll_offset));
        if let Some(row) = row {
            self.set_cursor_row(row);
        }
    }

    pub fn center_cursor_on_screen(&mut self) {
        let visible = self
            .viewport_height
            .min(self.rendered.line_count().saturating_sub(self.scroll_offset));
        self.set_cursor_near(self.scroll_offset + visible / 2);
    }

    pub fn cursor_to_bottom_of_screen(&mut self) {
        let bottom = (self.scroll_offset + self.viewport_height.max(1) - 1).min(self.last_line());
        self.set_cursor_near(bottom);
    }

    fn is_open_container(&self, path: &Path) -> bool {
        self.expanded.contains(path)
            && self
                .document
                .get(path)
                .is_some_and(|node| node.is_container() && node.child_count() > 0)
    }

    /// Moves to the next container below the cursor that is open.
    pub fn move_to_next_expanded(&mut self) {
        let current = self.cursor_row();
        let next = self
            .rendered
            .index
            .iter()
            .find(|(row, path)| *row > current && self.is_open_container(path))
            .map(|(_, path)| path.clone());
        if let Some(path) = next {
            self.cursor = path;
        }
    }

    pub fn move_to_previous_expanded(&mut self) {
        let current = self.cursor_row();
        let previous = self
            .rendered
            .index
            .iter()
            .filter(|(row, path)| *row < current && self.is_open_container(path))
            .last()
            .map(|(_, path)| path.clone());
        if let Some(path) = previous {
            self.cursor = path;
        }
    }

    /// Keeps the cursor inside a viewport of `viewport_height` rows.
    pub fn adjust_scroll_to_cursor(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        self.viewport_height = viewport_height;

        let row = self.cursor_row();
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + viewport_height {
            self.scroll_offset = row + 1 - viewport_height;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Mouse click on a screen row of the main view: moves the cursor there
    /// and toggles the node.
    pub fn click_row(&mut self, screen_row: usize) {
        let row = self.scroll_offset + screen_row;
        let Some(path) = self.rendered.index.path_at(row).cloned() else {
            return;
        };
        self.cursor = path.clone();
        self.toggle(&path);
    }

    // Output

    /// Human-readable path of the cursor, empty at the root.
    pub fn cursor_path_string(&self) -> String {
        self.cursor.to_human_readable()
    }

    /// Copies the cursor path to the system clipboard.
    pub fn yank_path(&mut self) -> bool {
        let path = self.cursor_path_string();
        if path.is_empty() {
            self.set_message("Cursor is on the document root".to_string(), MessageLevel::Info);
            return false;
        }
        if let Ok(mut clipboard) = Clipboard::new() {
            if clipboard.set_text(path.clone()).is_ok() {
                self.set_message(format!("Copied {}", path), MessageLevel::Info);
                return true;
            }
        }
        self.set_message("Clipboard is not available".to_string(), MessageLevel::Error);
        false
    }

    /// Plain text of the current document, honouring the expand state when
    /// `expanded_only` is set and fully expanded otherwise.
    pub fn print_request(&self, expanded_only: bool) -> String {
        let options = RenderOptions {
            expanded: expanded_only.then_some(&self.expanded),
            indent: self.indent,
            ..Default::default()
        };
        render(&self.document, &options).text()
    }

    /// Queues text to print once the terminal has been restored.
    pub fn request_print(&mut self, expanded_only: bool) {
        self.pending_print = Some(self.print_request(expanded_only));
    }

    pub fn take_pending_print(&mut self) -> Option<String> {
        self.pending_print.take()
    }

    // Help overlay

    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == Mode::Help {
            Mode::Normal
        } else {
            self.help_scroll = 0;
            Mode::Help
        };
    }

    pub fn help_scroll(&self) -> usize {
        self.help_scroll
    }

    pub fn scroll_help_down(&mut self) {
        self.help_scroll = self.help_scroll.saturating_add(1);
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }
}
