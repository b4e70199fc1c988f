//! Main document pane.
//!
//! Draws the window of rendered rows that starts at the scroll offset, with
//! the cursor row picked out by the theme's cursor background. Rows are
//! already styled by the renderer; this pane only clips and decorates them.

use crate::render::Rendered;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Renders the visible slice of `rendered` into `area`.
pub fn render_tree_view(
    f: &mut Frame,
    area: Rect,
    rendered: &Rendered,
    cursor_row: usize,
    scroll_offset: usize,
    colors: &ThemeColors,
) {
    let lines = visible_lines(rendered, cursor_row, scroll_offset, area.height as usize, colors);

    let paragraph =
        Paragraph::new(lines).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}

fn visible_lines(
    rendered: &Rendered,
    cursor_row: usize,
    scroll_offset: usize,
    height: usize,
    colors: &ThemeColors,
) -> Vec<Line<'static>> {
    rendered
        .lines
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(height)
        .map(|(row, line)| {
            if row == cursor_row {
                // Span backgrounds (search matches) still win over the row's.
                line.clone().style(Style::default().bg(colors.cursor))
            } else {
                line.clone()
            }
        })
        .collect()
}
