//! Ruler line.
//!
//! Shows the mode, the input name, the active filter and the cursor path on
//! the left, and the cursor row with its position as a percentage on the
//! right:
//!
//! `NORMAL | data.json | .users .users[3].name              12/240   5%`

use crate::theme::colors::ThemeColors;
use crate::viewer::Viewer;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the ruler for the viewer's current state.
pub fn render_status_line(f: &mut Frame, area: Rect, viewer: &Viewer, colors: &ThemeColors) {
    let line = ruler_line(viewer, area.width as usize, colors);
    f.render_widget(Paragraph::new(line), area);
}

/// `row/total pct%`, counting rows from one.
fn position_text(row: usize, total: usize) -> String {
    if total == 0 {
        return "0/0".to_string();
    }
    let row = row + 1;
    format!("{}/{} {:>3}%", row, total, row * 100 / total)
}

fn ruler_line(viewer: &Viewer, width: usize, colors: &ThemeColors) -> Line<'static> {
    let default_style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);
    let path_style = Style::default().fg(colors.key).bg(colors.status_line_bg);

    let mut left = format!(" {} | {}", viewer.mode(), viewer.filename().unwrap_or("[stdin]"));
    if !viewer.filter().is_empty() {
        left.push_str(&format!(" | {}", viewer.filter()));
    }
    let path = viewer.cursor_path_string();
    let path = if path.is_empty() { String::new() } else { format!(" {}", path) };

    let position = format!(
        "{} ",
        position_text(viewer.cursor_row(), viewer.rendered().line_count())
    );

    let used = left.chars().count() + path.chars().count() + position.chars().count();
    let padding = width.saturating_sub(used).max(1);

    let mut spans = vec![Span::styled(left, default_style)];
    if !path.is_empty() {
        spans.push(Span::styled(path, path_style));
    }
    spans.push(Span::styled(" ".repeat(padding), default_style));
    spans.push(Span::styled(position, default_style));
    Line::from(spans)
}
