//! Bottom line: the filter or search prompt while one is open, otherwise the
//! latest message.

use crate::theme::colors::ThemeColors;
use crate::viewer::{MessageLevel, Mode, Viewer};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Prompt prefix shown before the buffer in each prompt mode.
fn prompt_prefix(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::Filter => Some("filter: "),
        Mode::Search => Some("/"),
        Mode::Normal | Mode::Help => None,
    }
}

pub fn render_message_area(f: &mut Frame, area: Rect, viewer: &Viewer, colors: &ThemeColors) {
    let content = match prompt_prefix(viewer.mode()) {
        Some(prefix) => {
            let text = format!("{}{}", prefix, viewer.prompt());
            let x = area.x + (text.chars().count() as u16).min(area.width.saturating_sub(1));
            f.set_cursor_position(Position::new(x, area.y));
            Line::from(vec![Span::styled(text, Style::default().fg(colors.foreground))])
        }
        None => match viewer.message() {
            Some(message) => {
                let color = match message.level {
                    MessageLevel::Error => colors.error,
                    MessageLevel::Warning => colors.warning,
                    MessageLevel::Info => colors.info,
                };
                Line::from(vec![Span::styled(
                    message.text.clone(),
                    Style::default().fg(color),
                )])
            }
            None => Line::from(""),
        },
    };

    let paragraph =
        Paragraph::new(content).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}
