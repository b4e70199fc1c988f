//! Help overlay listing the key bindings.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "Navigation",
        &[
            ("j/k, Down/Up", "Move to the next/previous node"),
            ("g, Home", "Jump to the top"),
            ("G, End", "Jump to the bottom"),
            ("d/u, Ctrl-d/u", "Half page down/up"),
            ("f/b, Ctrl-f/b", "Full page down/up (also PgDn/PgUp)"),
            ("H/M/L", "Top, middle, bottom of the screen"),
            ("} / {", "Next/previous open container"),
        ],
    ),
    (
        "Expand and collapse",
        &[
            ("l, Right", "Expand the node"),
            ("h, Left", "Collapse the node, or its parent"),
            ("Space, Enter", "Toggle the node"),
            ("O, Shift-Right", "Expand everything below the cursor"),
            ("e", "Expand the whole document"),
            ("E, C", "Collapse everything"),
        ],
    ),
    (
        "Search and filter",
        &[
            ("/pattern", "Search keys and values (/re/flags for flags)"),
            ("n", "Next match"),
            (". or :", "Edit the filter, e.g. .users[0].name"),
            ("./re/", "A filter starting with / searches instead"),
            ("Tab", "Complete the key being typed in the filter"),
            ("Ctrl-w", "Drop the last .key or [index] of the filter"),
            ("Ctrl-u", "Clear the prompt"),
            ("Esc", "Leave the prompt, undoing an unsubmitted filter"),
        ],
    ),
    (
        "Output",
        &[
            ("y", "Copy the cursor path to the clipboard"),
            ("p", "Print the view as shown and exit"),
            ("P", "Print the whole document and exit"),
            ("q, Esc, Ctrl-c", "Quit"),
            ("?, F1", "Toggle this help"),
        ],
    ),
    (
        "Mouse",
        &[
            ("Wheel", "Move three rows"),
            ("Click", "Select and toggle a node"),
        ],
    ),
];

fn help_lines(colors: &ThemeColors) -> Vec<Line<'static>> {
    let heading = Style::default().fg(colors.key).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(colors.number);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(*title, heading)));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", keys), key),
                Span::raw(*action),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k or mouse wheel to scroll, ? or Esc to close",
        Style::default()
            .fg(colors.info)
            .add_modifier(Modifier::ITALIC),
    )));
    lines
}

/// Renders a centered help overlay, scrolled down by `scroll` lines.
pub fn render_help_overlay(f: &mut Frame, colors: &ThemeColors, scroll: usize) {
    let area = centered_rect(80, 85, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" peekjson help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.info))
        .style(Style::default().bg(colors.background));

    let lines = help_lines(colors);
    let scroll = scroll.min(lines.len().saturating_sub(1)) as u16;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

/// A rect of the given percentage size centered in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
