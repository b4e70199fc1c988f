//! Terminal interface for the interactive viewer.
//!
//! The screen is split into three areas from top to bottom:
//! - the document pane, showing the rendered rows around the cursor;
//! - the ruler (optional, see `show_ruler`), with the cursor path and position;
//! - the prompt line, with the filter or search prompt or the latest message.
//!
//! The help overlay is drawn over all three when open.

pub mod help_overlay;
pub mod message_area;
pub mod status_line;
pub mod tree_view;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::theme::Theme;
use crate::viewer::{Mode, Viewer};

/// Draws a [`Viewer`] onto a terminal with a theme.
///
/// # Example
///
/// ```
/// use peekjson::config::Config;
/// use peekjson::document::parser::parse_json_str;
/// use peekjson::render::RenderStyle;
/// use peekjson::theme::get_builtin_theme;
/// use peekjson::ui::UI;
/// use peekjson::viewer::Viewer;
/// use ratatui::backend::TestBackend;
/// use ratatui::Terminal;
///
/// let theme = get_builtin_theme("default-dark").unwrap();
/// let style = RenderStyle::from(&theme.colors);
/// let ui = UI::new(theme);
/// let doc = parse_json_str(r#"{"a": 1}"#).unwrap();
/// let mut viewer = Viewer::new(doc, &Config::default(), style);
/// let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
/// ui.render(&mut terminal, &mut viewer).unwrap();
/// ```
pub struct UI {
    theme: Theme,
}

impl UI {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Draws one frame. Takes the viewer mutably because the viewport height
    /// is only known here and the scroll offset follows it.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        viewer: &mut Viewer,
    ) -> Result<()> {
        terminal.draw(|f| {
            let ruler_height = u16::from(viewer.show_ruler());
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(ruler_height),
                    Constraint::Length(1),
                ])
                .split(f.area());

            viewer.adjust_scroll_to_cursor(chunks[0].height as usize);

            tree_view::render_tree_view(
                f,
                chunks[0],
                viewer.rendered(),
                viewer.cursor_row(),
                viewer.scroll_offset(),
                &self.theme.colors,
            );

            if viewer.show_ruler() {
                status_line::render_status_line(f, chunks[1], viewer, &self.theme.colors);
            }

            message_area::render_message_area(f, chunks[2], viewer, &self.theme.colors);

            if viewer.mode() == Mode::Help {
                help_overlay::render_help_overlay(f, &self.theme.colors, viewer.help_scroll());
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::parser::parse_json_str;
    use crate::render::RenderStyle;
    use crate::theme::get_builtin_theme;
    use ratatui::backend::TestBackend;

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area().width)
            .map(|x| buffer[(x, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_document_and_ruler() {
        let theme = get_builtin_theme("default-dark").unwrap();
        let ui = UI::new(theme);
        let doc = parse_json_str(r#"{"a": [1, 2]}"#).unwrap();
        let mut viewer = Viewer::new(doc, &Config::default(), RenderStyle::default());
        viewer.set_filename("t.json".to_string());

        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        ui.render(&mut terminal, &mut viewer).unwrap();

        assert!(row_text(&terminal, 0).starts_with("{ "));
        assert!(row_text(&terminal, 1).starts_with("  \"a\": […]"));
        assert!(row_text(&terminal, 4).contains("t.json"));
    }

    #[test]
    fn test_render_prompt_and_help() {
        let theme = get_builtin_theme("nord").unwrap();
        let ui = UI::new(theme);
        let doc = parse_json_str("[]").unwrap();
        let mut viewer = Viewer::new(doc, &Config::default(), RenderStyle::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        viewer.start_search();
        viewer.push_prompt_char('x');
        ui.render(&mut terminal, &mut viewer).unwrap();
        assert!(row_text(&terminal, 19).starts_with("/x "));

        viewer.cancel_prompt();
        viewer.toggle_help();
        ui.render(&mut terminal, &mut viewer).unwrap();
        let screen: String = (0..20).map(|row| row_text(&terminal, row)).collect();
        assert!(screen.contains("peekjson help"));
    }
}
