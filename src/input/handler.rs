//! Input event handler for polling and processing terminal events.

use super::keys::{map_key_event, InputEvent};
use crate::viewer::{Mode, Viewer};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Stdin};
use std::time::Duration;
use termion::event::{Event, MouseButton, MouseEvent};
use termion::input::{Events, TermRead};

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

/// Event source for reading terminal events.
///
/// The events iterator is kept across calls so that no input is lost
/// between polls during rapid input such as a paste.
enum EventSource {
    Stdin(Events<Stdin>),
    /// Used when stdin carried the document.
    Tty(Events<File>),
}

/// Reads terminal events and applies them to a [`Viewer`].
pub struct InputHandler {
    events: EventSource,
}

impl InputHandler {
    /// Creates a new InputHandler that reads from stdin.
    ///
    /// # Example
    ///
    /// ```
    /// use peekjson::input::InputHandler;
    ///
    /// let handler = InputHandler::new();
    /// ```
    pub fn new() -> Self {
        Self {
            events: EventSource::Stdin(io::stdin().events()),
        }
    }

    /// Creates a new InputHandler that reads from /dev/tty.
    /// Use this when stdin has been consumed for piped data.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: EventSource::Tty(tty_file.events()),
        })
    }

    /// Waits for the next terminal event.
    ///
    /// Returns `None` once the input stream has ended.
    pub fn poll_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        let next = match &mut self.events {
            EventSource::Stdin(events) => events.next(),
            EventSource::Tty(events) => events.next(),
        };
        match next {
            Some(event) => Ok(Some(event.context("Failed to read terminal input")?)),
            None => Ok(None),
        }
    }

    /// Applies a terminal event to the viewer.
    ///
    /// Returns `Ok(true)` when the viewer should exit. A print request
    /// (`p`/`P`) also exits, leaving the text queued on the viewer.
    ///
    /// # Example
    ///
    /// ```
    /// use peekjson::config::Config;
    /// use peekjson::document::value::Value;
    /// use peekjson::input::InputHandler;
    /// use peekjson::render::RenderStyle;
    /// use peekjson::viewer::Viewer;
    /// use termion::event::{Event, Key};
    ///
    /// let mut handler = InputHandler::new();
    /// let mut viewer = Viewer::new(Value::Null, &Config::default(), RenderStyle::default());
    /// assert!(handler.handle_event(Event::Key(Key::Char('q')), &mut viewer).unwrap());
    /// ```
    pub fn handle_event(&mut self, event: Event, viewer: &mut Viewer) -> Result<bool> {
        if let Event::Mouse(mouse_event) = event {
            if viewer.enable_mouse() {
                self.handle_mouse(mouse_event, viewer);
            }
            return Ok(false);
        }

        let input = map_key_event(event, &viewer.mode());
        if viewer.mode() == Mode::Normal && input != InputEvent::Unknown {
            viewer.clear_message();
        }

        match input {
            InputEvent::Quit => return Ok(true),
            InputEvent::MoveDown => viewer.move_cursor_down(),
            InputEvent::MoveUp => viewer.move_cursor_up(),
            InputEvent::Expand => viewer.expand_at_cursor(),
            InputEvent::Collapse => viewer.collapse_at_cursor(),
            InputEvent::Toggle => viewer.toggle_at_cursor(),
            InputEvent::ExpandSubtree => viewer.expand_subtree_at_cursor(),
            InputEvent::ExpandAll => viewer.expand_all_default(),
            InputEvent::CollapseAll => viewer.collapse_all(),
            InputEvent::JumpToTop => viewer.jump_to_top(),
            InputEvent::JumpToBottom => viewer.jump_to_bottom(),
            InputEvent::HalfPageDown => viewer.page_down(),
            InputEvent::HalfPageUp => viewer.page_up(),
            InputEvent::FullPageDown => viewer.full_page_down(),
            InputEvent::FullPageUp => viewer.full_page_up(),
            InputEvent::ScreenTop => viewer.cursor_to_top_of_screen(),
            InputEvent::ScreenMiddle => viewer.center_cursor_on_screen(),
            InputEvent::ScreenBottom => viewer.cursor_to_bottom_of_screen(),
            InputEvent::NextExpanded => viewer.move_to_next_expanded(),
            InputEvent::PreviousExpanded => viewer.move_to_previous_expanded(),
            InputEvent::EnterFilterMode => viewer.start_filter(),
            InputEvent::EnterSearchMode => viewer.start_search(),
            InputEvent::NextSearchResult => viewer.advance_search(),
            InputEvent::YankPath => {
                viewer.yank_path();
            }
            InputEvent::PrintExpanded => {
                viewer.request_print(true);
                return Ok(true);
            }
            InputEvent::PrintFull => {
                viewer.request_print(false);
                return Ok(true);
            }
            InputEvent::Help => viewer.toggle_help(),
            InputEvent::ScrollHelpDown => viewer.scroll_help_down(),
            InputEvent::ScrollHelpUp => viewer.scroll_help_up(),
            InputEvent::ExitMode => viewer.cancel_prompt(),
            InputEvent::Submit => viewer.submit_prompt(),
            InputEvent::Complete => {
                if viewer.mode() == Mode::Filter {
                    viewer.complete_filter();
                }
            }
            InputEvent::PromptChar(ch) => viewer.push_prompt_char(ch),
            InputEvent::PromptBackspace => viewer.pop_prompt_char(),
            InputEvent::PromptClear => viewer.clear_prompt(),
            InputEvent::PromptDeleteSegment => viewer.delete_prompt_segment(),
            InputEvent::Unknown => {}
        }

        Ok(false)
    }

    fn handle_mouse(&mut self, mouse_event: MouseEvent, viewer: &mut Viewer) {
        let help = viewer.mode() == Mode::Help;
        match mouse_event {
            MouseEvent::Press(MouseButton::WheelUp, _, _) => {
                for _ in 0..WHEEL_STEP {
                    if help {
                        viewer.scroll_help_up();
                    } else {
                        viewer.move_cursor_up();
                    }
                }
            }
            MouseEvent::Press(MouseButton::WheelDown, _, _) => {
                for _ in 0..WHEEL_STEP {
                    if help {
                        viewer.scroll_help_down();
                    } else {
                        viewer.move_cursor_down();
                    }
                }
            }
            // Termion rows are 1-based and the main view starts at the top.
            MouseEvent::Press(MouseButton::Left, _, y) if viewer.mode() == Mode::Normal => {
                viewer.click_row(usize::from(y.saturating_sub(1)));
            }
            _ => {}
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::parser::parse_json_str;
    use crate::document::path::Path;
    use crate::render::RenderStyle;
    use termion::event::Key;

    fn viewer(json: &str) -> Viewer {
        Viewer::new(
            parse_json_str(json).unwrap(),
            &Config::default(),
            RenderStyle::default(),
        )
    }

    fn press(handler: &mut InputHandler, viewer: &mut Viewer, keys: &str) -> bool {
        let mut quit = false;
        for ch in keys.chars() {
            quit = handler.handle_event(Event::Key(Key::Char(ch)), viewer).unwrap();
        }
        quit
    }

    #[test]
    fn test_quit() {
        let mut handler = InputHandler::new();
        let mut v = viewer("[]");
        assert!(press(&mut handler, &mut v, "q"));
    }

    #[test]
    fn test_q_in_prompt_is_text() {
        let mut handler = InputHandler::new();
        let mut v = viewer("[]");
        assert!(!press(&mut handler, &mut v, "/q"));
        assert_eq!(v.mode(), Mode::Search);
        assert_eq!(v.prompt(), "q");
    }

    #[test]
    fn test_search_through_prompt() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": {"b": "target"}}"#);
        press(&mut handler, &mut v, "/target\n");
        assert_eq!(v.mode(), Mode::Normal);
        assert_eq!(v.cursor(), &Path::root().key("a").key("b"));
    }

    #[test]
    fn test_filter_through_prompt() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": {"b": 1}}"#);
        // The first dot opens the prompt.
        press(&mut handler, &mut v, "..a\n");
        assert_eq!(v.filter(), ".a");
        assert_eq!(v.rendered().text(), "{\n  \"b\": 1\n}");

        handler.handle_event(Event::Key(Key::Char('.')), &mut v).unwrap();
        handler.handle_event(Event::Key(Key::Ctrl('u')), &mut v).unwrap();
        handler.handle_event(Event::Key(Key::Esc), &mut v).unwrap();
        assert_eq!(v.filter(), ".a");
    }

    #[test]
    fn test_escape_quits_from_normal_mode() {
        let mut handler = InputHandler::new();
        let mut v = viewer("[]");
        press(&mut handler, &mut v, "/");
        assert!(!handler.handle_event(Event::Key(Key::Esc), &mut v).unwrap());
        assert_eq!(v.mode(), Mode::Normal);
        assert!(handler.handle_event(Event::Key(Key::Esc), &mut v).unwrap());
    }

    #[test]
    fn test_expand_and_collapse_all_keys() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": {"b": [1]}, "c": [2]}"#);
        press(&mut handler, &mut v, "e");
        assert!(v.expanded().contains(&Path::root().key("a").key("b")));
        assert!(v.expanded().contains(&Path::root().key("c")));
        press(&mut handler, &mut v, "E");
        assert!(!v.expanded().contains(&Path::root().key("a")));

        press(&mut handler, &mut v, "jO");
        assert!(v.expanded().contains(&Path::root().key("a").key("b")));
        assert!(!v.expanded().contains(&Path::root().key("c")));
    }

    #[test]
    fn test_ctrl_w_drops_last_filter_segment() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": {"b": [7]}}"#);
        press(&mut handler, &mut v, "..a.b[0]");
        assert_eq!(v.rendered().text(), "7");

        handler.handle_event(Event::Key(Key::Ctrl('w')), &mut v).unwrap();
        assert_eq!(v.prompt(), ".a.b");
        assert_eq!(v.rendered().text(), "[\n  7\n]");
        handler.handle_event(Event::Key(Key::Ctrl('w')), &mut v).unwrap();
        assert_eq!(v.prompt(), ".a");
        press(&mut handler, &mut v, "\n");
        assert_eq!(v.filter(), ".a");
    }

    #[test]
    fn test_slash_in_filter_prompt_runs_a_search() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": 1, "b": {"c": "found"}}"#);
        press(&mut handler, &mut v, "..a\n");
        assert_eq!(v.filter(), ".a");

        press(&mut handler, &mut v, ".");
        handler.handle_event(Event::Key(Key::Ctrl('u')), &mut v).unwrap();
        press(&mut handler, &mut v, "/FOUND\n");
        assert_eq!(v.mode(), Mode::Normal);
        assert_eq!(v.filter(), "");
        assert_eq!(v.cursor(), &Path::root().key("b").key("c"));
    }

    #[test]
    fn test_print_request_quits() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"[1]"#);
        assert!(press(&mut handler, &mut v, "P"));
        assert_eq!(v.take_pending_print().unwrap(), "[\n  1\n]");
    }

    #[test]
    fn test_mouse_click_toggles() {
        let mut handler = InputHandler::new();
        let mut v = viewer(r#"{"a": [1]}"#);
        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 5, 2));
        handler.handle_event(click, &mut v).unwrap();
        assert_eq!(v.cursor(), &Path::root().key("a"));
        assert!(v.expanded().contains(&Path::root().key("a")));
    }

    #[test]
    fn test_help_toggle() {
        let mut handler = InputHandler::new();
        let mut v = viewer("[]");
        press(&mut handler, &mut v, "?");
        assert_eq!(v.mode(), Mode::Help);
        press(&mut handler, &mut v, "jjk");
        assert_eq!(v.help_scroll(), 1);
        handler.handle_event(Event::Key(Key::Esc), &mut v).unwrap();
        assert_eq!(v.mode(), Mode::Normal);
    }
}
