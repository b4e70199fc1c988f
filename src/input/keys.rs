//! Keyboard event mapping and input event types.

use crate::viewer::mode::Mode;
use termion::event::{Event, Key};

/// High-level input events abstracted from raw keyboard input.
///
/// These events represent user intentions rather than specific key
/// presses, so the same key can mean different things in each mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MoveDown,
    MoveUp,
    /// Open the container under the cursor (l)
    Expand,
    /// Close the container under the cursor, or its parent (h)
    Collapse,
    /// Space or Enter
    Toggle,
    /// Open everything below the cursor (O, Shift-Right)
    ExpandSubtree,
    /// Open every container in the document (e)
    ExpandAll,
    /// Close everything but the root (E, C)
    CollapseAll,
    JumpToTop,
    JumpToBottom,
    HalfPageDown,
    HalfPageUp,
    FullPageDown,
    FullPageUp,
    /// Cursor to the first node on screen (H)
    ScreenTop,
    /// Cursor to the middle of the screen (M)
    ScreenMiddle,
    /// Cursor to the last node on screen (L)
    ScreenBottom,
    /// Next open container (})
    NextExpanded,
    /// Previous open container ({)
    PreviousExpanded,
    EnterFilterMode,
    EnterSearchMode,
    NextSearchResult,
    /// Copy the cursor path to the clipboard
    YankPath,
    /// Print the view as shown and exit (p)
    PrintExpanded,
    /// Print the whole document and exit (P)
    PrintFull,
    Help,
    ScrollHelpDown,
    ScrollHelpUp,
    /// Esc: leave the prompt or the help overlay
    ExitMode,
    /// Enter on the prompt line
    Submit,
    /// Tab on the prompt line
    Complete,
    PromptChar(char),
    PromptBackspace,
    /// Ctrl-u on the prompt line
    PromptClear,
    /// Ctrl-w on the prompt line: drop the last `.key` or `[...]`
    PromptDeleteSegment,
    Unknown,
}

/// Maps a termion Event to an InputEvent based on the current viewer mode.
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use peekjson::viewer::mode::Mode;
/// use peekjson::input::keys::{map_key_event, InputEvent};
///
/// assert_eq!(map_key_event(Event::Key(Key::Char('j')), &Mode::Normal), InputEvent::MoveDown);
/// let typed = map_key_event(Event::Key(Key::Char('j')), &Mode::Search);
/// assert_eq!(typed, InputEvent::PromptChar('j'));
/// ```
pub fn map_key_event(event: Event, mode: &Mode) -> InputEvent {
    let key = match event {
        Event::Key(k) => k,
        _ => return InputEvent::Unknown,
    };

    match mode {
        Mode::Normal => match key {
            Key::Ctrl('c') | Key::Char('q') | Key::Esc => InputEvent::Quit,
            Key::Ctrl('d') | Key::Char('d') => InputEvent::HalfPageDown,
            Key::Ctrl('u') | Key::Char('u') => InputEvent::HalfPageUp,
            Key::Ctrl('f') | Key::Char('f') => InputEvent::FullPageDown,
            Key::Ctrl('b') | Key::Char('b') => InputEvent::FullPageUp,
            Key::Char('j') | Key::Down => InputEvent::MoveDown,
            Key::Char('k') | Key::Up => InputEvent::MoveUp,
            Key::Char('h') | Key::Left => InputEvent::Collapse,
            Key::Char('l') | Key::Right => InputEvent::Expand,
            Key::Char(' ') | Key::Char('\n') => InputEvent::Toggle,
            Key::Char('O') | Key::ShiftRight => InputEvent::ExpandSubtree,
            Key::Char('e') => InputEvent::ExpandAll,
            Key::Char('E') | Key::Char('C') => InputEvent::CollapseAll,
            Key::Char('g') | Key::Home => InputEvent::JumpToTop,
            Key::Char('G') | Key::End => InputEvent::JumpToBottom,
            Key::PageDown => InputEvent::FullPageDown,
            Key::PageUp => InputEvent::FullPageUp,
            Key::Char('H') => InputEvent::ScreenTop,
            Key::Char('M') => InputEvent::ScreenMiddle,
            Key::Char('L') => InputEvent::ScreenBottom,
            Key::Char('}') | Key::Char(']') => InputEvent::NextExpanded,
            Key::Char('{') | Key::Char('[') => InputEvent::PreviousExpanded,
            Key::Char('.') | Key::Char(':') => InputEvent::EnterFilterMode,
            Key::Char('/') => InputEvent::EnterSearchMode,
            Key::Char('n') => InputEvent::NextSearchResult,
            Key::Char('y') => InputEvent::YankPath,
            Key::Char('p') => InputEvent::PrintExpanded,
            Key::Char('P') => InputEvent::PrintFull,
            Key::Char('?') | Key::F(1) => InputEvent::Help,
            _ => InputEvent::Unknown,
        },
        Mode::Filter | Mode::Search => match key {
            Key::Esc => InputEvent::ExitMode,
            Key::Char('\n') => InputEvent::Submit,
            Key::Char('\t') => InputEvent::Complete,
            Key::Backspace => InputEvent::PromptBackspace,
            Key::Ctrl('u') => InputEvent::PromptClear,
            Key::Ctrl('w') => InputEvent::PromptDeleteSegment,
            Key::Char(c) => InputEvent::PromptChar(c),
            _ => InputEvent::Unknown,
        },
        Mode::Help => match key {
            Key::Esc | Key::Char('q') | Key::Char('?') | Key::F(1) => InputEvent::Help,
            Key::Char('j') | Key::Down => InputEvent::ScrollHelpDown,
            Key::Char('k') | Key::Up => InputEvent::ScrollHelpUp,
            _ => InputEvent::Unknown,
        },
    }
}
