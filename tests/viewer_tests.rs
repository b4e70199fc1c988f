use peekjson::config::Config;
use peekjson::document::parser::parse_json_str;
use peekjson::document::path::Path;
use peekjson::input::InputHandler;
use peekjson::render::{line_text, RenderStyle};
use peekjson::viewer::{MessageLevel, Mode, Viewer};
use pretty_assertions::assert_eq;
use termion::event::{Event, Key};

fn viewer_for(json: &str) -> Viewer {
    let doc = parse_json_str(json).unwrap();
    Viewer::new(doc, &Config::default(), RenderStyle::default())
}

fn users() -> Viewer {
    viewer_for(r#"{"users": [{"name": "ana"}, {"name": "bo"}], "count": 2}"#)
}

fn press(handler: &mut InputHandler, viewer: &mut Viewer, key: Key) -> bool {
    handler.handle_event(Event::Key(key), viewer).unwrap()
}

fn type_str(handler: &mut InputHandler, viewer: &mut Viewer, text: &str) {
    for ch in text.chars() {
        press(handler, viewer, Key::Char(ch));
    }
}

fn screen(viewer: &Viewer) -> Vec<String> {
    viewer.rendered().lines.iter().map(line_text).collect()
}

#[test]
fn test_starts_with_only_root_open() {
    let viewer = users();
    assert_eq!(
        screen(&viewer),
        vec!["{", "  \"users\": […],", "  \"count\": 2", "}"]
    );
    assert_eq!(viewer.cursor(), &Path::root());
    assert_eq!(viewer.mode(), Mode::Normal);
}

#[test]
fn test_navigate_and_expand_with_keys() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('j'));
    assert_eq!(viewer.cursor(), &Path::root().key("users"));

    press(&mut handler, &mut viewer, Key::Char('l'));
    assert_eq!(viewer.rendered().line_count(), 7);

    press(&mut handler, &mut viewer, Key::Char('j'));
    assert_eq!(viewer.cursor(), &Path::root().key("users").index(0));

    // Collapsing a closed element closes its parent instead.
    press(&mut handler, &mut viewer, Key::Char('h'));
    assert_eq!(viewer.cursor(), &Path::root().key("users"));
    assert_eq!(viewer.rendered().line_count(), 4);

    press(&mut handler, &mut viewer, Key::Char('e'));
    assert_eq!(viewer.rendered().line_count(), 11);

    press(&mut handler, &mut viewer, Key::Char('E'));
    assert_eq!(viewer.rendered().line_count(), 4);
}

#[test]
fn test_search_reveals_match_inside_collapsed_container() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('/'));
    assert_eq!(viewer.mode(), Mode::Search);
    type_str(&mut handler, &mut viewer, "BO\n");

    assert_eq!(viewer.mode(), Mode::Normal);
    let hit = Path::root().key("users").index(1).key("name");
    assert_eq!(viewer.cursor(), &hit);
    assert_eq!(viewer.current_match(), Some(&hit));
    assert!(viewer.expanded().contains(&Path::root().key("users").index(1)));
    assert_eq!(
        line_text(&viewer.rendered().lines[viewer.cursor_row()]),
        "      \"name\": \"bo\""
    );

    press(&mut handler, &mut viewer, Key::Char('n'));
    let message = viewer.message().unwrap();
    assert_eq!(message.text, "Pattern not found");
    assert_eq!(message.level, MessageLevel::Warning);
    assert_eq!(viewer.cursor(), &hit);
}

#[test]
fn test_next_without_a_search() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('n'));
    assert_eq!(viewer.message().unwrap().text, "No previous search pattern");
}

#[test]
fn test_filter_prompt_submit_and_reopen() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('.'));
    assert_eq!(viewer.mode(), Mode::Filter);
    type_str(&mut handler, &mut viewer, ".users[0]\n");

    assert_eq!(viewer.mode(), Mode::Normal);
    assert_eq!(viewer.filter(), ".users[0]");
    assert_eq!(screen(&viewer), vec!["{", "  \"name\": \"ana\"", "}"]);
    assert_eq!(viewer.cursor(), &Path::root());

    // Reopening starts from the active filter.
    press(&mut handler, &mut viewer, Key::Char('.'));
    assert_eq!(viewer.prompt(), ".users[0]");
    press(&mut handler, &mut viewer, Key::Ctrl('u'));
    assert_eq!(viewer.prompt(), "");
    press(&mut handler, &mut viewer, Key::Char('\n'));
    assert_eq!(viewer.filter(), "");
    assert_eq!(viewer.document(), viewer.source());
}

#[test]
fn test_escape_restores_document_from_before_the_prompt() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('.'));
    type_str(&mut handler, &mut viewer, ".count");
    // Small documents follow the filter while it is typed.
    assert_eq!(screen(&viewer), vec!["2"]);

    press(&mut handler, &mut viewer, Key::Esc);
    assert_eq!(viewer.mode(), Mode::Normal);
    assert_eq!(viewer.filter(), "");
    assert_eq!(viewer.rendered().line_count(), 4);
}

#[test]
fn test_failed_filter_keeps_last_good_view() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('.'));
    type_str(&mut handler, &mut viewer, ".missing\n");

    assert_eq!(viewer.mode(), Mode::Normal);
    let message = viewer.message().unwrap();
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message.text.contains("selects nothing"));
    assert_eq!(viewer.rendered().line_count(), 4);
}

#[test]
fn test_tab_completes_keys_in_filter_prompt() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('.'));
    type_str(&mut handler, &mut viewer, ".c");
    press(&mut handler, &mut viewer, Key::Char('\t'));
    assert_eq!(viewer.prompt(), ".count");
}

#[test]
fn test_print_requests_exit_with_queued_text() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    assert!(press(&mut handler, &mut viewer, Key::Char('p')));
    assert_eq!(
        viewer.take_pending_print().unwrap(),
        "{\n  \"users\": […],\n  \"count\": 2\n}"
    );
    assert_eq!(viewer.take_pending_print(), None);

    assert!(press(&mut handler, &mut viewer, Key::Char('P')));
    let full = viewer.take_pending_print().unwrap();
    assert!(full.contains("\"name\": \"bo\""));
    assert_eq!(full.lines().count(), 11);
}

#[test]
fn test_help_mode_swallows_navigation() {
    let mut handler = InputHandler::new();
    let mut viewer = users();

    press(&mut handler, &mut viewer, Key::Char('?'));
    assert_eq!(viewer.mode(), Mode::Help);
    press(&mut handler, &mut viewer, Key::Char('j'));
    assert_eq!(viewer.cursor(), &Path::root());
    assert_eq!(viewer.help_scroll(), 1);

    press(&mut handler, &mut viewer, Key::Esc);
    assert_eq!(viewer.mode(), Mode::Normal);
    assert!(press(&mut handler, &mut viewer, Key::Char('q')));
}
