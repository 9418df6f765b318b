use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::CursorMode;
use crate::cursor::ScreenPosition;
use crate::input::KeyInput;
use crate::width::WidthProfile;

use super::{App, HEADER_ROWS, MAX_HISTORY, Message, Model, update};

fn create_test_model() -> Model {
    Model::new("> ", (80, 24))
}

fn key(input: KeyInput) -> Message {
    Message::Key(input)
}

fn type_text(model: Model, text: &str) -> Model {
    text.chars().fold(model, |model, ch| {
        update(model, key(KeyInput::Character(ch.to_string())))
    })
}

// --- Event decoding ---

#[test]
fn test_ctrl_c_and_esc_quit() {
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(App::handle_event(&ctrl_c), Some(Message::Quit));
    assert_eq!(App::handle_event(&esc), Some(Message::Quit));
}

#[test]
fn test_release_events_are_dropped() {
    let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert_eq!(App::handle_event(&Event::Key(release)), None);
}

#[test]
fn test_resize_event_becomes_message() {
    assert_eq!(
        App::handle_event(&Event::Resize(100, 30)),
        Some(Message::Resize(100, 30))
    );
}

#[test]
fn test_char_and_paste_become_key_messages() {
    let typed = Event::Key(KeyEvent::new(KeyCode::Char('가'), KeyModifiers::NONE));
    assert_eq!(
        App::handle_event(&typed),
        Some(key(KeyInput::Character("가".to_string())))
    );
    assert_eq!(
        App::handle_event(&Event::Paste("漢字".to_string())),
        Some(key(KeyInput::Character("漢字".to_string())))
    );
}

// --- Update ---

#[test]
fn test_typing_updates_buffer_and_cursor() {
    let model = type_text(create_test_model(), "안녕");
    assert_eq!(model.input.buffer().text(), "안녕");
    assert_eq!(model.input.buffer().char_len(), 2);
    assert_eq!(model.input.buffer().cursor(), 2);
}

#[test]
fn test_cursor_position_tracks_edits() {
    let model = type_text(create_test_model(), "안녕");
    assert_eq!(
        model.cursor_position(),
        ScreenPosition {
            column: 6,
            row: HEADER_ROWS
        }
    );

    let model = update(model, key(KeyInput::Backspace));
    assert_eq!(model.input.buffer().text(), "안");
    assert_eq!(model.input.buffer().cursor(), 1);
    assert_eq!(model.cursor_position().column, 4);
}

#[test]
fn test_middle_insertion_moves_cursor_by_inserted_width() {
    let model = type_text(create_test_model(), "ac");
    let model = update(model, key(KeyInput::ArrowLeft));
    let model = type_text(model, "中");
    assert_eq!(model.input.buffer().text(), "a中c");
    assert_eq!(model.cursor_position().column, 5);
}

#[test]
fn test_submit_appends_history_and_clears_input() {
    let model = type_text(create_test_model(), "hello");
    let model = update(model, key(KeyInput::Enter));
    assert_eq!(model.history, vec!["hello".to_string()]);
    assert!(model.input.buffer().is_empty());
    assert_eq!(model.input_row(), HEADER_ROWS + 1);
    assert_eq!(
        model.cursor_position(),
        ScreenPosition {
            column: 2,
            row: HEADER_ROWS + 1
        }
    );
}

#[test]
fn test_blank_submit_is_ignored() {
    let model = type_text(create_test_model(), "   ");
    let model = update(model, key(KeyInput::Enter));
    assert!(model.history.is_empty());
    assert_eq!(model.input.buffer().text(), "   ");
}

#[test]
fn test_history_is_tailed_to_fit_terminal() {
    let mut model = Model::new("> ", (80, 8));
    for i in 0..10 {
        model = type_text(model, &format!("line {i}"));
        model = update(model, key(KeyInput::Enter));
    }
    // 8 rows: 4 header, 3 history, 1 input
    assert_eq!(model.visible_history().len(), 3);
    assert_eq!(model.visible_history()[0], "line 7");
    assert_eq!(model.input_row(), 7);
}

#[test]
fn test_history_is_capped() {
    let mut model = Model::new("> ", (80, u16::MAX));
    for i in 0..MAX_HISTORY + 5 {
        model = update(model, key(KeyInput::Character(format!("line {i}"))));
        model = update(model, key(KeyInput::Enter));
    }
    assert_eq!(model.history.len(), MAX_HISTORY);
    assert_eq!(model.history[0], "line 5");
    assert_eq!(
        model.history.last().map(String::as_str),
        Some(format!("line {}", MAX_HISTORY + 4).as_str())
    );
}

#[test]
fn test_tiny_terminal_keeps_cursor_on_screen() {
    let model = type_text(Model::new("> ", (4, 3)), "안녕하세요");
    assert_eq!(model.cursor_position(), ScreenPosition { column: 3, row: 2 });
}

#[test]
fn test_resize_changes_row_layout() {
    let mut model = Model::new("> ", (80, 24));
    for line in ["a", "b", "c"] {
        model = type_text(model, line);
        model = update(model, key(KeyInput::Enter));
    }
    assert_eq!(model.input_row(), 7);
    let model = update(model, Message::Resize(80, 6));
    assert_eq!(model.terminal_size, (80, 6));
    assert_eq!(model.input_row(), 5);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_width_profile_affects_cursor() {
    let model = type_text(
        create_test_model().with_width_profile(WidthProfile::EastAsian),
        "°",
    );
    assert_eq!(model.cursor_position().column, 4);
    assert_eq!(model.text_width("°"), 2);
}

#[test]
fn test_cursor_mode_is_carried() {
    let model = create_test_model().with_cursor_mode(CursorMode::Fake);
    assert_eq!(model.cursor_mode, CursorMode::Fake);
}

#[test]
fn test_app_builder() {
    let app = App::new("$ ")
        .with_cursor_mode(CursorMode::Fake)
        .with_width_profile(WidthProfile::EastAsian);
    assert_eq!(app.prompt, "$ ");
    assert_eq!(app.cursor_mode, CursorMode::Fake);
    assert_eq!(app.width_profile, WidthProfile::EastAsian);
}

// --- Terminal setup ---

struct RefusingWriter;

impl std::io::Write for RefusingWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("not a terminal"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_bracketed_paste_enable_writes_mode_sequence() {
    let mut out = Vec::new();
    assert!(App::enable_bracketed_paste(&mut out));
    assert_eq!(out, b"\x1b[?2004h");
}

#[test]
fn test_bracketed_paste_failure_is_reported_not_fatal() {
    assert!(!App::enable_bracketed_paste(&mut RefusingWriter));
}
