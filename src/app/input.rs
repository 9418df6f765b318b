use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::app::{App, Message};
use crate::input::KeyInput;

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let quit = key.code == KeyCode::Esc
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    return Some(Message::Quit);
                }
                KeyInput::from_event(event).map(Message::Key)
            }
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => KeyInput::from_event(event).map(Message::Key),
        }
    }
}
