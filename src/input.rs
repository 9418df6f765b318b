//! Logical key events and the input field that consumes them.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::cursor::CursorRequest;
use crate::editor::TextBuffer;

/// A decoded key press, independent of the terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Text to insert (one typed char or a whole paste).
    Character(String),
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Other,
}

impl KeyInput {
    /// Decode a crossterm event. Returns `None` for events that are not
    /// keyboard input at all (mouse, focus, resize, key release).
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(*key),
            Event::Paste(text) => Some(Self::from_paste(text)),
            _ => None,
        }
    }

    /// Decode a crossterm key event.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return Some(Self::Other);
        }
        let input = match key.code {
            KeyCode::Char(c) if !c.is_control() => Self::Character(c.to_string()),
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Left => Self::ArrowLeft,
            KeyCode::Right => Self::ArrowRight,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::Enter => Self::Enter,
            _ => Self::Other,
        };
        Some(input)
    }

    /// Pasted text with control characters stripped; the field is single-line.
    pub fn from_paste(text: &str) -> Self {
        Self::Character(text.chars().filter(|c| !c.is_control()).collect())
    }
}

/// What applying a key did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Text or cursor changed.
    Changed,
    /// Nothing changed.
    Unchanged,
    /// Enter was pressed; carries the current text. The field is not cleared.
    Submitted(String),
}

/// A prompt followed by an editable buffer.
#[derive(Debug, Clone)]
pub struct TextInput {
    prompt: String,
    buffer: TextBuffer,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

pub const DEFAULT_PROMPT: &str = "> ";

impl TextInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: TextBuffer::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Apply one logical key to the buffer.
    pub fn apply(&mut self, key: KeyInput) -> InputOutcome {
        let before = self.buffer.cursor();
        let changed = match key {
            KeyInput::Character(text) => {
                self.buffer.insert(&text);
                !text.is_empty()
            }
            KeyInput::Backspace => self.buffer.delete_backward(),
            KeyInput::Delete => self.buffer.delete_forward(),
            KeyInput::ArrowLeft => {
                self.buffer.move_left();
                self.buffer.cursor() != before
            }
            KeyInput::ArrowRight => {
                self.buffer.move_right();
                self.buffer.cursor() != before
            }
            KeyInput::Home => {
                self.buffer.move_home();
                self.buffer.cursor() != before
            }
            KeyInput::End => {
                self.buffer.move_end();
                self.buffer.cursor() != before
            }
            KeyInput::Enter => return InputOutcome::Submitted(self.buffer.text()),
            KeyInput::Other => false,
        };
        if changed {
            InputOutcome::Changed
        } else {
            InputOutcome::Unchanged
        }
    }

    /// Build the cursor request for this field on `row`.
    ///
    /// `text_before_cursor` must outlive the request, so the caller passes
    /// storage for it.
    pub fn cursor_request<'a>(&'a self, text_before_cursor: &'a str, row: usize) -> CursorRequest<'a> {
        CursorRequest {
            prompt: &self.prompt,
            text_before_cursor,
            row,
        }
    }
}
