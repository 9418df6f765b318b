use crate::config::CursorMode;
use crate::cursor::{CursorProjector, ScreenPosition};
use crate::input::TextInput;
use crate::width::WidthProfile;

/// Rows above the history: title, hint, exit hint, blank.
pub const HEADER_ROWS: usize = 4;

/// Submitted lines kept; older ones are dropped, as no terminal shows more.
pub const MAX_HISTORY: usize = 1000;

/// The complete application state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The single input field.
    pub input: TextInput,
    /// Submitted lines, oldest first, at most [`MAX_HISTORY`].
    pub history: Vec<String>,
    pub projector: CursorProjector,
    pub cursor_mode: CursorMode,
    /// Terminal size (width, height).
    pub terminal_size: (u16, u16),
    pub should_quit: bool,
}

impl Model {
    pub fn new(prompt: impl Into<String>, terminal_size: (u16, u16)) -> Self {
        Self {
            input: TextInput::new(prompt),
            terminal_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_cursor_mode(mut self, mode: CursorMode) -> Self {
        self.cursor_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_width_profile(mut self, profile: WidthProfile) -> Self {
        self.projector = CursorProjector::new(profile);
        self
    }

    /// Append a submitted line, dropping the oldest past [`MAX_HISTORY`].
    pub fn push_history(&mut self, line: String) {
        self.history.push(line);
        let excess = self.history.len().saturating_sub(MAX_HISTORY);
        self.history.drain(..excess);
    }

    /// The newest history lines that fit between the header and the input row.
    pub fn visible_history(&self) -> &[String] {
        let capacity = usize::from(self.terminal_size.1)
            .saturating_sub(HEADER_ROWS)
            .saturating_sub(1);
        let skip = self.history.len().saturating_sub(capacity);
        &self.history[skip..]
    }

    /// Terminal row the input line is painted on.
    pub fn input_row(&self) -> usize {
        HEADER_ROWS + self.visible_history().len()
    }

    /// Where the hardware cursor goes this frame.
    pub fn cursor_position(&self) -> ScreenPosition {
        let before = self.input.buffer().text_before_cursor();
        let (width, height) = self.terminal_size;
        self.projector
            .project(&self.input.cursor_request(&before, self.input_row()))
            .clamp_to(width, height)
    }

    /// Display width of `text` under this model's width profile.
    pub fn text_width(&self, text: &str) -> usize {
        self.projector.profile().str_width(text)
    }
}
