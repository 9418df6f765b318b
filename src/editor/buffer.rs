use ropey::Rope;

/// Read-only copy of a buffer's content and cursor.
///
/// Taken once per render pass; holding one never affects later edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// The full text of the buffer.
    pub content: String,
    /// Cursor position in chars (Unicode scalar values).
    pub cursor: usize,
}

impl Snapshot {
    /// Number of chars in the content.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// The content up to the cursor.
    pub fn text_before_cursor(&self) -> &str {
        let end = self
            .content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(byte, _)| byte);
        &self.content[..end]
    }
}

/// A single-line text buffer with one cursor.
///
/// Content lives in a rope so every index is a char index, never a byte
/// offset. The cursor is always within `0..=char_len()`.
#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer pre-seeded with `text`, cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        Self { rope, cursor }
    }

    /// The cursor position in chars.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of chars in the buffer.
    pub fn char_len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The text up to the cursor.
    pub fn text_before_cursor(&self) -> String {
        self.rope.slice(..self.cursor).to_string()
    }

    /// Copy out the content and cursor without touching either.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            content: self.text(),
            cursor: self.cursor,
        }
    }

    /// Insert `text` at the cursor and move the cursor past it.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.rope.insert(self.cursor, text);
        self.cursor += text.chars().count();
    }

    /// Insert a single char at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the char before the cursor (Backspace).
    ///
    /// Returns `true` if a char was deleted.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        true
    }

    /// Delete the char at the cursor (Delete).
    ///
    /// Returns `true` if a char was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..=self.cursor);
        true
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.rope.len_chars() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start of the buffer (Home).
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end of the buffer (End).
    pub fn move_end(&mut self) {
        self.cursor = self.rope.len_chars();
    }

    /// Move cursor to a char index, clamped to the buffer length.
    pub fn move_to(&mut self, index: usize) {
        self.cursor = index.min(self.rope.len_chars());
    }

    /// Replace the whole buffer and put the cursor at the end.
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.rope.len_chars();
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.rope = Rope::new();
        self.cursor = 0;
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .field("cursor", &self.cursor)
            .finish()
    }
}
