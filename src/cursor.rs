//! Hardware cursor placement for width-aware input lines.
//!
//! [`CursorProjector::project`] turns a char-indexed cursor into the
//! terminal column the real cursor must sit on, so IME composition
//! windows open next to the text being edited.

use ratatui::layout::Position;

use crate::editor::Snapshot;
use crate::width::WidthProfile;

/// What the projector needs to place the cursor on one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorRequest<'a> {
    /// Fixed prefix painted before the editable text.
    pub prompt: &'a str,
    /// Buffer content up to the cursor.
    pub text_before_cursor: &'a str,
    /// Terminal row of the input line, supplied by the host layout.
    pub row: usize,
}

/// Zero-based terminal cell for the hardware cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPosition {
    pub column: usize,
    pub row: usize,
}

impl ScreenPosition {
    /// Keep the position inside a `width` x `height` terminal. The line
    /// does not wrap, so an overlong column pins to the last cell.
    #[must_use]
    pub fn clamp_to(self, width: u16, height: u16) -> Self {
        Self {
            column: self.column.min(usize::from(width.saturating_sub(1))),
            row: self.row.min(usize::from(height.saturating_sub(1))),
        }
    }
}

impl From<ScreenPosition> for Position {
    fn from(pos: ScreenPosition) -> Self {
        Self::new(
            u16::try_from(pos.column).unwrap_or(u16::MAX),
            u16::try_from(pos.row).unwrap_or(u16::MAX),
        )
    }
}

/// Maps a cursor request to a screen position.
///
/// Stateless apart from the width profile; calling it repeatedly with the
/// same request gives the same answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorProjector {
    profile: WidthProfile,
}

impl CursorProjector {
    pub const fn new(profile: WidthProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> WidthProfile {
        self.profile
    }

    /// Column after the prompt and the text before the cursor; row passes through.
    ///
    /// Prompt and text are measured apart since they are painted as separate
    /// spans, and a combining mark at the start of the text does not join the
    /// prompt's last cluster on screen.
    pub fn project(&self, request: &CursorRequest<'_>) -> ScreenPosition {
        let column = self.profile.str_width(request.prompt)
            + self.profile.str_width(request.text_before_cursor);
        ScreenPosition {
            column,
            row: request.row,
        }
    }

    /// Project straight from a buffer snapshot.
    pub fn project_snapshot(&self, prompt: &str, snapshot: &Snapshot, row: usize) -> ScreenPosition {
        self.project(&CursorRequest {
            prompt,
            text_before_cursor: snapshot.text_before_cursor(),
            row,
        })
    }
}
