//! Demo host and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The input field, submit history and layout
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{HEADER_ROWS, MAX_HISTORY, Model};
pub use update::{Message, update};

use crate::config::CursorMode;
use crate::input::DEFAULT_PROMPT;
use crate::width::WidthProfile;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    prompt: String,
    cursor_mode: CursorMode,
    width_profile: WidthProfile,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl App {
    /// Create a new application showing `prompt` before the input.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            cursor_mode: CursorMode::Real,
            width_profile: WidthProfile::Standard,
        }
    }

    /// Choose between the terminal cursor and a painted one.
    pub const fn with_cursor_mode(mut self, mode: CursorMode) -> Self {
        self.cursor_mode = mode;
        self
    }

    /// Set how ambiguous-width characters are measured.
    pub const fn with_width_profile(mut self, profile: WidthProfile) -> Self {
        self.width_profile = profile;
        self
    }
}

#[cfg(test)]
mod tests;
