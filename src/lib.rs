// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. cursor::CursorRequest)
    clippy::module_name_repetitions
)]

//! # imeline
//!
//! A single-line terminal text input that keeps the real terminal cursor
//! where the text cursor is, so input-method (IME) composition windows
//! open in the right place for Korean, Japanese and Chinese input.
//!
//! ## Core
//!
//! - [`editor::TextBuffer`]: text and cursor counted in chars, never bytes
//! - [`width`]: zero/one/two column classification of every char
//! - [`cursor::CursorProjector`]: prompt + text before the cursor to a
//!   screen column
//!
//! A host mutates the buffer for each key, then projects the cursor and
//! moves the terminal cursor there before painting the next frame:
//!
//! ```
//! use imeline::cursor::{CursorProjector, CursorRequest};
//! use imeline::editor::TextBuffer;
//!
//! let mut buf = TextBuffer::new();
//! buf.insert("안녕");
//! let before = buf.text_before_cursor();
//! let pos = CursorProjector::default().project(&CursorRequest {
//!     prompt: "> ",
//!     text_before_cursor: &before,
//!     row: 4,
//! });
//! assert_eq!((pos.column, pos.row), (6, 4));
//! ```
//!
//! ## Host
//!
//! The `imeline` binary embeds the core in a ratatui event loop using
//! The Elm Architecture (TEA):
//! - [`app`]: Model, messages, update and the event loop
//! - [`input`]: Logical key events and the input field
//! - [`ui`]: Painting and hardware cursor placement
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod input;
pub mod perf;
pub mod ui;
pub mod width;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cursor::{CursorProjector, CursorRequest, ScreenPosition};
    pub use crate::editor::{Snapshot, TextBuffer};
    pub use crate::input::{InputOutcome, KeyInput, TextInput};
    pub use crate::width::{CharWidth, WidthProfile};
}
