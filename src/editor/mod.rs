//! Single-line editing buffer.
//!
//! Provides a rope-backed text buffer whose cursor is counted in chars,
//! so multi-byte and astral characters are never split.

mod buffer;

pub use buffer::{Snapshot, TextBuffer};
