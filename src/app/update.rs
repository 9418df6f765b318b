use crate::app::Model;
use crate::input::{InputOutcome, KeyInput};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A decoded key for the input field
    Key(KeyInput),
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    /// Leave the application
    Quit,
}

/// Apply one message to the model.
///
/// Every edit goes through here before the next render, so the cursor
/// projection computed while drawing always sees the latest buffer.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Key(key) => {
            if let InputOutcome::Submitted(text) = model.input.apply(key) {
                if text.trim().is_empty() {
                    tracing::trace!("ignoring blank submit");
                } else {
                    tracing::debug!(chars = text.chars().count(), "submitted line");
                    model.push_history(text);
                    model.input.buffer_mut().reset();
                }
            }
        }
        Message::Resize(width, height) => {
            tracing::debug!(width, height, "terminal resized");
            model.terminal_size = (width, height);
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
