use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::config::CursorMode;

/// Render the whole screen for `model`.
///
/// In [`CursorMode::Real`] the hardware cursor is moved to the projected
/// position as part of the same frame, so the terminal never shows the
/// new glyphs with the old cursor.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let mut lines = header_lines(model);
    let dim = Style::default().add_modifier(Modifier::DIM);
    lines.extend(
        model
            .visible_history()
            .iter()
            .map(|entry| Line::from(Span::styled(format!("  {entry}"), dim))),
    );
    lines.push(input_line(model));

    frame.render_widget(Paragraph::new(lines), area);

    if model.cursor_mode == CursorMode::Real {
        frame.set_cursor_position(model.cursor_position());
    }
}

/// The prompt and buffer text; in fake mode the cursor cell is reversed.
pub fn input_line(model: &Model) -> Line<'static> {
    let snapshot = model.input.buffer().snapshot();
    let mut spans = vec![Span::raw(model.input.prompt().to_string())];

    match model.cursor_mode {
        CursorMode::Real => spans.push(Span::raw(snapshot.content)),
        CursorMode::Fake => {
            let reversed = Style::default().add_modifier(Modifier::REVERSED);
            let before = snapshot.text_before_cursor().to_string();
            let mut rest = snapshot.content[before.len()..].chars();
            let at_cursor = rest.next();
            let after: String = rest.collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                at_cursor.map_or_else(|| " ".to_string(), String::from),
                reversed,
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        }
    }

    Line::from(spans)
}

pub(super) fn header_lines(model: &Model) -> Vec<Line<'static>> {
    let (title, color) = match model.cursor_mode {
        CursorMode::Real => ("imeline (real cursor)", Color::Green),
        CursorMode::Fake => ("imeline (fake cursor)", Color::Red),
    };
    let buffer = model.input.buffer();
    let text = buffer.text();
    let stats = format!(
        "  {} chars, {} cols, cursor at {}",
        buffer.char_len(),
        model.text_width(&text),
        buffer.cursor()
    );
    let hint = match model.cursor_mode {
        CursorMode::Real => "Type Korean, Japanese or Chinese. The IME window follows the cursor.",
        CursorMode::Fake => "Type Korean, Japanese or Chinese. The IME window ignores the painted cursor.",
    };
    let dim = Style::default().add_modifier(Modifier::DIM);

    vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(stats, dim),
        ]),
        Line::from(Span::styled(hint, dim)),
        Line::from(Span::styled("Enter to submit, Esc or Ctrl+C to exit", dim)),
        Line::default(),
    ]
}
