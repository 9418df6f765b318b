use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; imeline requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);
        let paste_enabled = Self::enable_bracketed_paste(&mut stdout());

        let mut model = Model::new(self.prompt.clone(), (size.width, size.height))
            .with_cursor_mode(self.cursor_mode)
            .with_width_profile(self.width_profile);
        crate::perf::log_event(
            "init",
            format!(
                "terminal={}x{} cursor={:?} width={:?} bracketed_paste={}",
                size.width, size.height, self.cursor_mode, self.width_profile, paste_enabled
            ),
        );

        let result = Self::event_loop(&mut terminal, &mut model);

        if paste_enabled
            && let Err(err) = execute!(stdout(), DisableBracketedPaste)
        {
            tracing::warn!(%err, "failed to disable bracketed paste");
        }
        ratatui::restore();

        result
    }

    /// Turn on bracketed paste, returning whether the terminal accepted it.
    ///
    /// Without it a paste arrives as keystrokes and every newline submits.
    pub(super) fn enable_bracketed_paste(out: &mut impl Write) -> bool {
        match execute!(out, EnableBracketedPaste) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "bracketed paste unavailable; pasted newlines will submit");
                crate::perf::log_event("paste.disabled", err.to_string());
                false
            }
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                let pos = model.cursor_position();
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} cursor=({}, {}) chars={} cursor_index={}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        pos.column,
                        pos.row,
                        model.input.buffer().char_len(),
                        model.input.buffer().cursor()
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Some(msg) = Self::handle_event(&event::read()?) {
                    Self::dispatch(model, msg, frame_idx);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and IME commits into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?) {
                        drained += 1;
                        Self::dispatch(model, msg, frame_idx);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }
        }
        tracing::debug!(frames = frame_idx, "event loop finished");
        Ok(())
    }

    fn dispatch(model: &mut Model, msg: Message, frame_idx: u64) {
        crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
        *model = update(std::mem::take(model), msg);
    }
}
