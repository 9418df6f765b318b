//! Timing scopes and the optional debug event log.
//!
//! With `--perf` on, each scope keeps a `[perf]` line that `main` prints to
//! stderr once the terminal is restored, and also writes it to the debug log.
//! The debug log is a plain file of timestamped events (messages, cursor
//! moves) for chasing IME placement problems after the fact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<EventLog>> = LazyLock::new(|| Mutex::new(EventLog::closed()));
static REPORT: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Drop guard that reports elapsed time for a named scope.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(scope = self.name, elapsed_ms, "perf");
        log_event("perf", format!("{} {elapsed_ms:.3} ms", self.name));
        REPORT
            .lock()
            .expect("perf report lock poisoned")
            .push(format!("[perf] {}: {elapsed_ms:.2} ms", self.name));
    }
}

#[derive(Debug)]
struct EventLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    fn closed() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }

    fn open(path: &Path) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "imeline debug log start")?;
        writer.flush()?;
        Ok(Self {
            start: Instant::now(),
            writer: Some(writer),
        })
    }

    fn record(&mut self, name: &str, detail: &str) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {detail}");
            let _ = writer.flush();
        }
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Drain the timing lines recorded since the last call.
pub fn take_report() -> Vec<String> {
    std::mem::take(&mut *REPORT.lock().expect("perf report lock poisoned"))
}

/// Open (or with `None`, close) the debug event log.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let log = match path {
        Some(path) => EventLog::open(path)?,
        None => EventLog::closed(),
    };
    *EVENT_LOG.lock().expect("event log lock poisoned") = log;
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    EVENT_LOG
        .lock()
        .expect("event log lock poisoned")
        .writer
        .is_some()
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    EVENT_LOG
        .lock()
        .expect("event log lock poisoned")
        .record(name, detail.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    // ENABLED is global, so toggling and reporting share one test.
    #[test]
    fn test_enabled_scope_lands_in_report() {
        set_enabled(true);
        assert!(is_enabled());
        {
            let _scope = scope("test.enabled");
        }
        set_enabled(false);
        assert!(!is_enabled());
        {
            let _scope = scope("test.disabled");
        }

        let report = take_report();
        assert!(report.iter().any(|line| line.starts_with("[perf] test.enabled: ")));
        assert!(!report.iter().any(|line| line.contains("test.disabled")));
        assert!(take_report().is_empty());
    }

    #[test]
    fn test_debug_log_records_events_until_closed() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());
        log_event("cursor.project", "column=4 row=4");
        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());
        log_event("cursor.project", "after close");

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("imeline debug log start"));
        assert!(content.contains("cursor.project: column=4 row=4"));
        assert!(!content.contains("after close"));
    }
}
