//! imeline - a width-aware terminal text input.
//!
//! # Usage
//!
//! ```bash
//! imeline
//! imeline --prompt '입력> '
//! imeline --cursor fake
//! imeline --width east-asian --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use imeline::app::App;
use imeline::config::{
    ConfigFlags, CursorMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use imeline::input::DEFAULT_PROMPT;
use imeline::perf;
use imeline::width::WidthProfile;

/// A terminal text input that keeps the IME window at the cursor
#[derive(Parser, Debug)]
#[command(name = "imeline", version, about, long_about = None)]
struct Cli {
    /// Text shown before the input
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Cursor display: move the terminal cursor, or paint one
    #[arg(long, value_enum)]
    cursor: Option<CursorMode>,

    /// Column width of East Asian ambiguous characters
    #[arg(long, value_enum)]
    width: Option<WidthProfile>,

    /// Print timings to stderr on exit
    #[arg(long)]
    perf: bool,

    /// Write key, render and cursor events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// `RUST_LOG` when set and valid, otherwise warnings only.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective configuration");

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("IMELINE_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to open debug log"
        );
    }

    let mut app = App::new(cli.prompt)
        .with_cursor_mode(effective.cursor.unwrap_or_default())
        .with_width_profile(effective.width.unwrap_or_default());

    let result = app.run().context("Application error");
    // The terminal is restored by now, so the report is not painted over.
    for line in perf::take_report() {
        eprintln!("{line}");
    }
    result
}
