use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::width::WidthProfile;

/// How the cursor is shown on the input line.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Move the terminal's own cursor; IME windows follow it.
    #[default]
    Real,
    /// Hide the terminal cursor and paint an inverse-video cell instead.
    Fake,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub cursor: Option<CursorMode>,
    pub width: Option<WidthProfile>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            cursor: other.cursor.or(self.cursor),
            width: other.width.or(self.width),
            debug_log: other
                .debug_log
                .clone()
                .or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("imeline").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("imeline")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("imeline").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("imeline").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".imelinerc")
}

/// Read flag tokens from a config file. A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line on whitespace; `"..."` keeps spaces inside one token.
fn split_line_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            ch if ch.is_whitespace() && !quoted => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            ch => {
                current.push(ch);
                started = true;
            }
        }
    }
    if started {
        tokens.push(current);
    }
    tokens
}

/// Write `flags` as a config file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# imeline defaults (saved with --save)".to_string()];
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(cursor) = flags.cursor {
        lines.push(format!("--cursor {}", cursor_mode_name(cursor)));
    }
    if let Some(width) = flags.width {
        lines.push(format!("--width {}", width_profile_name(width)));
    }
    if let Some(log_path) = &flags.debug_log {
        let shown = log_path.display().to_string();
        if shown.contains('"') {
            anyhow::bail!("Cannot save debug log path containing '\"': {shown}");
        }
        if shown.contains(char::is_whitespace) {
            lines.push(format!("--debug-log \"{shown}\""));
        } else {
            lines.push(format!("--debug-log {shown}"));
        }
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a config file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list; anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--perf" {
            flags.perf = true;
        } else if token == "--cursor" {
            if let Some(next) = tokens.get(i + 1) {
                flags.cursor = parse_cursor_mode(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--cursor=") {
            flags.cursor = parse_cursor_mode(value);
        } else if token == "--width" {
            if let Some(next) = tokens.get(i + 1) {
                flags.width = parse_width_profile(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--width=") {
            flags.width = parse_width_profile(value);
        } else if token == "--debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--debug-log=") {
            flags.debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_cursor_mode(s: &str) -> Option<CursorMode> {
    match s {
        "real" => Some(CursorMode::Real),
        "fake" => Some(CursorMode::Fake),
        _ => None,
    }
}

const fn cursor_mode_name(mode: CursorMode) -> &'static str {
    match mode {
        CursorMode::Real => "real",
        CursorMode::Fake => "fake",
    }
}

fn parse_width_profile(s: &str) -> Option<WidthProfile> {
    match s {
        "standard" => Some(WidthProfile::Standard),
        "east-asian" => Some(WidthProfile::EastAsian),
        _ => None,
    }
}

const fn width_profile_name(profile: WidthProfile) -> &'static str {
    match profile {
        WidthProfile::Standard => "standard",
        WidthProfile::EastAsian => "east-asian",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "imeline".to_string(),
            "--perf".to_string(),
            "--cursor".to_string(),
            "fake".to_string(),
            "--width=east-asian".to_string(),
            "--debug-log=cursor.log".to_string(),
            "--prompt".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.perf);
        assert_eq!(flags.cursor, Some(CursorMode::Fake));
        assert_eq!(flags.width, Some(WidthProfile::EastAsian));
        assert_eq!(flags.debug_log, Some(PathBuf::from("cursor.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_values() {
        let args = vec!["--cursor".to_string(), "blinking".to_string()];
        assert_eq!(parse_flag_tokens(&args).cursor, None);
    }

    #[test]
    fn test_config_union_prefers_later_options() {
        let file = ConfigFlags {
            perf: true,
            cursor: Some(CursorMode::Fake),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            cursor: Some(CursorMode::Real),
            width: Some(WidthProfile::EastAsian),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.perf);
        assert_eq!(merged.cursor, Some(CursorMode::Real));
        assert_eq!(merged.width, Some(WidthProfile::EastAsian));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            perf: true,
            cursor: Some(CursorMode::Fake),
            width: Some(WidthProfile::EastAsian),
            debug_log: Some(PathBuf::from("cursor.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_log_path_with_spaces_survives_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            debug_log: Some(PathBuf::from("my logs/cursor log.txt")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_save_rejects_debug_log_path_with_quote() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            debug_log: Some(PathBuf::from("bad\"name.log")),
            ..ConfigFlags::default()
        };
        assert!(save_config_flags(&path, &flags).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_split_line_tokens_honors_quotes() {
        assert_eq!(split_line_tokens("--cursor  fake"), ["--cursor", "fake"]);
        assert_eq!(
            split_line_tokens("--debug-log \"a b.log\""),
            ["--debug-log", "a b.log"]
        );
        assert_eq!(split_line_tokens("--debug-log=\"a b\""), ["--debug-log=a b"]);
        assert!(split_line_tokens("   ").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
