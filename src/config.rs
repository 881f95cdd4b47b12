//! Runtime configuration, resolved once from the environment.

use std::path::PathBuf;

const MODEL_DIR_ENV: &str = "MEDSCREEN_MODEL_DIR";
const REQUIRE_MANIFEST_ENV: &str = "MEDSCREEN_REQUIRE_MANIFEST";
const LOG_MODE_ENV: &str = "MEDSCREEN_LOG_MODE";
const LOG_FILE_ENV: &str = "MEDSCREEN_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file, given whether stdout is interactive.
    ///
    /// Writing logs to the terminal would corrupt the TUI's alternate screen.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the five model artifacts
    pub model_dir: PathBuf,
    /// Refuse to start without an integrity manifest
    pub require_manifest: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            require_manifest: false,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("medscreen.log"),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}

impl Config {
    /// Read configuration from `MEDSCREEN_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_dir: lookup(MODEL_DIR_ENV)
                .filter(|v| !v.trim().is_empty())
                .map_or(defaults.model_dir, PathBuf::from),
            require_manifest: lookup(REQUIRE_MANIFEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_manifest),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup(LOG_FILE_ENV)
                .filter(|v| !v.trim().is_empty())
                .map_or(defaults.log_file, PathBuf::from),
        }
    }
}
