//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::str::FromStr;

use super::DEFAULT_DIFF_TOOL;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default; keeps the terminal clean for prompts)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one edmv run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Include entries starting with "." when listing directories
    pub all_files: bool,
    /// Expand symlinked directories instead of listing the link itself
    pub follow_symlinks: bool,
    /// Skip destructive confirmation prompts
    pub force: bool,
    /// Delete directories and their contents recursively
    pub recursive: bool,
    /// Show old and new listings side by side in the editor
    pub windows: bool,
    /// Show old and new listings as a structural diff
    pub diff: bool,
    /// Editor command overriding the default invocation (CLI -c or config)
    pub editor: Option<String>,
    /// External diff tool selected by -m
    pub diff_tool: String,
    /// Console verbosity
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            all_files: false,
            follow_symlinks: false,
            force: false,
            recursive: false,
            windows: false,
            diff: false,
            editor: None,
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
            log_level: LogLevel::Normal,
        }
    }
}

impl Config {
    /// True when the editor should be shown both the old and the new listing.
    #[inline]
    pub fn two_listings(&self) -> bool {
        self.windows || self.diff
    }
}
