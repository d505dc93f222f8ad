//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - -m implies -d and selects the configured external diff tool.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the edmv library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Rename or delete files and directories by editing their names in a text editor"
)]
pub struct Args {
    /// Do not ignore entries starting with ".".
    #[arg(short = 'a', long = "all", help = "Do not ignore entries starting with \".\"")]
    pub all: bool,

    /// Follow symbolic links when expanding directories.
    #[arg(short = 's', long, help = "Follow symlinks")]
    pub follow_symlinks: bool,

    /// Bypass "Are you sure?" prompts.
    #[arg(short = 'f', long, help = "Bypass \"Are you sure?\" prompts")]
    pub force: bool,

    /// Remove directories and their contents recursively.
    #[arg(
        short = 'r',
        long,
        help = "Remove directories and their contents recursively"
    )]
    pub recursive: bool,

    /// Open old and new filenames in two windows side by side.
    #[arg(
        short = 'w',
        long,
        help = "Open old and new filenames in two windows side by side"
    )]
    pub windows: bool,

    /// Same as -w but in diff mode.
    #[arg(short = 'd', long, help = "Same as -w but in diff mode")]
    pub diff: bool,

    /// Same as -d but open with the configured diff tool (meld by default).
    #[arg(
        short = 'm',
        long,
        help = "Same as -d but open with the configured diff tool"
    )]
    pub meld: bool,

    /// Use a custom editor command (can be combined with -d).
    #[arg(
        short = 'c',
        long = "command",
        value_name = "CMD",
        help = "Use custom editor command (can be combined with -d)"
    )]
    pub command: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where edmv will look for the config file (or EDMV_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by edmv and exit")]
    pub print_config: bool,

    /// Files or directories to rename (defaults to the current directory).
    #[arg(value_name = "FILE", value_hint = ValueHint::AnyPath)]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Roots to collect; defaults to `.` when none were given.
    pub fn roots(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.files.clone()
        }
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if self.all {
            cfg.all_files = true;
        }
        if self.follow_symlinks {
            cfg.follow_symlinks = true;
        }
        if self.force {
            cfg.force = true;
        }
        if self.recursive {
            cfg.recursive = true;
        }
        if self.windows {
            cfg.windows = true;
        }
        if self.diff {
            cfg.diff = true;
        }
        if self.meld {
            // -m is sugar for "-d plus the external diff tool as editor".
            cfg.diff = true;
            cfg.editor = Some(cfg.diff_tool.clone());
        }
        if let Some(cmd) = &self.command {
            cfg.editor = Some(cmd.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
