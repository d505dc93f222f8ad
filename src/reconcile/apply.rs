//! Applying deletes and renames, one pair at a time.
//!
//! OS-level failures never abort the batch: they are reported with the
//! offending path and the error text, the pair counts as failed, and the
//! walk moves on. Only a cancellation propagates.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::listing::listing_path;
use crate::output;
use crate::prompt::Prompter;

/// Result of applying one aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Kept,
    Deleted,
    Renamed,
    Skipped,
    Failed,
}

/// Delete `old` after confirmation (key "delete"), honoring force mode.
pub fn apply_delete<R: BufRead, W: Write>(
    cfg: &Config,
    prompter: &mut Prompter<R, W>,
    old: &str,
) -> Result<Outcome> {
    if !cfg.force && !prompter.ask(&format!("Are you sure to delete '{old}'?"), "delete")? {
        output::print_user(&format!("Skipping '{old}' ..."));
        return Ok(Outcome::Skipped);
    }

    let path = listing_path(old);
    match remove_entry(cfg, &path) {
        Ok(()) => {
            info!(path = %path.display(), "deleted");
            Ok(Outcome::Deleted)
        }
        Err(e) => {
            report_os_failure("delete", &path, &e);
            Ok(Outcome::Failed)
        }
    }
}

fn remove_entry(cfg: &Config, path: &Path) -> io::Result<()> {
    // symlink_metadata does not follow: a symlink to a directory is removed
    // as the link itself, never as the tree behind it.
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        if cfg.recursive {
            fs::remove_dir_all(path)
        } else {
            // Non-recursive: only an empty directory goes away.
            fs::remove_dir(path)
        }
    } else {
        fs::remove_file(path)
    }
}

/// Rename `old` to `new`, creating missing parent directories and asking
/// before overwriting an existing destination (key "overwrite").
pub fn apply_rename<R: BufRead, W: Write>(
    cfg: &Config,
    prompter: &mut Prompter<R, W>,
    old: &str,
    new: &str,
) -> Result<Outcome> {
    output::print_user(&format!("Renaming '{old}' to '{new}' ..."));
    let src = listing_path(old);
    let dest = listing_path(new);

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        report_os_failure("create parent directories for", &dest, &e);
        return Ok(Outcome::Failed);
    }

    // lexists: a dangling symlink at the destination still counts.
    let dest_exists = fs::symlink_metadata(&dest).is_ok();
    if dest_exists
        && !cfg.force
        && !prompter.ask(&format!("Destination '{new}' exists, overwrite?"), "overwrite")?
    {
        output::print_user(&format!("Skipping '{old}' ..."));
        return Ok(Outcome::Skipped);
    }

    match fs::rename(&src, &dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "renamed");
            Ok(Outcome::Renamed)
        }
        Err(e) => {
            report_os_failure("rename", &src, &e);
            Ok(Outcome::Failed)
        }
    }
}

fn report_os_failure(op: &str, path: &Path, e: &io::Error) {
    #[cfg(unix)]
    let hint: &str = match e.raw_os_error() {
        Some(code) if code == libc::EXDEV => " (cross-filesystem; move it manually)",
        Some(code) if code == libc::ENOTEMPTY => " (directory not empty; use -r to delete recursively)",
        Some(code) if code == libc::EACCES || code == libc::EPERM => " (check permissions)",
        _ => "",
    };
    #[cfg(not(unix))]
    let hint: &str = "";

    error!(path = %path.display(), error = %e, operation = op, "filesystem operation failed");
    output::print_error(&format!("can not {op} '{}': {e}{hint}", path.display()));
}
