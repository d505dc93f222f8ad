//! External editor invocation.
//!
//! The editor is an external collaborator: it gets one or two listing paths
//! and we block until it exits. A custom command (CLI -c or config
//! `<editor>`) is whitespace-split into program and leading arguments; the
//! built-in default drives vim, using `-c` scripts for the windowed and
//! diff layouts.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_EDITOR};
use crate::errors::EdmvError;

fn build_command(cfg: &Config, old: Option<&Path>, new: &Path) -> Command {
    if let Some(custom) = cfg.editor.as_deref() {
        let mut parts = custom.split_whitespace();
        let program = parts.next().unwrap_or(DEFAULT_EDITOR);
        let mut cmd = Command::new(program);
        cmd.args(parts);
        if let Some(old) = old {
            cmd.arg(old);
        }
        cmd.arg(new);
        return cmd;
    }

    let mut cmd = Command::new(DEFAULT_EDITOR);
    match old {
        Some(old) if cfg.diff => {
            cmd.arg("-c")
                .arg(format!("view {}", old.display()))
                .arg("-c")
                .arg("diffthis")
                .arg("-c")
                .arg("set splitright")
                .arg("-c")
                .arg("vsp")
                .arg("-c")
                .arg(format!("edit {}", new.display()))
                .arg("-c")
                .arg("diffthis")
                // Identical listings fold to nothing; open the folds so the
                // user sees the lines at all.
                .arg("-c")
                .arg("foldopen");
        }
        Some(old) => {
            cmd.arg("-c")
                .arg(format!("view {}", old.display()))
                .arg("-c")
                .arg("set splitright")
                .arg("-c")
                .arg("vsp")
                .arg("-c")
                .arg(format!("edit {}", new.display()));
        }
        None => {
            cmd.arg(new);
        }
    }
    cmd
}

/// Launch the editor and block until it exits.
/// Failing to spawn at all is fatal; a non-zero exit is only a warning (the
/// listing may still have been written) and reconciliation decides the rest.
pub fn edit_listing(cfg: &Config, old: Option<&Path>, new: &Path) -> Result<()> {
    let mut cmd = build_command(cfg, old, new);
    debug!(command = ?cmd, "launching editor");
    let status = cmd.status().map_err(|e| EdmvError::EditorSpawn {
        command: cmd.get_program().to_string_lossy().into_owned(),
        source: e,
    })?;
    if !status.success() {
        warn!(%status, "editor exited with non-zero status");
    }
    Ok(())
}
