//! Typed error definitions for edmv.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdmvError {
    /// The user answered "quit" to a prompt, declined the re-edit question,
    /// or interrupted the process. Not an error in the usual sense: callers
    /// stop applying work, release resources and exit non-zero.
    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Failed to launch editor '{command}': {source}")]
    EditorSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to access scratch listing {path}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
