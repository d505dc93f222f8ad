//! Scratch listing files round-tripped through the editor.
//!
//! A scratch file is a `NamedTempFile`: it exists for exactly one run and is
//! removed when the owning value drops, which covers every exit path
//! (normal completion, count-mismatch abort, quit, interrupt unwinding).

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::{Builder, NamedTempFile};

use crate::errors::EdmvError;

pub struct Scratch {
    file: NamedTempFile,
}

impl Scratch {
    /// Create a scratch file holding `names`, one per line with a trailing
    /// newline each, flushed so an external process sees the full content.
    pub fn with_names(prefix: &str, names: &[String]) -> Result<Self> {
        let mut file = Builder::new()
            .prefix(prefix)
            .tempfile()
            .context("create scratch listing file")?;
        for name in names {
            writeln!(file, "{name}").map_err(|e| EdmvError::Scratch {
                path: file.path().to_path_buf(),
                source: e,
            })?;
        }
        file.flush().map_err(|e| EdmvError::Scratch {
            path: file.path().to_path_buf(),
            source: e,
        })?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Re-read the listing from disk. Reads by path, not through the original
    /// handle: editors that write via rename swap the inode underneath us and
    /// the old descriptor would keep showing the pre-edit content.
    pub fn read_names(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(self.file.path()).map_err(|e| EdmvError::Scratch {
            path: self.file.path().to_path_buf(),
            source: e,
        })?;
        Ok(parse_listing(&content))
    }
}

/// Split listing text into entries: one per line, trailing whitespace
/// trimmed, blank lines preserved as empty entries (the deletion sentinel).
pub fn parse_listing(content: &str) -> Vec<String> {
    content.lines().map(|l| l.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn roundtrip_preserves_order_and_count() {
        let list = names(&["a.txt", "sub/b.txt", "z"]);
        let scratch = Scratch::with_names("edmv.test.", &list).unwrap();
        assert_eq!(scratch.read_names().unwrap(), list);
    }

    #[test]
    fn reread_sees_external_rewrite() {
        let list = names(&["one", "two"]);
        let scratch = Scratch::with_names("edmv.test.", &list).unwrap();

        // Replace the file wholesale, as editors writing via rename do.
        let path = scratch.path().to_path_buf();
        fs::remove_file(&path).unwrap();
        fs::write(&path, "one\n\n").unwrap();

        assert_eq!(scratch.read_names().unwrap(), names(&["one", ""]));
    }

    #[test]
    fn parse_keeps_blank_lines_and_trims_trailing_whitespace() {
        let parsed = parse_listing("a.txt \n\nb.txt\t\n");
        assert_eq!(parsed, names(&["a.txt", "", "b.txt"]));
    }

    #[test]
    fn parse_tolerates_missing_final_newline() {
        assert_eq!(parse_listing("a\nb"), names(&["a", "b"]));
    }

    #[test]
    fn scratch_file_is_removed_on_drop() {
        let list = names(&["x"]);
        let scratch = Scratch::with_names("edmv.test.", &list).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }
}
