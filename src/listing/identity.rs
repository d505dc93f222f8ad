//! Stable file identity for directory de-duplication.
//!
//! Two different spellings of the same directory ("dir", "./dir", a path
//! through a symlink) must not get expanded twice. String comparison cannot
//! decide that, so identity is taken from the filesystem: device and inode
//! on Unix, the canonicalized path elsewhere.

use std::io;
use std::path::Path;

/// Identity of the file a path points at (symlinks followed).
#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
impl FileId {
    pub fn of(path: &Path) -> io::Result<FileId> {
        use std::os::unix::fs::MetadataExt;
        let meta = std::fs::metadata(path)?;
        Ok(FileId {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }
}

/// Identity of the file a path points at (symlinks followed).
#[cfg(not(unix))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId {
    real: std::path::PathBuf,
}

#[cfg(not(unix))]
impl FileId {
    pub fn of(path: &Path) -> io::Result<FileId> {
        // dunce keeps canonicalized Windows paths free of \\?\ prefixes so
        // equal directories compare equal.
        Ok(FileId {
            real: dunce::canonicalize(path)?,
        })
    }
}
