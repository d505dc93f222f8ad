//! Old List collection.
//!
//! Walks the user-supplied roots into an ordered, de-duplicated list of
//! listing lines. Directory children are sorted lexically so the pairing
//! against the edited listing stays stable across runs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::output;

use super::identity::FileId;
use super::listing_line;

/// Build the Old List from the given roots.
/// A root that does not exist (not even as a broken link) is warned about
/// and skipped; it never fails the whole run.
pub fn collect_roots(cfg: &Config, roots: &[PathBuf]) -> Vec<String> {
    let mut collector = Collector::new(cfg);
    for root in roots {
        collector.add(root);
    }
    collector.names
}

struct Collector<'a> {
    cfg: &'a Config,
    names: Vec<String>,
    expanded_dirs: HashSet<FileId>,
    seen_files: HashSet<String>,
}

impl<'a> Collector<'a> {
    fn new(cfg: &'a Config) -> Self {
        Self {
            cfg,
            names: Vec::new(),
            expanded_dirs: HashSet::new(),
            seen_files: HashSet::new(),
        }
    }

    fn add(&mut self, root: &Path) {
        let meta = match fs::symlink_metadata(root) {
            Ok(m) => m,
            Err(_) => {
                warn!(path = %root.display(), "root does not exist");
                output::print_warn(&format!(
                    "ignoring '{}': no such file or directory",
                    root.display()
                ));
                return;
            }
        };

        let is_link = meta.file_type().is_symlink();
        // Follows links: a symlink to a directory counts as a directory here,
        // a broken link does not.
        let is_dir = fs::metadata(root).map(|m| m.is_dir()).unwrap_or(false);

        if is_dir && (!is_link || self.cfg.follow_symlinks) {
            self.add_dir_children(root);
        } else {
            // Plain file, or a symlink we were not asked to follow: one entry.
            self.add_single(root);
        }
    }

    fn add_single(&mut self, path: &Path) {
        let line = listing_line(path);
        if self.seen_files.insert(line.clone()) {
            self.names.push(line);
        }
    }

    fn add_dir_children(&mut self, dir: &Path) {
        match FileId::of(dir) {
            Ok(id) => {
                if !self.expanded_dirs.insert(id) {
                    debug!(path = %dir.display(), "directory already expanded, skipping");
                    return;
                }
            }
            Err(e) => {
                // Identity probe failed (racing unlink?). List it anyway
                // rather than dropping entries.
                debug!(path = %dir.display(), error = %e, "no stable identity for directory");
            }
        }

        let bare = dir == Path::new(".");
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "could not read directory entry");
                    output::print_warn(&format!("could not read entry under '{}': {e}", dir.display()));
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.cfg.all_files && name.starts_with('.') {
                continue;
            }
            // Entries under `.` are listed bare, the way the user would type
            // them; everything else keeps the root joined in front.
            let child = if bare {
                PathBuf::from(entry.file_name())
            } else {
                entry.path().to_path_buf()
            };
            self.names.push(listing_line(&child));
        }
    }
}
