//! Reconciliation: edit, re-parse, align, apply.
//!
//! The state machine is COLLECTED -> EDITING -> (COUNT_MISMATCH -> EDITING |
//! ALIGNED) -> APPLIED. The only retry loop in the program is the re-edit on
//! count mismatch, and it runs only with the user's consent. Nothing touches
//! the filesystem until the edited listing has exactly as many lines as the
//! original.

mod apply;
mod plan;

pub use apply::Outcome;
pub use plan::{Action, classify};

use std::io::{BufRead, Write};

use anyhow::{Result, ensure};
use tracing::debug;

use crate::config::Config;
use crate::editor;
use crate::errors::EdmvError;
use crate::listing::Scratch;
use crate::output;
use crate::prompt::Prompter;
use crate::shutdown;

/// Counts of what one reconciliation pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub kept: usize,
    pub deleted: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn line(&self) -> String {
        format!(
            "{} renamed, {} deleted, {} skipped, {} failed, {} unchanged",
            self.renamed, self.deleted, self.skipped, self.failed, self.kept
        )
    }
}

/// One edit-and-reconcile pass over an Old List.
///
/// Owns the scratch files; they are removed when the session drops, on
/// every path out of here (completion, abort, quit, interrupt).
pub struct Session {
    cfg: Config,
    old: Vec<String>,
    new_scratch: Scratch,
    old_scratch: Option<Scratch>,
}

impl Session {
    /// Serialize the Old List into scratch files ready for the editor.
    /// The second (old-names) file exists only in windowed/diff modes.
    pub fn new(cfg: Config, old: Vec<String>) -> Result<Self> {
        let new_scratch = Scratch::with_names("edmv.newnames.", &old)?;
        let old_scratch = if cfg.two_listings() {
            Some(Scratch::with_names("edmv.oldnames.", &old)?)
        } else {
            None
        };
        Ok(Self {
            cfg,
            old,
            new_scratch,
            old_scratch,
        })
    }

    /// Run the editor until the edited listing aligns with the original,
    /// then apply the implied operations.
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<Summary> {
        let new = self.edit_until_aligned(prompter)?;
        self.apply(prompter, &new)
    }

    /// The EDITING / COUNT_MISMATCH loop.
    fn edit_until_aligned<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Vec<String>> {
        loop {
            editor::edit_listing(
                &self.cfg,
                self.old_scratch.as_ref().map(Scratch::path),
                self.new_scratch.path(),
            )?;
            if shutdown::is_requested() {
                return Err(EdmvError::Cancelled.into());
            }

            let new = self.new_scratch.read_names()?;
            let diff = new.len() as i64 - self.old.len() as i64;
            if diff == 0 {
                debug!(entries = new.len(), "listing aligned");
                return Ok(new);
            }

            let verb = if diff > 0 { "added" } else { "removed" };
            let n = diff.unsigned_abs();
            output::print_error(&format!(
                "you {verb} {n} line{}",
                if n == 1 { "" } else { "s" }
            ));
            if self.cfg.force {
                // Nobody to ask in force mode; abort before touching anything.
                return Err(EdmvError::Cancelled.into());
            }
            if !prompter.confirm("Would you like to edit the file list again?", true)? {
                return Err(EdmvError::Cancelled.into());
            }
            // The scratch file is not rewritten: the next editor round starts
            // from the just-edited (wrong-length) draft.
        }
    }

    /// The ALIGNED -> APPLIED walk. Public so the apply semantics can be
    /// exercised without an editor in between.
    pub fn apply<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        new: &[String],
    ) -> Result<Summary> {
        ensure!(
            self.old.len() == new.len(),
            "refusing to apply: listing has {} lines, expected {}",
            new.len(),
            self.old.len()
        );

        let mut summary = Summary::default();
        for (old, new) in self.old.iter().zip(new) {
            if shutdown::is_requested() {
                return Err(EdmvError::Cancelled.into());
            }
            let outcome = match classify(old, new) {
                Action::Keep => Outcome::Kept,
                Action::Delete => apply::apply_delete(&self.cfg, prompter, old)?,
                Action::Rename { to } => apply::apply_rename(&self.cfg, prompter, old, to)?,
            };
            match outcome {
                Outcome::Kept => summary.kept += 1,
                Outcome::Deleted => summary.deleted += 1,
                Outcome::Renamed => summary.renamed += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        Ok(summary)
    }

    /// The Old List as collected (test aid).
    pub fn old_names(&self) -> &[String] {
        &self.old
    }
}
