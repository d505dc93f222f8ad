//! Interactive confirmation prompts.
//!
//! Two shapes are offered. `ask` is the keyed six-way prompt used for
//! destructive decisions: yes / no / always / never / quit / help, where
//! always and never are remembered under the question's key for the rest of
//! the run. `confirm` is the plain yes/no question with a default, used for
//! "edit again?".
//!
//! The prompter owns the per-run answer memo and is passed explicitly, so
//! reconciliation stays reentrant and the whole thing can be driven from
//! in-memory buffers in tests.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::errors::EdmvError;
use crate::shutdown;

/// One answer to a keyed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Quit,
    Always,
    Never,
    Help,
}

impl Answer {
    /// Parse user input, case-insensitive. `None` means "ask again".
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "ye" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            "q" | "quit" => Some(Answer::Quit),
            "a" | "always" => Some(Answer::Always),
            "ne" | "nev" | "neve" | "never" => Some(Answer::Never),
            "h" | "help" | "?" => Some(Answer::Help),
            _ => None,
        }
    }

    /// Project onto plain yes/no. Quit and Help never reach this point.
    pub fn resolve(self) -> bool {
        matches!(self, Answer::Yes | Answer::Always)
    }

    /// Whether the answer is remembered under the prompt's key.
    pub fn is_sticky(self) -> bool {
        matches!(self, Answer::Always | Answer::Never)
    }
}

const LEGEND: &str = "\
  y - yes, do it
  n - no, skip it
  a - always, do this and everything like it without asking again
  never - skip this and everything like it without asking again
  q - quit, stop without applying anything further
  h - show this help";

/// Prompt engine over arbitrary input/output streams.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    remembered: HashMap<&'static str, bool>,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter wired to the controlling terminal (stdin/stderr).
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            remembered: HashMap::new(),
        }
    }

    /// Keyed prompt. A remembered always/never answer for `key` returns
    /// immediately; otherwise the user is asked until they give a valid
    /// answer. Quit (and end of input) unwinds as a cancellation.
    pub fn ask(&mut self, question: &str, key: &'static str) -> Result<bool> {
        if let Some(&stored) = self.remembered.get(key) {
            return Ok(stored);
        }

        loop {
            if shutdown::is_requested() {
                return Err(EdmvError::Cancelled.into());
            }
            write!(self.output, "{question} [y/n/a/never/q/h] ").context("write prompt")?;
            self.output.flush().context("flush prompt")?;

            let Some(line) = self.read_line()? else {
                return Err(EdmvError::Cancelled.into());
            };
            match Answer::parse(&line) {
                Some(Answer::Quit) => return Err(EdmvError::Cancelled.into()),
                Some(Answer::Help) => {
                    writeln!(self.output, "{LEGEND}").context("write prompt help")?;
                }
                Some(answer) => {
                    if answer.is_sticky() {
                        self.remembered.insert(key, answer.resolve());
                    }
                    return Ok(answer.resolve());
                }
                None => {
                    writeln!(self.output, "Please answer one of:\n{LEGEND}")
                        .context("write prompt legend")?;
                }
            }
        }
    }

    /// Plain yes/no question. Empty input takes `default`; otherwise any
    /// case-insensitive prefix of "yes" or "no" is accepted.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            if shutdown::is_requested() {
                return Err(EdmvError::Cancelled.into());
            }
            write!(self.output, "{question} {hint} ").context("write prompt")?;
            self.output.flush().context("flush prompt")?;

            let Some(line) = self.read_line()? else {
                return Err(EdmvError::Cancelled.into());
            };
            let t = line.trim().to_ascii_lowercase();
            if t.is_empty() {
                return Ok(default);
            }
            if "yes".starts_with(&t) {
                return Ok(true);
            }
            if "no".starts_with(&t) {
                return Ok(false);
            }
            writeln!(self.output, "Please respond with 'yes' or 'no' (or 'y' or 'n').")
                .context("write prompt reminder")?;
        }
    }

    /// Read one line; `None` on end of input (the terminal went away).
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).context("read prompt answer")?;
        if n == 0 {
            return Ok(None);
        }
        if shutdown::is_requested() {
            return Err(EdmvError::Cancelled.into());
        }
        Ok(Some(line))
    }

    /// The remembered answer for `key`, if any (test aid).
    pub fn remembered(&self, key: &str) -> Option<bool> {
        self.remembered.get(key).copied()
    }
}
