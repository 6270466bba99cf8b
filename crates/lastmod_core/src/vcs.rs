//! Version-control queries.
//!
//! [`VersionControl`] is the capability the updater uses to learn when a file
//! last changed and whether it has uncommitted edits. [`GitCli`] implements it
//! by shelling out to the `git` binary. Failures of the external process are
//! folded into "no answer" rather than surfaced as errors.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};

/// Format produced by `git log --date=iso`, e.g. `2024-01-02 09:30:00 +0900`.
pub const GIT_ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// When a file was last changed according to version-control history.
///
/// Keeps the exact text git printed, which is what gets written into the
/// front matter and compared against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTimestamp {
    raw: String,
    parsed: DateTime<FixedOffset>,
}

impl HistoryTimestamp {
    /// Parse git's `--date=iso` output. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        DateTime::parse_from_str(raw, GIT_ISO_FORMAT)
            .ok()
            .map(|parsed| Self {
                raw: raw.to_string(),
                parsed,
            })
    }

    /// The timestamp exactly as git printed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The timestamp as a date-time with its original offset.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.parsed
    }
}

impl fmt::Display for HistoryTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Whether a file has pending uncommitted work in the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Modified or added, not yet committed.
    Changed,
    /// Clean, untracked, deleted, or unknown.
    Unchanged,
}

impl ChangeStatus {
    /// Classify `git status --porcelain` output for a single path.
    ///
    /// Only the first two characters of the first line (the XY status code)
    /// are inspected; an `M` or `A` in either column means [`Changed`](Self::Changed).
    pub fn from_porcelain(output: &str) -> Self {
        let code: String = output
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(2)
            .collect();

        if code.contains('M') || code.contains('A') {
            ChangeStatus::Changed
        } else {
            ChangeStatus::Unchanged
        }
    }
}

/// Queries against the version-control history of the working tree.
pub trait VersionControl {
    /// Most recent change timestamp recorded for `path`, or `None` if there is
    /// no history or the query failed.
    fn last_change(&self, path: &Path) -> Option<HistoryTimestamp>;

    /// Working-tree status of `path`. Query failures count as unchanged.
    fn working_tree_status(&self, path: &Path) -> ChangeStatus;
}

impl<T: VersionControl> VersionControl for &T {
    fn last_change(&self, path: &Path) -> Option<HistoryTimestamp> {
        (*self).last_change(path)
    }

    fn working_tree_status(&self, path: &Path) -> ChangeStatus {
        (*self).working_tree_status(path)
    }
}

/// [`VersionControl`] backed by the `git` command-line tool.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    work_dir: PathBuf,
}

impl GitCli {
    /// Run `git` from PATH inside `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            work_dir: work_dir.into(),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Check whether the git binary can be spawned at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run git with `args` followed by `-- <path>`, returning stdout on success.
    fn run(&self, args: &[&str], path: &Path) -> Option<String> {
        // Relative to the work dir so symlinked temp/home dirs don't confuse git.
        let path = path.strip_prefix(&self.work_dir).unwrap_or(path);
        let output = Command::new(&self.program)
            .args(args)
            .arg("--")
            .arg(path)
            .current_dir(&self.work_dir)
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                log::debug!("Failed to run {}: {}", self.program.display(), e);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!(
                "git {} failed for {}: {}",
                args.join(" "),
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn last_change(&self, path: &Path) -> Option<HistoryTimestamp> {
        let stdout = self.run(&["log", "-1", "--format=%ad", "--date=iso"], path)?;
        let text = stdout.trim();
        if text.is_empty() {
            return None;
        }

        let timestamp = HistoryTimestamp::parse(text);
        if timestamp.is_none() {
            log::debug!("Unrecognized git date '{}' for {}", text, path.display());
        }
        timestamp
    }

    fn working_tree_status(&self, path: &Path) -> ChangeStatus {
        self.run(&["status", "--porcelain"], path)
            .map(|stdout| ChangeStatus::from_porcelain(&stdout))
            .unwrap_or(ChangeStatus::Unchanged)
    }
}
