//! Progress events emitted by the [`Updater`](super::Updater).
//!
//! Each step of a run is reported as an [`UpdateEvent`]. The `Display` impl
//! renders the line-oriented console message for the event.

use std::fmt;
use std::path::{Path, PathBuf};

/// How loud an event is when shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Progress and expected skips.
    Info,
    /// The file was left alone for a reason the user may want to look at.
    Warning,
    /// An I/O fault prevented processing.
    Error,
}

/// Events emitted while scanning directories and patching files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    /// Scanning of a configured directory started.
    DirectoryStarted {
        /// Directory as configured.
        dir: PathBuf,
    },

    /// A configured directory does not exist and was skipped.
    DirectoryMissing {
        /// Directory as configured.
        dir: PathBuf,
    },

    /// A directory exists but could not be listed.
    DirectoryFailed {
        /// Directory as configured.
        dir: PathBuf,
        /// Error description.
        error: String,
    },

    /// The file has no uncommitted changes and was not examined.
    SkippedUnchanged {
        /// Path of the file.
        path: PathBuf,
    },

    /// The stored timestamp already equals the history timestamp.
    UpToDate {
        /// Path of the file.
        path: PathBuf,
        /// Front matter key that was compared.
        field: String,
    },

    /// The timestamp field was written (or would be, in a dry run).
    Updated {
        /// Path of the file.
        path: PathBuf,
        /// Front matter key that was written.
        field: String,
        /// New value.
        value: String,
        /// Nothing was actually written.
        dry_run: bool,
    },

    /// Version control had no timestamp for the file.
    NoHistory {
        /// Path of the file.
        path: PathBuf,
    },

    /// The file has no front matter block and was left untouched.
    NoFrontmatter {
        /// Path of the file.
        path: PathBuf,
    },

    /// Reading or writing the file failed.
    Failed {
        /// Path of the file.
        path: PathBuf,
        /// Error description.
        error: String,
    },
}

impl UpdateEvent {
    /// Severity used for routing the message (stdout vs stderr).
    pub fn severity(&self) -> Severity {
        match self {
            UpdateEvent::DirectoryStarted { .. }
            | UpdateEvent::DirectoryMissing { .. }
            | UpdateEvent::SkippedUnchanged { .. }
            | UpdateEvent::UpToDate { .. }
            | UpdateEvent::Updated { .. } => Severity::Info,
            UpdateEvent::NoHistory { .. } | UpdateEvent::NoFrontmatter { .. } => {
                Severity::Warning
            }
            UpdateEvent::DirectoryFailed { .. } | UpdateEvent::Failed { .. } => Severity::Error,
        }
    }

    /// The file this event is about, if it concerns a single file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            UpdateEvent::SkippedUnchanged { path }
            | UpdateEvent::UpToDate { path, .. }
            | UpdateEvent::Updated { path, .. }
            | UpdateEvent::NoHistory { path }
            | UpdateEvent::NoFrontmatter { path }
            | UpdateEvent::Failed { path, .. } => Some(path.as_path()),
            UpdateEvent::DirectoryStarted { .. }
            | UpdateEvent::DirectoryMissing { .. }
            | UpdateEvent::DirectoryFailed { .. } => None,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl fmt::Display for UpdateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateEvent::DirectoryStarted { dir } => {
                write!(f, "Processing {} directory...", dir.display())
            }
            UpdateEvent::DirectoryMissing { dir } => {
                write!(f, "Info: {} directory not found, skipping...", dir.display())
            }
            UpdateEvent::DirectoryFailed { dir, error } => {
                write!(f, "Error: could not list {}: {}", dir.display(), error)
            }
            UpdateEvent::SkippedUnchanged { path } => {
                write!(f, "  Skipping {} (no changes)", file_name(path))
            }
            UpdateEvent::UpToDate { path, field } => write!(
                f,
                "  Skipping {} ({} already up to date)",
                file_name(path),
                field
            ),
            UpdateEvent::Updated {
                path,
                field,
                value,
                dry_run,
            } => write!(
                f,
                "  {} {} with {}: {}",
                if *dry_run { "Would update" } else { "Updated" },
                file_name(path),
                field,
                value
            ),
            UpdateEvent::NoHistory { path } => write!(
                f,
                "  Warning: Could not get last modified date for {}",
                file_name(path)
            ),
            UpdateEvent::NoFrontmatter { path } => {
                write!(f, "  Warning: No front matter found in {}", file_name(path))
            }
            UpdateEvent::Failed { path, error } => {
                write!(f, "  Error: {}: {}", file_name(path), error)
            }
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Content files found in existing directories.
    pub scanned: usize,
    /// Files written (or that would be written, in a dry run).
    pub updated: usize,
    /// Files whose timestamp already matched history.
    pub up_to_date: usize,
    /// Files skipped for having no uncommitted changes.
    pub skipped: usize,
    /// Files with no history timestamp.
    pub no_history: usize,
    /// Files without a front matter block.
    pub no_frontmatter: usize,
    /// Configured directories that do not exist.
    pub missing_dirs: usize,
    /// Files and directories that failed with an I/O error.
    pub failed: usize,
}

impl RunSummary {
    /// Fold one event into the counters.
    pub fn record(&mut self, event: &UpdateEvent) {
        match event {
            UpdateEvent::DirectoryStarted { .. } => {}
            UpdateEvent::DirectoryMissing { .. } => self.missing_dirs += 1,
            UpdateEvent::DirectoryFailed { .. } => self.failed += 1,
            UpdateEvent::SkippedUnchanged { .. } => self.skipped += 1,
            UpdateEvent::UpToDate { .. } => self.up_to_date += 1,
            UpdateEvent::Updated { .. } => self.updated += 1,
            UpdateEvent::NoHistory { .. } => self.no_history += 1,
            UpdateEvent::NoFrontmatter { .. } => self.no_frontmatter += 1,
            UpdateEvent::Failed { .. } => self.failed += 1,
        }
        if event.path().is_some() {
            self.scanned += 1;
        }
    }

    /// Whether any file or directory hit an I/O error.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scanned, {} updated, {} up to date, {} skipped, {} without history, {} without front matter, {} failed",
            self.scanned,
            self.updated,
            self.up_to_date,
            self.skipped,
            self.no_history,
            self.no_frontmatter,
            self.failed
        )
    }
}
