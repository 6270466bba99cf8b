//! The scan-and-patch loop.
//!
//! [`Updater`] walks the configured directories, asks a [`VersionControl`]
//! implementation when each content file last changed, and patches the
//! timestamp field of the file's front matter through a [`FileSystem`].
//!
//! ```ignore
//! use lastmod_core::config::UpdaterConfig;
//! use lastmod_core::fs::RealFileSystem;
//! use lastmod_core::updater::Updater;
//! use lastmod_core::vcs::GitCli;
//!
//! let config = UpdaterConfig::new(".");
//! let updater = Updater::new(config, RealFileSystem, GitCli::new("."));
//! let summary = updater.run(&mut |event| println!("{}", event));
//! ```

mod events;

pub use events::{RunSummary, Severity, UpdateEvent};

use std::path::{Path, PathBuf};

use crate::config::{UpdatePolicy, UpdaterConfig};
use crate::error::{LastmodError, Result};
use crate::frontmatter;
use crate::fs::FileSystem;
use crate::vcs::{ChangeStatus, HistoryTimestamp, VersionControl};

/// Result of writing the timestamp field to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// The file was rewritten.
    Written,
    /// Dry run: the file would have been rewritten.
    DryRun,
    /// The file has no front matter block; nothing was written.
    NoFrontmatter,
}

/// What happened to a single content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Skipped by the change-status gate.
    SkippedUnchanged,
    /// History had no timestamp for the file.
    NoHistory,
    /// Stored value already equals the history timestamp.
    UpToDate,
    /// Field written with the given value.
    Updated(String),
    /// File has no front matter block.
    NoFrontmatter,
}

/// Read-only view of one file's timestamp state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path of the file.
    pub path: PathBuf,
    /// Current value of the timestamp field, if any.
    pub current: Option<String>,
    /// Latest history timestamp, if any.
    pub history: Option<HistoryTimestamp>,
    /// Working-tree status.
    pub status: ChangeStatus,
}

impl FileReport {
    /// Whether the stored field differs from history.
    pub fn is_stale(&self) -> bool {
        match &self.history {
            Some(history) => self.current.as_deref() != Some(history.as_str()),
            None => false,
        }
    }
}

/// Keeps a front matter timestamp field in sync with version-control history.
pub struct Updater<FS, VC> {
    config: UpdaterConfig,
    fs: FS,
    vcs: VC,
}

impl<FS: FileSystem, VC: VersionControl> Updater<FS, VC> {
    /// Create an updater over the given filesystem and version control.
    pub fn new(config: UpdaterConfig, fs: FS, vcs: VC) -> Self {
        Self { config, fs, vcs }
    }

    /// The configuration this updater runs with.
    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Content files directly inside a configured directory, sorted by path.
    pub fn content_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let resolved = self.config.resolve_dir(dir);
        let mut files = self
            .fs
            .list_files_with_extension(&resolved, &self.config.extension)
            .map_err(|e| LastmodError::ReadDir {
                path: resolved.clone(),
                source: e,
            })?;
        files.sort();
        Ok(files)
    }

    /// Current value of the timestamp field in `path`.
    pub fn read_timestamp(&self, path: &Path) -> Result<Option<String>> {
        let content = self.read(path)?;
        Ok(frontmatter::read_field(&content, &self.config.field))
    }

    /// Set the timestamp field in `path` to `value`, rewriting the file in place.
    ///
    /// Honours `dry_run`: the new content is computed but not written.
    pub fn write_timestamp(&self, path: &Path, value: &str) -> Result<WriteResult> {
        let content = self.read(path)?;
        let Some(updated) = frontmatter::write_field(&content, &self.config.field, value) else {
            return Ok(WriteResult::NoFrontmatter);
        };

        if self.config.dry_run {
            return Ok(WriteResult::DryRun);
        }

        self.fs
            .write_file(path, &updated)
            .map_err(|e| LastmodError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(WriteResult::Written)
    }

    /// Gather the stored and historical timestamps for `path` without writing.
    pub fn inspect(&self, path: &Path) -> Result<FileReport> {
        Ok(FileReport {
            path: path.to_path_buf(),
            current: self.read_timestamp(path)?,
            history: self.vcs.last_change(path),
            status: self.vcs.working_tree_status(path),
        })
    }

    /// Apply the configured policy to one file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        match self.config.policy {
            UpdatePolicy::All => self.process_unconditionally(path),
            UpdatePolicy::ChangedOnly => self.process_if_changed(path),
        }
    }

    fn process_unconditionally(&self, path: &Path) -> Result<FileOutcome> {
        let Some(history) = self.vcs.last_change(path) else {
            return Ok(FileOutcome::NoHistory);
        };
        self.apply(path, history)
    }

    fn process_if_changed(&self, path: &Path) -> Result<FileOutcome> {
        if self.vcs.working_tree_status(path) == ChangeStatus::Unchanged {
            return Ok(FileOutcome::SkippedUnchanged);
        }

        let Some(history) = self.vcs.last_change(path) else {
            return Ok(FileOutcome::NoHistory);
        };

        let current = self.read_timestamp(path)?;
        if current.as_deref() == Some(history.as_str()) {
            return Ok(FileOutcome::UpToDate);
        }

        self.apply(path, history)
    }

    fn apply(&self, path: &Path, history: HistoryTimestamp) -> Result<FileOutcome> {
        match self.write_timestamp(path, history.as_str())? {
            WriteResult::Written | WriteResult::DryRun => {
                Ok(FileOutcome::Updated(history.as_str().to_string()))
            }
            WriteResult::NoFrontmatter => Ok(FileOutcome::NoFrontmatter),
        }
    }

    /// Scan every configured directory, reporting each step to `on_event`.
    ///
    /// Per-file and per-directory faults are reported as events and the run
    /// continues; the summary records them.
    pub fn run(&self, on_event: &mut dyn FnMut(&UpdateEvent)) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut emit = |event: UpdateEvent| {
            log::debug!("{:?}", event);
            summary.record(&event);
            on_event(&event);
        };

        for dir in &self.config.directories {
            if !self.fs.is_dir(&self.config.resolve_dir(dir)) {
                emit(UpdateEvent::DirectoryMissing { dir: dir.clone() });
                continue;
            }

            emit(UpdateEvent::DirectoryStarted { dir: dir.clone() });

            let files = match self.content_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    emit(UpdateEvent::DirectoryFailed {
                        dir: dir.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            for path in files {
                let event = self.event_for(&path);
                emit(event);
            }
        }

        summary
    }

    fn event_for(&self, path: &Path) -> UpdateEvent {
        let path_buf = path.to_path_buf();
        match self.process_file(path) {
            Ok(FileOutcome::SkippedUnchanged) => UpdateEvent::SkippedUnchanged { path: path_buf },
            Ok(FileOutcome::NoHistory) => UpdateEvent::NoHistory { path: path_buf },
            Ok(FileOutcome::UpToDate) => UpdateEvent::UpToDate {
                path: path_buf,
                field: self.config.field.clone(),
            },
            Ok(FileOutcome::Updated(value)) => UpdateEvent::Updated {
                path: path_buf,
                field: self.config.field.clone(),
                value,
                dry_run: self.config.dry_run,
            },
            Ok(FileOutcome::NoFrontmatter) => UpdateEvent::NoFrontmatter { path: path_buf },
            Err(e) => UpdateEvent::Failed {
                path: path_buf,
                error: e.to_string(),
            },
        }
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .map_err(|e| LastmodError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
