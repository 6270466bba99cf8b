//! Test utilities for lastmod_core
//!
//! This module provides shared testing infrastructure: a mock filesystem and a
//! scripted version-control fake that can be used across all test modules.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::fs::FileSystem;
use crate::vcs::{ChangeStatus, HistoryTimestamp, VersionControl};

/// A mock filesystem for testing.
///
/// Uses `Arc<Mutex<HashMap>>` for thread-safety and allows cloning
/// while sharing the same underlying file storage. Directories are implicit:
/// a path is a directory when some file lives below it.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    readonly: Arc<Mutex<HashSet<PathBuf>>>,
    writes: Arc<Mutex<usize>>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock filesystem (builder pattern).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    pub fn with_readonly(self, path: &str) -> Self {
        self.readonly.lock().unwrap().insert(PathBuf::from(path));
        self
    }

    /// Get the content of a file (for test assertions).
    pub fn get_content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&PathBuf::from(path))
            .cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.readonly.lock().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Read-only file",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn list_files_with_extension(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        Ok(files
            .keys()
            .filter(|path| {
                path.parent() == Some(dir) && path.extension().is_some_and(|ext| ext == extension)
            })
            .cloned()
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        let is_file = self.files.lock().unwrap().contains_key(path);
        is_file || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

/// A scripted [`VersionControl`] for testing.
///
/// Files without a scripted history have none; files not marked changed are
/// unchanged. Query counters let tests assert which lookups happened.
#[derive(Default)]
pub struct FakeVcs {
    history: HashMap<PathBuf, String>,
    changed: HashSet<PathBuf>,
    history_queries: Cell<usize>,
    status_queries: Cell<usize>,
}

impl FakeVcs {
    /// Create a fake with no history and a clean working tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the history timestamp for `path` (git `--date=iso` format).
    pub fn with_history(mut self, path: &str, timestamp: &str) -> Self {
        self.history
            .insert(PathBuf::from(path), timestamp.to_string());
        self
    }

    /// Mark `path` as having uncommitted changes.
    pub fn with_changed(mut self, path: &str) -> Self {
        self.changed.insert(PathBuf::from(path));
        self
    }

    /// Number of `last_change` calls so far.
    pub fn history_queries(&self) -> usize {
        self.history_queries.get()
    }

    /// Number of `working_tree_status` calls so far.
    pub fn status_queries(&self) -> usize {
        self.status_queries.get()
    }
}

impl VersionControl for FakeVcs {
    fn last_change(&self, path: &Path) -> Option<HistoryTimestamp> {
        self.history_queries.set(self.history_queries.get() + 1);
        self.history
            .get(path)
            .and_then(|text| HistoryTimestamp::parse(text))
    }

    fn working_tree_status(&self, path: &Path) -> ChangeStatus {
        self.status_queries.set(self.status_queries.get() + 1);
        if self.changed.contains(path) {
            ChangeStatus::Changed
        } else {
            ChangeStatus::Unchanged
        }
    }
}
