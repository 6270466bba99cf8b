//! Filesystem abstraction module.
//!
//! This module provides the `FileSystem` trait for abstracting the few
//! filesystem operations the updater needs, so the orchestrator can run
//! against the real working tree or an in-memory fake in tests.

mod native;

pub use native::RealFileSystem;

use std::io::Result;
use std::path::{Path, PathBuf};

/// Abstraction over filesystem operations
pub trait FileSystem {
    /// Reads the file content (for reading front matter)
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Overwrites an existing file (for updating front matter)
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Lists regular files directly inside `dir` whose extension equals `extension`.
    ///
    /// Not recursive. Order is unspecified; callers sort when they need to.
    fn list_files_with_extension(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>>;

    /// Checks if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Checks if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;
}

// Blanket implementation for references to FileSystem
impl<T: FileSystem> FileSystem for &T {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        (*self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        (*self).write_file(path, content)
    }

    fn list_files_with_extension(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        (*self).list_files_with_extension(dir, extension)
    }

    fn exists(&self, path: &Path) -> bool {
        (*self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (*self).is_dir(path)
    }
}
