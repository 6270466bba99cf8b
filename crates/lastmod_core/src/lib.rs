#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Configuration options
pub mod config;

/// Error (common error types)
pub mod error;

/// Filesystem abstraction
pub mod fs;

/// Front matter header block reading and patching
pub mod frontmatter;

/// Scan-and-patch loop
pub mod updater;

/// Version-control queries (git)
pub mod vcs;

#[cfg(test)]
pub mod test_utils;
