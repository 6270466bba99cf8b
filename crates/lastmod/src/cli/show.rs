//! Show command - prints stored vs. git timestamps without writing

use glob::glob;
use std::path::{Path, PathBuf};

use lastmod_core::config::UpdaterConfig;
use lastmod_core::fs::{FileSystem, RealFileSystem};
use lastmod_core::updater::FileReport;
use lastmod_core::vcs::ChangeStatus;

use crate::cli::build_updater;

/// Expand a path argument relative to `root`.
///
/// Glob patterns are expanded (sorted, files only); plain paths are returned
/// as-is, whether or not they exist.
pub fn resolve_paths(pattern: &str, root: &Path) -> Vec<PathBuf> {
    let full = root.join(pattern);
    if !pattern.contains(['*', '?', '[']) {
        return vec![full];
    }

    let full_pattern = full.to_string_lossy();
    match glob(&full_pattern) {
        Ok(entries) => {
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_file())
                .collect();
            paths.sort();
            paths
        }
        Err(e) => {
            eprintln!("✗ Invalid pattern '{}': {}", pattern, e);
            Vec::new()
        }
    }
}

fn format_report(report: &FileReport, field: &str) -> String {
    let status = match report.status {
        ChangeStatus::Changed => "changed",
        ChangeStatus::Unchanged => "unchanged",
    };
    let stale = if report.is_stale() { " (stale)" } else { "" };

    format!(
        "{}{}\n  {}: {}\n  git: {}\n  status: {}",
        report.path.display(),
        stale,
        field,
        report.current.as_deref().unwrap_or("(none)"),
        report
            .history
            .as_ref()
            .map(|h| h.to_string())
            .unwrap_or_else(|| "(no history)".to_string()),
        status
    )
}

/// Handle the show command
/// Returns true if every path could be read
pub fn handle_show(config: UpdaterConfig, patterns: &[String]) -> bool {
    let root = config.root.clone();
    let field = config.field.clone();
    let updater = build_updater(config);
    let mut success = true;

    for pattern in patterns {
        let paths = resolve_paths(pattern, &root);
        if paths.is_empty() {
            eprintln!("✗ No files matched: {}", pattern);
            success = false;
            continue;
        }

        for path in paths {
            if !RealFileSystem.exists(&path) {
                eprintln!("✗ File does not exist: {}", path.display());
                success = false;
                continue;
            }
            match updater.inspect(&path) {
                Ok(report) => println!("{}", format_report(&report, &field)),
                Err(e) => {
                    eprintln!("✗ {}", e);
                    success = false;
                }
            }
        }
    }

    success
}
