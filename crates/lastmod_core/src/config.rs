//! Configuration types for lastmod.
//!
//! [`UpdaterConfig`] holds which directories to scan, which files to pick up
//! and which front matter key to maintain. Defaults match a Jekyll-style site
//! (`_posts`, `_diary`, `_creation`, `*.md`, `last_modified_at`). Values can be
//! overridden from a TOML file:
//!
//! ```toml
//! directories = ["_posts", "_drafts"]
//! extension = "md"
//! field = "last_modified_at"
//! policy = "all"
//! ```
//!
//! Lookup order used by [`UpdaterConfig::discover`]: an explicit path, then
//! `lastmod.toml` in the working tree root, then the user config
//! (`~/.config/lastmod/config.toml` on Unix), then the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{LastmodError, Result};

/// Directories scanned when nothing else is configured.
pub const DEFAULT_DIRECTORIES: &[&str] = &["_posts", "_diary", "_creation"];

/// File extension picked up when nothing else is configured.
pub const DEFAULT_EXTENSION: &str = "md";

/// Front matter key maintained when nothing else is configured.
pub const DEFAULT_FIELD: &str = "last_modified_at";

/// Name of the per-repository config file.
pub const CONFIG_FILE_NAME: &str = "lastmod.toml";

/// Which files get processed and when they are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Only files with uncommitted modifications or additions; write only
    /// when the stored value differs from history.
    #[default]
    ChangedOnly,
    /// Every file; write whenever history has a timestamp.
    All,
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::ChangedOnly => write!(f, "changed-only"),
            UpdatePolicy::All => write!(f, "all"),
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "changed-only" | "changed" => Ok(UpdatePolicy::ChangedOnly),
            "all" => Ok(UpdatePolicy::All),
            other => Err(format!(
                "unknown policy '{}', expected 'changed-only' or 'all'",
                other
            )),
        }
    }
}

/// Settings for one updater run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Working tree root; directories are resolved against it.
    /// Not read from the config file.
    #[serde(skip)]
    pub root: PathBuf,

    /// Directories to scan, relative to `root` (not recursive)
    pub directories: Vec<PathBuf>,

    /// Extension of content files, without the dot
    pub extension: String,

    /// Front matter key holding the timestamp
    pub field: String,

    /// Processing policy
    pub policy: UpdatePolicy,

    /// Report what would change without writing anything.
    /// Not read from the config file.
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            directories: DEFAULT_DIRECTORIES.iter().map(PathBuf::from).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            field: DEFAULT_FIELD.to_string(),
            policy: UpdatePolicy::default(),
            dry_run: false,
        }
    }
}

impl UpdaterConfig {
    /// Create a default config rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute-or-root-relative path of a configured directory
    pub fn resolve_dir(&self, dir: &Path) -> PathBuf {
        self.root.join(dir)
    }

    /// Parse config values from TOML text. `root` stays at its default.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: UpdaterConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load config values from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| LastmodError::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_toml_str(&contents)
    }

    /// Get the user config file path (~/.config/lastmod/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lastmod").join("config.toml"))
    }

    /// Find and load the config for a working tree rooted at `root`.
    ///
    /// An `explicit` path must exist. Otherwise the first existing file of
    /// `<root>/lastmod.toml` and the user config is used, falling back to
    /// defaults when neither exists.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => [
                Some(root.join(CONFIG_FILE_NAME)),
                Self::user_config_path(),
            ]
            .into_iter()
            .flatten()
            .find(|path| path.is_file()),
        };

        let mut config = match candidate {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load_from(&path)?
            }
            None => Self::default(),
        };
        config.root = root.to_path_buf();
        Ok(config)
    }
}
