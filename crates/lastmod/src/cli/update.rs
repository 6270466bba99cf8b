//! Update command - stamps the timestamp field from git history

use lastmod_core::config::UpdaterConfig;
use lastmod_core::updater::{Severity, UpdateEvent};

use crate::cli::args::UpdateArgs;
use crate::cli::build_updater;

/// Overlay command-line options on the loaded config
pub fn apply_args(mut config: UpdaterConfig, args: UpdateArgs) -> UpdaterConfig {
    if !args.dirs.is_empty() {
        config.directories = args.dirs;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(field) = args.field {
        config.field = field;
    }
    if let Some(extension) = args.extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }
    config.dry_run = args.dry_run;
    config
}

/// Whether an event is printed when `--quiet` is given
fn is_shown(event: &UpdateEvent, quiet: bool) -> bool {
    !quiet || event.severity() > Severity::Info
}

/// Handle the update command
/// Returns true on success, false if any file or directory failed
pub fn handle_update(config: UpdaterConfig, args: UpdateArgs, quiet: bool) -> bool {
    let config = apply_args(config, args);
    log::info!(
        "Updating '{}' in {} ({} policy{})",
        config.field,
        config.root.display(),
        config.policy,
        if config.dry_run { ", dry run" } else { "" }
    );

    let updater = build_updater(config);
    let summary = updater.run(&mut |event| {
        if !is_shown(event, quiet) {
            return;
        }
        match event.severity() {
            Severity::Info => println!("{}", event),
            Severity::Warning | Severity::Error => eprintln!("{}", event),
        }
    });

    if summary.has_failures() {
        eprintln!("✗ {}", summary);
        false
    } else {
        if !quiet {
            println!("✓ {}", summary);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastmod_core::config::UpdatePolicy;
    use std::path::PathBuf;

    #[test]
    fn test_apply_args_defaults_keep_config() {
        let config = UpdaterConfig::new("/site");
        let applied = apply_args(config.clone(), UpdateArgs::default());
        assert_eq!(applied, config);
    }

    #[test]
    fn test_apply_args_overrides() {
        let args = UpdateArgs {
            dirs: vec![PathBuf::from("content")],
            policy: Some(UpdatePolicy::All),
            field: Some("updated".to_string()),
            extension: Some(".markdown".to_string()),
            dry_run: true,
        };
        let applied = apply_args(UpdaterConfig::new("/site"), args);
        assert_eq!(applied.directories, vec![PathBuf::from("content")]);
        assert_eq!(applied.policy, UpdatePolicy::All);
        assert_eq!(applied.field, "updated");
        assert_eq!(applied.extension, "markdown");
        assert!(applied.dry_run);
        assert_eq!(applied.root, PathBuf::from("/site"));
    }

    #[test]
    fn test_quiet_hides_info_only() {
        let info = UpdateEvent::DirectoryStarted {
            dir: PathBuf::from("_posts"),
        };
        let warning = UpdateEvent::NoHistory {
            path: PathBuf::from("a.md"),
        };
        assert!(!is_shown(&info, true));
        assert!(is_shown(&warning, true));
        assert!(is_shown(&info, false));
    }

    #[test]
    fn test_handle_update_on_empty_tree_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = UpdaterConfig::new(dir.path());
        assert!(handle_update(config, UpdateArgs::default(), true));
    }
}
