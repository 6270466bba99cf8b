//! Command-line argument structures and enums

use clap::{Args, Parser, Subcommand};
use lastmod_core::config::UpdatePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lastmod")]
#[command(version)]
#[command(
    about = "Stamp last_modified_at front matter from git history",
    long_about = None
)]
pub struct Cli {
    /// Working tree root (directories are resolved against it)
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/lastmod.toml, then the user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Defaults to `update` with no options
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update the timestamp field of content files from git history
    Update(UpdateArgs),

    /// Show the stored and git timestamps of files without changing them
    Show {
        /// Files or glob patterns (e.g. "_posts/*.md")
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Options for the update command; unset options fall back to the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct UpdateArgs {
    /// Directory to scan (repeatable; replaces the configured list)
    #[arg(short, long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Which files to process: changed-only or all
    #[arg(short, long)]
    pub policy: Option<UpdatePolicy>,

    /// Front matter key to maintain
    #[arg(short, long)]
    pub field: Option<String>,

    /// Content file extension, without the dot
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Report what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_default_update() {
        let cli = Cli::try_parse_from(["lastmod"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_update_options() {
        let cli = Cli::try_parse_from([
            "lastmod",
            "update",
            "--dir",
            "_posts",
            "--dir",
            "_drafts",
            "--policy",
            "all",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(
                    args.dirs,
                    vec![PathBuf::from("_posts"), PathBuf::from("_drafts")]
                );
                assert_eq!(args.policy, Some(UpdatePolicy::All));
                assert!(args.dry_run);
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        assert!(Cli::try_parse_from(["lastmod", "update", "--policy", "some"]).is_err());
    }

    #[test]
    fn test_show_requires_paths() {
        assert!(Cli::try_parse_from(["lastmod", "show"]).is_err());
    }
}
