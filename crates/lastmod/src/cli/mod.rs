//! Command-line interface for lastmod.

/// Clap argument definitions
mod args;

/// `show` command
mod show;

/// `update` command (the default)
mod update;

use clap::Parser;
use env_logger::Env;

use lastmod_core::config::UpdaterConfig;
use lastmod_core::fs::RealFileSystem;
use lastmod_core::updater::Updater;
use lastmod_core::vcs::GitCli;

pub use args::Cli;
use args::{Commands, UpdateArgs};

/// Updater type used by every CLI command.
pub type CliUpdater = Updater<RealFileSystem, GitCli>;

/// Main entry point for the CLI
pub fn run_cli() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let config = match UpdaterConfig::discover(&cli.root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let success = match cli.command {
        None => update::handle_update(config, UpdateArgs::default(), cli.quiet),
        Some(Commands::Update(args)) => update::handle_update(config, args, cli.quiet),
        Some(Commands::Show { paths }) => show::handle_show(config, &paths),
    };

    if !success {
        std::process::exit(1);
    }
}

/// Build the updater for a finished config.
fn build_updater(config: UpdaterConfig) -> CliUpdater {
    let git = GitCli::new(&config.root);
    Updater::new(config, RealFileSystem, git)
}

fn init_logger(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
