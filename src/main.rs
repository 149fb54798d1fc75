mod agents;
mod cli;
mod display;
mod error;
mod model;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use env_logger::{Builder, Env};
use model::{RunConfig, SavePrefix, TargetField};
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let project_path = PathBuf::from(&cli.path);
    let result = match cli.command {
        Commands::UpgradeInteractive {
            scope,
            latest,
            exact,
            tilde,
            caret,
        } => workflow::execute_upgrade_interactive(&RunConfig {
            project_path,
            target: TargetField::from_latest_flag(latest),
            save_prefix: SavePrefix::from_flags(exact, tilde, caret),
            scope,
            yarn_bin: cli.yarn_bin,
        }),
        Commands::Outdated { scope, latest } => workflow::execute_outdated(&RunConfig {
            project_path,
            target: TargetField::from_latest_flag(latest),
            save_prefix: SavePrefix::Range,
            scope,
            yarn_bin: cli.yarn_bin,
        }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
