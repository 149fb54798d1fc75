use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depick",
    about = "Interactively pick outdated yarn dependencies and upgrade them",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// yarn executable used to query and install packages
    #[arg(long, env = "DEPICK_YARN", default_value = "yarn", global = true)]
    pub yarn_bin: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose outdated packages from a list and upgrade them
    UpgradeInteractive {
        /// Only list packages of this scope (e.g. "@babel")
        #[arg(long)]
        scope: Option<String>,

        /// Upgrade to the latest version, ignoring the declared range
        #[arg(long)]
        latest: bool,

        /// Save the exact latest version
        #[arg(short = 'E', long)]
        exact: bool,

        /// Save the latest version behind a tilde range (~)
        #[arg(short = 'T', long)]
        tilde: bool,

        /// Save the latest version behind a caret range (^)
        #[arg(short = 'C', long)]
        caret: bool,
    },

    /// Show outdated packages without changing anything
    Outdated {
        /// Only list packages of this scope (e.g. "@babel")
        #[arg(long)]
        scope: Option<String>,

        /// Compare against the latest version instead of the wanted one
        #[arg(long)]
        latest: bool,
    },
}
