use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// error.os onboarding - first-login setup tour
#[derive(Parser, Debug)]
#[command(name = "erroros-onboard")]
#[command(about = "First-login setup tour for error.os: launcher key, license, and package profiles")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON). Missing fields take their defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dry-run mode: show what would be done without making changes.
    ///
    /// The install command is logged instead of opening a terminal, and the
    /// run-once marker is left in place on finish.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Run the tour even when the run-once marker is absent
    #[arg(long, global = true)]
    pub force: bool,

    /// Run-once marker path (default: ~/.config/autostart/once.desktop)
    #[arg(long, global = true)]
    pub marker: Option<PathBuf>,

    /// Log file (default: <cache dir>/erroros-onboard/onboard.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive setup tour (default)
    Run,
    /// List the package profiles
    Profiles,
    /// Print the install command for the given profiles
    Command {
        /// Profile ids, e.g. `essential gaming`
        #[arg(required = true)]
        profiles: Vec<String>,
    },
    /// Print the license text
    License,
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        file: PathBuf,
    },
}
