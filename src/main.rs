//! erroros-onboard - Main entry point
//!
//! Parses the command line, sets up logging and signal handling, then either
//! runs the setup tour in the terminal or answers one of the headless
//! subcommands.

use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use onboard::app::{App, ExitReason};
use onboard::cli::{Cli, Commands};
use onboard::command::synthesize;
use onboard::config_file::OnboardConfig;
use onboard::error::OnboardError;
use onboard::launcher::{DryRunLauncher, ProcessLauncher, TerminalLauncher};
use onboard::license::LICENSE_TEXT;
use onboard::marker::RunOnceMarker;
use onboard::profiles::{ProfileCatalog, ProfileId};
use onboard::selection::SelectionSet;
use onboard::signals::{ShutdownFlag, init_signal_handlers};
use onboard::wizard::{LauncherKey, StepController};

/// `<cache dir>/erroros-onboard/onboard.log`
fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("erroros-onboard").join("onboard.log"))
}

/// Initialize the logger. Output goes to a file so it never draws over the TUI.
fn init_logger(path: Option<&Path>) {
    let writer = match path.map(open_log_file) {
        Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
        Some(Err(e)) => {
            eprintln!("warning: logging disabled: {}", e);
            BoxMakeWriter::new(std::io::sink)
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().or_else(default_log_path);
    init_logger(log_path.as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "erroros-onboard starting up");

    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Profiles => print_profiles(),
        Commands::Command { profiles } => print_command(&profiles)?,
        Commands::License => print!("{}", LICENSE_TEXT),
        Commands::Validate { file } => validate_config(&file),
        Commands::Run => run_tour(&cli)?,
    }

    Ok(())
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(cli: &Cli) -> Result<OnboardConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            OnboardConfig::load_from_file(path)?
        }
        None => OnboardConfig::default(),
    };
    config.validate()?;

    if cli.dry_run {
        config.dry_run = true;
    }
    if let Some(marker) = &cli.marker {
        config.marker_path = Some(marker.clone());
    }
    debug!(?config, "effective configuration");
    Ok(config)
}

/// Run the interactive tour
fn run_tour(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = ShutdownFlag::new();
    if let Err(e) = init_signal_handlers(&shutdown) {
        warn!("Failed to initialize signal handlers: {}", e);
    }

    let config = load_config(cli)?;

    let marker = match &config.marker_path {
        Some(path) => RunOnceMarker::new(path),
        None => RunOnceMarker::from_environment()?,
    };
    if !marker.exists() && !cli.force {
        info!(marker = %marker.path().display(), "run-once marker absent, setup already done");
        return Ok(());
    }

    let launcher: Box<dyn ProcessLauncher> = if config.dry_run {
        Box::new(DryRunLauncher::new())
    } else {
        Box::new(TerminalLauncher::new(config.terminals.clone()))
    };

    let wizard = StepController::new(LICENSE_TEXT)
        .with_launcher_key(LauncherKey::with_fallback(config.fallback_launcher_key))
        .with_command_interval(config.command_reveal_interval());
    let mut app = App::new(wizard, launcher, marker, shutdown).with_dry_run(config.dry_run);

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| OnboardError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), EnterAlternateScreen)
        .map_err(|e| OnboardError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    // Bare Super/Meta presses are only reported with enhanced key reporting
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES;
        if let Err(e) = crossterm::execute!(stdout(), PushKeyboardEnhancementFlags(flags)) {
            warn!("Failed to enable keyboard enhancement: {}", e);
        }
    } else {
        info!("terminal lacks keyboard enhancement, bare Super presses may go unreported");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| OnboardError::terminal(format!("Failed to create terminal: {}", e)).into())
        .and_then(|mut terminal| app.run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    if enhanced {
        let _ = crossterm::execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    match result {
        Ok(ExitReason::Completed) => info!("setup completed"),
        Ok(reason) => info!(?reason, "setup will appear again on next startup"),
        Err(ref e) => error!("setup failed: {}", e),
    }
    result.map(|_| ())
}

/// `profiles` subcommand
fn print_profiles() {
    for profile in ProfileCatalog::new().all() {
        println!("{:<10} {} - {}", profile.id.key(), profile.name, profile.description);
        println!("{:<10} {}", "", profile.packages.join(" "));
    }
}

/// `command` subcommand
fn print_command(keys: &[String]) -> Result<(), OnboardError> {
    let selection = keys
        .iter()
        .map(|key| {
            key.parse::<ProfileId>()
                .map_err(|_| OnboardError::config(format!("Unknown profile: {}", key)))
        })
        .collect::<Result<SelectionSet, _>>()?;
    println!("{}", synthesize(&selection, &ProfileCatalog::new()));
    Ok(())
}

/// `validate` subcommand
fn validate_config(path: &Path) {
    info!("Validating configuration file: {:?}", path);
    match OnboardConfig::load_from_file(path) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration file is valid: {}", path.display());
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to load configuration file: {:#}", e);
            eprintln!("✗ Failed to load configuration file: {:#}", e);
            std::process::exit(1);
        }
    }
}
