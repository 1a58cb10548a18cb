//! error.os onboarding library
//!
//! This library provides the setup tour shown on first login: the step
//! machine, profile catalog and command synthesis, the typing-style reveal
//! engine, and the terminal UI that embeds them.

pub mod app;
pub mod cli;
pub mod command;
pub mod components;
pub mod config_file;
pub mod error;
pub mod launcher;
pub mod license;
pub mod marker;
pub mod profiles;
pub mod reveal;
pub mod selection;
pub mod signals;
pub mod theme;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use command::{APT_INSTALL_PREFIX, EMPTY_SELECTION_TEXT, is_installable, synthesize};
pub use config_file::OnboardConfig;
pub use error::OnboardError;
pub use launcher::{DryRunLauncher, LaunchOutcome, ProcessLauncher, TerminalLauncher};
pub use marker::RunOnceMarker;
pub use profiles::{Profile, ProfileCatalog, ProfileId};
pub use reveal::{RevealBand, RevealPacing, RevealSession, TickOutcome, band_for};
pub use selection::{SelectionChange, SelectionSet};
pub use wizard::{
    Effect, LaunchRequest, LauncherKey, Step, StepController, Transition, WizardState,
};
