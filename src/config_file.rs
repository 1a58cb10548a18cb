//! Configuration file handling for the onboarding tour.
//!
//! The config file is optional JSON. Every field has a default, so an empty
//! object `{}` is a valid configuration. Command-line flags are applied on
//! top of the loaded values by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::launcher::DEFAULT_TERMINALS;
use crate::reveal::COMMAND_TICK_INTERVAL;

/// Onboarding configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardConfig {
    /// Terminal emulators tried in order when launching the install command
    pub terminals: Vec<String>,
    /// Run-once marker; `None` means the XDG autostart default
    pub marker_path: Option<PathBuf>,
    /// Tick interval of the command preview, in milliseconds
    pub command_reveal_interval_ms: u64,
    /// Extra key accepted as the launcher key on the key prompt
    pub fallback_launcher_key: Option<char>,
    /// Log the install command instead of opening a terminal
    pub dry_run: bool,
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            terminals: DEFAULT_TERMINALS.iter().map(|t| t.to_string()).collect(),
            marker_path: None,
            command_reveal_interval_ms: COMMAND_TICK_INTERVAL.as_millis() as u64,
            fallback_launcher_key: None,
            dry_run: false,
        }
    }
}

impl OnboardConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.terminals.is_empty() {
            anyhow::bail!("At least one terminal emulator must be listed");
        }

        if let Some(blank) = self.terminals.iter().position(|t| t.trim().is_empty()) {
            anyhow::bail!("Terminal entry {} is blank", blank + 1);
        }

        if self.command_reveal_interval_ms == 0 {
            anyhow::bail!("Command reveal interval must be at least 1 ms");
        }

        if let Some(c) = self.fallback_launcher_key {
            if c.is_control() || c.is_whitespace() {
                anyhow::bail!("Fallback launcher key must be a printable character");
            }
        }

        Ok(())
    }

    pub fn command_reveal_interval(&self) -> Duration {
        Duration::from_millis(self.command_reveal_interval_ms)
    }
}
