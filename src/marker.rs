//! Run-once marker.
//!
//! The session's autostart entry (`~/.config/autostart/once.desktop`) is what
//! brings the tour up on login. Finishing the tour removes it; closing the
//! tour early leaves it so the tour returns on the next login. Creating the
//! marker is the job of whoever installs the system, never this crate.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{OnboardError, Result};

/// File name of the autostart entry.
pub const MARKER_FILE_NAME: &str = "once.desktop";

/// The per-user run-once marker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOnceMarker {
    path: PathBuf,
}

impl RunOnceMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<XDG config dir>/autostart/once.desktop`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autostart").join(MARKER_FILE_NAME))
    }

    /// Marker at [`default_path`](Self::default_path).
    pub fn from_environment() -> Result<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| OnboardError::marker("cannot determine the user config directory"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the marker. A marker that is already gone counts as removed.
    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "run-once marker removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "run-once marker already absent");
                Ok(())
            }
            Err(e) => Err(OnboardError::marker(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
