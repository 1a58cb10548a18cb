//! Error handling module for the onboarding tour
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Only the embedding layer (terminal setup, config files, collaborators)
//! produces errors; the wizard core reports refusals as ordinary values.

use thiserror::Error;

/// Main error type for the onboarding binary
#[derive(Error, Debug)]
pub enum OnboardError {
    /// Configuration errors (loading, parsing, validation, bad CLI input)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Run-once marker errors
    #[error("Marker error: {0}")]
    Marker(String),
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardError>;

// Convenient error constructors
impl OnboardError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a marker error
    pub fn marker(msg: impl Into<String>) -> Self {
        Self::Marker(msg.into())
    }
}
