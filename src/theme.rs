//! Centralized theme and styling for the TUI
//!
//! This module provides a single source of truth for all colors, styles,
//! and visual constants used throughout the onboarding screens.
//!
//! # Usage
//! ```rust
//! use onboard::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! // Use color constants
//! let style = Style::default().fg(Colors::PRIMARY);
//!
//! // Use pre-built styles
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
/// All colors should be defined here rather than hardcoded in components
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Near-black background behind every screen
    pub const BG_PRIMARY: Color = Color::Rgb(10, 10, 18);

    /// Card background for profile entries
    pub const BG_CARD: Color = Color::Rgb(40, 40, 60);

    /// Inset background for package lists
    pub const BG_INSET: Color = Color::Rgb(20, 20, 30);

    /// Gauge/progress bar background
    pub const BG_GAUGE: Color = Color::Rgb(37, 37, 53);

    /// Headline text
    pub const FG_PRIMARY: Color = Color::Rgb(224, 224, 255);

    /// Body text
    pub const FG_SECONDARY: Color = Color::Rgb(176, 176, 208);

    /// Package list text
    pub const FG_TERTIARY: Color = Color::Rgb(160, 160, 192);

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::Rgb(136, 136, 136);

    // -------------------------------------------------------------------------
    // Accent Colors (branding, emphasis)
    // -------------------------------------------------------------------------

    /// Primary accent - Next button, license OK, borders
    pub const PRIMARY: Color = Color::Rgb(90, 111, 255);

    /// Gradient start of the progress bar
    pub const SKY: Color = Color::Rgb(0, 191, 255);

    /// Terminal-green text for the license and command preview
    pub const TERMINAL_GREEN: Color = Color::Rgb(0, 255, 128);

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    /// Install button
    pub const SUCCESS: Color = Color::Rgb(0, 204, 102);

    /// Close button and destructive confirmations
    pub const ERROR: Color = Color::Rgb(255, 85, 85);

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Rgb(90, 111, 255);

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::Rgb(51, 51, 51);

    /// Back button background
    pub const BUTTON_BACK: Color = Color::Rgb(47, 47, 66);

    /// Disabled button background
    pub const BUTTON_DISABLED: Color = Color::Rgb(58, 58, 74);

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
/// Use these instead of constructing styles inline for consistency
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Main title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Window header ("error.os Setup")
    pub fn header() -> Style {
        Style::default()
            .fg(Color::Rgb(208, 208, 255))
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Inactive border style
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Panel background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Terminal-like text (license, command preview)
    pub fn terminal() -> Style {
        Style::default().fg(Colors::TERMINAL_GREEN).bg(Color::Black)
    }

    /// Profile card with keyboard focus
    pub fn card_focused() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Colors::BG_CARD)
            .add_modifier(Modifier::BOLD)
    }

    /// Profile card without focus
    pub fn card() -> Style {
        Style::default().fg(Color::White)
    }

    /// Package list under a selected profile
    pub fn package_list() -> Style {
        Style::default().fg(Colors::FG_TERTIARY).bg(Colors::BG_INSET)
    }

    /// Enabled primary button (Next)
    pub fn button_primary() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Enabled install button ("Install and next")
    pub fn button_install() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Back button
    pub fn button_back() -> Style {
        Style::default()
            .fg(Color::Rgb(192, 192, 224))
            .bg(Colors::BUTTON_BACK)
    }

    /// Any disabled button
    pub fn button_disabled() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .bg(Colors::BUTTON_DISABLED)
    }

    /// Danger button (selected)
    pub fn button_danger() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Progress bar style
    pub fn progress() -> Style {
        Style::default().fg(Colors::SKY).bg(Colors::BG_GAUGE)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Navigation key label
    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}
