//! User interface rendering module
//!
//! This module is organized into submodules for better maintainability:
//! - `header` - Title, progress gauge, Back/Next row and navigation bar
//! - `screens` - One screen per wizard step
//! - `dialogs` - License viewer and close confirmation
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ error.os Setup           Step n of 5 │  header
//! │ ██████████░░░░░░░░ step title        │  gauge
//! ├──────────────────────────────────────┤
//! │                                      │
//! │            step screen               │  content
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ < Back       status        Next >    │  footer
//! │ Enter Next  ? Help  Q Close setup    │  nav bar
//! └──────────────────────────────────────┘
//! ```
//!
//! Overlays (license viewer, close confirmation, help) are drawn last, in
//! that order, on top of the step screen.

pub mod dialogs;
pub mod header;
pub mod screens;

use crate::app::{AppState, input_context};
use crate::components::keybindings::KeybindingContext;
use crate::wizard::StepController;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI
    ///
    /// Takes the app state mutably so the license viewer can record its
    /// rendered size for scrolling.
    pub fn render(
        &self,
        f: &mut Frame,
        wizard: &StepController,
        state: &mut AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        f.render_widget(Block::default().style(crate::theme::Styles::panel_bg()), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + gauge
                Constraint::Min(5),    // Step screen
                Constraint::Length(1), // Back / Next
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_header(f, chunks[0], wizard, state);
        screens::render_step(f, chunks[1], wizard, state);
        header::render_footer(f, chunks[2], wizard);
        header::render_status(f, chunks[2], state);

        let context = input_context(wizard, state);
        header::render_nav_bar(f, &context, keybinding_ctx, chunks[3]);

        if wizard.is_license_viewer_open() {
            dialogs::render_license_viewer(f, wizard, state);
        }
        if let Some(dialog) = state.confirm_close {
            dialogs::render_confirm_close(f, &dialog);
        }
        if state.help_visible {
            let underneath = crate::app::context_below_help(wizard, state);
            header::render_help_overlay(f, &underneath, keybinding_ctx);
        }
    }
}
