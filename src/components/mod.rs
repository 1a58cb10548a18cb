//! Reusable UI components
//!
//! - `keybindings` - Context-aware key registry shared by dispatch, nav bar and help
//! - `help_overlay` - Floating help window

pub mod help_overlay;
pub mod keybindings;
