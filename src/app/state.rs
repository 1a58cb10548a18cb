//! Application state definitions
//!
//! Presentation-only state: cursor positions, overlays and the status line.
//! Wizard progress lives in [`StepController`](crate::wizard::StepController);
//! nothing here affects what gets installed.

use crate::profiles::{ProfileCatalog, ProfileId};

/// Buttons of the "Close Setup?" dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseChoice {
    /// Return to the wizard
    #[default]
    KeepGoing,
    /// Exit now; setup returns on next startup
    Close,
}

impl CloseChoice {
    pub fn switched(self) -> Self {
        match self {
            Self::KeepGoing => Self::Close,
            Self::Close => Self::KeepGoing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::KeepGoing => "Keep going",
            Self::Close => "Close",
        }
    }
}

/// Close confirmation dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfirmCloseState {
    pub selected: CloseChoice,
}

/// Vertical scroll position of a text view that may follow its end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    /// Stick to the last line while text is still arriving
    follow: bool,
    total: usize,
    visible: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow: true,
            total: 0,
            visible: 0,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rendered size; called from the draw pass.
    pub fn update_viewport(&mut self, total: usize, visible: usize) {
        self.total = total;
        self.visible = visible;
        self.offset = if self.follow {
            self.max_offset()
        } else {
            self.offset.min(self.max_offset())
        };
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }

    /// Rows moved by a page scroll
    pub fn page(&self) -> usize {
        self.visible.saturating_sub(1).max(1)
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = (self.offset + rows).min(self.max_offset());
        if self.offset == self.max_offset() {
            self.follow = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Highlighted row on the package screen
    pub package_cursor: usize,
    /// License viewer scroll position
    pub license_scroll: ScrollState,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Close confirmation, when open
    pub confirm_close: Option<ConfirmCloseState>,
    /// Status message for user feedback
    pub status_message: String,
    /// Dry-run mode (shown in the header)
    pub dry_run: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            package_cursor: 0,
            license_scroll: ScrollState::new(),
            help_visible: false,
            confirm_close: None,
            status_message: String::new(),
            dry_run: false,
        }
    }
}

impl AppState {
    /// Profile under the package cursor, in the order the list shows them
    pub fn highlighted_profile(&self) -> Option<ProfileId> {
        ProfileCatalog::new()
            .all()
            .get(self.package_cursor)
            .map(|profile| profile.id)
    }

    pub fn cursor_up(&mut self) {
        self.package_cursor = self.package_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = ProfileCatalog::new().len().saturating_sub(1);
        self.package_cursor = (self.package_cursor + 1).min(last);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}
