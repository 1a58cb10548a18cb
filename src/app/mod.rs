//! Application module
//!
//! Contains the event loop that embeds [`StepController`] in a terminal UI:
//! it feeds key presses in, ticks the reveal sessions on schedule, renders,
//! and dispatches the wizard's effects to the process launcher and the
//! run-once marker.
//!
//! # Module Structure
//! - `state` - Presentation state (cursor, overlays, scroll, status line)
//! - Main module - App struct and event loop
//!
//! # Event Loop
//!
//! ```text
//!   ┌─> shutdown flag? ──yes──> exit (Interrupted)
//!   │        │
//!   │   tick due reveal sessions
//!   │        │
//!   │      draw
//!   │        │
//!   │   poll(until next tick, max 50ms)
//!   │        │
//!   └── key press -> KeybindingContext -> StepController -> Effect?
//!                                                     │
//!                        Launch: ProcessLauncher <────┤
//!                        Complete: remove marker, exit (Completed)
//! ```

mod state;

pub use state::{AppState, CloseChoice, ConfirmCloseState, ScrollState};

use crate::components::keybindings::{InputContext, KeyAction, KeybindingContext};
use crate::launcher::{LaunchOutcome, ProcessLauncher};
use crate::marker::RunOnceMarker;
use crate::signals::ShutdownFlag;
use crate::ui::UiRenderer;
use crate::wizard::{Effect, Step, StepController, Transition};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest wait for input, so the shutdown flag is noticed promptly
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Why the event loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Finished from the summary; the marker was removed
    Completed,
    /// Closed early by the user; the marker stays
    Closed,
    /// A termination signal arrived; the marker stays
    Interrupted,
}

/// Input routing for the current state
pub fn input_context(wizard: &StepController, state: &AppState) -> InputContext {
    if state.help_visible {
        InputContext::Help
    } else {
        context_below_help(wizard, state)
    }
}

/// The context the help overlay describes
pub fn context_below_help(wizard: &StepController, state: &AppState) -> InputContext {
    if state.confirm_close.is_some() {
        InputContext::ConfirmClose
    } else if wizard.is_license_viewer_open() {
        InputContext::LicenseViewer
    } else {
        InputContext::Step(wizard.step())
    }
}

/// Status line after a refused advance
fn refusal_message(step: Step) -> &'static str {
    match step {
        Step::KeyPrompt => "Press the WIN (Super/Meta) key to continue",
        Step::License => "Open the license and press OK to continue",
        _ => "",
    }
}

/// Main application struct
pub struct App {
    wizard: StepController,
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
    launcher: Box<dyn ProcessLauncher>,
    marker: RunOnceMarker,
    shutdown: ShutdownFlag,
    license_due: Option<Instant>,
    command_due: Option<Instant>,
}

impl App {
    /// Create a new application instance
    pub fn new(
        wizard: StepController,
        launcher: Box<dyn ProcessLauncher>,
        marker: RunOnceMarker,
        shutdown: ShutdownFlag,
    ) -> Self {
        info!(marker = %marker.path().display(), "Creating new App instance");
        Self {
            wizard,
            state: AppState::default(),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            launcher,
            marker,
            shutdown,
            license_due: None,
            command_due: None,
        }
    }

    /// Show the dry-run badge in the header
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.state.dry_run = dry_run;
        self
    }

    pub fn wizard(&self) -> &StepController {
        &self.wizard
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run until the user finishes, closes, or a signal arrives
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<ExitReason, Box<dyn std::error::Error>> {
        info!("Starting onboarding loop");

        loop {
            if self.shutdown.is_raised() {
                info!(step = ?self.wizard.step(), "shutdown signal received");
                return Ok(ExitReason::Interrupted);
            }

            self.pump_reveals(Instant::now());
            self.draw(terminal)?;

            let timeout = self.poll_timeout(Instant::now());
            let ready = match event::poll(timeout) {
                Ok(ready) => ready,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if !ready {
                continue;
            }

            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(reason) = self.handle_key_event(key_event) {
                        info!(?reason, "leaving onboarding loop");
                        return Ok(reason);
                    }
                }
                // The next draw picks up the new size
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }
    }

    /// Render one frame
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        terminal.draw(|f| {
            self.ui_renderer
                .render(f, &self.wizard, &mut self.state, &self.keybinding_context);
        })?;
        Ok(())
    }

    /// Advance whichever reveal sessions are due at `now`
    pub fn pump_reveals(&mut self, now: Instant) {
        match self.wizard.license_interval() {
            Some(interval) => {
                let due = *self.license_due.get_or_insert(now + interval);
                if now >= due {
                    self.wizard.tick_license();
                    self.license_due = self.wizard.license_interval().map(|next| now + next);
                }
            }
            None => self.license_due = None,
        }

        // The command preview only animates while it is on screen
        let command_interval = (self.wizard.step() == Step::PackageSelect)
            .then(|| self.wizard.command_interval())
            .flatten();
        match command_interval {
            Some(interval) => {
                let due = *self.command_due.get_or_insert(now + interval);
                if now >= due {
                    self.wizard.tick_command();
                    self.command_due = self.wizard.command_interval().map(|next| now + next);
                }
            }
            None => self.command_due = None,
        }
    }

    /// Time until the next reveal tick, capped at [`IDLE_POLL`]
    fn poll_timeout(&self, now: Instant) -> Duration {
        [self.license_due, self.command_due]
            .into_iter()
            .flatten()
            .map(|due| due.saturating_duration_since(now))
            .fold(IDLE_POLL, Duration::min)
    }

    /// Handle one key event. Returns `Some` when the loop should stop.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<ExitReason> {
        // Enhanced keyboards also report repeats and releases
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        let context = input_context(&self.wizard, &self.state);

        if context == InputContext::Step(Step::KeyPrompt)
            && self.wizard.observe_key_press(&key_event)
        {
            self.state.set_status("");
            return None;
        }

        let Some(action) = self.keybinding_context.action_for(&context, &key_event) else {
            debug!(code = ?key_event.code, ?context, "unbound key");
            return None;
        };
        debug!(?action, ?context, "key action");

        match (context, action) {
            (InputContext::Help, _) => {
                self.state.help_visible = false;
                None
            }
            (InputContext::ConfirmClose, action) => self.handle_confirm_close(action),
            (_, KeyAction::Help) => {
                self.state.help_visible = true;
                None
            }
            (_, KeyAction::Quit) => {
                self.state.confirm_close = Some(ConfirmCloseState::default());
                None
            }
            (InputContext::LicenseViewer, action) => {
                self.handle_license_viewer(action);
                None
            }
            (InputContext::Step(_), action) => self.handle_step_action(action),
        }
    }

    fn handle_confirm_close(&mut self, action: KeyAction) -> Option<ExitReason> {
        let dialog = self.state.confirm_close.get_or_insert_with(ConfirmCloseState::default);
        match action {
            KeyAction::SwitchChoice => {
                dialog.selected = dialog.selected.switched();
                None
            }
            KeyAction::Confirm if dialog.selected == CloseChoice::Close => self.close(),
            KeyAction::Quit => self.close(),
            KeyAction::Confirm | KeyAction::Cancel => {
                self.state.confirm_close = None;
                None
            }
            _ => None,
        }
    }

    fn close(&mut self) -> Option<ExitReason> {
        info!(step = ?self.wizard.step(), "setup closed early, run-once marker kept");
        Some(ExitReason::Closed)
    }

    fn handle_license_viewer(&mut self, action: KeyAction) {
        let scroll = &mut self.state.license_scroll;
        match action {
            KeyAction::ScrollUp => scroll.scroll_up(1),
            KeyAction::ScrollDown => scroll.scroll_down(1),
            KeyAction::PageUp => scroll.scroll_up(scroll.page()),
            KeyAction::PageDown => scroll.scroll_down(scroll.page()),
            KeyAction::Accept => {
                if self.wizard.accept_license() {
                    self.state.set_status("License accepted");
                } else {
                    debug!("license OK pressed before the reveal finished");
                }
            }
            _ => {}
        }
    }

    fn handle_step_action(&mut self, action: KeyAction) -> Option<ExitReason> {
        match action {
            KeyAction::Next => {
                let transition = self.wizard.advance();
                self.apply_transition(transition)
            }
            KeyAction::Back => {
                let transition = self.wizard.retreat();
                self.apply_transition(transition)
            }
            KeyAction::Finish => self.wizard.finish().and_then(|effect| self.dispatch(effect)),
            KeyAction::ViewLicense => {
                self.wizard.open_license();
                self.state.license_scroll.reset();
                self.license_due = None;
                None
            }
            KeyAction::NavigateUp => {
                self.state.cursor_up();
                None
            }
            KeyAction::NavigateDown => {
                self.state.cursor_down();
                None
            }
            KeyAction::Toggle => {
                let id = self.state.highlighted_profile()?;
                if let Some(change) = self.wizard.toggle(id.key()) {
                    debug!(profile = %change.id, selected = change.selected, "profile toggled");
                    self.command_due = None;
                }
                None
            }
            _ => None,
        }
    }

    fn apply_transition(&mut self, transition: Transition) -> Option<ExitReason> {
        match transition {
            Transition::Refused { at } => {
                self.state.set_status(refusal_message(at));
                None
            }
            Transition::Unchanged { .. } => None,
            Transition::Moved { to, effect, .. } => {
                self.state.set_status("");
                if to == Step::PackageSelect {
                    self.command_due = None;
                }
                effect.and_then(|effect| self.dispatch(effect))
            }
        }
    }

    /// Carry out a wizard effect
    fn dispatch(&mut self, effect: Effect) -> Option<ExitReason> {
        match effect {
            Effect::Launch(request) => {
                let status = match self.launcher.launch(&request) {
                    LaunchOutcome::Launched { terminal } => {
                        format!("Installing packages in {}", terminal)
                    }
                    LaunchOutcome::NoTerminal => {
                        "No terminal emulator could be started, packages were not installed"
                            .to_string()
                    }
                    LaunchOutcome::Skipped => format!("[DRY RUN] {}", request.command),
                };
                self.state.set_status(status);
                None
            }
            Effect::Complete => {
                if self.state.dry_run {
                    info!(marker = %self.marker.path().display(), "[DRY RUN] would remove run-once marker");
                } else if let Err(e) = self.marker.remove() {
                    warn!(error = %e, "could not remove the run-once marker");
                }
                Some(ExitReason::Completed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::LaunchRequest;
    use crossterm::event::{KeyCode, KeyModifiers, ModifierKeyCode};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records requests in a buffer the test keeps a handle to
    struct RecordingLauncher(Rc<RefCell<Vec<LaunchRequest>>>);

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&mut self, request: &LaunchRequest) -> LaunchOutcome {
            self.0.borrow_mut().push(request.clone());
            LaunchOutcome::Skipped
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(dir: &TempDir) -> (App, Rc<RefCell<Vec<LaunchRequest>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let marker = RunOnceMarker::new(dir.path().join("once.desktop"));
        let app = App::new(
            StepController::new("short license"),
            Box::new(RecordingLauncher(Rc::clone(&requests))),
            marker,
            ShutdownFlag::new(),
        );
        (app, requests)
    }

    #[test]
    fn test_release_events_are_ignored() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        let mut enter = key(KeyCode::Enter);
        enter.kind = KeyEventKind::Release;
        app.handle_key_event(enter);
        assert_eq!(app.wizard().step(), Step::Welcome);
    }

    #[test]
    fn test_refused_advance_sets_status() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::KeyPrompt);
        assert_eq!(app.state().status_message, refusal_message(Step::KeyPrompt));

        app.handle_key_event(KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftSuper),
            KeyModifiers::SUPER,
        ));
        assert!(app.state().status_message.is_empty());
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::License);
    }

    #[test]
    fn test_close_confirmation_keeps_marker() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        std::fs::write(dir.path().join("once.desktop"), "").expect("write marker");

        assert_eq!(app.handle_key_event(key(KeyCode::Char('q'))), None);
        assert!(app.state().confirm_close.is_some());

        // Enter on the default button goes back to the wizard
        assert_eq!(app.handle_key_event(key(KeyCode::Enter)), None);
        assert!(app.state().confirm_close.is_none());

        app.handle_key_event(key(KeyCode::Esc));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(
            app.handle_key_event(key(KeyCode::Enter)),
            Some(ExitReason::Closed)
        );
        assert!(dir.path().join("once.desktop").exists());
    }

    #[test]
    fn test_help_overlay_toggles() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.state().help_visible);
        // Keys do not reach the wizard while help is open
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::Welcome);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.state().help_visible);
    }

    #[test]
    fn test_pump_reveals_ticks_license_on_schedule() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        app.wizard.open_license();

        let start = Instant::now();
        app.pump_reveals(start);
        assert_eq!(app.wizard().license_session().map(|s| s.revealed_count()), Some(0));

        app.pump_reveals(start + Duration::from_millis(50));
        assert_eq!(app.wizard().license_session().map(|s| s.revealed_count()), Some(2));
    }

    #[test]
    fn test_command_preview_only_ticks_on_package_screen() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        let start = Instant::now();
        app.pump_reveals(start);
        app.pump_reveals(start + Duration::from_secs(1));
        assert_eq!(app.wizard().command_session().revealed_count(), 0);
        assert_eq!(app.poll_timeout(start), IDLE_POLL);
    }

    #[test]
    fn test_toggle_follows_cursor() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, requests) = app_in(&dir);
        // Welcome -> KeyPrompt -> License -> PackageSelect
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::SUPER));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Char('v')));
        while !app.wizard.can_accept_license() {
            app.wizard.tick_license();
        }
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::PackageSelect);

        // Cursor starts on art
        app.handle_key_event(key(KeyCode::Char(' ')));
        assert!(app.wizard().selection().contains(crate::profiles::ProfileId::Art));

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::Summary);
        let requests = requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].command.contains("krita"));
    }

    #[test]
    fn test_finish_removes_marker() {
        let dir = TempDir::new().expect("temp dir");
        let (mut app, _) = app_in(&dir);
        let marker = dir.path().join("once.desktop");
        std::fs::write(&marker, "").expect("write marker");

        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::SUPER));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Char('v')));
        while !app.wizard.can_accept_license() {
            app.wizard.tick_license();
        }
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.wizard().step(), Step::Summary);

        assert_eq!(
            app.handle_key_event(key(KeyCode::Enter)),
            Some(ExitReason::Completed)
        );
        assert!(!marker.exists());
    }
}
