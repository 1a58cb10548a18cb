//! Onboarding step machine
//!
//! [`StepController`] is the single owner of wizard progress: the current
//! step, the two gates, the profile selection and both reveal sessions.
//! Rendering code observes it; it never reaches into the UI.
//!
//! # Step Flow
//!
//! ```text
//! Welcome -> KeyPrompt -> License -> PackageSelect -> Summary -> (finish)
//!              gate:        gate:          |
//!           launcher key  license       launch request
//!            observed     accepted      on leaving forward
//! ```
//!
//! # Design Principles
//!
//! - **Gates are state, not errors**: a refused advance returns
//!   [`Transition::Refused`] and changes nothing.
//! - **Monotonic gates**: once the launcher key is observed or the license is
//!   accepted, the flag stays set for the rest of the run.
//! - **Effects are returned, not performed**: launching a terminal and
//!   removing the run-once marker are handed back as [`Effect`]s for the
//!   embedder to dispatch exactly once.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::command::{is_installable, synthesize};
use crate::profiles::ProfileCatalog;
use crate::reveal::{RevealBand, RevealPacing, RevealSession, TickOutcome};
use crate::selection::{SelectionChange, SelectionSet};

/// Screens of the onboarding tour, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Step {
    #[default]
    Welcome = 0,
    KeyPrompt = 1,
    License = 2,
    PackageSelect = 3,
    Summary = 4,
}

impl Step {
    pub const TOTAL_STEPS: usize = 5;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Welcome),
            1 => Some(Self::KeyPrompt),
            2 => Some(Self::License),
            3 => Some(Self::PackageSelect),
            4 => Some(Self::Summary),
            _ => None,
        }
    }

    /// Following step, or `None` on the last one.
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding step, or `None` on the first one.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Welcome => None,
            _ => Self::from_index(self.index() - 1),
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to error.os",
            Self::KeyPrompt => "Press the WIN Key",
            Self::License => "License Agreement",
            Self::PackageSelect => "Choose Your Packages",
            Self::Summary => "All Set!",
        }
    }

    /// Progress bar value: 20% per step.
    pub const fn progress_percent(self) -> u16 {
        (self.index() as u16 + 1) * 20
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::Welcome,
            Self::KeyPrompt,
            Self::License,
            Self::PackageSelect,
            Self::Summary,
        ]
    }
}

/// Progress flags of a run. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardState {
    pub step: Step,
    pub win_key_observed: bool,
    pub license_accepted: bool,
}

impl WizardState {
    /// Whether the gate of the current step is open.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Welcome => true,
            Step::KeyPrompt => self.win_key_observed,
            Step::License => self.license_accepted,
            Step::PackageSelect => true,
            Step::Summary => true,
        }
    }
}

/// Ask the process launcher to run `command` in a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub command: String,
}

/// Side effect for the embedder to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the synthesized command in a terminal; fire and forget.
    Launch(LaunchRequest),
    /// Remove the run-once marker, then exit.
    Complete,
}

/// Result of [`StepController::advance`] or [`StepController::retreat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The gate of `at` is closed.
    Refused { at: Step },
    /// Already at the boundary in that direction.
    Unchanged { at: Step },
    Moved {
        from: Step,
        to: Step,
        effect: Option<Effect>,
    },
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    pub fn effect(&self) -> Option<&Effect> {
        match self {
            Self::Moved { effect, .. } => effect.as_ref(),
            _ => None,
        }
    }
}

/// Recognizes the application-launcher key (Super / Meta / Win).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LauncherKey {
    /// Extra key accepted for terminals that cannot report bare modifiers.
    pub fallback: Option<char>,
}

impl LauncherKey {
    pub fn with_fallback(fallback: Option<char>) -> Self {
        Self { fallback }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Modifier(
                ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta,
            ) => true,
            _ if key
                .modifiers
                .intersects(KeyModifiers::SUPER | KeyModifiers::META) =>
            {
                true
            }
            KeyCode::Char(c) => {
                self.fallback == Some(c) && !key.modifiers.contains(KeyModifiers::CONTROL)
            }
            _ => false,
        }
    }
}

/// Owner of all wizard state.
#[derive(Debug, Clone)]
pub struct StepController {
    state: WizardState,
    selection: SelectionSet,
    catalog: ProfileCatalog,
    launcher_key: LauncherKey,
    license_text: String,
    /// Present while the license viewer is showing.
    license: Option<RevealSession>,
    command: RevealSession,
    finished: bool,
}

impl StepController {
    pub fn new(license_text: impl Into<String>) -> Self {
        let selection = SelectionSet::new();
        let catalog = ProfileCatalog::new();
        let command = RevealSession::command(synthesize(&selection, &catalog));
        Self {
            state: WizardState::default(),
            selection,
            catalog,
            launcher_key: LauncherKey::default(),
            license_text: license_text.into(),
            license: None,
            command,
            finished: false,
        }
    }

    pub fn with_launcher_key(mut self, launcher_key: LauncherKey) -> Self {
        self.launcher_key = launcher_key;
        self
    }

    /// Reveal the command preview one character per `interval`.
    pub fn with_command_interval(mut self, interval: Duration) -> Self {
        let pacing = RevealPacing::Linear(RevealBand {
            interval,
            chars_per_tick: 1,
        });
        self.command = RevealSession::new(self.command_text(), pacing);
        self
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn can_advance(&self) -> bool {
        self.state.can_advance()
    }

    /// Move one step forward if the current gate allows it.
    ///
    /// Leaving `PackageSelect` carries a launch request for the synthesized
    /// command, unless nothing is selected. `Summary` is the last step;
    /// use [`finish`](Self::finish) there.
    pub fn advance(&mut self) -> Transition {
        let from = self.state.step;
        if !self.state.can_advance() {
            tracing::debug!(step = ?from, "advance refused by gate");
            return Transition::Refused { at: from };
        }
        let Some(to) = from.next() else {
            return Transition::Unchanged { at: from };
        };

        let effect = if from == Step::PackageSelect {
            let command = self.command_text();
            if is_installable(&command) {
                Some(Effect::Launch(LaunchRequest { command }))
            } else {
                tracing::info!("nothing selected, skipping package installation");
                None
            }
        } else {
            None
        };

        self.enter(to);
        tracing::info!(from = ?from, to = ?to, "advanced");
        Transition::Moved { from, to, effect }
    }

    /// Move one step back. Never gated.
    pub fn retreat(&mut self) -> Transition {
        let from = self.state.step;
        let Some(to) = from.previous() else {
            return Transition::Unchanged { at: from };
        };
        self.enter(to);
        tracing::info!(from = ?from, to = ?to, "went back");
        Transition::Moved {
            from,
            to,
            effect: None,
        }
    }

    /// Terminal action from `Summary`. Yields [`Effect::Complete`] once.
    pub fn finish(&mut self) -> Option<Effect> {
        if self.state.step != Step::Summary || self.finished {
            return None;
        }
        self.finished = true;
        tracing::info!("onboarding finished");
        Some(Effect::Complete)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn enter(&mut self, step: Step) {
        self.state.step = step;
        if step == Step::PackageSelect {
            self.refresh_command();
        }
    }

    /// Record a key press. Returns `true` if it opened the key gate.
    ///
    /// Only the launcher key while on `KeyPrompt` has any effect.
    pub fn observe_key_press(&mut self, key: &KeyEvent) -> bool {
        if self.state.step != Step::KeyPrompt || !self.launcher_key.matches(key) {
            return false;
        }
        if !self.state.win_key_observed {
            tracing::info!("launcher key observed");
        }
        self.state.win_key_observed = true;
        true
    }

    /// Open the license viewer, restarting its reveal from the beginning.
    pub fn open_license(&mut self) -> &RevealSession {
        tracing::debug!("license viewer opened");
        self.license
            .insert(RevealSession::license(self.license_text.clone()))
    }

    pub fn license_session(&self) -> Option<&RevealSession> {
        self.license.as_ref()
    }

    pub fn is_license_viewer_open(&self) -> bool {
        self.license.is_some()
    }

    /// Whether the viewer has revealed the whole text and can be acknowledged.
    pub fn can_accept_license(&self) -> bool {
        self.license.as_ref().is_some_and(RevealSession::is_done)
    }

    /// Acknowledge the fully revealed license and close the viewer.
    ///
    /// Refused (returns `false`) while the reveal is still running or the
    /// viewer is not open.
    pub fn accept_license(&mut self) -> bool {
        if !self.can_accept_license() {
            return false;
        }
        self.license = None;
        self.state.license_accepted = true;
        tracing::info!("license accepted");
        true
    }

    pub fn tick_license(&mut self) -> TickOutcome {
        match self.license.as_mut() {
            Some(session) => session.tick(),
            None => TickOutcome::Idle,
        }
    }

    /// Delay before the license session wants its next tick.
    pub fn license_interval(&self) -> Option<Duration> {
        self.license
            .as_ref()
            .filter(|s| !s.is_done())
            .map(RevealSession::next_interval)
    }

    pub fn command_session(&self) -> &RevealSession {
        &self.command
    }

    pub fn tick_command(&mut self) -> TickOutcome {
        self.command.tick()
    }

    pub fn command_interval(&self) -> Option<Duration> {
        (!self.command.is_done()).then(|| self.command.next_interval())
    }

    /// The command for the current selection.
    pub fn command_text(&self) -> String {
        synthesize(&self.selection, &self.catalog)
    }

    /// Flip a profile and restart the command preview for the new selection.
    pub fn toggle(&mut self, key: &str) -> Option<SelectionChange> {
        let change = self.selection.toggle(key)?;
        self.refresh_command();
        Some(change)
    }

    fn refresh_command(&mut self) {
        let command = self.command_text();
        self.command.replace_source(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn super_press() -> KeyEvent {
        KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftSuper),
            KeyModifiers::SUPER,
        )
    }

    fn char_press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn at_step(step: Step) -> StepController {
        let mut wizard = StepController::new("license");
        wizard.state.step = step;
        wizard
    }

    #[test]
    fn test_step_order_is_sequential() {
        for (i, step) in Step::all().iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::from_index(5), None);
        assert_eq!(Step::all().len(), Step::TOTAL_STEPS);
    }

    #[test]
    fn test_step_next_and_previous_chain() {
        assert_eq!(Step::Welcome.previous(), None);
        assert_eq!(Step::Summary.next(), None);
        for pair in Step::all().windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Step::Welcome.progress_percent(), 20);
        assert_eq!(Step::Summary.progress_percent(), 100);
    }

    #[test]
    fn test_initial_state() {
        let wizard = StepController::new("license");
        assert_eq!(wizard.state(), WizardState::default());
        assert_eq!(wizard.step(), Step::Welcome);
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_gate_table() {
        let mut state = WizardState::default();
        let expected = [true, false, false, true, true];
        for (step, open) in Step::all().iter().zip(expected) {
            state.step = *step;
            assert_eq!(state.can_advance(), open, "{:?}", step);
        }
        state.step = Step::KeyPrompt;
        state.win_key_observed = true;
        assert!(state.can_advance());
        state.step = Step::License;
        state.license_accepted = true;
        assert!(state.can_advance());
    }

    #[test]
    fn test_key_prompt_refuses_until_launcher_key() {
        let mut wizard = at_step(Step::KeyPrompt);
        assert_eq!(wizard.advance(), Transition::Refused { at: Step::KeyPrompt });
        assert_eq!(wizard.step(), Step::KeyPrompt);

        assert!(!wizard.observe_key_press(&char_press('a')));
        assert_eq!(wizard.advance(), Transition::Refused { at: Step::KeyPrompt });

        assert!(wizard.observe_key_press(&super_press()));
        assert!(wizard.advance().is_moved());
        assert_eq!(wizard.step(), Step::License);
    }

    #[test]
    fn test_launcher_key_ignored_outside_key_prompt() {
        let mut wizard = at_step(Step::Welcome);
        assert!(!wizard.observe_key_press(&super_press()));
        assert!(!wizard.state().win_key_observed);
    }

    #[test]
    fn test_launcher_key_variants() {
        let key = LauncherKey::default();
        assert!(key.matches(&super_press()));
        assert!(key.matches(&KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::RightMeta),
            KeyModifiers::NONE
        )));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('e'), KeyModifiers::SUPER)));
        assert!(!key.matches(&char_press('w')));

        let mut release = super_press();
        release.kind = KeyEventKind::Release;
        assert!(!key.matches(&release));

        let with_fallback = LauncherKey::with_fallback(Some('w'));
        assert!(with_fallback.matches(&char_press('w')));
        assert!(!with_fallback.matches(&KeyEvent::new(
            KeyCode::Char('w'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_license_cannot_be_accepted_before_reveal_completes() {
        let mut wizard = at_step(Step::License);
        assert!(!wizard.accept_license(), "viewer not open");

        wizard.open_license();
        wizard.tick_license();
        assert!(!wizard.accept_license(), "reveal still running");
        assert_eq!(wizard.advance(), Transition::Refused { at: Step::License });

        while !wizard.can_accept_license() {
            wizard.tick_license();
        }
        assert!(wizard.accept_license());
        assert!(!wizard.is_license_viewer_open());
        assert!(wizard.advance().is_moved());
    }

    #[test]
    fn test_reopening_license_restarts_reveal() {
        let mut wizard = at_step(Step::License);
        wizard.open_license();
        wizard.tick_license();
        assert!(wizard.license_session().is_some_and(|s| s.revealed_count() > 0));
        wizard.open_license();
        assert_eq!(wizard.license_session().map(|s| s.revealed_count()), Some(0));
    }

    #[test]
    fn test_leaving_package_select_requests_launch() {
        let mut wizard = at_step(Step::PackageSelect);
        let transition = wizard.advance();
        assert_eq!(
            transition,
            Transition::Moved {
                from: Step::PackageSelect,
                to: Step::Summary,
                effect: Some(Effect::Launch(LaunchRequest {
                    command: "sudo apt update && sudo apt install -y falkon mpv qimgv qmmp"
                        .to_string()
                })),
            }
        );
    }

    #[test]
    fn test_empty_selection_skips_launch() {
        let mut wizard = at_step(Step::PackageSelect);
        wizard.toggle("essential");
        let transition = wizard.advance();
        assert!(transition.is_moved());
        assert_eq!(transition.effect(), None);
    }

    #[test]
    fn test_advance_at_summary_is_clamped() {
        let mut wizard = at_step(Step::Summary);
        assert_eq!(wizard.advance(), Transition::Unchanged { at: Step::Summary });
        assert_eq!(wizard.step(), Step::Summary);
    }

    #[test]
    fn test_retreat() {
        let mut wizard = at_step(Step::Welcome);
        assert_eq!(wizard.retreat(), Transition::Unchanged { at: Step::Welcome });

        let mut wizard = at_step(Step::License);
        assert!(wizard.retreat().is_moved());
        assert_eq!(wizard.step(), Step::KeyPrompt);
    }

    #[test]
    fn test_finish_only_from_summary_and_only_once() {
        let mut wizard = at_step(Step::PackageSelect);
        assert_eq!(wizard.finish(), None);

        let mut wizard = at_step(Step::Summary);
        assert_eq!(wizard.finish(), Some(Effect::Complete));
        assert_eq!(wizard.finish(), None);
        assert!(wizard.is_finished());
    }

    #[test]
    fn test_toggle_restarts_command_reveal() {
        let mut wizard = at_step(Step::PackageSelect);
        for _ in 0..10 {
            wizard.tick_command();
        }
        assert_eq!(wizard.command_session().revealed_count(), 10);

        wizard.toggle("gaming");
        assert_eq!(wizard.command_session().revealed_count(), 0);
        while wizard.command_interval().is_some() {
            wizard.tick_command();
        }
        assert_eq!(wizard.command_session().revealed(), wizard.command_text());
    }

    #[test]
    fn test_command_interval_survives_toggle() {
        let mut wizard =
            at_step(Step::PackageSelect).with_command_interval(Duration::from_millis(20));
        assert_eq!(wizard.command_interval(), Some(Duration::from_millis(20)));
        wizard.toggle("dev");
        assert_eq!(wizard.command_interval(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_unknown_toggle_keeps_session() {
        let mut wizard = at_step(Step::PackageSelect);
        wizard.tick_command();
        assert_eq!(wizard.toggle("office"), None);
        assert_eq!(wizard.command_session().revealed_count(), 1);
    }
}
