//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the wizard step and
//! with whichever overlay (license viewer, close confirmation, help) is open.
//! The same registry drives key dispatch, the navigation bar, and the help
//! overlay, so the three can never disagree.

use crate::wizard::Step;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Where keyboard input is currently routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// A wizard screen with no overlay
    Step(Step),
    /// License viewer overlay on the License step
    LicenseViewer,
    /// "Close Setup?" confirmation
    ConfirmClose,
    /// Help overlay
    Help,
}

impl InputContext {
    /// Display name used in the help overlay
    pub fn label(&self) -> &'static str {
        match self {
            Self::Step(Step::Welcome) => "Welcome",
            Self::Step(Step::KeyPrompt) => "Launcher Key",
            Self::Step(Step::License) => "License",
            Self::Step(Step::PackageSelect) => "Package Selection",
            Self::Step(Step::Summary) => "Summary",
            Self::LicenseViewer => "License Viewer",
            Self::ConfirmClose => "Close Setup",
            Self::Help => "Help",
        }
    }

    /// Overlays swallow the global bindings
    fn has_globals(&self) -> bool {
        matches!(self, Self::Step(_) | Self::LicenseViewer)
    }
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Toggle,
    Next,
    Back,
    ViewLicense,
    Accept,
    Finish,
    SwitchChoice,
    Confirm,
    Cancel,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Shift is ignored so that `?` matches however the terminal reports it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        let significant = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        significant == self.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Context-specific keybindings
    context_bindings: HashMap<InputContext, Vec<Keybinding>>,
    /// Global keybindings (wizard screens and license viewer)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            context_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all contexts
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Close setup"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Close setup",
            ),
        ];

        let back = || {
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::Back, "Left", "Back"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
            ]
        };
        let close = || Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Close setup");

        self.context_bindings.insert(
            InputContext::Step(Step::Welcome),
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
                Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Next"),
                close(),
            ],
        );

        let mut key_prompt = vec![
            Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
            Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Next"),
        ];
        key_prompt.extend(back());
        key_prompt.push(close());
        self.context_bindings
            .insert(InputContext::Step(Step::KeyPrompt), key_prompt);

        let mut license = vec![
            Keybinding::new(KeyCode::Char('v'), KeyAction::ViewLicense, "V", "View license"),
            Keybinding::new(KeyCode::Char('l'), KeyAction::ViewLicense, "L", "View license"),
            Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
            Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Next"),
        ];
        license.extend(back());
        license.push(close());
        self.context_bindings
            .insert(InputContext::Step(Step::License), license);

        let mut packages = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous profile"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next profile"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Previous profile"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Next profile"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle profile"),
            Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Install and next"),
            Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Install and next"),
        ];
        packages.extend(back());
        packages.push(close());
        self.context_bindings
            .insert(InputContext::Step(Step::PackageSelect), packages);

        let mut summary = vec![Keybinding::new(
            KeyCode::Enter,
            KeyAction::Finish,
            "Enter",
            "Finish",
        )];
        summary.extend(back());
        summary.push(close());
        self.context_bindings
            .insert(InputContext::Step(Step::Summary), summary);

        self.context_bindings.insert(
            InputContext::LicenseViewer,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Accept, "Enter", "OK"),
            ],
        );

        self.context_bindings.insert(
            InputContext::ConfirmClose,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::SwitchChoice, "Left", "Switch choice"),
                Keybinding::new(KeyCode::Right, KeyAction::SwitchChoice, "Right", "Switch choice"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchChoice, "Tab", "Switch choice"),
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Confirm"),
                Keybinding::new(KeyCode::Char('y'), KeyAction::Quit, "Y", "Close now"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Close now"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::Cancel, "N", "Keep going"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Keep going"),
            ],
        );

        self.context_bindings.insert(
            InputContext::Help,
            vec![
                Keybinding::new(KeyCode::Char('?'), KeyAction::Cancel, "?", "Close help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Close help"),
            ],
        );
    }

    /// Get keybindings for a specific context (includes global bindings)
    pub fn get_bindings(&self, context: &InputContext) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(context_bindings) = self.context_bindings.get(context) {
            bindings.extend(context_bindings.iter());
        }

        if context.has_globals() {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Resolve a key event to the action bound to it in `context`
    pub fn action_for(&self, context: &InputContext, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(context)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, context: &InputContext) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(context);

        // Most important bindings only; the help overlay lists the rest
        let priority_actions = match context {
            InputContext::Step(Step::Welcome) => {
                vec![KeyAction::Next, KeyAction::Help, KeyAction::Quit]
            }
            InputContext::Step(Step::KeyPrompt) => vec![
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            InputContext::Step(Step::License) => vec![
                KeyAction::ViewLicense,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            InputContext::Step(Step::PackageSelect) => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Toggle,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Help,
            ],
            InputContext::Step(Step::Summary) => vec![
                KeyAction::Finish,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            InputContext::LicenseViewer => vec![
                KeyAction::ScrollUp,
                KeyAction::ScrollDown,
                KeyAction::Accept,
            ],
            InputContext::ConfirmClose => vec![
                KeyAction::SwitchChoice,
                KeyAction::Confirm,
                KeyAction::Cancel,
            ],
            InputContext::Help => vec![KeyAction::Cancel],
        };

        // Combine Up/Down into single item for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_scroll = false;

        for action in priority_actions {
            if matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown) && has_nav {
                continue;
            }
            if matches!(action, KeyAction::ScrollUp | KeyAction::ScrollDown) && has_scroll {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown) {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: "Navigate".to_string(),
                    });
                    has_nav = true;
                } else if matches!(action, KeyAction::ScrollUp | KeyAction::ScrollDown) {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: "Scroll".to_string(),
                    });
                    has_scroll = true;
                } else {
                    items.push(NavBarItem {
                        key_display: binding.display.clone(),
                        action_label: binding.description.clone(),
                    });
                }
            }
        }

        items
    }

    /// Get full help content for a context (for help overlay)
    pub fn get_help_content(&self, context: &InputContext) -> Vec<HelpSection> {
        let groups: [(&str, fn(&KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Next
                        | KeyAction::Back
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Toggle
                        | KeyAction::ViewLicense
                        | KeyAction::Accept
                        | KeyAction::Finish
                        | KeyAction::SwitchChoice
                        | KeyAction::Confirm
                        | KeyAction::Cancel
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(context);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
