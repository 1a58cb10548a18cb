//! Onboarding wizard screens.
//!
//! One render function per [`Step`]:
//! - `Welcome` - Greeting
//! - `KeyPrompt` - Wait for the application launcher key
//! - `License` - Entry point to the license viewer
//! - `PackageSelect` - Profile checklist with the live install command
//! - `Summary` - What happens next
//!
//! Screens only read wizard state. Every change goes through the app's key
//! dispatch into [`StepController`].

use crate::app::AppState;
use crate::profiles::Profile;
use crate::theme::{Colors, Styles};
use crate::wizard::{Step, StepController};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Shortcut hints on the key prompt screen
pub const LAUNCHER_HINT: &str =
    "This is how you open your application launcher (This key is also called Meta or Super key in Linux)";
pub const SHORTCUT_HINT: &str = "meta+w - meta+d - meta+e .. check settings for more";

/// Closing words on the summary screen
pub const SUMMARY_TEXT: &str = "Setup is complete! A TERMINAL will open to install the packages, give it your password - that you used to login and Thats all enjoy error.os :)";

/// Cursor drawn after text that is still being revealed
const REVEAL_CURSOR: &str = "▌";

/// Render the screen for the current step
pub fn render_step(f: &mut Frame, area: Rect, wizard: &StepController, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Styles::border_inactive())
        .style(Styles::panel_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match wizard.step() {
        Step::Welcome => render_welcome(f, inner),
        Step::KeyPrompt => render_key_prompt(f, inner, wizard.state().win_key_observed),
        Step::License => render_license(f, inner, wizard.state().license_accepted),
        Step::PackageSelect => render_package_select(f, inner, wizard, state),
        Step::Summary => render_summary(f, inner),
    }
}

/// Vertically center `lines` in `area`
fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, Rect::new(area.x, top, area.width, area.height - (top - area.y)));
}

// ============================================================================
// Welcome
// ============================================================================

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Welcome to error.os", Styles::title())),
        Line::from(""),
        Line::from(Span::styled("Neospace  2025", Styles::text_muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Let's set up your system in a few simple steps",
            Styles::text(),
        )),
    ];
    render_centered(f, area, lines);
}

// ============================================================================
// Key Prompt
// ============================================================================

pub fn render_key_prompt(f: &mut Frame, area: Rect, observed: bool) {
    let key_style = if observed {
        Style::default()
            .fg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    };

    let status = if observed {
        Span::styled("Launcher key detected, you can go ahead", Style::default().fg(Colors::SUCCESS))
    } else {
        Span::styled("Waiting for the launcher key...", Styles::text_muted())
    };

    let lines = vec![
        Line::from(Span::styled("Press the WIN Key", Styles::title())),
        Line::from(""),
        Line::from(Span::styled("╭───────────╮", key_style)),
        Line::from(Span::styled("│  ⊞  WIN   │", key_style)),
        Line::from(Span::styled("╰───────────╯", key_style)),
        Line::from(""),
        Line::from(Span::styled(LAUNCHER_HINT, Styles::text())),
        Line::from(""),
        Line::from(Span::styled(SHORTCUT_HINT, Styles::text_muted())),
        Line::from(""),
        Line::from(status),
    ];
    render_centered(f, area, lines);
}

// ============================================================================
// License
// ============================================================================

pub fn render_license(f: &mut Frame, area: Rect, accepted: bool) {
    let status = if accepted {
        Line::from(Span::styled("License accepted", Style::default().fg(Colors::SUCCESS)))
    } else {
        Line::from(Span::styled(
            "Read the whole license and press OK to continue",
            Styles::text_muted(),
        ))
    };

    let lines = vec![
        Line::from(Span::styled("License Agreement", Styles::title())),
        Line::from(""),
        Line::from(Span::styled("Review to go ahead", Styles::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" View License ", Styles::button_primary()),
            Span::styled("  (V)", Styles::nav_hint()),
        ]),
        Line::from(""),
        status,
    ];
    render_centered(f, area, lines);
}

// ============================================================================
// Package Select
// ============================================================================

/// One checklist entry; selected profiles list their packages underneath
pub fn profile_item(profile: &Profile, selected: bool) -> ListItem<'static> {
    let checkbox = if selected { "[x]" } else { "[ ]" };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", checkbox), Style::default().fg(Colors::PRIMARY)),
        Span::styled(profile.name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" - "),
        Span::raw(profile.description),
    ])];
    if selected {
        lines.extend(
            profile
                .packages
                .iter()
                .map(|pkg| Line::from(Span::styled(format!("      • {}", pkg), Styles::package_list()))),
        );
    }
    ListItem::new(Text::from(lines))
}

pub fn render_package_select(
    f: &mut Frame,
    area: Rect,
    wizard: &StepController,
    state: &AppState,
) {
    let direction = if area.width >= 110 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let selection = wizard.selection();
    let items: Vec<ListItem> = wizard
        .catalog()
        .all()
        .into_iter()
        .map(|profile| profile_item(profile, selection.contains(profile.id)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(format!(" Profiles ({} selected) ", selection.len())),
        )
        .style(Styles::card())
        .highlight_style(Styles::card_focused())
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.package_cursor));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    render_command_preview(f, chunks[1], wizard);
}

/// The install command as revealed so far
pub fn render_command_preview(f: &mut Frame, area: Rect, wizard: &StepController) {
    let session = wizard.command_session();
    let mut spans = vec![Span::raw(session.revealed().to_string())];
    if !session.is_done() {
        spans.push(Span::raw(REVEAL_CURSOR));
    }

    let preview = Paragraph::new(Line::from(spans))
        .style(Styles::terminal())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title(" Installation command "),
        );
    f.render_widget(preview, area);
}

// ============================================================================
// Summary
// ============================================================================

pub fn render_summary(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("All Set!", Styles::title())),
        Line::from(""),
        Line::from(Span::styled(SUMMARY_TEXT, Styles::text())),
    ];
    render_centered(f, area, lines);
}
