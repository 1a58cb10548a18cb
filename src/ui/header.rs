//! Header, footer and navigation bar rendering
//!
//! This module contains the window title, the step progress gauge, the
//! Back/Next button row and the keybinding hint bar.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{InputContext, KeybindingContext};
use crate::theme::{Colors, Styles};
use crate::wizard::{Step, StepController};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

/// Window title
pub const HEADER_TITLE: &str = "error.os Setup";

/// Label of the forward button on `step`
pub fn next_label(step: Step) -> &'static str {
    match step {
        Step::PackageSelect => "Install and next",
        Step::Summary => "Finish",
        _ => "Next",
    }
}

/// Render the title line and the progress gauge
pub fn render_header(f: &mut Frame, area: Rect, wizard: &StepController, state: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let step = wizard.step();
    let mut spans = vec![Span::styled(format!(" {}", HEADER_TITLE), Styles::header())];
    if state.dry_run {
        spans.push(Span::styled("  [DRY RUN]", Style::default().fg(Colors::WARNING)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let counter = format!("Step {} of {} ", step.index() + 1, Step::TOTAL_STEPS);
    f.render_widget(
        Paragraph::new(counter)
            .style(Styles::text_muted())
            .alignment(Alignment::Right),
        chunks[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Styles::progress())
        .percent(step.progress_percent())
        .label(Span::styled(step.title(), Styles::title()));
    f.render_widget(gauge, chunks[1]);
}

/// Render the Back / Next button row
pub fn render_footer(f: &mut Frame, area: Rect, wizard: &StepController) {
    let step = wizard.step();

    if step != Step::Welcome {
        let back = Paragraph::new(Line::from(Span::styled(" < Back ", Styles::button_back())))
            .alignment(Alignment::Left);
        f.render_widget(back, area);
    }

    let next_style = if !wizard.can_advance() {
        Styles::button_disabled()
    } else if step == Step::PackageSelect {
        Styles::button_install()
    } else {
        Styles::button_primary()
    };
    let next = Paragraph::new(Line::from(Span::styled(
        format!(" {} > ", next_label(step)),
        next_style,
    )))
    .alignment(Alignment::Right);
    f.render_widget(next, area);
}

/// Render the status message line
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    if state.status_message.is_empty() {
        return;
    }
    let status = Paragraph::new(state.status_message.as_str())
        .style(Styles::text_muted())
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    context: &InputContext,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(context).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(item.key_display, Styles::nav_key()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Render the help overlay for the context underneath it
pub fn render_help_overlay(f: &mut Frame, context: &InputContext, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(context, keybinding_ctx);
    help_overlay.render(f, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_labels() {
        assert_eq!(next_label(Step::Welcome), "Next");
        assert_eq!(next_label(Step::License), "Next");
        assert_eq!(next_label(Step::PackageSelect), "Install and next");
        assert_eq!(next_label(Step::Summary), "Finish");
    }
}
