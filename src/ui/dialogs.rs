//! Dialog rendering module
//!
//! This module handles rendering of the modal windows: the license viewer
//! and the close confirmation.

use crate::app::{AppState, CloseChoice, ConfirmCloseState};
use crate::components::help_overlay::centered_rect;
use crate::license::LICENSE_VIEWER_TITLE;
use crate::theme::{Colors, Styles};
use crate::wizard::StepController;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Question asked before closing early
pub const CLOSE_QUESTION: &str = "Close Setup?";
pub const CLOSE_DETAIL: &str = "The setup will appear again on next startup.";

/// Split `text` into rows of at most `width` characters, breaking hard at
/// the width and at every newline.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    rows
}

/// Render the license viewer over the current screen
pub fn render_license_viewer(f: &mut Frame, wizard: &StepController, state: &mut AppState) {
    let Some(session) = wizard.license_session() else {
        return;
    };

    let parent = f.area();
    let area = centered_rect(
        (parent.width / 10 * 9).max(40),
        (parent.height / 10 * 9).max(12),
        parent,
    );
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Styles::border_active())
        .title(format!(" {} ", LICENSE_VIEWER_TITLE))
        .style(Style::default().bg(Colors::BG_PRIMARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let text_area = chunks[0];
    let rows = wrap_text(session.revealed(), text_area.width as usize);
    state
        .license_scroll
        .update_viewport(rows.len(), text_area.height as usize);

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(state.license_scroll.offset())
        .take(text_area.height as usize)
        .map(Line::from)
        .collect();
    f.render_widget(Paragraph::new(visible).style(Styles::terminal()), text_area);

    let footer = if wizard.can_accept_license() {
        Line::from(vec![
            Span::styled(" OK ", Styles::button_primary()),
            Span::styled("  Enter", Styles::nav_hint()),
        ])
    } else {
        Line::from(Span::styled(
            format!("Loading... {:>3}%", (session.progress() * 100.0).floor() as u32),
            Styles::text_muted(),
        ))
    };
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Right), chunks[1]);
}

/// Render the close confirmation dialog
pub fn render_confirm_close(f: &mut Frame, dialog: &ConfirmCloseState) {
    let area = centered_rect(52, 8, f.area());
    f.render_widget(Clear, area);

    let button = |choice: CloseChoice| {
        let style = match (choice, dialog.selected == choice) {
            (CloseChoice::Close, true) => Styles::button_danger(),
            (CloseChoice::KeepGoing, true) => Styles::button_primary(),
            (_, false) => Styles::button_back(),
        };
        Span::styled(format!(" {} ", choice.label()), style)
    };

    let lines = vec![
        Line::from(Span::styled(
            CLOSE_QUESTION,
            Style::default()
                .fg(Colors::FG_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(CLOSE_DETAIL, Styles::text())),
        Line::from(""),
        Line::from(vec![
            button(CloseChoice::KeepGoing),
            Span::raw("   "),
            button(CloseChoice::Close),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Colors::ERROR))
                .style(Styles::panel_bg()),
        );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_long_lines() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("ab\n\ncd", 4), vec!["ab", "", "cd"]);
    }

    #[test]
    fn test_wrap_text_keeps_trailing_newline_row() {
        assert_eq!(wrap_text("ab\n", 10), vec!["ab", ""]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_text_counts_characters_not_bytes() {
        assert_eq!(wrap_text("ééé", 2), vec!["éé", "é"]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("ab", 0), vec!["a", "b"]);
    }
}
