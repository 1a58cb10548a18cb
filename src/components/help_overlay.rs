//! Help overlay component
//!
//! Displays context-sensitive help in a centered floating window.

use super::keybindings::{HelpSection, InputContext, KeybindingContext};
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Hint shown at the bottom of the window
const CLOSE_HINT: &str = "Press ? or Esc to close";

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the context underneath it
    pub fn new(context: &InputContext, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(context);
        Self {
            content: Self::build_content(&sections, context),
        }
    }

    /// Number of content lines
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], context: &InputContext) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  error.os Setup Help  ",
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Styles::text_muted()),
            Span::styled(context.label(), Style::default().fg(Colors::SKY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));
            lines.push(Line::from(""));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::nav_key()),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        if *context == InputContext::Step(crate::wizard::Step::KeyPrompt) {
            lines.push(Line::from(Span::styled(
                "If the Super key is not reported, set fallback_launcher_key in the config file.",
                Styles::text_muted(),
            )));
            lines.push(Line::from(""));
        }

        lines
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let width = (parent.width / 5 * 3).clamp(50.min(parent.width), 80.min(parent.width));
        let height = (self.line_count() as u16 + 3).clamp(15.min(parent.height), 35.min(parent.height));
        let area = centered_rect(width, height, parent);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .title(" Help ")
            .title_bottom(Line::from(CLOSE_HINT).alignment(Alignment::Center))
            .style(Styles::panel_bg());

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

/// A `width` x `height` rectangle centered in `parent`, clipped to it
pub fn centered_rect(width: u16, height: u16, parent: Rect) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    Rect::new(
        parent.x + (parent.width - width) / 2,
        parent.y + (parent.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Step;

    #[test]
    fn test_centered_rect_is_clipped() {
        let parent = Rect::new(0, 0, 40, 10);
        let area = centered_rect(60, 20, parent);
        assert_eq!(area, parent);

        let area = centered_rect(20, 4, parent);
        assert_eq!(area, Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn test_key_prompt_help_mentions_fallback() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&InputContext::Step(Step::KeyPrompt), &ctx);
        let text: String = overlay
            .content
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("fallback_launcher_key"));
        assert!(text.contains("Launcher Key"));
    }

    #[test]
    fn test_line_count_follows_context() {
        let ctx = KeybindingContext::new();
        let welcome = HelpOverlay::new(&InputContext::Step(Step::Welcome), &ctx);
        let packages = HelpOverlay::new(&InputContext::Step(Step::PackageSelect), &ctx);
        assert_eq!(welcome.line_count(), welcome.content.len());
        // Navigation and toggle bindings add rows
        assert!(packages.line_count() > welcome.line_count());
    }
}
