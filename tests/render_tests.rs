// Rendering smoke tests for erroros-onboard
//
// Draw full frames into ratatui's TestBackend and look for the text each
// screen and overlay is expected to show.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;

use onboard::app::{App, ExitReason};
use onboard::launcher::DryRunLauncher;
use onboard::license::LICENSE_VIEWER_TITLE;
use onboard::marker::RunOnceMarker;
use onboard::signals::ShutdownFlag;
use onboard::ui::dialogs::CLOSE_QUESTION;
use onboard::ui::header::HEADER_TITLE;
use onboard::wizard::{Step, StepController};

const LICENSE: &str = "Short license text for rendering tests.";

struct Harness {
    app: App,
    terminal: Terminal<TestBackend>,
    _dir: TempDir,
}

impl Harness {
    fn new(width: u16, height: u16) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("once.desktop");
        std::fs::write(&path, "").expect("write marker");

        let app = App::new(
            StepController::new(LICENSE),
            Box::new(DryRunLauncher::new()),
            RunOnceMarker::new(path),
            ShutdownFlag::new(),
        )
        .with_dry_run(true);
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");

        Self {
            app,
            terminal,
            _dir: dir,
        }
    }

    fn press(&mut self, code: KeyCode) -> Option<ExitReason> {
        self.app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Draw a frame and return the buffer as one string per row
    fn frame(&mut self) -> String {
        self.app.draw(&mut self.terminal).expect("draw");
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}

#[test]
fn test_welcome_frame_shows_header() {
    let mut harness = Harness::new(100, 30);
    let frame = harness.frame();
    assert!(frame.contains(HEADER_TITLE), "{}", frame);
    assert!(frame.contains("Step 1 of 5"));
    assert!(frame.contains("[DRY RUN]"));
    assert!(frame.contains(Step::Welcome.title()));
}

#[test]
fn test_help_overlay_is_drawn_on_top() {
    let mut harness = Harness::new(100, 30);
    harness.press(KeyCode::Char('?'));
    let frame = harness.frame();
    assert!(frame.contains("Help"));
    assert!(frame.contains("Press ? or Esc to close"));

    harness.press(KeyCode::Esc);
    assert!(!harness.frame().contains("Press ? or Esc to close"));
}

#[test]
fn test_close_dialog_is_drawn() {
    let mut harness = Harness::new(100, 30);
    assert_eq!(harness.press(KeyCode::Char('q')), None);
    assert!(harness.frame().contains(CLOSE_QUESTION));
}

#[test]
fn test_license_viewer_is_drawn() {
    let mut harness = Harness::new(100, 30);
    harness.press(KeyCode::Enter);
    harness.app.handle_key_event(KeyEvent::new(
        KeyCode::Modifier(ModifierKeyCode::LeftSuper),
        KeyModifiers::SUPER,
    ));
    harness.press(KeyCode::Enter);
    assert_eq!(harness.app.wizard().step(), Step::License);

    harness.press(KeyCode::Char('v'));
    assert!(harness.app.wizard().is_license_viewer_open());
    assert!(harness.frame().contains(LICENSE_VIEWER_TITLE));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    for (width, height) in [(1, 1), (20, 5), (40, 8)] {
        let mut harness = Harness::new(width, height);
        harness.press(KeyCode::Char('?'));
        harness.frame();
    }
}
