//! Opens a terminal emulator running the install command.
//!
//! The wizard hands over a [`LaunchRequest`] once, when the user leaves the
//! package selection screen. Launching is fire-and-forget: the first
//! terminal that starts is used, its exit status is never inspected, and a
//! total failure is only logged.
//!
//! The terminal is started in its own session with null stdio so it
//! survives this process exiting and never draws over the TUI.

use std::process::{Command, Stdio};

use crate::wizard::LaunchRequest;

/// Terminal emulators tried in order when nothing is configured.
pub const DEFAULT_TERMINALS: &[&str] = &["konsole", "gnome-terminal", "xterm", "alacritty"];

/// Appended to the command so the window stays open after apt finishes.
pub const CLOSE_PROMPT: &str = "read -p 'Press Enter to close...'";

/// What happened to a launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { terminal: String },
    /// Every candidate failed to start.
    NoTerminal,
    /// Dry-run mode; nothing was started.
    Skipped,
}

/// External collaborator that runs a command for the user.
pub trait ProcessLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> LaunchOutcome;
}

/// Shell script passed to `bash -c`.
pub fn shell_script(command: &str) -> String {
    format!("{}; {}", command, CLOSE_PROMPT)
}

/// Arguments for a terminal emulator to run `command` in bash.
pub fn terminal_args(command: &str) -> Vec<String> {
    vec![
        "-e".to_string(),
        "bash".to_string(),
        "-c".to_string(),
        shell_script(command),
    ]
}

/// Extension trait for std::process::Command to start fully detached
pub trait CommandDetach {
    /// Run the child in a new session with null stdio
    fn detached(&mut self) -> &mut Self;
}

impl CommandDetach for Command {
    fn detached(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;

        self.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            self.pre_exec(|| {
                // New session: no controlling terminal, no SIGHUP from ours
                nix::unistd::setsid().map_err(std::io::Error::from)?;
                Ok(())
            });
        }
        self
    }
}

/// Tries each terminal emulator in turn.
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    terminals: Vec<String>,
}

impl Default for TerminalLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_TERMINALS.iter().map(|t| t.to_string()).collect())
    }
}

impl TerminalLauncher {
    pub fn new(terminals: Vec<String>) -> Self {
        Self { terminals }
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }
}

impl ProcessLauncher for TerminalLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> LaunchOutcome {
        let args = terminal_args(&request.command);

        for terminal in &self.terminals {
            match Command::new(terminal).args(&args).detached().spawn() {
                Ok(mut child) => {
                    tracing::info!(terminal = %terminal, pid = child.id(), "install terminal started");
                    // Reap the child whenever it exits; nobody looks at the status.
                    std::thread::spawn(move || {
                        let _ = child.wait();
                    });
                    return LaunchOutcome::Launched {
                        terminal: terminal.clone(),
                    };
                }
                Err(e) => {
                    tracing::debug!(terminal = %terminal, error = %e, "terminal failed to start");
                }
            }
        }

        tracing::warn!(
            tried = ?self.terminals,
            "no terminal emulator could be started, packages were not installed"
        );
        LaunchOutcome::NoTerminal
    }
}

/// Logs the request instead of running it.
#[derive(Debug, Clone, Default)]
pub struct DryRunLauncher {
    requests: Vec<LaunchRequest>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn requests(&self) -> &[LaunchRequest] {
        &self.requests
    }
}

impl ProcessLauncher for DryRunLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> LaunchOutcome {
        tracing::info!(command = %request.command, "[DRY RUN] would open install terminal");
        self.requests.push(request.clone());
        LaunchOutcome::Skipped
    }
}
