//! Termination signal handling
//!
//! SIGINT, SIGTERM and SIGHUP only raise a shared flag. The event loop polls
//! it between events, restores the terminal, and exits like a cancelled
//! setup (the run-once marker is left in place).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};

/// Set once any termination signal arrives.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Register SIGINT, SIGTERM and SIGHUP against `flag`.
/// Call this once at program start.
pub fn init_signal_handlers(flag: &ShutdownFlag) -> Result<(), std::io::Error> {
    for sig in [SIGINT, SIGTERM, SIGHUP] {
        signal_hook::flag::register(sig, Arc::clone(&flag.0))?;
    }
    tracing::debug!("signal handlers registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_lowered() {
        assert!(!ShutdownFlag::new().is_raised());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = ShutdownFlag::new();
        let observer = flag.clone();
        flag.raise();
        assert!(observer.is_raised());
    }

    #[test]
    fn test_signal_raises_flag() {
        let flag = ShutdownFlag::new();
        init_signal_handlers(&flag).expect("register handlers");
        signal_hook::low_level::raise(SIGHUP).expect("raise SIGHUP");
        assert!(flag.is_raised());
    }
}
