//! Typewriter-style incremental text reveal.
//!
//! A [`RevealSession`] discloses a fixed source string over discrete ticks.
//! The embedding event loop decides when to call [`RevealSession::tick`],
//! using [`RevealSession::next_interval`] as the cadence hint; the session
//! itself never touches a clock.
//!
//! # Invariants
//!
//! - The revealed text is always a prefix of the current source.
//! - Replacing the source discards all progress; the revealed text never
//!   mixes characters from an old and a new source.
//! - Counts are in Unicode scalar values, so a tick never splits a character.

use std::time::Duration;

/// Tick interval of the command preview.
pub const COMMAND_TICK_INTERVAL: Duration = Duration::from_millis(5);

/// Interval and batch size for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealBand {
    pub interval: Duration,
    pub chars_per_tick: usize,
}

impl RevealBand {
    const fn new(interval_ms: u64, chars_per_tick: usize) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            chars_per_tick,
        }
    }
}

/// Band for the accelerating license reveal.
///
/// | progress     | interval | chars/tick |
/// |--------------|----------|------------|
/// | [0.0, 0.1)   | 50 ms    | 2          |
/// | [0.1, 0.3)   | 30 ms    | 5          |
/// | [0.3, 0.6)   | 10 ms    | 15         |
/// | [0.6, 1.0]   | 1 ms     | 30         |
pub fn band_for(revealed: usize, total: usize) -> RevealBand {
    let progress = if total == 0 {
        1.0
    } else {
        revealed as f64 / total as f64
    };

    if progress < 0.1 {
        RevealBand::new(50, 2)
    } else if progress < 0.3 {
        RevealBand::new(30, 5)
    } else if progress < 0.6 {
        RevealBand::new(10, 15)
    } else {
        RevealBand::new(1, 30)
    }
}

/// How a session paces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPacing {
    /// Speeds up as progress grows, see [`band_for`].
    Accelerating,
    /// Same band on every tick.
    Linear(RevealBand),
}

impl RevealPacing {
    /// One character per [`COMMAND_TICK_INTERVAL`].
    pub const fn command() -> Self {
        Self::Linear(RevealBand {
            interval: COMMAND_TICK_INTERVAL,
            chars_per_tick: 1,
        })
    }

    fn band(&self, revealed: usize, total: usize) -> RevealBand {
        match self {
            Self::Accelerating => band_for(revealed, total),
            Self::Linear(band) => *band,
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// `appended` characters were revealed; more remain.
    Progress { appended: usize, next_interval: Duration },
    /// The last characters were revealed on this tick.
    Finished { appended: usize },
    /// The session was already done; nothing changed.
    Idle,
}

/// One in-flight reveal of a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSession {
    source: String,
    pacing: RevealPacing,
    /// Characters revealed so far.
    revealed_count: usize,
    /// Byte offset in `source` matching `revealed_count`.
    revealed_bytes: usize,
    total: usize,
    done: bool,
}

impl RevealSession {
    pub fn new(source: impl Into<String>, pacing: RevealPacing) -> Self {
        let source = source.into();
        let total = source.chars().count();
        Self {
            source,
            pacing,
            revealed_count: 0,
            revealed_bytes: 0,
            total,
            // An empty source has nothing to reveal.
            done: total == 0,
        }
    }

    /// Accelerating session for the license viewer.
    pub fn license(text: impl Into<String>) -> Self {
        Self::new(text, RevealPacing::Accelerating)
    }

    /// Linear session for the command preview.
    pub fn command(text: impl Into<String>) -> Self {
        Self::new(text, RevealPacing::command())
    }

    /// Discard all progress and start revealing `source` from scratch.
    pub fn replace_source(&mut self, source: impl Into<String>) {
        *self = Self::new(source, self.pacing);
    }

    /// Reveal the next batch of characters.
    pub fn tick(&mut self) -> TickOutcome {
        if self.done {
            return TickOutcome::Idle;
        }

        let band = self.current_band();
        let remaining = self.total - self.revealed_count;
        let take = band.chars_per_tick.min(remaining);

        let rest = &self.source[self.revealed_bytes..];
        let advance_bytes = rest
            .char_indices()
            .nth(take)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        self.revealed_bytes += advance_bytes;
        self.revealed_count += take;

        if self.revealed_count == self.total {
            self.done = true;
            TickOutcome::Finished { appended: take }
        } else {
            TickOutcome::Progress {
                appended: take,
                next_interval: self.next_interval(),
            }
        }
    }

    /// Reveal everything that remains, returning the number of ticks taken.
    pub fn run_to_end(&mut self) -> usize {
        let mut ticks = 0;
        while !self.done {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Interval to wait before the next tick, from the current progress.
    pub fn next_interval(&self) -> Duration {
        self.current_band().interval
    }

    /// Band the next tick will use.
    pub fn current_band(&self) -> RevealBand {
        self.pacing.band(self.revealed_count, self.total)
    }

    pub fn revealed(&self) -> &str {
        &self.source[..self.revealed_bytes]
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.revealed_count as f64 / self.total as f64
        }
    }
}
