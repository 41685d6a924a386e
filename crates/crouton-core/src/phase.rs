#![forbid(unsafe_code)]

//! Lifecycle phases and the phase tracker.
//!
//! A toast moves through a small one-way state machine with a single cycle:
//!
//! ```text
//! Entering ──► Running ◄──► Paused
//!     │           │            │
//!     └───────────┴────────────┴──► Exiting ──► Removed
//! ```
//!
//! # Invariants
//!
//! 1. Exactly one phase is current at any time.
//! 2. Transitions are one-directional except the Running ⇄ Paused cycle,
//!    which may repeat arbitrarily many times before exit.
//! 3. Once `Exiting`, the machine can never return to `Running` or `Paused`.
//! 4. Illegal transition attempts leave the state unchanged; they are not
//!    errors.

/// Discrete lifecycle stage of a toast's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed but not yet ticked; entry animation may trigger here.
    Entering,
    /// Visible and counting down toward auto-dismissal.
    Running,
    /// Visible with the countdown frozen (pointer hover).
    Paused,
    /// Exit animation playing; no longer interactive.
    Exiting,
    /// Gone. The removal callback has fired (or was cancelled).
    Removed,
}

/// Tracks the current phase and gates transitions through a legality table.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    /// A fresh tracker in the `Entering` phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Phase::Entering,
        }
    }

    /// The current phase.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Whether a hover-enter event may pause the countdown.
    #[inline]
    #[must_use]
    pub fn can_pause(&self) -> bool {
        self.current == Phase::Running
    }

    /// Whether a hover-leave event may resume the countdown.
    #[inline]
    #[must_use]
    pub fn can_resume(&self) -> bool {
        self.current == Phase::Paused
    }

    /// Whether a manual close may still start the exit window.
    #[inline]
    #[must_use]
    pub fn can_close(&self) -> bool {
        !matches!(self.current, Phase::Exiting | Phase::Removed)
    }

    /// Apply `next` if the transition is legal.
    ///
    /// Returns whether the transition happened. Illegal attempts (a pause
    /// while exiting, a second removal) leave the state unchanged and return
    /// `false`.
    pub fn transition_to(&mut self, next: Phase) -> bool {
        let legal = matches!(
            (self.current, next),
            (Phase::Entering, Phase::Running)
                | (Phase::Running, Phase::Paused)
                | (Phase::Paused, Phase::Running)
                | (Phase::Entering | Phase::Running | Phase::Paused, Phase::Exiting)
                | (Phase::Exiting, Phase::Removed)
        );
        if legal {
            self.current = next;
        }
        legal
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
