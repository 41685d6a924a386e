#![forbid(unsafe_code)]

//! Per-toast lifecycle driver.
//!
//! [`ToastLifecycle`] combines the phase tracker and the dismiss clock into
//! the state machine that a single notification lives through:
//!
//! ```text
//! tick ─► Entering ─► Running ─(expired)─► Exiting ─(300ms)─► Removed
//!                      ▲   │                                    │
//!             hover_leave  hover_enter                    on_remove(id)
//!                      │   ▼                               (exactly once)
//!                      Paused
//! ```
//!
//! The instance is driven entirely by explicit `tick(now)` calls from the
//! host loop plus hover/close events from the view. It never reads the real
//! clock itself.
//!
//! # Invariants
//!
//! 1. Active time accumulates only while `Running`; paused intervals extend
//!    wall-clock lifetime one-for-one.
//! 2. The removal callback fires exactly once, and only after expiry (or a
//!    manual close) *and* the full [`EXIT_WINDOW`].
//! 3. Once `Exiting`, hover events are no-ops; the machine cannot return to
//!    `Running` or `Paused`.
//! 4. After `cancel()`, no callback is ever invoked, no matter how far time
//!    advances.
//!
//! # Failure modes
//!
//! None surface as errors: events in an invalid phase, double closes, and
//! ticks after removal or cancellation are all silent no-ops.

use std::fmt;

use crouton_core::{DismissClock, ExitTimer, Phase, PhaseTracker, ToastId};
use web_time::{Duration, Instant};

use crate::toast::AutoDismiss;

/// Fixed exit-animation window between visual hide and the removal callback.
pub const EXIT_WINDOW: Duration = Duration::from_millis(300);

/// Boxed removal callback, invoked with the id supplied at construction.
pub type RemoveFn = Box<dyn FnMut(ToastId)>;

/// The timing state machine for one toast notification.
pub struct ToastLifecycle {
    id: ToastId,
    phase: PhaseTracker,
    clock: DismissClock,
    exit: Option<ExitTimer>,
    /// Taken when fired, which doubles as the exactly-once guard.
    on_remove: Option<RemoveFn>,
    cancelled: bool,
}

impl fmt::Debug for ToastLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastLifecycle")
            .field("id", &self.id)
            .field("phase", &self.phase.current())
            .field("clock", &self.clock)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl ToastLifecycle {
    /// Create a lifecycle for `id` with the given dismissal policy.
    ///
    /// The instance starts in `Entering`; the countdown begins on the first
    /// `tick` (one-frame mount delay, so an entry animation can trigger).
    #[must_use]
    pub fn new(id: ToastId, dismiss: AutoDismiss) -> Self {
        let clock = match dismiss {
            AutoDismiss::Never => DismissClock::sticky(),
            AutoDismiss::After(d) => DismissClock::new(Some(d)),
        };
        Self {
            id,
            phase: PhaseTracker::new(),
            clock,
            exit: None,
            on_remove: None,
            cancelled: false,
        }
    }

    /// Millisecond constructor matching the owner-facing contract; `ms <= 0`
    /// expires immediately (but still waits the exit window).
    #[must_use]
    pub fn with_duration_ms(id: ToastId, ms: i64) -> Self {
        Self::new(id, AutoDismiss::after_millis(ms))
    }

    /// Attach the removal callback (builder pattern).
    #[must_use]
    pub fn on_remove(mut self, callback: impl FnMut(ToastId) + 'static) -> Self {
        self.on_remove = Some(Box::new(callback));
        self
    }

    /// The id supplied at construction.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// The current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.current()
    }

    /// Whether the toast should currently be shown (entry through pause;
    /// `Exiting` is already animating out).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(
            self.phase.current(),
            Phase::Entering | Phase::Running | Phase::Paused
        )
    }

    /// Whether the exit animation is playing.
    #[must_use]
    pub fn is_dismissing(&self) -> bool {
        self.phase.current() == Phase::Exiting
    }

    /// Whether `cancel` was called.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Active time still to run before auto-dismissal; `None` for sticky
    /// toasts.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.clock.remaining(now)
    }

    /// Advance the state machine to `now`.
    ///
    /// Call from the host loop, either per frame or once per deadline from
    /// [`next_deadline`](Self::next_deadline). Returns the phase after the
    /// tick. A no-op once removed or cancelled.
    pub fn tick(&mut self, now: Instant) -> Phase {
        if self.cancelled {
            return self.phase.current();
        }
        match self.phase.current() {
            Phase::Entering => {
                // Mount delay ends here: start the countdown at this tick.
                self.advance(Phase::Running);
                self.clock.resume(now);
                self.check_expiry(now);
            }
            Phase::Running => self.check_expiry(now),
            Phase::Paused | Phase::Removed => {}
            Phase::Exiting => {
                if self.exit.as_ref().is_some_and(|e| e.is_elapsed(now)) {
                    self.advance(Phase::Removed);
                    self.fire_remove();
                }
            }
        }
        self.phase.current()
    }

    /// Pause the countdown. Ignored unless currently `Running`.
    pub fn hover_enter(&mut self, now: Instant) {
        if self.cancelled || !self.phase.can_pause() {
            return;
        }
        self.clock.pause(now);
        self.advance(Phase::Paused);
    }

    /// Resume the countdown at the event's own timestamp. Ignored unless
    /// currently `Paused`.
    pub fn hover_leave(&mut self, now: Instant) {
        if self.cancelled || !self.phase.can_resume() {
            return;
        }
        self.advance(Phase::Running);
        self.clock.resume(now);
    }

    /// Manual close: start the exit window immediately, bypassing any
    /// remaining duration. Ignored once exiting or removed.
    pub fn close(&mut self, now: Instant) {
        if self.cancelled || !self.phase.can_close() {
            return;
        }
        self.begin_exit(now);
    }

    /// Teardown: unconditionally stop all future effect of `tick` and drop
    /// the callback. Guarantees zero future invocations; never invokes the
    /// callback itself.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.on_remove = None;
    }

    /// When the host loop should next tick this instance.
    ///
    /// `Some(now)` while entering (the mount tick is due immediately), the
    /// expiry instant while running, the exit-window deadline while exiting.
    /// `None` while paused, once removed or cancelled, and for sticky toasts
    /// at rest.
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        if self.cancelled {
            return None;
        }
        match self.phase.current() {
            Phase::Entering => Some(now),
            Phase::Running => self.clock.remaining(now).map(|r| now + r),
            Phase::Paused | Phase::Removed => None,
            Phase::Exiting => self.exit.as_ref().map(ExitTimer::deadline),
        }
    }

    fn check_expiry(&mut self, now: Instant) {
        if self.clock.is_expired(now) {
            self.begin_exit(now);
        }
    }

    fn begin_exit(&mut self, now: Instant) {
        // Freeze accounting; no-op when the clock isn't running.
        self.clock.pause(now);
        if self.advance(Phase::Exiting) && self.exit.is_none() {
            self.exit = Some(ExitTimer::start(now, EXIT_WINDOW));
        }
    }

    fn fire_remove(&mut self) {
        // take() means a second arrival here finds nothing to call.
        if let Some(mut callback) = self.on_remove.take() {
            callback(self.id);
        }
    }

    fn advance(&mut self, next: Phase) -> bool {
        #[cfg(feature = "tracing")]
        let from = self.phase.current();
        let applied = self.phase.transition_to(next);
        #[cfg(feature = "tracing")]
        if applied {
            tracing::trace!(id = %self.id, ?from, to = ?next, "toast phase transition");
        }
        applied
    }
}
