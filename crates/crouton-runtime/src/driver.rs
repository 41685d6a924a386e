#![forbid(unsafe_code)]

//! Wake-up scheduling helpers.
//!
//! Each lifecycle owns its own deadline ([`ToastLifecycle::next_deadline`]);
//! nothing here couples instance lifetimes through a shared loop. These
//! helpers only merge per-instance deadlines so a host with a single timer
//! (or a `requestAnimationFrame`-style frame callback) knows when to tick
//! next.
//!
//! [`ToastLifecycle::next_deadline`]: crate::lifecycle::ToastLifecycle::next_deadline

use web_time::{Duration, Instant};

/// The earliest pending deadline, if any instance has one.
pub fn next_wake<I>(deadlines: I) -> Option<Instant>
where
    I: IntoIterator<Item = Option<Instant>>,
{
    deadlines.into_iter().flatten().min()
}

/// Saturating delay from `now` until `deadline`; zero when already due.
#[must_use]
pub fn wake_delay(now: Instant, deadline: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}
