#![forbid(unsafe_code)]

//! Toast identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque unique identifier for a toast notification.
///
/// The removal callback is invoked with the exact id the toast was
/// constructed with, so owners can key their active list on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Construct a specific id. Intended for embedders that manage their own
    /// id space, and for tests.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate the next id from a process-wide counter.
    #[must_use]
    pub fn alloc() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}
