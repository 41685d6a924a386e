#![forbid(unsafe_code)]

//! Core: phase and timing primitives for toast notification lifecycles.
//!
//! # Role in crouton
//! `crouton-core` owns the two pieces of state every toast carries:
//!
//! - **[`PhaseTracker`]**: the explicit lifecycle state machine
//!   (entering → running ⇄ paused → exiting → removed) with capability
//!   predicates that gate every event.
//! - **[`DismissClock`]** / **[`ExitTimer`]**: wall-clock accounting: the
//!   hover-pausable countdown toward auto-dismissal, and the one-shot
//!   exit-animation window.
//!
//! # How it fits in the system
//! The runtime crate (`crouton-runtime`) composes these primitives into a
//! per-toast driver and an owning stack. Nothing here renders or schedules;
//! every operation takes an explicit `now: Instant`, which keeps the whole
//! layer deterministic under simulated time.

pub mod clock;
pub mod id;
pub mod phase;

pub use clock::{DismissClock, ExitTimer};
pub use id::ToastId;
pub use phase::{Phase, PhaseTracker};
