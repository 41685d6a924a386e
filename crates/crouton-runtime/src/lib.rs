#![forbid(unsafe_code)]

//! Runtime: per-toast lifecycle drivers and the owning stack.
//!
//! # Role in crouton
//! This crate composes the `crouton-core` primitives into the pieces an
//! application actually holds:
//!
//! - **[`ToastLifecycle`]**: one instance per notification. Drives the
//!   entering → running ⇄ paused → exiting → removed machine from explicit
//!   `tick(now)` calls, pauses on hover, and fires its removal callback
//!   exactly once.
//! - **[`ToastStack`]**: the list container. Owns lifecycles end to end,
//!   deduplicates repeated messages, promotes queued toasts into visible
//!   slots, and translates lifecycle progress into [`StackAction`]s for the
//!   rendering layer.
//! - **[`driver`]**: helpers that merge per-instance deadlines into a single
//!   wake-up instant for the host event loop.
//!
//! Rendering is deliberately out of scope: the stack speaks to its host only
//! through `StackAction::{Show, Hide, Remove}`, which map onto "create the
//! visual element", "start hiding it", and "destroy it".
//!
//! # Concurrency model
//! Single-threaded and cooperative. All mutation happens on event or frame
//! callbacks supplied by the host loop; every method takes an explicit
//! `now: Instant` so behavior is deterministic under simulated time.

pub mod driver;
pub mod lifecycle;
pub mod stack;
pub mod toast;

pub use crouton_core::{Phase, ToastId};
pub use lifecycle::{EXIT_WINDOW, ToastLifecycle};
pub use stack::{StackAction, StackConfig, StackStats, ToastStack};
pub use toast::{AutoDismiss, Severity, Toast};
