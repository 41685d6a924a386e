#![forbid(unsafe_code)]

//! The owning toast stack.
//!
//! [`ToastStack`] is the list container: it accepts toasts, deduplicates
//! repeated messages within a time window, keeps at most `max_visible` of
//! them live (the rest wait in a bounded FIFO queue), routes hover/close
//! events to the right lifecycle, and reports progress to the rendering
//! layer as [`StackAction`]s.
//!
//! Removal callbacks from the lifecycles are delivered through a shared
//! single-threaded inbox (`Rc<RefCell<..>>`) and drained on every tick, so
//! the active list shrinks synchronously with each callback.
//!
//! # Example
//!
//! ```ignore
//! let mut stack = ToastStack::new(StackConfig::default());
//! stack.push(Toast::success("Saved"), now);
//!
//! // In the host event loop:
//! for action in stack.tick(now) {
//!     match action {
//!         StackAction::Show(id) => { /* create the element */ }
//!         StackAction::Hide(id) => { /* start the hide animation */ }
//!         StackAction::Remove(id) => { /* destroy the element */ }
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ahash::AHashMap;
use crouton_core::{Phase, ToastId};
use web_time::{Duration, Instant};

use crate::lifecycle::ToastLifecycle;
use crate::toast::Toast;

/// Configuration for the toast stack.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct StackConfig {
    /// Maximum number of toasts live at once.
    pub max_visible: usize,
    /// Maximum number of toasts waiting in the queue.
    pub max_queued: usize,
    /// Time window for content-based deduplication.
    pub dedup_window: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            max_queued: 10,
            dedup_window: Duration::from_secs(1),
        }
    }
}

impl StackConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of live toasts.
    #[must_use]
    pub fn max_visible(mut self, max: usize) -> Self {
        self.max_visible = max;
        self
    }

    /// Set the maximum number of queued toasts.
    #[must_use]
    pub fn max_queued(mut self, max: usize) -> Self {
        self.max_queued = max;
        self
    }

    /// Set the deduplication time window.
    #[must_use]
    pub fn dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }
}

/// Actions returned by [`ToastStack::tick`] for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    /// Create the visual element for this toast.
    Show(ToastId),
    /// The exit animation has started; begin hiding the element.
    Hide(ToastId),
    /// The lifecycle completed; destroy the element. Emitted exactly once
    /// per shown toast.
    Remove(ToastId),
}

/// Counters for monitoring and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackStats {
    /// Toasts offered via `push`.
    pub total_pushed: u64,
    /// Rejections from the dedup window.
    pub dedup_rejected: u64,
    /// Rejections from queue overflow.
    pub overflow_rejected: u64,
    /// Manual dismissals (visible or queued).
    pub user_dismissed: u64,
    /// Automatic expiries.
    pub auto_expired: u64,
}

struct Entry {
    toast: Toast,
    lifecycle: ToastLifecycle,
    /// Set once `Hide` has been reported for this toast.
    hide_emitted: bool,
}

/// The list container that owns toast lifecycles end to end.
pub struct ToastStack {
    visible: Vec<Entry>,
    pending: VecDeque<Toast>,
    recent_hashes: AHashMap<u64, Instant>,
    /// Removal callbacks land here; drained on every tick.
    removed_inbox: Rc<RefCell<Vec<ToastId>>>,
    config: StackConfig,
    stats: StackStats,
}

impl std::fmt::Debug for ToastStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastStack")
            .field("visible", &self.visible.len())
            .field("pending", &self.pending.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

impl ToastStack {
    /// Create a stack with the given configuration.
    #[must_use]
    pub fn new(config: StackConfig) -> Self {
        Self {
            visible: Vec::new(),
            pending: VecDeque::new(),
            recent_hashes: AHashMap::new(),
            removed_inbox: Rc::new(RefCell::new(Vec::new())),
            config,
            stats: StackStats::default(),
        }
    }

    /// Create a stack with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(StackConfig::default())
    }

    /// Offer a toast to the stack.
    ///
    /// Returns `true` if accepted. Rejects duplicates whose content hash was
    /// seen within the dedup window, and anything beyond `max_queued` when
    /// all visible slots are taken. Accepted toasts become visible on a
    /// subsequent [`tick`](Self::tick).
    pub fn push(&mut self, toast: Toast, now: Instant) -> bool {
        self.stats.total_pushed += 1;

        let hash = toast.content_hash();
        self.prune_hashes(now);
        if self.recent_hashes.contains_key(&hash) {
            self.stats.dedup_rejected += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(id = %toast.id, "toast rejected as duplicate");
            return false;
        }

        if self.pending.len() >= self.config.max_queued {
            self.stats.overflow_rejected += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(id = %toast.id, "toast rejected, queue full");
            return false;
        }

        self.recent_hashes.insert(hash, now);
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %toast.id, severity = ?toast.severity, "toast queued");
        self.pending.push_back(toast);
        true
    }

    /// Process a time tick: advance every live lifecycle, drain removals,
    /// and promote queued toasts into free slots.
    pub fn tick(&mut self, now: Instant) -> Vec<StackAction> {
        let mut actions = Vec::new();

        for entry in &mut self.visible {
            let before = entry.lifecycle.phase();
            let after = entry.lifecycle.tick(now);
            if !entry.hide_emitted && matches!(after, Phase::Exiting | Phase::Removed) {
                entry.hide_emitted = true;
                actions.push(StackAction::Hide(entry.toast.id));
                // Hover-driven pauses can only delay this path, so reaching
                // it from Running means the duration ran out.
                if before == Phase::Running {
                    self.stats.auto_expired += 1;
                }
            }
        }

        let removed: Vec<ToastId> = self.removed_inbox.borrow_mut().drain(..).collect();
        for id in removed {
            self.visible.retain(|e| e.toast.id != id);
            actions.push(StackAction::Remove(id));
        }

        self.prune_hashes(now);

        while self.visible.len() < self.config.max_visible {
            let Some(toast) = self.pending.pop_front() else {
                break;
            };
            actions.push(StackAction::Show(toast.id));
            self.mount(toast);
        }

        actions
    }

    /// Manually dismiss a toast by id, visible or queued.
    ///
    /// Returns `true` if the toast was found. A visible toast starts its
    /// exit window; a queued toast is dropped silently (it was never shown).
    pub fn dismiss(&mut self, id: ToastId, now: Instant) -> bool {
        if let Some(entry) = self.visible.iter_mut().find(|e| e.toast.id == id) {
            if entry.lifecycle.phase() != Phase::Exiting {
                entry.lifecycle.close(now);
                self.stats.user_dismissed += 1;
            }
            return true;
        }
        if let Some(idx) = self.pending.iter().position(|t| t.id == id) {
            self.pending.remove(idx);
            self.stats.user_dismissed += 1;
            return true;
        }
        false
    }

    /// Manually dismiss everything: visible toasts start their exit windows,
    /// queued toasts are dropped.
    pub fn dismiss_all(&mut self, now: Instant) {
        for entry in &mut self.visible {
            if entry.lifecycle.phase() != Phase::Exiting {
                entry.lifecycle.close(now);
                self.stats.user_dismissed += 1;
            }
        }
        self.stats.user_dismissed += self.pending.len() as u64;
        self.pending.clear();
    }

    /// Bulk teardown: cancel every lifecycle and drop all state.
    ///
    /// No `Remove` actions and no removal callbacks will ever be observed
    /// for the torn-down toasts, no matter how far time advances.
    pub fn clear(&mut self) {
        for entry in &mut self.visible {
            entry.lifecycle.cancel();
        }
        self.visible.clear();
        self.pending.clear();
        self.removed_inbox.borrow_mut().clear();
    }

    /// Route a hover-enter event to a visible toast. Unknown ids are
    /// ignored.
    pub fn hover_enter(&mut self, id: ToastId, now: Instant) {
        if let Some(entry) = self.visible.iter_mut().find(|e| e.toast.id == id) {
            entry.lifecycle.hover_enter(now);
        }
    }

    /// Route a hover-leave event to a visible toast. Unknown ids are
    /// ignored.
    pub fn hover_leave(&mut self, id: ToastId, now: Instant) {
        if let Some(entry) = self.visible.iter_mut().find(|e| e.toast.id == id) {
            entry.lifecycle.hover_leave(now);
        }
    }

    /// When the host loop should next call [`tick`](Self::tick).
    ///
    /// The earliest lifecycle deadline, or `now` if queued toasts are
    /// waiting for a free slot.
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let lifecycle_wake = crate::driver::next_wake(
            self.visible.iter().map(|e| e.lifecycle.next_deadline(now)),
        );
        if !self.pending.is_empty() && self.visible.len() < self.config.max_visible {
            return Some(lifecycle_wake.map_or(now, |w| w.min(now)));
        }
        lifecycle_wake
    }

    /// The currently live toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter().map(|e| &e.toast)
    }

    /// The lifecycle phase of a visible toast.
    #[must_use]
    pub fn phase_of(&self, id: ToastId) -> Option<Phase> {
        self.visible
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.lifecycle.phase())
    }

    /// Number of live toasts.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of queued toasts.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether the stack holds nothing, live or queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.pending.is_empty()
    }

    /// Counters.
    #[must_use]
    pub fn stats(&self) -> &StackStats {
        &self.stats
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    fn mount(&mut self, toast: Toast) {
        let inbox = Rc::clone(&self.removed_inbox);
        let lifecycle = ToastLifecycle::new(toast.id, toast.dismiss_policy())
            .on_remove(move |id| inbox.borrow_mut().push(id));
        self.visible.push(Entry {
            toast,
            lifecycle,
            hide_emitted: false,
        });
    }

    fn prune_hashes(&mut self, now: Instant) {
        let window = self.config.dedup_window;
        self.recent_hashes
            .retain(|_, seen| now.saturating_duration_since(*seen) < window);
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn quick_toast(msg: &str, ms: i64) -> Toast {
        Toast::new(msg).dismiss_after_millis(ms)
    }

    #[test]
    fn new_stack_is_empty() {
        let stack = ToastStack::with_defaults();
        assert!(stack.is_empty());
        assert_eq!(stack.visible_count(), 0);
        assert_eq!(stack.pending_count(), 0);
    }

    #[test]
    fn push_then_tick_shows() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        let toast = quick_toast("hello", 1000);
        let id = toast.id;

        assert!(stack.push(toast, base));
        assert_eq!(stack.pending_count(), 1);
        assert_eq!(stack.visible_count(), 0);

        let actions = stack.tick(base);
        assert_eq!(actions, vec![StackAction::Show(id)]);
        assert_eq!(stack.visible_count(), 1);
        assert_eq!(stack.phase_of(id), Some(Phase::Entering));
    }

    #[test]
    fn max_visible_queues_the_rest() {
        let base = Instant::now();
        let mut stack = ToastStack::new(StackConfig::new().max_visible(2));
        for i in 0..3 {
            stack.push(quick_toast(&format!("t{i}"), 1000), base);
        }
        stack.tick(base);
        assert_eq!(stack.visible_count(), 2);
        assert_eq!(stack.pending_count(), 1);
    }

    #[test]
    fn fifo_promotion_as_slots_free() {
        let base = Instant::now();
        let mut stack = ToastStack::new(StackConfig::new().max_visible(1));
        let first = quick_toast("first", 100);
        let second = quick_toast("second", 100);
        let second_id = second.id;
        stack.push(first, base);
        stack.push(second, base);

        stack.tick(base); // show first
        stack.tick(at(base, 10)); // first enters Running
        stack.tick(at(base, 110)); // first starts exiting
        let actions = stack.tick(at(base, 410)); // first removed, second shown
        assert!(actions.iter().any(|a| *a == StackAction::Show(second_id)));
        assert_eq!(stack.visible().next().map(|t| t.id), Some(second_id));
    }

    #[test]
    fn dedup_rejects_within_window() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        assert!(stack.push(quick_toast("same", 1000), base));
        assert!(!stack.push(quick_toast("same", 1000), at(base, 500)));
        assert_eq!(stack.stats().dedup_rejected, 1);

        // Outside the window it is accepted again.
        assert!(stack.push(quick_toast("same", 1000), at(base, 1500)));
    }

    #[test]
    fn overflow_rejects() {
        let base = Instant::now();
        let mut stack = ToastStack::new(StackConfig::new().max_queued(2));
        assert!(stack.push(quick_toast("a", 1000), base));
        assert!(stack.push(quick_toast("b", 1000), base));
        assert!(!stack.push(quick_toast("c", 1000), base));
        assert_eq!(stack.stats().overflow_rejected, 1);
    }

    #[test]
    fn expiry_emits_hide_then_remove() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        let toast = quick_toast("bye", 100);
        let id = toast.id;
        stack.push(toast, base);

        stack.tick(base); // Show
        stack.tick(at(base, 50)); // Entering -> Running
        let actions = stack.tick(at(base, 150));
        assert_eq!(actions, vec![StackAction::Hide(id)]);
        assert_eq!(stack.stats().auto_expired, 1);

        let actions = stack.tick(at(base, 450));
        assert_eq!(actions, vec![StackAction::Remove(id)]);
        assert!(stack.is_empty());
    }

    #[test]
    fn dismiss_visible_starts_exit() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        let toast = quick_toast("slow", 60_000);
        let id = toast.id;
        stack.push(toast, base);
        stack.tick(base);
        stack.tick(at(base, 10));

        assert!(stack.dismiss(id, at(base, 500)));
        assert_eq!(stack.phase_of(id), Some(Phase::Exiting));
        assert_eq!(stack.stats().user_dismissed, 1);

        let actions = stack.tick(at(base, 800));
        assert!(actions.contains(&StackAction::Hide(id)));
        assert!(actions.contains(&StackAction::Remove(id)));
    }

    #[test]
    fn dismiss_pending_drops_silently() {
        let base = Instant::now();
        let mut stack = ToastStack::new(StackConfig::new().max_visible(0));
        let toast = quick_toast("queued", 1000);
        let id = toast.id;
        stack.push(toast, base);

        assert!(stack.dismiss(id, base));
        assert!(stack.is_empty());
        // Never shown: no actions for it, ever.
        assert!(stack.tick(at(base, 5000)).is_empty());
    }

    #[test]
    fn dismiss_unknown_returns_false() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        assert!(!stack.dismiss(ToastId::new(999_999), base));
    }

    #[test]
    fn dismiss_all_closes_everything() {
        let base = Instant::now();
        let mut stack = ToastStack::new(StackConfig::new().max_visible(1));
        stack.push(quick_toast("a", 60_000), base);
        stack.push(quick_toast("b", 60_000), base);
        stack.tick(base);
        stack.tick(at(base, 10));

        stack.dismiss_all(at(base, 20));
        assert_eq!(stack.stats().user_dismissed, 2);
        assert_eq!(stack.pending_count(), 0);

        stack.tick(at(base, 320));
        assert_eq!(stack.visible_count(), 0);
    }

    #[test]
    fn clear_is_silent_teardown() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        stack.push(quick_toast("a", 100), base);
        stack.push(quick_toast("b", 100), base);
        stack.tick(base);
        stack.tick(at(base, 10));

        stack.clear();
        assert!(stack.is_empty());
        // Far beyond every deadline: nothing ever surfaces.
        assert!(stack.tick(at(base, 10_000)).is_empty());
    }

    #[test]
    fn hover_routing_pauses_only_the_target() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        let a = quick_toast("a", 1000);
        let b = quick_toast("b", 1000);
        let (a_id, b_id) = (a.id, b.id);
        stack.push(a, base);
        stack.push(b, base);
        stack.tick(base);
        stack.tick(at(base, 10));

        stack.hover_enter(a_id, at(base, 100));
        assert_eq!(stack.phase_of(a_id), Some(Phase::Paused));
        assert_eq!(stack.phase_of(b_id), Some(Phase::Running));

        stack.hover_leave(a_id, at(base, 200));
        assert_eq!(stack.phase_of(a_id), Some(Phase::Running));

        // Unknown ids are ignored.
        stack.hover_enter(ToastId::new(123_456), at(base, 300));
    }

    #[test]
    fn next_deadline_merges_instances() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        assert_eq!(stack.next_deadline(base), None);

        stack.push(quick_toast("a", 1000), base);
        // Pending toast waiting on a free slot: wake immediately.
        assert_eq!(stack.next_deadline(base), Some(base));

        stack.tick(base);
        // Entering: mount tick due now.
        assert_eq!(stack.next_deadline(at(base, 5)), Some(at(base, 5)));

        stack.tick(at(base, 10));
        // Running: wake at expiry.
        assert_eq!(stack.next_deadline(at(base, 10)), Some(at(base, 1010)));
    }

    #[test]
    fn stats_track_the_flow() {
        let base = Instant::now();
        let mut stack = ToastStack::with_defaults();
        stack.push(quick_toast("x", 100), base);
        stack.push(quick_toast("x", 100), base); // dedup
        stack.tick(base);
        stack.tick(at(base, 10));
        stack.tick(at(base, 200));

        let stats = stack.stats();
        assert_eq!(stats.total_pushed, 2);
        assert_eq!(stats.dedup_rejected, 1);
        assert_eq!(stats.auto_expired, 1);
    }

    #[test]
    fn default_trait_uses_default_config() {
        let stack = ToastStack::default();
        assert_eq!(stack.config().max_visible, 3);
        assert_eq!(stack.config().max_queued, 10);
    }

    #[test]
    fn config_builder() {
        let config = StackConfig::new()
            .max_visible(5)
            .max_queued(20)
            .dedup_window(Duration::from_millis(250));
        assert_eq!(config.max_visible, 5);
        assert_eq!(config.max_queued, 20);
        assert_eq!(config.dedup_window, Duration::from_millis(250));
    }
}
