//! Benchmarks for the toast stack tick path.
//!
//! Measures the per-tick cost of a loaded stack (the hot path a host loop
//! pays every frame) and the full push-to-removal churn of a batch of
//! short-lived toasts.
//!
//! Run with: cargo bench -p crouton-runtime --bench stack_bench

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use crouton_runtime::{StackConfig, Toast, ToastStack};
use web_time::{Duration, Instant};

const VISIBLE: usize = 64;

fn loaded_stack(base: Instant) -> ToastStack {
    let mut stack = ToastStack::new(
        StackConfig::new()
            .max_visible(VISIBLE)
            .max_queued(VISIBLE)
            .dedup_window(Duration::ZERO),
    );
    // Persistent toasts: the stack stays at 64 running entries no matter how
    // many iterations the sampler takes.
    for i in 0..VISIBLE {
        stack.push(Toast::new(format!("message {i}")).persistent(), base);
    }
    stack.tick(base);
    stack.tick(base + Duration::from_millis(1));
    stack
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_steady_state_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack/tick");

    group.bench_function("steady_state_64_running", |b| {
        let base = Instant::now();
        let mut stack = loaded_stack(base);
        let mut ms = 2u64;
        b.iter(|| {
            ms += 1;
            black_box(stack.tick(base + Duration::from_millis(ms)))
        })
    });

    group.bench_function("next_deadline_64_running", |b| {
        let base = Instant::now();
        let stack = loaded_stack(base);
        let now = base + Duration::from_millis(5);
        b.iter(|| black_box(stack.next_deadline(now)))
    });

    group.finish();
}

fn bench_full_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack/churn");

    // Push, show, expire, and remove a batch end to end.
    group.bench_function("push_to_removal_16", |b| {
        b.iter(|| {
            let base = Instant::now();
            let mut stack = ToastStack::new(
                StackConfig::new()
                    .max_visible(4)
                    .max_queued(16)
                    .dedup_window(Duration::ZERO),
            );
            for i in 0..16 {
                stack.push(Toast::new(format!("churn {i}")).dismiss_after_millis(10), base);
            }
            let mut actions = 0usize;
            for ms in 0..2_000u64 {
                actions += stack.tick(base + Duration::from_millis(ms)).len();
            }
            black_box(actions)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_steady_state_tick, bench_full_churn);
criterion_main!(benches);
