// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the hot coordination paths.
//!
//! Measures:
//! - Posting a notification (queue insert + snapshot publish)
//! - A busy enter/exit pair
//! - Sweep-based expiry over a populated queue

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use feedback_hub::domain::feedback::NotificationTtl;
use feedback_hub::notifications::{NotificationQueue, Severity};
use feedback_hub::FeedbackContext;
use std::hint::black_box;
use std::time::Duration;
use tokio::time::Instant;

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("notifications");

    group.bench_function("notify_and_publish", |b| {
        b.iter_batched(
            FeedbackContext::default,
            |context| {
                for i in 0..16 {
                    context.notify_success(black_box(format!("saved {i}")));
                }
                black_box(context.snapshot());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("expire_due_sweep", |b| {
        let start = Instant::now();
        b.iter_batched(
            || {
                let mut queue = NotificationQueue::new(NotificationTtl::default());
                for i in 0..64u64 {
                    queue.post_at(Severity::Success, "x", start + Duration::from_millis(i * 100));
                }
                queue
            },
            |mut queue| black_box(queue.expire_due(start + Duration::from_millis(6_000))),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_busy(c: &mut Criterion) {
    let mut group = c.benchmark_group("busy");
    let context = FeedbackContext::default();

    group.bench_function("enter_exit_pair", |b| {
        b.iter(|| {
            context.enter_busy();
            black_box(context.show_busy());
            context.exit_busy();
        });
    });

    group.bench_function("busy_scope", |b| {
        b.iter(|| {
            let scope = context.busy_scope();
            black_box(context.busy_count());
            drop(scope);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_notify, bench_busy);
criterion_main!(benches);
