use bounded_sync::BoundedPriorityQueue;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const STOP: isize = isize::MAX;

/// Push then pop on a single thread; never waits.
fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended");

    for &batch in &[16usize, 256, 4096] {
        group.throughput(Throughput::Elements(batch as u64));

        group.bench_with_input(BenchmarkId::new("unordered", batch), &batch, |b, &batch| {
            let queue = BoundedPriorityQueue::new(batch);
            b.iter(|| {
                for i in 0..batch {
                    queue.push_blocking("k", (i % 7) as isize);
                }
                for _ in 0..batch {
                    black_box(queue.pop_blocking());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("fifo", batch), &batch, |b, &batch| {
            let queue = BoundedPriorityQueue::new_fifo(batch);
            b.iter(|| {
                for i in 0..batch {
                    queue.push_blocking("k", (i % 7) as isize);
                }
                for _ in 0..batch {
                    black_box(queue.pop_blocking());
                }
            });
        });
    }

    group.finish();
}

/// One producer and several consumer threads sharing a small queue.
fn bench_contended_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_threads");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let items = 20_000usize;
    group.throughput(Throughput::Elements(items as u64));

    for &consumers in &[1usize, 3, 8] {
        group.bench_with_input(
            BenchmarkId::new("consumers", consumers),
            &consumers,
            |b, &consumers| {
                b.iter(|| {
                    let queue = Arc::new(BoundedPriorityQueue::new(64));
                    let handles: Vec<_> = (0..consumers)
                        .map(|_| {
                            let queue = Arc::clone(&queue);
                            thread::spawn(move || {
                                while queue.pop_blocking().priority() != STOP {}
                            })
                        })
                        .collect();

                    for i in 0..items {
                        queue.push_blocking("k", (i % 5) as isize);
                    }
                    for _ in 0..consumers {
                        queue.push_blocking("stop", STOP);
                    }
                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

/// Async hand-off compared with a tokio bounded channel of the same capacity.
fn bench_async_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_handoff");
    group.sample_size(20);

    let items = 10_000usize;
    group.throughput(Throughput::Elements(items as u64));
    let rt = tokio::runtime::Runtime::new().unwrap();

    group.bench_function("tokio_mpsc", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (tx, mut rx) = tokio::sync::mpsc::channel(64);
                let producer = tokio::spawn(async move {
                    for i in 0..items {
                        tx.send(i).await.unwrap();
                    }
                });
                while let Some(i) = rx.recv().await {
                    black_box(i);
                }
                producer.await.unwrap();
            });
        });
    });

    group.bench_function("bounded_priority_queue", |b| {
        b.iter(|| {
            rt.block_on(async {
                let queue = Arc::new(BoundedPriorityQueue::new(64));
                let producer = {
                    let queue = Arc::clone(&queue);
                    tokio::spawn(async move {
                        for i in 0..items {
                            queue.push("k", (i % 5) as isize).await;
                        }
                    })
                };
                for _ in 0..items {
                    black_box(queue.pop().await);
                }
                producer.await.unwrap();
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_uncontended,
    bench_contended_threads,
    bench_async_handoff
);
criterion_main!(benches);
