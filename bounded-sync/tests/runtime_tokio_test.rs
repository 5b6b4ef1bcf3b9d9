use bounded_sync::{BoundedPriorityQueue, LimiterError, TaskLimiter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tokio_producers_and_consumers() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 500;

    let queue = Arc::new(BoundedPriorityQueue::new(8));
    let mut producers = Vec::new();
    for p in 0..PRODUCERS {
        let queue = Arc::clone(&queue);
        producers.push(tokio::spawn(async move {
            for i in 0..PER_PRODUCER {
                queue.push(format!("{p}-{i}"), (i % 5) as isize).await;
            }
        }));
    }

    let consumer = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move {
            let mut count = 0;
            while count < PRODUCERS * PER_PRODUCER {
                queue.pop().await;
                count += 1;
            }
            count
        })
    };

    for producer in producers {
        timeout(Duration::from_secs(10), producer)
            .await
            .expect("producer should finish")
            .unwrap();
    }
    let count = timeout(Duration::from_secs(10), consumer)
        .await
        .expect("consumer should finish")
        .unwrap();
    assert_eq!(count, PRODUCERS * PER_PRODUCER);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_tokio_pop_waits_for_push() {
    let queue = Arc::new(BoundedPriorityQueue::new(2));

    let q = Arc::clone(&queue);
    let consumer = tokio::spawn(async move { q.pop().await });

    sleep(Duration::from_millis(20)).await;
    assert!(!consumer.is_finished());

    queue.push("wake", 4).await;
    let entry = timeout(Duration::from_secs(1), consumer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.key(), "wake");
}

#[tokio::test]
async fn test_tokio_async_and_blocking_mix() {
    let queue = Arc::new(BoundedPriorityQueue::new(1));

    let q = Arc::clone(&queue);
    let blocking = tokio::task::spawn_blocking(move || {
        for i in 0..20 {
            q.push_blocking(format!("b{i}"), i);
        }
    });

    for i in 0..20 {
        assert_eq!(queue.pop().await.priority(), i);
    }
    timeout(Duration::from_secs(2), blocking)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_tokio_cancelled_pop_leaves_queue_untouched() {
    let queue = BoundedPriorityQueue::new(2);

    assert!(timeout(Duration::from_millis(20), queue.pop()).await.is_err());

    queue.push("kept", 1).await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.pop().await.key(), "kept");
}

#[tokio::test]
async fn test_tokio_cancelled_push_inserts_nothing() {
    let queue = BoundedPriorityQueue::new(1);
    queue.push("first", 1).await;

    assert!(timeout(Duration::from_millis(20), queue.push("dropped", 0))
        .await
        .is_err());
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.pop().await.key(), "first");
    assert!(queue.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tokio_limiter_round() {
    const TASKS: usize = 12;

    let limiter = Arc::new(TaskLimiter::new(3));
    let active = Arc::new(AtomicUsize::new(0));
    let max_active = Arc::new(AtomicUsize::new(0));

    for _ in 0..TASKS {
        limiter.register_async(1).await.unwrap();
        let limiter = Arc::clone(&limiter);
        let active = Arc::clone(&active);
        let max_active = Arc::clone(&max_active);
        tokio::spawn(async move {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            max_active.fetch_max(now, Ordering::SeqCst);
            sleep(Duration::from_millis(5)).await;
            active.fetch_sub(1, Ordering::SeqCst);
            limiter.complete();
        });
    }

    timeout(Duration::from_secs(5), limiter.join_async())
        .await
        .expect("all tasks should complete");
    assert!(max_active.load(Ordering::SeqCst) <= 3);
    assert_eq!(limiter.pending(), 0);
}

#[tokio::test]
async fn test_tokio_register_async_validates() {
    let limiter = TaskLimiter::new(2);
    assert_eq!(
        limiter.register_async(-1).await,
        Err(LimiterError::NegativeCount(-1))
    );
    assert_eq!(
        limiter.register_async(5).await,
        Err(LimiterError::ExceedsCapacity {
            requested: 5,
            capacity: 2
        })
    );
    limiter.register_async(0).await.unwrap();
    assert_eq!(limiter.pending(), 0);
}

#[tokio::test]
async fn test_tokio_register_async_waits_for_slot() {
    let limiter = Arc::new(TaskLimiter::new(1));
    limiter.register(1).unwrap();

    let l = Arc::clone(&limiter);
    let waiter = tokio::spawn(async move { l.register_async(1).await });

    sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    limiter.complete();
    timeout(Duration::from_secs(1), waiter)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(limiter.pending(), 1);
}

#[tokio::test]
async fn test_tokio_owned_slots_in_tasks() {
    let limiter = Arc::new(TaskLimiter::new(2));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let slot = Arc::clone(&limiter).slot_owned();
        handles.push(tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            drop(slot);
        }));
    }

    timeout(Duration::from_secs(1), limiter.join_async())
        .await
        .unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}
