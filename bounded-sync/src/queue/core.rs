use crate::config::{PriorityConfig, QueueStrategy};
use crate::queue::entry::{Entry, QueueState};
use crate::queue::heap::MinHeap;
use crate::wait_queue::WaitList;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::task::Waker;
use tracing::{debug, warn};

/// State guarded by the queue's mutex.
pub(crate) struct QueueInner {
    pub(crate) heap: MinHeap,
    next_seq: u64,
    /// Async producers waiting for room.
    pub(crate) push_waiters: WaitList,
    /// Async consumers waiting for an entry.
    pub(crate) pop_waiters: WaitList,
}

impl QueueInner {
    fn new(capacity: usize) -> Self {
        Self {
            heap: MinHeap::with_capacity(capacity),
            next_seq: 0,
            push_waiters: WaitList::new(),
            pop_waiters: WaitList::new(),
        }
    }

    pub(crate) fn is_full(&self, capacity: usize) -> bool {
        self.heap.len() >= capacity
    }

    /// Insert `entry` and pick the async consumer to wake, if any.
    ///
    /// The caller has already checked that the queue is not full.
    pub(crate) fn push_locked(&mut self, entry: Entry, config: &PriorityConfig) -> Option<Waker> {
        let tie = config.tie_key(entry.priority(), self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(entry, tie);
        self.pop_waiters.notify_one()
    }

    /// Remove the minimum entry and pick the async producer to wake, if any.
    pub(crate) fn pop_locked(&mut self) -> Option<(Entry, Option<Waker>)> {
        let entry = self.heap.pop()?;
        Some((entry, self.push_waiters.notify_one()))
    }
}

/// A capacity-bounded priority queue with blocking and async hand-off.
///
/// Entries are popped lowest priority first. Producers block (or await) while
/// the queue holds `capacity` entries; consumers block while it is empty. The
/// capacity check and the mutation always happen inside one critical
/// section, so the queue never holds more than `capacity` entries regardless
/// of how many producers are waiting.
///
/// Entries with equal priority come out in no particular order unless a
/// [`QueueStrategy`] other than `Unordered` applies to that priority.
///
/// A queue created with capacity `0` is permanently full: every push blocks
/// forever and `try_push` always fails.
///
/// # Examples
///
/// ```rust
/// use bounded_sync::BoundedPriorityQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(BoundedPriorityQueue::new(2));
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for (key, priority) in [("b", 2), ("a", 1), ("c", 3)] {
///             queue.push_blocking(key, priority);
///         }
///     })
/// };
///
/// let mut seen = 0;
/// while seen < 3 {
///     let entry = queue.pop_blocking();
///     assert!(entry.priority() >= 1);
///     seen += 1;
/// }
/// producer.join().unwrap();
/// ```
pub struct BoundedPriorityQueue {
    capacity: usize,
    config: PriorityConfig,
    pub(crate) inner: Mutex<QueueInner>,
    /// Signalled after every pop.
    pub(crate) not_full: Condvar,
    /// Signalled after every push.
    pub(crate) not_empty: Condvar,
}

impl BoundedPriorityQueue {
    /// Creates a queue where equal priorities have no defined order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{BoundedPriorityQueue, QueueState};
    ///
    /// let queue = BoundedPriorityQueue::new(10);
    /// assert_eq!(queue.capacity(), 10);
    /// assert_eq!(queue.state(), QueueState::Empty);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, PriorityConfig::default())
    }

    /// Creates a queue that pops equal priorities in insertion order.
    pub fn new_fifo(capacity: usize) -> Self {
        Self::with_config(
            capacity,
            PriorityConfig::new().default_strategy(QueueStrategy::Fifo),
        )
    }

    /// Creates a queue that pops equal priorities in reverse insertion order.
    pub fn new_lifo(capacity: usize) -> Self {
        Self::with_config(
            capacity,
            PriorityConfig::new().default_strategy(QueueStrategy::Lifo),
        )
    }

    /// Creates a queue with per-priority tie-breaking rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{BoundedPriorityQueue, PriorityConfig, QueueStrategy};
    ///
    /// let config = PriorityConfig::new().exact(0, QueueStrategy::Fifo);
    /// let queue = BoundedPriorityQueue::with_config(4, config);
    ///
    /// queue.push_blocking("first", 0);
    /// queue.push_blocking("second", 0);
    /// assert_eq!(queue.pop_blocking().key(), "first");
    /// ```
    pub fn with_config(capacity: usize, config: PriorityConfig) -> Self {
        if capacity == 0 {
            warn!("bounded priority queue created with capacity 0; every push will block");
        }
        debug!(capacity, "creating bounded priority queue");

        Self {
            capacity,
            config,
            inner: Mutex::new(QueueInner::new(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Maximum number of entries the queue holds at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The tie-breaking configuration.
    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Number of entries currently queued.
    ///
    /// This is a snapshot; it may be stale as soon as it is returned.
    pub fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }

    /// Returns `true` if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().heap.is_empty()
    }

    /// Returns `true` if the queue holds `capacity` entries.
    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full(self.capacity)
    }

    /// Current occupancy, computed from length and capacity.
    pub fn state(&self) -> QueueState {
        QueueState::from_len(self.len(), self.capacity)
    }

    /// A copy of the entry the next pop would return.
    pub fn peek(&self) -> Option<Entry> {
        self.inner.lock().heap.peek().cloned()
    }

    pub(crate) fn notify_not_empty(&self, waker: Option<Waker>) {
        self.not_empty.notify_one();
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub(crate) fn notify_not_full(&self, waker: Option<Waker>) {
        self.not_full.notify_one();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl fmt::Debug for BoundedPriorityQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("BoundedPriorityQueue");
        d.field("capacity", &self.capacity);
        if let Some(inner) = self.inner.try_lock() {
            d.field("len", &inner.heap.len())
                .field("push_waiters", &inner.push_waiters.len())
                .field("pop_waiters", &inner.pop_waiters.len());
        } else {
            d.field("len", &format_args!("<locked>"));
        }
        d.finish()
    }
}
