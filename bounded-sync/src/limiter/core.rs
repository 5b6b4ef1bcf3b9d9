use crate::error::LimiterError;
use crate::wait_queue::{self, WaitList};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use tracing::{debug, warn};

/// State guarded by the limiter's mutex.
pub(crate) struct LimiterInner {
    /// Registered but not yet completed tasks; each one holds a slot.
    pub(crate) pending: usize,
    /// Bumped every time `pending` drops to zero.
    pub(crate) generation: u64,
    pub(crate) register_waiters: WaitList,
    pub(crate) join_waiters: WaitList,
}

impl LimiterInner {
    pub(crate) fn has_room(&self, n: usize, capacity: usize) -> bool {
        self.pending + n <= capacity
    }

    /// Whether a joiner that started waiting in `generation` may return.
    pub(crate) fn is_drained_since(&self, generation: u64) -> bool {
        self.pending == 0 || self.generation != generation
    }
}

/// Caps the number of concurrently active tasks and offers a join point that
/// opens once every registered task has completed.
///
/// [`register`](Self::register) takes slots, blocking while fewer than the
/// requested number are free; [`complete`](Self::complete) gives one back;
/// [`join`](Self::join) blocks until nothing is pending. Every waiter that is
/// blocked in `join` when the pending count reaches zero is released, even if
/// new tasks are registered before it gets to run.
///
/// The limiter is reusable after `join` returns. Starting a new round of
/// `register` calls while a previous round's `complete` calls are still in
/// flight is up to the caller to sequence; the limiter only sees counts.
///
/// # Examples
///
/// ```rust
/// use bounded_sync::TaskLimiter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let limiter = Arc::new(TaskLimiter::new(2));
///
/// for _ in 0..6 {
///     // Blocks while two tasks are still running.
///     limiter.register(1).unwrap();
///     let limiter = Arc::clone(&limiter);
///     thread::spawn(move || {
///         // ... work ...
///         limiter.complete();
///     });
/// }
///
/// limiter.join();
/// assert_eq!(limiter.pending(), 0);
/// ```
pub struct TaskLimiter {
    capacity: usize,
    pub(crate) inner: Mutex<LimiterInner>,
    /// Signalled after every `complete`.
    pub(crate) slot_freed: Condvar,
    /// Signalled when `pending` reaches zero.
    pub(crate) drained: Condvar,
}

impl TaskLimiter {
    /// Creates a limiter allowing `capacity` concurrently active tasks.
    ///
    /// A capacity of `0` is treated as `1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::TaskLimiter;
    ///
    /// assert_eq!(TaskLimiter::new(4).capacity(), 4);
    /// assert_eq!(TaskLimiter::new(0).capacity(), 1);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("task limiter capacity 0 normalized to 1");
            1
        } else {
            capacity
        };
        debug!(capacity, "creating task limiter");

        Self {
            capacity,
            inner: Mutex::new(LimiterInner {
                pending: 0,
                generation: 0,
                register_waiters: WaitList::new(),
                join_waiters: WaitList::new(),
            }),
            slot_freed: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Maximum number of concurrently active tasks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of registered tasks that have not completed yet.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending
    }

    /// Number of slots that could be registered right now without blocking.
    pub fn available_slots(&self) -> usize {
        self.capacity - self.pending()
    }

    /// Validate a registration count before any state is touched.
    pub(crate) fn check_count(&self, n: isize) -> Result<usize, LimiterError> {
        let requested = usize::try_from(n).map_err(|_| LimiterError::NegativeCount(n))?;
        if requested > self.capacity {
            return Err(LimiterError::ExceedsCapacity {
                requested,
                capacity: self.capacity,
            });
        }
        Ok(requested)
    }

    /// Marks one registered task as finished and frees its slot.
    ///
    /// When the last pending task completes, every thread blocked in
    /// [`join`](Self::join) and every pending [`Join`](crate::Join) future
    /// is released.
    ///
    /// Calling this more often than tasks were registered is a caller error;
    /// the surplus call is logged and otherwise ignored.
    pub fn complete(&self) {
        let mut inner = self.inner.lock();
        if inner.pending == 0 {
            drop(inner);
            warn!("complete called with no pending tasks");
            return;
        }

        inner.pending -= 1;
        let drained = inner.pending == 0;
        if drained {
            inner.generation = inner.generation.wrapping_add(1);
            debug!(generation = inner.generation, "all pending tasks completed");
        }

        // Registrations may ask for several slots, so every waiter re-checks.
        self.slot_freed.notify_all();
        if drained {
            self.drained.notify_all();
        }

        wait_queue::wake_all_batched(&self.inner, inner, |s| &mut s.register_waiters);
        if drained {
            wait_queue::wake_all_batched(&self.inner, self.inner.lock(), |s| {
                &mut s.join_waiters
            });
        }
    }
}

impl fmt::Debug for TaskLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("TaskLimiter");
        d.field("capacity", &self.capacity);
        if let Some(inner) = self.inner.try_lock() {
            d.field("pending", &inner.pending)
                .field("generation", &inner.generation)
                .field("register_waiters", &inner.register_waiters.len())
                .field("join_waiters", &inner.join_waiters.len());
        } else {
            d.field("pending", &format_args!("<locked>"));
        }
        d.finish()
    }
}
