use crate::error::{LimiterError, TryRegisterError};
use crate::limiter::futures::{Join, Register};
use crate::limiter::slots::{OwnedTaskSlot, TaskSlot};
use std::sync::Arc;
use tracing::trace;

impl super::TaskLimiter {
    // === Blocking operations ===

    /// Registers `n` tasks, blocking the calling thread until `n` slots are
    /// free and then taking all of them at once.
    ///
    /// Registering zero tasks returns immediately.
    ///
    /// # Errors
    ///
    /// * [`LimiterError::NegativeCount`] if `n < 0`.
    /// * [`LimiterError::ExceedsCapacity`] if `n` is larger than the capacity,
    ///   since such a request could never be satisfied.
    ///
    /// Neither case changes any state. Both are programming errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{LimiterError, TaskLimiter};
    ///
    /// let limiter = TaskLimiter::new(3);
    /// limiter.register(2).unwrap();
    /// assert_eq!(limiter.pending(), 2);
    ///
    /// assert_eq!(limiter.register(-1), Err(LimiterError::NegativeCount(-1)));
    /// assert_eq!(limiter.pending(), 2);
    /// ```
    pub fn register(&self, n: isize) -> Result<(), LimiterError> {
        let n = self.check_count(n)?;
        self.take_slots_blocking(n);
        Ok(())
    }

    /// Blocks the calling thread until no registered task is pending.
    ///
    /// Returns immediately if nothing is pending.
    pub fn join(&self) {
        let mut inner = self.inner.lock();
        let generation = inner.generation;
        while !inner.is_drained_since(generation) {
            trace!(pending = inner.pending, "waiting for pending tasks");
            self.drained.wait(&mut inner);
        }
    }

    /// Registers one task and returns a guard that completes it on drop.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::TaskLimiter;
    ///
    /// let limiter = TaskLimiter::new(1);
    /// {
    ///     let _slot = limiter.slot();
    ///     assert_eq!(limiter.available_slots(), 0);
    /// }
    /// assert_eq!(limiter.available_slots(), 1);
    /// ```
    pub fn slot(&self) -> TaskSlot<'_> {
        self.take_slots_blocking(1);
        TaskSlot {
            limiter: self,
            active: true,
        }
    }

    /// Registers one task and returns an owned guard that completes it on drop.
    ///
    /// The guard can be moved into a spawned thread or task.
    pub fn slot_owned(self: Arc<Self>) -> OwnedTaskSlot {
        self.take_slots_blocking(1);
        OwnedTaskSlot {
            limiter: self,
            active: true,
        }
    }

    fn take_slots_blocking(&self, n: usize) {
        if n == 0 {
            return;
        }

        let mut inner = self.inner.lock();
        while !inner.has_room(n, self.capacity()) {
            trace!(requested = n, pending = inner.pending, "waiting for free slots");
            self.slot_freed.wait(&mut inner);
        }
        inner.pending += n;
    }

    // === Non-blocking operations ===

    /// Registers `n` tasks if `n` slots are free right now.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{TaskLimiter, TryRegisterError};
    ///
    /// let limiter = TaskLimiter::new(1);
    /// limiter.try_register(1).unwrap();
    /// assert_eq!(limiter.try_register(1), Err(TryRegisterError::NoSlots));
    /// ```
    pub fn try_register(&self, n: isize) -> Result<(), TryRegisterError> {
        let n = self.check_count(n)?;
        let mut inner = self.inner.lock();
        if !inner.has_room(n, self.capacity()) {
            return Err(TryRegisterError::NoSlots);
        }
        inner.pending += n;
        Ok(())
    }

    // === Async operations ===

    /// Registers `n` tasks, waiting asynchronously for free slots.
    ///
    /// The count is validated when the future is first polled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::TaskLimiter;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let limiter = TaskLimiter::new(2);
    /// limiter.register_async(2).await.unwrap();
    /// limiter.complete();
    /// limiter.complete();
    /// limiter.join_async().await;
    /// # }
    /// ```
    pub fn register_async(&self, n: isize) -> Register<'_> {
        Register {
            limiter: self,
            requested: n,
            waiter: None,
        }
    }

    /// Waits asynchronously until no registered task is pending.
    pub fn join_async(&self) -> Join<'_> {
        Join {
            limiter: self,
            generation: None,
            waiter: None,
        }
    }
}
