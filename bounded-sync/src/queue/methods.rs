use crate::error::{TryPopError, TryPushError};
use crate::queue::entry::Entry;
use crate::queue::futures::{Pop, Push};
use tracing::trace;

impl super::BoundedPriorityQueue {
    // === Blocking operations ===

    /// Inserts an entry, blocking the calling thread while the queue is full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::BoundedPriorityQueue;
    ///
    /// let queue = BoundedPriorityQueue::new(3);
    /// queue.push_blocking("low", 9);
    /// queue.push_blocking("high", 1);
    /// assert_eq!(queue.len(), 2);
    /// assert_eq!(queue.pop_blocking().key(), "high");
    /// ```
    pub fn push_blocking(&self, key: impl Into<String>, priority: isize) {
        self.push_entry_blocking(Entry::new(key, priority));
    }

    /// Inserts a prepared entry, blocking the calling thread while the queue is full.
    pub fn push_entry_blocking(&self, entry: Entry) {
        let mut inner = self.inner.lock();
        while inner.is_full(self.capacity()) {
            trace!(capacity = self.capacity(), "queue full, waiting for room");
            self.not_full.wait(&mut inner);
        }

        let waker = inner.push_locked(entry, self.config());
        drop(inner);
        self.notify_not_empty(waker);
    }

    /// Removes the lowest-priority entry, blocking the calling thread while
    /// the queue is empty.
    pub fn pop_blocking(&self) -> Entry {
        let mut inner = self.inner.lock();
        loop {
            if let Some((entry, waker)) = inner.pop_locked() {
                drop(inner);
                self.notify_not_full(waker);
                return entry;
            }
            trace!("queue empty, waiting for an entry");
            self.not_empty.wait(&mut inner);
        }
    }

    // === Non-blocking operations ===

    /// Inserts an entry if there is room, without waiting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{BoundedPriorityQueue, TryPushError};
    ///
    /// let queue = BoundedPriorityQueue::new(1);
    /// queue.try_push("a", 0).unwrap();
    ///
    /// let err = queue.try_push("b", 0).unwrap_err();
    /// assert_eq!(err.into_entry().key(), "b");
    /// ```
    pub fn try_push(&self, key: impl Into<String>, priority: isize) -> Result<(), TryPushError> {
        self.try_push_entry(Entry::new(key, priority))
    }

    /// Inserts a prepared entry if there is room, without waiting.
    pub fn try_push_entry(&self, entry: Entry) -> Result<(), TryPushError> {
        let mut inner = self.inner.lock();
        if inner.is_full(self.capacity()) {
            return Err(TryPushError::Full(entry));
        }

        let waker = inner.push_locked(entry, self.config());
        drop(inner);
        self.notify_not_empty(waker);
        Ok(())
    }

    /// Removes the lowest-priority entry if there is one, without waiting.
    pub fn try_pop(&self) -> Result<Entry, TryPopError> {
        let mut inner = self.inner.lock();
        match inner.pop_locked() {
            Some((entry, waker)) => {
                drop(inner);
                self.notify_not_full(waker);
                Ok(entry)
            }
            None => Err(TryPopError::Empty),
        }
    }

    // === Async operations ===

    /// Inserts an entry, waiting asynchronously while the queue is full.
    ///
    /// Dropping the returned future before it completes leaves the queue
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::BoundedPriorityQueue;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let queue = BoundedPriorityQueue::new(2);
    /// queue.push("job", 5).await;
    /// assert_eq!(queue.pop().await.key(), "job");
    /// # }
    /// ```
    pub fn push(&self, key: impl Into<String>, priority: isize) -> Push<'_> {
        self.push_entry(Entry::new(key, priority))
    }

    /// Inserts a prepared entry, waiting asynchronously while the queue is full.
    pub fn push_entry(&self, entry: Entry) -> Push<'_> {
        Push {
            queue: self,
            entry: Some(entry),
            waiter: None,
        }
    }

    /// Removes the lowest-priority entry, waiting asynchronously while the
    /// queue is empty.
    pub fn pop(&self) -> Pop<'_> {
        Pop {
            queue: self,
            waiter: None,
        }
    }
}
