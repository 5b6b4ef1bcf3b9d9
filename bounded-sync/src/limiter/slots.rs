use std::fmt;
use std::sync::Arc;

/// A registered task that completes itself when dropped.
///
/// Returned by [`TaskLimiter::slot`](crate::TaskLimiter::slot).
///
/// # Examples
///
/// ```rust
/// use bounded_sync::TaskLimiter;
///
/// let limiter = TaskLimiter::new(2);
/// let slot = limiter.slot();
/// assert_eq!(limiter.pending(), 1);
/// drop(slot);
/// assert_eq!(limiter.pending(), 0);
/// ```
pub struct TaskSlot<'a> {
    pub(crate) limiter: &'a super::TaskLimiter,
    pub(crate) active: bool,
}

/// An owned registered task that completes itself when dropped.
///
/// Returned by [`TaskLimiter::slot_owned`](crate::TaskLimiter::slot_owned).
pub struct OwnedTaskSlot {
    pub(crate) limiter: Arc<super::TaskLimiter>,
    pub(crate) active: bool,
}

impl TaskSlot<'_> {
    /// Detaches the guard without completing the task.
    ///
    /// The task stays pending until [`TaskLimiter::complete`](crate::TaskLimiter::complete)
    /// is called for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::TaskLimiter;
    ///
    /// let limiter = TaskLimiter::new(2);
    /// limiter.slot().forget();
    /// assert_eq!(limiter.pending(), 1);
    ///
    /// limiter.complete();
    /// assert_eq!(limiter.pending(), 0);
    /// ```
    pub fn forget(mut self) {
        self.active = false;
    }
}

impl Drop for TaskSlot<'_> {
    fn drop(&mut self) {
        if self.active {
            self.limiter.complete();
        }
    }
}

impl OwnedTaskSlot {
    /// Detaches the guard without completing the task.
    pub fn forget(mut self) {
        self.active = false;
    }

    /// The limiter this slot was taken from.
    pub fn limiter(&self) -> &Arc<super::TaskLimiter> {
        &self.limiter
    }
}

impl Drop for OwnedTaskSlot {
    fn drop(&mut self) {
        if self.active {
            self.limiter.complete();
        }
    }
}

impl fmt::Debug for TaskSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSlot")
            .field("active", &self.active)
            .finish()
    }
}

impl fmt::Debug for OwnedTaskSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedTaskSlot")
            .field("active", &self.active)
            .finish()
    }
}
