use crate::queue::entry::Entry;
use crate::wait_queue::WaiterId;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`BoundedPriorityQueue::push`](crate::BoundedPriorityQueue::push).
///
/// Resolves once the entry has been inserted.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Push<'a> {
    pub(crate) queue: &'a super::BoundedPriorityQueue,
    pub(crate) entry: Option<Entry>,
    pub(crate) waiter: Option<WaiterId>,
}

/// Future returned by [`BoundedPriorityQueue::pop`](crate::BoundedPriorityQueue::pop).
///
/// Resolves to the lowest-priority entry once one is available.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Pop<'a> {
    pub(crate) queue: &'a super::BoundedPriorityQueue,
    pub(crate) waiter: Option<WaiterId>,
}

impl Future for Push<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let queue = this.queue;

        let Some(entry) = this.entry.take() else {
            return Poll::Ready(());
        };

        let mut inner = queue.inner.lock();
        if inner.is_full(queue.capacity()) {
            this.entry = Some(entry);
            this.waiter = Some(inner.push_waiters.register(this.waiter, cx.waker()));
            return Poll::Pending;
        }

        if let Some(id) = this.waiter.take() {
            inner.push_waiters.remove(id);
        }
        let waker = inner.push_locked(entry, queue.config());
        drop(inner);
        queue.notify_not_empty(waker);
        Poll::Ready(())
    }
}

impl Drop for Push<'_> {
    fn drop(&mut self) {
        let Some(id) = self.waiter.take() else {
            return;
        };

        let mut inner = self.queue.inner.lock();
        if inner.push_waiters.remove(id) {
            return;
        }

        // Notified of free room but never used it: hand the wake-up on.
        if !inner.is_full(self.queue.capacity()) {
            let waker = inner.push_waiters.notify_one();
            drop(inner);
            self.queue.notify_not_full(waker);
        }
    }
}

impl Future for Pop<'_> {
    type Output = Entry;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let queue = this.queue;

        let mut inner = queue.inner.lock();
        let Some((entry, waker)) = inner.pop_locked() else {
            this.waiter = Some(inner.pop_waiters.register(this.waiter, cx.waker()));
            return Poll::Pending;
        };

        if let Some(id) = this.waiter.take() {
            inner.pop_waiters.remove(id);
        }
        drop(inner);
        queue.notify_not_full(waker);
        Poll::Ready(entry)
    }
}

impl Drop for Pop<'_> {
    fn drop(&mut self) {
        let Some(id) = self.waiter.take() else {
            return;
        };

        let mut inner = self.queue.inner.lock();
        if inner.pop_waiters.remove(id) {
            return;
        }

        // Notified of an entry but never took it: hand the wake-up on.
        if !inner.heap.is_empty() {
            let waker = inner.pop_waiters.notify_one();
            drop(inner);
            self.queue.notify_not_empty(waker);
        }
    }
}

impl fmt::Debug for Push<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Push")
            .field("entry", &self.entry)
            .field("queued", &self.waiter.is_some())
            .finish()
    }
}

impl fmt::Debug for Pop<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pop")
            .field("queued", &self.waiter.is_some())
            .finish()
    }
}
