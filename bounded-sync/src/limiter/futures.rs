use crate::error::LimiterError;
use crate::wait_queue::WaiterId;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`TaskLimiter::register_async`](crate::TaskLimiter::register_async).
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Register<'a> {
    pub(crate) limiter: &'a super::TaskLimiter,
    pub(crate) requested: isize,
    pub(crate) waiter: Option<WaiterId>,
}

/// Future returned by [`TaskLimiter::join_async`](crate::TaskLimiter::join_async).
///
/// The barrier generation is captured on first poll.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Join<'a> {
    pub(crate) limiter: &'a super::TaskLimiter,
    pub(crate) generation: Option<u64>,
    pub(crate) waiter: Option<WaiterId>,
}

impl Future for Register<'_> {
    type Output = Result<(), LimiterError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let limiter = this.limiter;

        let n = match limiter.check_count(this.requested) {
            Ok(n) => n,
            Err(e) => return Poll::Ready(Err(e)),
        };
        if n == 0 {
            return Poll::Ready(Ok(()));
        }

        let mut inner = limiter.inner.lock();
        if !inner.has_room(n, limiter.capacity()) {
            this.waiter = Some(inner.register_waiters.register(this.waiter, cx.waker()));
            return Poll::Pending;
        }

        if let Some(id) = this.waiter.take() {
            inner.register_waiters.remove(id);
        }
        inner.pending += n;
        Poll::Ready(Ok(()))
    }
}

impl Drop for Register<'_> {
    fn drop(&mut self) {
        // Slot waiters are woken all at once, so nothing needs forwarding.
        if let Some(id) = self.waiter.take() {
            self.limiter.inner.lock().register_waiters.remove(id);
        }
    }
}

impl Future for Join<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;

        let mut inner = this.limiter.inner.lock();
        let generation = *this.generation.get_or_insert(inner.generation);
        if inner.is_drained_since(generation) {
            if let Some(id) = this.waiter.take() {
                inner.join_waiters.remove(id);
            }
            return Poll::Ready(());
        }

        this.waiter = Some(inner.join_waiters.register(this.waiter, cx.waker()));
        Poll::Pending
    }
}

impl Drop for Join<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.waiter.take() {
            self.limiter.inner.lock().join_waiters.remove(id);
        }
    }
}

impl fmt::Debug for Register<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Register")
            .field("requested", &self.requested)
            .field("queued", &self.waiter.is_some())
            .finish()
    }
}

impl fmt::Debug for Join<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join")
            .field("generation", &self.generation)
            .field("queued", &self.waiter.is_some())
            .finish()
    }
}
