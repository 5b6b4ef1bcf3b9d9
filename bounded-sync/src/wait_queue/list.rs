use crate::wait_queue::waker::WakeList;
use std::collections::VecDeque;
use std::fmt;
use std::task::Waker;

/// Identifies a queued waiter so its future can refresh or withdraw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WaiterId(u64);

struct Waiter {
    id: WaiterId,
    waker: Waker,
}

/// FIFO list of parked futures waiting on one condition.
///
/// A waiter leaves the list in exactly two ways: it is popped by a notify
/// call, or its future withdraws it with [`remove`](Self::remove). A future
/// can therefore tell whether it was notified by checking whether `remove`
/// still found it.
pub(crate) struct WaitList {
    waiters: VecDeque<Waiter>,
    next_id: u64,
}

impl WaitList {
    pub(crate) fn new() -> Self {
        Self {
            waiters: VecDeque::new(),
            next_id: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    /// Queue a waiter, or refresh the waker of one that is still queued.
    ///
    /// Passing the id of a waiter that has already been notified queues it
    /// again at the back under a fresh id.
    pub(crate) fn register(&mut self, id: Option<WaiterId>, waker: &Waker) -> WaiterId {
        if let Some(id) = id {
            if let Some(waiter) = self.waiters.iter_mut().find(|w| w.id == id) {
                if !waiter.waker.will_wake(waker) {
                    waiter.waker = waker.clone();
                }
                return id;
            }
        }

        let id = WaiterId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.waiters.push_back(Waiter {
            id,
            waker: waker.clone(),
        });
        id
    }

    /// Withdraw a waiter. Returns `false` if it had already been notified.
    pub(crate) fn remove(&mut self, id: WaiterId) -> bool {
        match self.waiters.iter().position(|w| w.id == id) {
            Some(pos) => {
                self.waiters.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Pop the longest-waiting waiter and hand back its waker.
    pub(crate) fn notify_one(&mut self) -> Option<Waker> {
        self.waiters.pop_front().map(|w| w.waker)
    }

    /// Move as many waiters as fit into `wake_list`.
    pub(crate) fn drain_into(&mut self, wake_list: &mut WakeList) {
        while wake_list.can_push() {
            match self.waiters.pop_front() {
                Some(waiter) => wake_list.push(waiter.waker),
                None => break,
            }
        }
    }
}

impl fmt::Debug for WaitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitList")
            .field("waiters", &self.waiters.len())
            .finish()
    }
}
