//! Parked async waiters.
//!
//! Each blocking condition of a primitive (queue not full, queue not empty,
//! limiter slots freed, limiter drained) owns one [`WaitList`] stored inside
//! the primitive's mutex. Futures register their waker under that lock and
//! are popped off the list by the mutation that may satisfy them. Wakers are
//! always invoked after the lock has been released.

mod list;
mod waker;

pub(crate) use list::{WaitList, WaiterId};
pub(crate) use waker::WakeList;

use parking_lot::{Mutex, MutexGuard};

/// Wake every waiter of the list selected by `select`, in batches.
///
/// The lock is released before each batch is woken and re-acquired for the
/// next one, so waking never happens under the primitive's mutex.
pub(crate) fn wake_all_batched<S, F>(mutex: &Mutex<S>, guard: MutexGuard<'_, S>, select: F)
where
    F: Fn(&mut S) -> &mut WaitList,
{
    let mut lock = Some(guard);

    loop {
        let mut state = lock.take().unwrap_or_else(|| mutex.lock());
        let list = select(&mut *state);
        if list.is_empty() {
            break;
        }

        let mut wake_list = WakeList::new();
        list.drain_into(&mut wake_list);
        drop(state);

        let more = wake_list.was_full();
        wake_list.wake_all();
        if !more {
            break;
        }
    }
}
