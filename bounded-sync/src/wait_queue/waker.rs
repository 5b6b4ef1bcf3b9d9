use std::task::Waker;

const NUM_WAKERS: usize = 32;

/// A stack-allocated collection of wakers for batch waking.
///
/// Wakers are collected while the primitive's lock is held and woken once
/// it has been dropped.
pub(crate) struct WakeList {
    wakers: [Option<Waker>; NUM_WAKERS],
    count: usize,
}

impl WakeList {
    /// Creates a new empty wake list.
    pub(crate) fn new() -> Self {
        Self {
            wakers: [const { None }; NUM_WAKERS],
            count: 0,
        }
    }

    pub(crate) fn can_push(&self) -> bool {
        self.count < NUM_WAKERS
    }

    pub(crate) fn was_full(&self) -> bool {
        self.count == NUM_WAKERS
    }

    /// Adds a waker to the list.
    ///
    /// Callers check [`can_push()`](Self::can_push) first.
    pub(crate) fn push(&mut self, waker: Waker) {
        debug_assert!(self.can_push(), "WakeList is full");
        self.wakers[self.count] = Some(waker);
        self.count += 1;
    }

    pub(crate) fn wake_all(&mut self) {
        for slot in &mut self.wakers[..self.count] {
            if let Some(waker) = slot.take() {
                waker.wake();
            }
        }
        self.count = 0;
    }
}
