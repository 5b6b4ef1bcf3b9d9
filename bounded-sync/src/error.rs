use crate::queue::Entry;
use thiserror::Error;

/// Error returned when a registration request breaks the limiter's contract.
///
/// Both variants are programming errors on the caller's side; retrying the
/// same call will never succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimiterError {
    /// A negative task count was passed to `register`.
    #[error("task count must not be negative, got {0}")]
    NegativeCount(isize),
    /// More slots were requested than the limiter will ever have.
    #[error("requested {requested} slots but limiter capacity is {capacity}")]
    ExceedsCapacity {
        /// Number of slots asked for.
        requested: usize,
        /// The limiter's fixed capacity.
        capacity: usize,
    },
}

impl LimiterError {
    /// Returns `true` if the error was caused by a negative task count.
    pub fn is_negative_count(&self) -> bool {
        matches!(self, LimiterError::NegativeCount(_))
    }
}

/// Error returned from `try_register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRegisterError {
    /// Not enough free slots right now.
    #[error("no free slots available")]
    NoSlots,
    /// The request itself is invalid.
    #[error(transparent)]
    Invalid(#[from] LimiterError),
}

impl TryRegisterError {
    /// Returns `true` if the error was caused by insufficient free slots.
    pub fn is_no_slots(&self) -> bool {
        matches!(self, TryRegisterError::NoSlots)
    }
}

/// Error returned from `try_push` when the queue is at capacity.
///
/// The rejected entry is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryPushError {
    /// The queue holds `capacity` entries.
    #[error("queue is full")]
    Full(Entry),
}

impl TryPushError {
    /// Returns the entry that could not be pushed.
    pub fn into_entry(self) -> Entry {
        match self {
            TryPushError::Full(entry) => entry,
        }
    }
}

/// Error returned from `try_pop` when the queue holds no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryPopError {
    /// The queue is empty.
    #[error("queue is empty")]
    Empty,
}
