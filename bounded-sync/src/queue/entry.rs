/// A keyed item held by a [`BoundedPriorityQueue`](crate::BoundedPriorityQueue).
///
/// Lower `priority` values are popped first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    key: String,
    priority: isize,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, priority: isize) -> Self {
        Self {
            key: key.into(),
            priority,
        }
    }

    /// The entry's identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's priority.
    pub fn priority(&self) -> isize {
        self.priority
    }

    /// Consumes the entry, returning its key.
    pub fn into_key(self) -> String {
        self.key
    }
}

/// Occupancy of a queue, derived from its length and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No entries; `pop` would block.
    Empty,
    /// Some entries and room for more.
    Partial,
    /// `capacity` entries; `push` would block.
    Full,
}

impl QueueState {
    /// A zero-capacity queue is reported as `Full`, never `Empty`.
    pub(crate) fn from_len(len: usize, capacity: usize) -> Self {
        if len >= capacity {
            QueueState::Full
        } else if len == 0 {
            QueueState::Empty
        } else {
            QueueState::Partial
        }
    }
}
