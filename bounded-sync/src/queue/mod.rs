pub(crate) mod core;
pub(crate) mod entry;
pub(crate) mod futures;
pub(crate) mod heap;
pub(crate) mod methods;

pub use self::core::BoundedPriorityQueue;
pub use self::entry::{Entry, QueueState};
pub use self::futures::{Pop, Push};
