pub(crate) mod core;
pub(crate) mod futures;
pub(crate) mod methods;
pub(crate) mod slots;

pub use self::core::TaskLimiter;
pub use self::futures::{Join, Register};
pub use self::slots::{OwnedTaskSlot, TaskSlot};
