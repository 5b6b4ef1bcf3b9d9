//! # bounded-sync
//!
//! **Bounded hand-off primitives for threads and async tasks.**
//!
//! ## Features
//! - [`BoundedPriorityQueue`]: a capacity-bounded min-heap. Producers wait
//!   while it is full, consumers wait while it is empty.
//! - [`TaskLimiter`]: caps how many tasks run at once and lets a caller wait
//!   until all of them have completed.
//! - Blocking and async: every waiting operation has a blocking form for
//!   threads and a future that works with any async runtime.
//! - Explicit tie-breaking: equal priorities are unordered by default; opt
//!   into FIFO or LIFO per priority with [`PriorityConfig`].
//!
//! ## Quick Start
//! ```rust
//! use bounded_sync::{BoundedPriorityQueue, TaskLimiter};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(BoundedPriorityQueue::new(16));
//! let limiter = Arc::new(TaskLimiter::new(4));
//!
//! for i in 0..8 {
//!     limiter.register(1).unwrap();
//!     let queue = Arc::clone(&queue);
//!     let limiter = Arc::clone(&limiter);
//!     thread::spawn(move || {
//!         queue.push_blocking(format!("job-{i}"), i % 3);
//!         limiter.complete();
//!     });
//! }
//!
//! limiter.join();
//! assert_eq!(queue.len(), 8);
//! assert_eq!(queue.pop_blocking().priority(), 0);
//! ```
//!
//! ## Async
//!
//! ```rust
//! use bounded_sync::BoundedPriorityQueue;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let queue = BoundedPriorityQueue::new_fifo(2);
//! queue.push("a", 1).await;
//! queue.push("b", 1).await;
//! assert_eq!(queue.pop().await.key(), "a");
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (waits at `trace`, construction at
//! `debug`, caller mistakes at `warn`). It never installs a subscriber.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub, missing_debug_implementations)]
#![deny(rust_2018_idioms)]

mod config;
mod error;
mod limiter;
mod queue;
mod wait_queue;

pub use config::{PriorityConfig, QueueStrategy};
pub use error::{LimiterError, TryPopError, TryPushError, TryRegisterError};
pub use limiter::{Join, OwnedTaskSlot, Register, TaskLimiter, TaskSlot};
pub use queue::{BoundedPriorityQueue, Entry, Pop, Push, QueueState};
