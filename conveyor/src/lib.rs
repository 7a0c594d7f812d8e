//! # Conveyor
//!
//! A minimal point-to-point message transport: one producer hands discrete
//! messages to one consumer through a blocking FIFO queue, instrumented to
//! measure end-to-end latency.
//!
//! ## Architecture
//!
//! Conveyor is structured with clean layering:
//!
//! - **`conveyor-core`**: The queue kernel — mutex + condvar FIFO, error
//!   taxonomy, construction options. A pure synchronization primitive.
//! - **`conveyor`**: Public API surface (this crate) plus the session
//!   harness used by the benches.
//!
//! ## Quick Start
//!
//! ```rust
//! use conveyor::MessageQueue;
//! use std::thread;
//!
//! let queue = MessageQueue::unbounded();
//! let producer = queue.clone();
//!
//! let handle = thread::spawn(move || {
//!     for i in 0..5 {
//!         producer.send(format!("Message {i}")).unwrap();
//!     }
//! });
//!
//! for i in 0..5 {
//!     // Blocks on an empty queue; no polling.
//!     assert_eq!(queue.recv().unwrap(), format!("Message {i}"));
//! }
//! handle.join().unwrap();
//! ```
//!
//! ## Measuring a session
//!
//! ```rust
//! use conveyor::harness::{text_payload, Session};
//! use conveyor::MessageQueue;
//!
//! let queue = MessageQueue::unbounded();
//! let report = Session::new(10_000).run(&queue, text_payload).unwrap();
//! println!("{report}");
//! ```
//!
//! ## Guarantees
//!
//! - **FIFO**: messages are received in exactly the order they were sent
//! - **No loss**: every sent message reaches exactly one `recv`
//! - **Happens-before**: a `recv` never returns a message before its `send`
//! - **No busy-wait**: a receiver parked on an empty queue consumes no CPU
//!
//! Ordering is contracted for one producer and one consumer; the handle is
//! `Clone` only so the two roles can share the queue.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export core types
pub use bytes::Bytes;
pub use conveyor_core::error::{
    RecvError, RecvTimeoutError, SendError, TryRecvError, TrySendError,
};
pub use conveyor_core::options::QueueOptions;
pub use conveyor_core::queue::MessageQueue;

pub mod dev_tracing;
pub mod harness;
