//! Conveyor Core
//!
//! This crate contains the runtime-agnostic queue kernel:
//! - Blocking point-to-point FIFO channel (`queue`)
//! - Construction-time configuration (`options`)
//! - Error types (`error`)
//!
//! The kernel is a pure synchronization primitive: no I/O, no async runtime,
//! no serialization. Transport, framing, and reporting are collaborators
//! layered on top (see the `conveyor` facade crate).

#![cfg_attr(not(test), deny(unsafe_code))]
// Allow some pedantic lints that are intentional in this crate
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]

pub mod error;
pub mod options;
pub mod queue;

// Optional: a small prelude to make downstream crates ergonomic.
// Keep it minimal to avoid API lock-in.
pub mod prelude {
    pub use crate::error::{RecvError, RecvTimeoutError, SendError, TryRecvError, TrySendError};
    pub use crate::options::QueueOptions;
    pub use crate::queue::MessageQueue;
}
