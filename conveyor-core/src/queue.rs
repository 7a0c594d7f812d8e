//! Blocking point-to-point message queue.
//!
//! [`MessageQueue`] is a thread-safe FIFO channel between one producer role
//! and one consumer role: the producer calls [`send`](MessageQueue::send),
//! the consumer calls [`recv`](MessageQueue::recv), and a receiver parked on
//! an empty queue is woken by the next send without polling.
//!
//! # Features
//!
//! - **Blocking**: `recv` suspends on an empty queue, consuming no CPU
//! - **FIFO**: messages come out in exactly the order they went in
//! - **Payload-agnostic**: generic over the message type, no framing imposed
//! - **Back-pressure**: optional capacity bound; `send` blocks when full
//! - **Closable**: `close()` wakes every parked thread instead of leaving it
//!   blocked forever
//!
//! # Usage
//!
//! ```rust
//! use conveyor_core::queue::MessageQueue;
//! use std::thread;
//!
//! let queue = MessageQueue::unbounded();
//! let producer = queue.clone();
//!
//! let handle = thread::spawn(move || {
//!     producer.send("Hello").unwrap();
//! });
//!
//! // Blocks until the producer thread has sent.
//! assert_eq!(queue.recv().unwrap(), "Hello");
//! handle.join().unwrap();
//! ```
//!
//! # Synchronization discipline
//!
//! The pending sequence and the closed flag live under a single mutex; the
//! empty-check and the wait happen under that same mutex, so a send's signal
//! cannot fall between a receiver observing "empty" and its park (the classic
//! missed-wakeup hazard). The lock is released for the duration of the wait
//! and reacquired on wake, per standard condition-variable discipline.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{RecvError, RecvTimeoutError, SendError, TryRecvError, TrySendError};
use crate::options::QueueOptions;

/// Mutable queue state. Only ever touched with the mutex held.
struct State<T> {
    pending: VecDeque<T>,
    closed: bool,
}

/// Shared interior of a queue, behind an `Arc` in every handle.
struct Shared<T> {
    state: Mutex<State<T>>,
    /// Signalled by `send` when a message lands in an empty queue.
    not_empty: Condvar,
    /// Signalled by `recv` when a slot frees up in a bounded queue.
    not_full: Condvar,
    capacity: Option<usize>,
    name: Option<String>,
}

impl<T> Shared<T> {
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("queue")
    }
}

/// A thread-safe blocking FIFO channel for one producer and one consumer.
///
/// The queue is an explicitly constructed, explicitly owned object; cloning
/// a handle is cheap (it bumps a reference count on the shared interior) and
/// is how the producer and consumer threads share one queue. Ordering is
/// contracted for exactly one thread in each role.
///
/// # Examples
///
/// Unbounded (the default), shared across two threads:
///
/// ```rust
/// use conveyor_core::queue::MessageQueue;
/// use std::thread;
///
/// let queue = MessageQueue::unbounded();
/// let producer = queue.clone();
///
/// let sender = thread::spawn(move || {
///     for i in 0..5 {
///         producer.send(format!("Message {i}")).unwrap();
///     }
/// });
///
/// for i in 0..5 {
///     assert_eq!(queue.recv().unwrap(), format!("Message {i}"));
/// }
/// sender.join().unwrap();
/// ```
///
/// Bounded, with blocking back-pressure on the sender:
///
/// ```rust
/// use conveyor_core::queue::MessageQueue;
///
/// let queue = MessageQueue::bounded(2);
/// queue.send(1).unwrap();
/// queue.send(2).unwrap();
/// assert!(queue.try_send(3).is_err()); // full; a blocking send would park
/// assert_eq!(queue.recv().unwrap(), 1);
/// queue.send(3).unwrap();
/// ```
pub struct MessageQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for MessageQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> MessageQueue<T> {
    /// Create an unbounded queue. `send` never blocks on capacity.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_options(QueueOptions::new())
    }

    /// Create a bounded queue holding at most `capacity` pending messages.
    ///
    /// A blocking `send` on a full queue parks until a `recv` frees a slot
    /// (back-pressure); it never drops the message.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a rendezvous queue has no pending
    /// sequence and is not supported.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        Self::with_options(QueueOptions::new().with_capacity(capacity))
    }

    /// Create a queue from explicit [`QueueOptions`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conveyor_core::options::QueueOptions;
    /// use conveyor_core::queue::MessageQueue;
    ///
    /// let queue: MessageQueue<u64> = MessageQueue::with_options(
    ///     QueueOptions::new().with_capacity(1024).with_name("telemetry"),
    /// );
    /// assert_eq!(queue.capacity(), Some(1024));
    /// ```
    #[must_use]
    pub fn with_options(options: QueueOptions) -> Self {
        let QueueOptions { capacity, name } = options;
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    pending: VecDeque::new(),
                    closed: false,
                }),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
                capacity,
                name,
            }),
        }
    }

    /// Enqueue `message` at the tail.
    ///
    /// On an unbounded queue this returns immediately. On a bounded queue at
    /// capacity it blocks until a receiver frees a slot. Either way, a
    /// successful send wakes one parked receiver if any exists.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] with the message if the queue is closed.
    pub fn send(&self, message: T) -> Result<(), SendError<T>> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        loop {
            if state.closed {
                return Err(SendError(message));
            }
            match shared.capacity {
                Some(cap) if state.pending.len() >= cap => {
                    trace!(queue = shared.label(), "sender parked on full queue");
                    shared.not_full.wait(&mut state);
                }
                _ => break,
            }
        }
        state.pending.push_back(message);
        drop(state);
        shared.not_empty.notify_one();
        Ok(())
    }

    /// Enqueue `message` without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TrySendError::Full`] if the queue is bounded and at
    /// capacity, or [`TrySendError::Closed`] if the queue is closed. Both
    /// variants hand the message back.
    pub fn try_send(&self, message: T) -> Result<(), TrySendError<T>> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        if state.closed {
            return Err(TrySendError::Closed(message));
        }
        if let Some(cap) = shared.capacity {
            if state.pending.len() >= cap {
                return Err(TrySendError::Full(message));
            }
        }
        state.pending.push_back(message);
        drop(state);
        shared.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the message at the head.
    ///
    /// If the queue is empty the calling thread suspends, consuming no CPU,
    /// until a message arrives or the queue is closed. This is the one
    /// suspension point a consumer needs; no polling is involved.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError::Closed`] once the queue is closed **and** every
    /// message sent before the close has been drained.
    pub fn recv(&self) -> Result<T, RecvError> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        loop {
            if let Some(message) = state.pending.pop_front() {
                drop(state);
                shared.not_full.notify_one();
                return Ok(message);
            }
            if state.closed {
                return Err(RecvError::Closed);
            }
            trace!(queue = shared.label(), "receiver parked on empty queue");
            shared.not_empty.wait(&mut state);
        }
    }

    /// Remove and return the head message, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RecvTimeoutError::Timeout`] if no message arrived within
    /// `timeout`, or [`RecvTimeoutError::Closed`] if the queue is closed and
    /// drained. A timeout is never confused with a delivered message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.recv_deadline(Instant::now() + timeout)
    }

    /// Remove and return the head message, waiting until `deadline` at most.
    ///
    /// # Errors
    ///
    /// Same as [`recv_timeout`](Self::recv_timeout).
    pub fn recv_deadline(&self, deadline: Instant) -> Result<T, RecvTimeoutError> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        loop {
            if let Some(message) = state.pending.pop_front() {
                drop(state);
                shared.not_full.notify_one();
                return Ok(message);
            }
            if state.closed {
                return Err(RecvTimeoutError::Closed);
            }
            if shared.not_empty.wait_until(&mut state, deadline).timed_out() {
                // Re-check before reporting: a send may have landed in the
                // window between the wakeup and the lock reacquisition.
                return match state.pending.pop_front() {
                    Some(message) => {
                        drop(state);
                        shared.not_full.notify_one();
                        Ok(message)
                    }
                    None if state.closed => Err(RecvTimeoutError::Closed),
                    None => Err(RecvTimeoutError::Timeout),
                };
            }
        }
    }

    /// Remove and return the head message without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryRecvError::Empty`] if no message is pending, or
    /// [`TryRecvError::Closed`] if the queue is closed and drained.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        match state.pending.pop_front() {
            Some(message) => {
                drop(state);
                shared.not_full.notify_one();
                Ok(message)
            }
            None if state.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Close the queue.
    ///
    /// Every parked sender and receiver wakes: senders report
    /// [`SendError`], receivers drain the remaining pending messages and
    /// then report [`RecvError::Closed`]. Closing an already-closed queue
    /// is a no-op.
    pub fn close(&self) {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        let pending = state.pending.len();
        drop(state);
        debug!(queue = shared.label(), pending, "queue closed");
        shared.not_empty.notify_all();
        shared.not_full.notify_all();
    }

    /// Check whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Number of messages currently pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.state.lock().pending.len()
    }

    /// Check whether no messages are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The capacity bound, or `None` for an unbounded queue.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.shared.capacity
    }

    /// The debug name given at construction, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.shared.name.as_deref()
    }
}
