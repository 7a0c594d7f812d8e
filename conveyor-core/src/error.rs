/// Conveyor Error Types
///
/// Per-operation error taxonomy for queue operations. Send-side errors hand
/// the undelivered message back to the caller so nothing is silently dropped.

use std::fmt;
use thiserror::Error;

/// Error returned by [`MessageQueue::send`](crate::queue::MessageQueue::send)
/// when the queue has been closed.
///
/// Contains the message that could not be delivered.
#[derive(Error, Clone, Copy, PartialEq, Eq)]
#[error("sending on a closed queue")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Recover the message that failed to send.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError(..)")
    }
}

/// Error returned by [`MessageQueue::try_send`](crate::queue::MessageQueue::try_send).
///
/// Both variants contain the message that could not be delivered.
#[derive(Error, Clone, Copy, PartialEq, Eq)]
pub enum TrySendError<T> {
    /// The queue is bounded and at capacity.
    #[error("sending on a full queue")]
    Full(T),

    /// The queue has been closed.
    #[error("sending on a closed queue")]
    Closed(T),
}

impl<T> TrySendError<T> {
    /// Recover the message that failed to send.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(msg) | Self::Closed(msg) => msg,
        }
    }

    /// Check whether the failure was a capacity rejection.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
            Self::Closed(_) => f.write_str("Closed(..)"),
        }
    }
}

impl<T> From<SendError<T>> for TrySendError<T> {
    fn from(err: SendError<T>) -> Self {
        Self::Closed(err.0)
    }
}

/// Error returned by [`MessageQueue::recv`](crate::queue::MessageQueue::recv).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// The queue is closed and fully drained; no further message can arrive.
    #[error("receiving on a closed and empty queue")]
    Closed,
}

/// Error returned by [`MessageQueue::recv_timeout`](crate::queue::MessageQueue::recv_timeout)
/// and [`MessageQueue::recv_deadline`](crate::queue::MessageQueue::recv_deadline).
///
/// `Timeout` is reported distinctly from delivery and from closure; it is
/// never conflated with an empty payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeoutError {
    /// The deadline elapsed before a message arrived.
    #[error("timed out waiting on a queue")]
    Timeout,

    /// The queue is closed and fully drained.
    #[error("receiving on a closed and empty queue")]
    Closed,
}

impl From<RecvError> for RecvTimeoutError {
    fn from(err: RecvError) -> Self {
        match err {
            RecvError::Closed => Self::Closed,
        }
    }
}

/// Error returned by [`MessageQueue::try_recv`](crate::queue::MessageQueue::try_recv).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// The queue is currently empty.
    #[error("receiving on an empty queue")]
    Empty,

    /// The queue is closed and fully drained.
    #[error("receiving on a closed and empty queue")]
    Closed,
}

impl From<RecvError> for TryRecvError {
    fn from(err: RecvError) -> Self {
        match err {
            RecvError::Closed => Self::Closed,
        }
    }
}
