//! Producer/consumer session harness with wall-clock measurement.
//!
//! The harness is a collaborator of the queue, not part of it: it drives one
//! producer thread and one consumer thread through a fixed number of
//! `send`/`recv` pairs and reports total elapsed time, average per-message
//! latency, and throughput. It imposes no contract on the queue beyond
//! calling `send` and `recv`.

use conveyor_core::prelude::*;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

use bytes::Bytes;

/// Error raised when a session cannot run to completion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The queue was closed while the producer still had messages to send.
    #[error("producer stopped early: queue closed mid-session")]
    ProducerStalled,

    /// The queue was closed and drained before the consumer got its count.
    #[error("consumer stopped early: queue closed mid-session")]
    ConsumerStalled,

    /// A driver thread panicked.
    #[error("session worker thread panicked")]
    WorkerPanicked,
}

/// Timing summary of a completed producer/consumer session.
///
/// # Examples
///
/// ```rust
/// use conveyor::harness::{text_payload, Session};
/// use conveyor::MessageQueue;
///
/// let queue = MessageQueue::unbounded();
/// let report = Session::new(1_000).run(&queue, text_payload).unwrap();
/// assert_eq!(report.messages, 1_000);
/// println!("{report}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SessionReport {
    /// Number of messages carried end to end.
    pub messages: usize,
    /// Wall-clock time from first send to last receive.
    pub total: Duration,
}

impl SessionReport {
    /// Average per-message latency (total time over message count).
    #[must_use]
    pub fn avg_latency(&self) -> Duration {
        if self.messages == 0 {
            return Duration::ZERO;
        }
        self.total / self.messages as u32
    }

    /// Messages per second over the whole session.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.total.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.messages as f64 / secs
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {:.2} s", self.total.as_secs_f64())?;
        writeln!(
            f,
            "Average latency: {:.2} µs/msg",
            self.avg_latency().as_secs_f64() * 1_000_000.0
        )?;
        write!(f, "Throughput: {:.0} msg/s", self.throughput())
    }
}

/// A fixed-count producer/consumer run over one queue.
///
/// One thread sends `count` generated payloads, a second thread receives
/// `count` times, and the wall clock is read around the pair.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    count: usize,
}

impl Session {
    /// Create a session carrying `count` messages.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    /// Run the session to completion and return its timing report.
    ///
    /// `payload` is called with the message index on the producer thread to
    /// generate each message.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the queue is closed mid-session or a
    /// driver thread panics.
    pub fn run<T, P>(&self, queue: &MessageQueue<T>, payload: P) -> Result<SessionReport, SessionError>
    where
        T: Send + 'static,
        P: Fn(usize) -> T + Send + 'static,
    {
        let producer_queue = queue.clone();
        let consumer_queue = queue.clone();
        let count = self.count;

        let start = Instant::now();

        let producer = thread::spawn(move || -> Result<(), SessionError> {
            for i in 0..count {
                producer_queue
                    .send(payload(i))
                    .map_err(|_| SessionError::ProducerStalled)?;
            }
            Ok(())
        });

        let consumer = thread::spawn(move || -> Result<(), SessionError> {
            for _ in 0..count {
                consumer_queue
                    .recv()
                    .map_err(|_| SessionError::ConsumerStalled)?;
            }
            Ok(())
        });

        producer.join().map_err(|_| SessionError::WorkerPanicked)??;
        consumer.join().map_err(|_| SessionError::WorkerPanicked)??;

        let total = start.elapsed();
        let report = SessionReport { messages: count, total };
        info!(
            messages = count,
            total_ms = total.as_millis() as u64,
            "session complete"
        );
        Ok(report)
    }
}

/// The original benchmark's payloads: `"Message 0"`, `"Message 1"`, ...
#[must_use]
pub fn text_payload(i: usize) -> String {
    format!("Message {i}")
}

/// A zeroed byte payload of the given size, for size-scaling runs.
#[must_use]
pub fn byte_payload(size: usize) -> Bytes {
    Bytes::from(vec![0u8; size])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_report_math() {
        let report = SessionReport {
            messages: 1_000,
            total: Duration::from_secs(1),
        };
        assert_eq!(report.avg_latency(), Duration::from_millis(1));
        assert!((report.throughput() - 1_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_session_report() {
        let report = SessionReport {
            messages: 0,
            total: Duration::ZERO,
        };
        assert_eq!(report.avg_latency(), Duration::ZERO);
        assert_eq!(report.throughput(), 0.0);
    }

    #[test]
    fn test_session_runs_to_completion() {
        let queue = MessageQueue::unbounded();
        let report = Session::new(100).run(&queue, text_payload).unwrap();
        assert_eq!(report.messages, 100);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_session_on_closed_queue() {
        let queue: MessageQueue<String> = MessageQueue::unbounded();
        queue.close();
        let err = Session::new(10).run(&queue, text_payload).unwrap_err();
        assert_eq!(err, SessionError::ProducerStalled);
    }
}
