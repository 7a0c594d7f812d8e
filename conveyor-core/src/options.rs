//! Queue configuration options
//!
//! This module provides construction-time configuration for
//! [`MessageQueue`](crate::queue::MessageQueue). Options are fixed for the
//! lifetime of the queue; there is no runtime reconfiguration.

/// Queue configuration options.
///
/// # Examples
///
/// ```
/// use conveyor_core::options::QueueOptions;
///
/// let opts = QueueOptions::new()
///     .with_capacity(1024)
///     .with_name("ingest");
/// assert_eq!(opts.capacity, Some(1024));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueOptions {
    /// Capacity bound.
    ///
    /// Maximum number of pending messages before `send` blocks.
    /// - `None`: Unbounded (default, matching the minimal contract)
    /// - `Some(n)`: At most `n` pending; a full queue applies back-pressure
    pub capacity: Option<usize>,

    /// Debug name attached to tracing events emitted by the queue.
    ///
    /// - `None`: Events are labelled `"queue"` (default)
    /// - `Some(name)`: Events carry this label instead
    pub name: Option<String>,
}

impl QueueOptions {
    /// Create options with defaults (unbounded, unnamed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a capacity bound.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set a debug name for tracing output.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
