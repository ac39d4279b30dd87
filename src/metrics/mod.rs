//! Streaming latency aggregation.
//!
//! Two [`RunningStatistic`] streams live behind a [`Recorder`]: "total" sees
//! every request outcome, "success" only those whose status matched the
//! expected code. Updates are commutative, so the final count, sum, min,
//! max and predicate counts do not depend on the order in which concurrent
//! workers report. Snapshots are meaningful only after the worker pool has
//! drained.
mod recorder;
mod stat;


pub use recorder::Recorder;
pub use stat::{Predicate, RunningStatistic, StatSnapshot};

/// Uniform result of one fetch task, consumed exactly once by the recorder.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// HTTP status, absent when the transport failed before a response.
    pub status: Option<u16>,
    /// Wall-clock latency in seconds, taken from a monotonic source.
    pub elapsed: f64,
    /// Response body, empty when suppressed or failed.
    pub body: Vec<u8>,
}
