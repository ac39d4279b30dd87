use std::sync::{Mutex, MutexGuard, PoisonError};

use super::stat::{Predicate, RunningStatistic, StatSnapshot};
use super::RequestOutcome;

/// Shared aggregation handle given to every worker.
///
/// Owns the "total" and "success" streams behind explicit mutexes. Workers
/// call [`Recorder::record`] concurrently; snapshots are taken by the single
/// reporting thread after the pool has drained.
pub struct Recorder {
    total: Mutex<RunningStatistic>,
    success: Mutex<RunningStatistic>,
    expected_status: u16,
}

impl Recorder {
    #[must_use]
    pub fn new(expected_status: u16) -> Self {
        Self {
            total: Mutex::new(RunningStatistic::new()),
            success: Mutex::new(RunningStatistic::new()),
            expected_status,
        }
    }

    /// Registers a predicate bucket on both streams. Not safe to call
    /// concurrently with [`Recorder::record`]; registration happens once
    /// before dispatch begins.
    pub fn register_predicate(&self, name: &str, predicate: Predicate) {
        lock(&self.total).add_predicate(name, predicate.clone());
        lock(&self.success).add_predicate(name, predicate);
    }

    /// Folds one outcome into the streams. Total is updated first so the
    /// `total.count >= success.count` invariant holds at every instant.
    pub fn record(&self, outcome: &RequestOutcome) {
        lock(&self.total).add_value(outcome.elapsed);
        if outcome.status == Some(self.expected_status) {
            lock(&self.success).add_value(outcome.elapsed);
        }
    }

    #[must_use]
    pub fn total_snapshot(&self) -> StatSnapshot {
        lock(&self.total).snapshot()
    }

    #[must_use]
    pub fn success_snapshot(&self) -> StatSnapshot {
        lock(&self.success).snapshot()
    }

    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }
}

fn lock(stat: &Mutex<RunningStatistic>) -> MutexGuard<'_, RunningStatistic> {
    stat.lock().unwrap_or_else(PoisonError::into_inner)
}
