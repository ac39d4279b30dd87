use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::http::pool::{JobRunner, WorkerPool};
use crate::http::rate::{DEFAULT_JITTER_GRANULARITY, PacingPlan};
use crate::http::workload::{Job, PayloadCursor, UrlFeed};

/// Dispatch lifecycle. Statistics are complete and final only in `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Pacing,
    Draining,
    Done,
}

/// Sizing and pacing knobs for one run.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
    /// Stop reading once this many jobs have been submitted.
    pub limit: u64,
    /// Jobs per pacing plan; also the pool's worker count in paced mode.
    pub chunk_size: usize,
    /// Window in milliseconds each chunk of submissions is spread across.
    pub time_range_ms: u64,
    /// Per-submission delay floor in milliseconds.
    pub min_distance_ms: u64,
    /// Execute jobs inline one at a time instead of through the pool.
    pub sequential: bool,
}

/// Reads jobs from the feed one at a time, paces submissions chunk by
/// chunk, and drains the pool before statistics are read.
///
/// The dispatcher never aborts because of a single job's outcome; only a
/// fatal setup error upstream prevents it from entering `Pacing` at all.
pub struct Dispatcher {
    options: DispatchOptions,
    feed: UrlFeed,
    payloads: Option<PayloadCursor>,
    pending_delays: VecDeque<u64>,
    phase: DispatchPhase,
    submitted: u64,
}

impl Dispatcher {
    #[must_use]
    pub fn new(options: DispatchOptions, feed: UrlFeed, payloads: Option<PayloadCursor>) -> Self {
        Self {
            options,
            feed,
            payloads,
            pending_delays: VecDeque::new(),
            phase: DispatchPhase::Idle,
            submitted: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Jobs handed out so far; never exceeds the configured limit.
    #[must_use]
    pub const fn submitted(&self) -> u64 {
        self.submitted
    }

    #[must_use]
    pub const fn feed(&self) -> &UrlFeed {
        &self.feed
    }

    /// Runs the whole dispatch loop and returns once everything submitted
    /// has completed.
    pub async fn run(&mut self, runner: Arc<dyn JobRunner>) {
        if self.options.sequential {
            self.run_sequential(runner).await;
        } else {
            self.run_paced(runner).await;
        }
    }

    /// One job at a time, completion latency is the spacing. Used when
    /// strict ordering between requests is required.
    async fn run_sequential(&mut self, runner: Arc<dyn JobRunner>) {
        while let Some(job) = self.next_job() {
            runner.run(job).await;
        }
        // Nothing outstanding: every job completed inline.
        self.phase = DispatchPhase::Done;
    }

    async fn run_paced(&mut self, runner: Arc<dyn JobRunner>) {
        let pool = WorkerPool::spawn(self.options.chunk_size, runner);
        while let Some(job) = self.next_job() {
            let delay = self.next_delay();
            pool.submit(job).await;
            if delay > 0 {
                sleep(Duration::from_millis(delay)).await;
            }
        }
        self.phase = DispatchPhase::Draining;
        pool.drain().await;
        self.phase = DispatchPhase::Done;
    }

    /// Pulls the next submission delay, cutting a fresh pacing plan at
    /// every chunk boundary.
    fn next_delay(&mut self) -> u64 {
        if self.pending_delays.is_empty() {
            let plan = PacingPlan::jittered(
                self.options.time_range_ms,
                self.options.chunk_size,
                self.options.min_distance_ms,
                DEFAULT_JITTER_GRANULARITY,
            );
            debug!(
                window_ms = plan.total_ms(),
                len = plan.len(),
                "new pacing plan"
            );
            self.pending_delays = plan.into_delays().into();
        }
        self.pending_delays.pop_front().unwrap_or(0)
    }

    /// Builds the next job, or `None` at the limit or source exhaustion,
    /// whichever comes first.
    fn next_job(&mut self) -> Option<Job> {
        if self.submitted >= self.options.limit {
            return None;
        }
        let url = self.feed.next_url()?;
        if self.phase == DispatchPhase::Idle {
            self.phase = DispatchPhase::Pacing;
        }
        let body = self.payloads.as_mut().map(PayloadCursor::next_body);
        let job = Job {
            url,
            body,
            index: self.submitted,
        };
        self.submitted = self.submitted.saturating_add(1);
        Some(job)
    }
}
