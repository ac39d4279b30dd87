use std::future::Future;
use std::io::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::pool::{JobRunner, WorkerPool};
use super::rate::{DEFAULT_JITTER_GRANULARITY, PacingPlan};
use super::workload::{Job, PayloadCursor, UrlFeed};

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("build runtime failed: {}", err))?;
    runtime.block_on(future)
}

fn abs_diff(lhs: u64, rhs: u64) -> u64 {
    lhs.max(rhs) - lhs.min(rhs)
}

#[test]
fn jittered_plan_respects_length_floor_and_sum() {
    let cases = [
        (1_000u64, 10usize, 0u64),
        (500, 7, 20),
        (2_000, 100, 5),
        (90, 3, 10),
    ];
    for (target, len, floor) in cases {
        for _ in 0..20 {
            let plan = PacingPlan::jittered(target, len, floor, DEFAULT_JITTER_GRANULARITY);
            assert_eq!(plan.len(), len);
            assert!(plan.delays().iter().all(|&delay| delay >= floor));
            let len_u64 = u64::try_from(len).unwrap_or(u64::MAX);
            assert!(
                abs_diff(plan.total_ms(), target) <= len_u64,
                "sum {} strayed more than {} from {}",
                plan.total_ms(),
                len,
                target
            );
        }
    }
}

#[test]
fn dominating_floor_degenerates_to_uniform_shares() {
    let plan = PacingPlan::jittered(100, 4, 25, DEFAULT_JITTER_GRANULARITY);
    assert_eq!(plan.delays(), &[25, 25, 25, 25]);

    let plan = PacingPlan::jittered(10, 3, 4, DEFAULT_JITTER_GRANULARITY);
    assert_eq!(plan.delays(), &[3, 3, 3]);
}

#[test]
fn zero_granularity_falls_back_to_even_shares() {
    let plan = PacingPlan::jittered(100, 4, 10, 0);
    assert_eq!(plan.delays(), &[25, 25, 25, 25]);
}

#[test]
fn zero_length_plan_is_empty() {
    let plan = PacingPlan::jittered(1_000, 0, 10, DEFAULT_JITTER_GRANULARITY);
    assert!(plan.is_empty());
    assert_eq!(plan.total_ms(), 0);
}

fn write_lines(dir: &tempfile::TempDir, name: &str, lines: &str) -> Result<std::path::PathBuf, String> {
    let path = dir.path().join(name);
    let mut file =
        std::fs::File::create(&path).map_err(|err| format!("create {} failed: {}", name, err))?;
    file.write_all(lines.as_bytes())
        .map_err(|err| format!("write {} failed: {}", name, err))?;
    Ok(path)
}

#[test]
fn url_feed_skips_empty_lines_and_applies_prefix() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_lines(&dir, "urls.txt", "alpha\n\nbeta\n   \ngamma\n")?;

    let mut feed =
        UrlFeed::open(&path, "http://host/".to_owned()).map_err(|err| err.to_string())?;
    assert_eq!(feed.next_url().as_deref(), Some("http://host/alpha"));
    assert_eq!(feed.next_url().as_deref(), Some("http://host/beta"));
    assert_eq!(feed.next_url().as_deref(), Some("http://host/gamma"));
    assert_eq!(feed.next_url(), None);
    assert_eq!(feed.yielded(), 3);
    Ok(())
}

#[test]
fn url_feed_open_fails_on_missing_file() {
    let missing = std::path::Path::new("definitely-not-here.txt");
    assert!(UrlFeed::open(missing, String::new()).is_err());
}

#[test]
fn payload_cursor_degrades_without_repeat() {
    let mut cursor =
        PayloadCursor::from_lines(vec!["one".to_owned(), "two".to_owned()], false);
    assert_eq!(cursor.next_body(), "one");
    assert_eq!(cursor.next_body(), "two");
    assert_eq!(cursor.next_body(), "{}");
    assert_eq!(cursor.next_body(), "{}");
}

#[test]
fn payload_cursor_rewinds_with_repeat() {
    let mut cursor = PayloadCursor::from_lines(vec!["one".to_owned(), "two".to_owned()], true);
    assert_eq!(cursor.next_body(), "one");
    assert_eq!(cursor.next_body(), "two");
    assert_eq!(cursor.next_body(), "one");
    assert_eq!(cursor.position(), 1);
}

#[test]
fn empty_payload_source_yields_fallback_even_with_repeat() {
    let mut cursor = PayloadCursor::from_lines(Vec::new(), true);
    assert_eq!(cursor.next_body(), "{}");
}

#[test]
fn payload_cursor_loads_lines_from_file() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_lines(&dir, "bodies.txt", "{\"a\":1}\n{\"b\":2}\n")?;

    let mut cursor = PayloadCursor::load(&path, false).map_err(|err| err.to_string())?;
    assert_eq!(cursor.next_body(), "{\"a\":1}");
    assert_eq!(cursor.next_body(), "{\"b\":2}");
    Ok(())
}

fn job(index: u64) -> Job {
    Job {
        url: format!("http://jobs/{}", index),
        body: None,
        index,
    }
}

struct GateRunner {
    active: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

impl GateRunner {
    fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl JobRunner for GateRunner {
    async fn run(&self, _job: Job) {
        let now = self.active.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn pool_never_exceeds_its_worker_count() -> Result<(), String> {
    run_async_test(async {
        let gate = Arc::new(GateRunner::new());
        let pool = WorkerPool::spawn(3, Arc::clone(&gate) as Arc<dyn JobRunner>);
        for index in 0..9 {
            pool.submit(job(index)).await;
        }
        pool.drain().await;

        assert_eq!(gate.completed.load(Ordering::SeqCst), 9);
        assert!(gate.peak.load(Ordering::SeqCst) <= 3);
        Ok(())
    })
}

struct RecordingRunner {
    indexes: std::sync::Mutex<Vec<u64>>,
}

#[async_trait]
impl JobRunner for RecordingRunner {
    async fn run(&self, job: Job) {
        let mut indexes = self
            .indexes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        indexes.push(job.index);
    }
}

#[test]
fn drain_waits_for_every_submitted_job() -> Result<(), String> {
    run_async_test(async {
        let runner = Arc::new(RecordingRunner {
            indexes: std::sync::Mutex::new(Vec::new()),
        });
        let pool = WorkerPool::spawn(2, Arc::clone(&runner) as Arc<dyn JobRunner>);
        for index in 0..5 {
            pool.submit(job(index)).await;
        }
        pool.drain().await;

        let mut seen = runner
            .indexes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        Ok(())
    })
}
