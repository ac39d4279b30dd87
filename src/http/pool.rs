use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::error;

use super::workload::Job;

/// Executes one job inside a pool worker. Implementations must absorb their
/// own failures; a job outcome never tears the pool down.
#[async_trait]
pub trait JobRunner: Send + Sync + 'static {
    async fn run(&self, job: Job);
}

/// Fixed set of worker tasks draining a bounded job queue.
///
/// At most `size` jobs execute at any instant; the queue holds at most
/// `size` more. [`WorkerPool::submit`] enqueues, applying backpressure only
/// when the queue is full; [`WorkerPool::drain`] closes the queue and blocks
/// until every submitted job has finished.
pub struct WorkerPool {
    queue: mpsc::Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    #[must_use]
    pub fn spawn(size: usize, runner: Arc<dyn JobRunner>) -> Self {
        let size = size.max(1);
        let (queue, rx) = mpsc::channel::<Job>(size);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..size)
            .map(|_| {
                let rx = Arc::clone(&rx);
                let runner = Arc::clone(&runner);
                tokio::spawn(async move {
                    loop {
                        // The guard is released before the job runs, so the
                        // queue keeps feeding the other workers.
                        let job = rx.lock().await.recv().await;
                        match job {
                            Some(job) => runner.run(job).await,
                            None => break,
                        }
                    }
                })
            })
            .collect();

        Self { queue, workers }
    }

    /// Hands one job to the pool. Waits only while the queue is full; a
    /// slow in-flight request never blocks submission of the next job.
    pub async fn submit(&self, job: Job) {
        if self.queue.send(job).await.is_err() {
            error!("worker pool queue closed before drain");
        }
    }

    /// Closes the queue and waits for every worker to finish its jobs.
    /// Statistics must only be read after this returns.
    pub async fn drain(self) {
        drop(self.queue);
        for worker in self.workers {
            if worker.await.is_err() {
                error!("worker task failed during drain");
            }
        }
    }
}
