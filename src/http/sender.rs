use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::args::{DEFAULT_USER_AGENT, HttpMethod, VolleyArgs};
use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::{Recorder, RequestOutcome};
use crate::sinks::ResponseSink;

use super::pool::JobRunner;
use super::workload::Job;

/// Performs timed requests and feeds every outcome into the recorder.
///
/// One instance is shared by all pool workers; the reqwest client pools
/// connections internally.
pub struct Fetcher {
    client: Client,
    method: HttpMethod,
    suppress_body: bool,
    recorder: Arc<Recorder>,
    sink: Arc<ResponseSink>,
}

impl Fetcher {
    /// Builds the HTTP client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        args: &VolleyArgs,
        recorder: Arc<Recorder>,
        sink: Arc<ResponseSink>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(args.timeout.get()))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            method: args.method,
            suppress_body: args.no_body,
            recorder,
            sink,
        })
    }

    /// One timed request. Transport failures, timeouts and unreadable
    /// bodies all become absent-status outcomes instead of errors; elapsed
    /// time on a timeout sits close to the configured limit.
    async fn perform(&self, job: &Job) -> RequestOutcome {
        let start = Instant::now();
        let builder = match self.method {
            HttpMethod::Get => self.client.get(&job.url),
            HttpMethod::Post => match &job.body {
                Some(body) => self.client.post(&job.url).body(body.clone()),
                None => self.client.post(&job.url),
            },
        };

        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = if self.suppress_body {
                    Vec::new()
                } else {
                    match read_body(response).await {
                        Ok(body) => body,
                        Err(err) => {
                            error!("failed to read response body from {}: {}", job.url, err);
                            return RequestOutcome {
                                status: None,
                                elapsed: start.elapsed().as_secs_f64(),
                                body: Vec::new(),
                            };
                        }
                    }
                };
                RequestOutcome {
                    status: Some(status),
                    elapsed: start.elapsed().as_secs_f64(),
                    body,
                }
            }
            Err(err) => {
                if err.is_timeout() {
                    warn!("request to {} timed out", job.url);
                } else {
                    error!("request to {} failed: {}", job.url, err);
                }
                RequestOutcome {
                    status: None,
                    elapsed: start.elapsed().as_secs_f64(),
                    body: Vec::new(),
                }
            }
        }
    }
}

#[async_trait]
impl JobRunner for Fetcher {
    async fn run(&self, job: Job) {
        let outcome = self.perform(&job).await;
        debug!(
            index = job.index,
            status = outcome.status,
            elapsed = outcome.elapsed,
            "request finished"
        );
        if !outcome.body.is_empty()
            && let Err(err) = self.sink.append(&outcome.body)
        {
            warn!("failed to write response body: {}", err);
        }
        self.recorder.record(&outcome);
    }
}

/// Streams the body to completion so partial reads never pass for full
/// responses.
async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}
