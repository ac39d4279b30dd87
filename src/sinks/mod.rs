//! Output sinks: response bodies and the raw latency export.
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::error::{AppResult, SetupError};
use crate::metrics::StatSnapshot;

/// Sink name that routes response bodies to standard output.
pub const STDOUT_SINK: &str = "stdout";

/// Where response bodies go. Shared across all workers; file writes are
/// serialized under a mutex.
pub struct ResponseSink {
    target: SinkTarget,
}

enum SinkTarget {
    Stdout,
    File(Mutex<File>),
    Disabled,
}

impl ResponseSink {
    /// Resolves the sink from the configured output name. Body suppression
    /// wins over any output path.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::OutputSink`] when the output file cannot be
    /// created.
    pub fn from_output(output: &str, suppress_body: bool) -> Result<Self, SetupError> {
        if suppress_body {
            return Ok(Self {
                target: SinkTarget::Disabled,
            });
        }
        if output == STDOUT_SINK {
            return Ok(Self {
                target: SinkTarget::Stdout,
            });
        }
        let path = Path::new(output);
        let file = File::create(path).map_err(|err| SetupError::OutputSink {
            path: path.to_path_buf(),
            source: err,
        })?;
        Ok(Self {
            target: SinkTarget::File(Mutex::new(file)),
        })
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            target: SinkTarget::Disabled,
        }
    }

    /// Appends one response body. Stdout gets a trailing newline so bodies
    /// stay line-separated; files receive the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; callers treat it as a per-job
    /// nuisance, not a run abort.
    pub fn append(&self, body: &[u8]) -> AppResult<()> {
        match &self.target {
            SinkTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(body)?;
                out.write_all(b"\n")?;
                Ok(())
            }
            SinkTarget::File(file) => {
                let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                file.write_all(body)?;
                Ok(())
            }
            SinkTarget::Disabled => Ok(()),
        }
    }
}

#[derive(Serialize)]
struct LatencyExport<'a> {
    total: &'a [f64],
    success: &'a [f64],
}

/// Writes the raw total/success latency-sample arrays as JSON.
///
/// # Errors
///
/// Returns an error when serialization or the file write fails.
pub fn write_latency_export(
    path: &Path,
    total: &StatSnapshot,
    success: &StatSnapshot,
) -> AppResult<()> {
    let export = LatencyExport {
        total: &total.samples,
        success: &success.samples,
    };
    let payload = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, payload)?;
    Ok(())
}
