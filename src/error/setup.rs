use std::path::PathBuf;

use thiserror::Error;

/// Fatal start-of-run failures. Nothing has been sent when one of these
/// surfaces; per-request failures are absorbed into statistics instead.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot read job source '{path}': {source}")]
    JobSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read payload source '{path}': {source}")]
    PayloadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open output sink '{path}': {source}")]
    OutputSink {
        path: PathBuf,
        source: std::io::Error,
    },
}
