use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::warn;

use crate::error::SetupError;

/// Body handed out once the payload source has nothing left to give.
const FALLBACK_PAYLOAD: &str = "{}";

/// One unit of work handed to the pool. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct Job {
    pub url: String,
    pub body: Option<String>,
    pub index: u64,
}

/// Lazily yields target URLs from a newline-delimited file.
///
/// Empty lines are skipped without counting as jobs; the optional prefix is
/// concatenated before every line. The cursor is read exclusively by the
/// single submitting task, so it carries no locking.
pub struct UrlFeed {
    lines: Lines<BufReader<File>>,
    prefix: String,
    yielded: u64,
}

impl UrlFeed {
    /// Opens the URL list.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::JobSource`] when the file cannot be opened;
    /// this is the fatal pre-dispatch case, nothing has been sent yet.
    pub fn open(path: &Path, prefix: String) -> Result<Self, SetupError> {
        let file = File::open(path).map_err(|err| SetupError::JobSource {
            path: path.to_path_buf(),
            source: err,
        })?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            prefix,
            yielded: 0,
        })
    }

    /// Next non-empty target URL, or `None` once the file is exhausted.
    /// A read error mid-stream is treated as exhaustion, not a run abort.
    pub fn next_url(&mut self) -> Option<String> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    warn!("job source read failed, treating as exhausted: {}", err);
                    return None;
                }
            };
            let target = line.trim();
            if target.is_empty() {
                continue;
            }
            self.yielded = self.yielded.saturating_add(1);
            return Some(format!("{}{}", self.prefix, target));
        }
    }

    /// Number of non-empty lines handed out so far.
    #[must_use]
    pub const fn yielded(&self) -> u64 {
        self.yielded
    }
}

/// Rotating request-body source for POST mode.
///
/// Holds the payload lines with an explicit cursor instead of a hidden
/// stream position. On exhaustion the cursor either rewinds (when `repeat`
/// is set) or degrades to [`FALLBACK_PAYLOAD`]; running out of data never
/// stops the run. Read exclusively by the submitting task.
pub struct PayloadCursor {
    lines: Vec<String>,
    position: usize,
    repeat: bool,
}

impl PayloadCursor {
    /// Reads the payload file up front.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::PayloadSource`] when the file cannot be read.
    pub fn load(path: &Path, repeat: bool) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path).map_err(|err| SetupError::PayloadSource {
            path: path.to_path_buf(),
            source: err,
        })?;
        let lines = content.lines().map(str::to_owned).collect();
        Ok(Self {
            lines,
            position: 0,
            repeat,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_lines(lines: Vec<String>, repeat: bool) -> Self {
        Self {
            lines,
            position: 0,
            repeat,
        }
    }

    /// One body per call, advancing the cursor.
    pub fn next_body(&mut self) -> String {
        if let Some(line) = self.lines.get(self.position) {
            self.position = self.position.saturating_add(1);
            return line.clone();
        }
        if self.repeat && !self.lines.is_empty() {
            self.position = 0;
            return self.next_body();
        }
        FALLBACK_PAYLOAD.to_owned()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}
