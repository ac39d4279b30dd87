use std::sync::Arc;

use crate::error::MetricsError;

/// Named boolean classifier over a latency value. Buckets are neither
/// mutually exclusive nor exhaustive; they exist purely for reporting and
/// never affect dispatch.
pub type Predicate = Arc<dyn Fn(f64) -> bool + Send + Sync>;

struct PredicateBucket {
    name: String,
    matches: u64,
    predicate: Predicate,
}

/// Running accumulator over one stream of latency samples.
pub struct RunningStatistic {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    samples: Vec<f64>,
    buckets: Vec<PredicateBucket>,
}

impl RunningStatistic {
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: 0.0,
            max: 0.0,
            samples: Vec::new(),
            buckets: Vec::new(),
        }
    }

    /// Registers a predicate bucket. Must happen before values arrive; the
    /// bucket starts at zero matches.
    pub fn add_predicate(&mut self, name: &str, predicate: Predicate) {
        self.buckets.push(PredicateBucket {
            name: name.to_owned(),
            matches: 0,
            predicate,
        });
    }

    /// Folds one sample into the stream.
    pub fn add_value(&mut self, value: f64) {
        self.min = if self.count == 0 {
            value
        } else {
            self.min.min(value)
        };
        self.max = if self.count == 0 {
            value
        } else {
            self.max.max(value)
        };
        self.sum += value;
        self.count = self.count.saturating_add(1);
        self.samples.push(value);
        for bucket in &mut self.buckets {
            if (bucket.predicate)(value) {
                bucket.matches = bucket.matches.saturating_add(1);
            }
        }
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest sample seen, `None` while the stream is empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest sample seen, `None` while the stream is empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Arithmetic mean of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyStatistic`] when no samples have been
    /// recorded, rather than dividing by zero.
    pub fn mean(&self) -> Result<f64, MetricsError> {
        if self.count == 0 {
            return Err(MetricsError::EmptyStatistic);
        }
        Ok(self.sum / self.count as f64)
    }

    /// Raw samples in arrival order. The order carries no statistical
    /// meaning; it is kept for the optional raw-dump export.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Owned copy of the stream state, for reads after the pool has joined.
    #[must_use]
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            count: self.count,
            sum: self.sum,
            min: self.min(),
            max: self.max(),
            predicate_counts: self
                .buckets
                .iter()
                .map(|bucket| (bucket.name.clone(), bucket.matches))
                .collect(),
            samples: self.samples.clone(),
        }
    }
}

impl Default for RunningStatistic {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of one statistic stream. Predicate counts keep their
/// registration order.
#[derive(Debug, Clone)]
pub struct StatSnapshot {
    pub count: u64,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub predicate_counts: Vec<(String, u64)>,
    pub samples: Vec<f64>,
}

impl StatSnapshot {
    /// Arithmetic mean of the captured stream.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyStatistic`] when the snapshot holds no
    /// samples.
    pub fn mean(&self) -> Result<f64, MetricsError> {
        if self.count == 0 {
            return Err(MetricsError::EmptyStatistic);
        }
        Ok(self.sum / self.count as f64)
    }
}
