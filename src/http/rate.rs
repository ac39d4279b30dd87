use rand::Rng;

/// Granularity of the uniform draws behind each pacing plan. Larger values
/// give finer-grained proportional shares; the value itself never shows up
/// in the output.
pub const DEFAULT_JITTER_GRANULARITY: u64 = 100_000;

/// Ordered inter-submission delays for one chunk of jobs. Built per chunk,
/// consumed once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingPlan {
    delays: Vec<u64>,
}

impl PacingPlan {
    /// Builds a jittered plan of `len` delays in milliseconds that sum to
    /// roughly `target_ms` while every delay stays at or above `floor_ms`.
    ///
    /// Shares are proportionally random, not evenly spaced: each delay is a
    /// uniform draw rescaled against the sum of all draws, emulating bursty
    /// client arrival rather than a fixed-rate ticker. Rounding each element
    /// independently keeps the total within `len` of `target_ms`. When the
    /// floor already consumes the whole window the plan degenerates to `len`
    /// copies of `target_ms / len` with no randomness.
    #[must_use]
    pub fn jittered(target_ms: u64, len: usize, floor_ms: u64, granularity: u64) -> Self {
        if len == 0 {
            return Self { delays: Vec::new() };
        }
        let len_u64 = u64::try_from(len).unwrap_or(u64::MAX);

        if floor_ms.saturating_mul(len_u64) >= target_ms {
            return Self {
                delays: vec![target_ms / len_u64; len],
            };
        }

        let spread = target_ms - floor_ms * len_u64;
        let mut rng = rand::thread_rng();
        let draws: Vec<u64> = (0..len).map(|_| rng.gen_range(0..=granularity)).collect();
        let draw_sum: u64 = draws.iter().sum();
        if draw_sum == 0 {
            // Degenerate draw (granularity zero): fall back to even shares.
            return Self {
                delays: vec![spread / len_u64 + floor_ms; len],
            };
        }

        let delays = draws
            .into_iter()
            .map(|draw| {
                let share = draw as f64 / draw_sum as f64 * spread as f64;
                saturating_ms(share) + floor_ms
            })
            .collect();
        Self { delays }
    }

    #[must_use]
    pub fn delays(&self) -> &[u64] {
        &self.delays
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    #[must_use]
    pub fn total_ms(&self) -> u64 {
        self.delays.iter().sum()
    }

    pub(crate) fn into_delays(self) -> Vec<u64> {
        self.delays
    }
}

fn saturating_ms(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
