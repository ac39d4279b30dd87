use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("statistic holds no samples, mean is undefined")]
    EmptyStatistic,
}
