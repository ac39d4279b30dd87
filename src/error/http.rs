use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {source}")]
    BuildClientFailed { source: reqwest::Error },
}
