use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing input file (set --input or provide in config)")]
    MissingInput,
    #[error("value must be at least {min}")]
    ValueTooSmall { min: u64 },
    #[error("invalid number: {source}")]
    InvalidNumber {
        #[from]
        source: std::num::ParseIntError,
    },
}
