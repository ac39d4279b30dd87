use std::path::PathBuf;

use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unsupported config extension '{ext}' (expected toml or json)")]
    UnsupportedExtension { ext: String },
    #[error("config path has no extension (expected toml or json)")]
    MissingExtension,
    #[error("config field '{field}' must be positive: {source}")]
    FieldMustBePositive {
        field: String,
        source: ValidationError,
    },
}
