use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, VolleyArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values beneath CLI arguments. A value coming from
/// the command line is never overridden.
///
/// # Errors
///
/// Returns an error when a config value fails the same validation its CLI
/// counterpart would get.
pub fn apply_config(
    args: &mut VolleyArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "input")
        && let Some(input) = config.input.clone()
    {
        args.input = Some(PathBuf::from(input));
    }

    if !is_cli(matches, "prefix")
        && let Some(prefix) = config.prefix.clone()
    {
        args.prefix = prefix;
    }

    if !is_cli(matches, "limit")
        && let Some(limit) = config.limit
    {
        args.limit = limit;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "chunk_size")
        && let Some(value) = config.chunk_size
    {
        args.chunk_size = ensure_positive_usize(value, "chunk_size")?;
    }

    if !is_cli(matches, "time_range")
        && let Some(value) = config.time_range
    {
        args.time_range = value;
    }

    if !is_cli(matches, "min_distance")
        && let Some(value) = config.min_distance
    {
        args.min_distance = value;
    }

    if !is_cli(matches, "sequential")
        && let Some(value) = config.sequential
    {
        args.sequential = value;
    }

    if !is_cli(matches, "timeout")
        && let Some(value) = config.timeout
    {
        args.timeout = ensure_positive_u64(value, "timeout")?;
    }

    if !is_cli(matches, "data_file")
        && let Some(path) = config.data_file.clone()
    {
        args.data_file = Some(PathBuf::from(path));
    }

    if !is_cli(matches, "repeat_data")
        && let Some(value) = config.repeat_data
    {
        args.repeat_data = value;
    }

    if !is_cli(matches, "no_body")
        && let Some(value) = config.no_body
    {
        args.no_body = value;
    }

    if !is_cli(matches, "expected_status")
        && let Some(value) = config.expected_status
    {
        args.expected_status = value;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if !is_cli(matches, "latency_output")
        && let Some(path) = config.latency_output.clone()
    {
        args.latency_output = Some(PathBuf::from(path));
    }

    if !is_cli(matches, "verbose")
        && let Some(value) = config.verbose
    {
        args.verbose = value;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
