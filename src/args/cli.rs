use std::path::PathBuf;

use clap::Parser;

use super::parsers::{parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Paced HTTP batch requester - sends a bounded, load-shaped stream of requests against a list of targets and reports latency statistics."
)]
pub struct VolleyArgs {
    /// Input file with one target URL per line (empty lines are skipped)
    #[arg(long, short = 'i', help_heading = "Common Options")]
    pub input: Option<PathBuf>,

    /// Prefix concatenated before every URL line
    #[arg(long, short = 'p', default_value = "", help_heading = "Common Options")]
    pub prefix: String,

    /// Number of requests to send
    #[arg(long, short = 'l', default_value = "1000", help_heading = "Common Options")]
    pub limit: u64,

    /// HTTP method to use
    #[arg(
        long,
        short = 'X',
        default_value = "get",
        ignore_case = true,
        help_heading = "Common Options"
    )]
    pub method: HttpMethod,

    /// Requests per pacing chunk; also the worker pool size
    #[arg(long = "chunk-size", default_value = "1000", value_parser = parse_positive_usize, help_heading = "Pacing")]
    pub chunk_size: PositiveUsize,

    /// Window in milliseconds that one chunk of submissions is spread across
    #[arg(long = "time-range", default_value = "1000", help_heading = "Pacing")]
    pub time_range: u64,

    /// Minimum delay in milliseconds between consecutive submissions
    #[arg(long = "min-distance", default_value = "0", help_heading = "Pacing")]
    pub min_distance: u64,

    /// Execute jobs one at a time with no worker pool and no pacing sleeps
    #[arg(long, help_heading = "Pacing")]
    pub sequential: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "1000", value_parser = parse_positive_u64)]
    pub timeout: PositiveU64,

    /// File with one request body per line, rotated across POST requests
    #[arg(long = "data-file")]
    pub data_file: Option<PathBuf>,

    /// Rewind the payload file when it runs out of lines
    #[arg(long = "repeat-data", requires = "data_file")]
    pub repeat_data: bool,

    /// Skip downloading response bodies
    #[arg(long = "no-body")]
    pub no_body: bool,

    /// Status code that counts a request as successful
    #[arg(long = "expected-status", default_value = "200")]
    pub expected_status: u16,

    /// Response body sink: "stdout" or a file path
    #[arg(long, short = 'o', default_value = "stdout")]
    pub output: String,

    /// Write the raw total/success latency samples as JSON to this path
    #[arg(long = "latency-output")]
    pub latency_output: Option<PathBuf>,

    /// Configuration file (defaults to volley.toml / volley.json when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
