use serde::Deserialize;

use crate::args::HttpMethod;

/// Optional settings read from volley.toml / volley.json. Every field maps
/// to a CLI flag; explicit CLI values always win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub input: Option<String>,
    pub prefix: Option<String>,
    pub limit: Option<u64>,
    pub method: Option<HttpMethod>,
    pub chunk_size: Option<usize>,
    pub time_range: Option<u64>,
    pub min_distance: Option<u64>,
    pub sequential: Option<bool>,
    pub timeout: Option<u64>,
    pub data_file: Option<String>,
    pub repeat_data: Option<bool>,
    pub no_body: Option<bool>,
    pub expected_status: Option<u16>,
    pub output: Option<String>,
    pub latency_output: Option<String>,
    pub verbose: Option<bool>,
}
