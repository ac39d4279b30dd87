mod cli;
mod defaults;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::VolleyArgs;
pub(crate) use defaults::DEFAULT_USER_AGENT;
pub use types::{HttpMethod, PositiveU64, PositiveUsize};
