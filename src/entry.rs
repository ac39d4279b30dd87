use clap::{CommandFactory, FromArgMatches};

use crate::app;
use crate::args::VolleyArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

/// Binary entry point: parse arguments, merge configuration, start the
/// runtime and hand over to the app.
///
/// # Errors
///
/// Returns any setup failure; per-request failures never surface here.
pub fn run() -> AppResult<()> {
    let matches = VolleyArgs::command().get_matches();
    let mut args = VolleyArgs::from_arg_matches(&matches)?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(app::run(args))
}
