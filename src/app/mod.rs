//! Run orchestration: wires sources, pool, recorder and report together.
mod runner;
mod summary;


pub use runner::{DispatchOptions, DispatchPhase, Dispatcher};

use std::sync::Arc;

use tracing::info;

use crate::args::{HttpMethod, VolleyArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::sender::Fetcher;
use crate::http::workload::{PayloadCursor, UrlFeed};
use crate::metrics::{Predicate, Recorder};
use crate::sinks::{ResponseSink, write_latency_export};

/// Latency buckets reported for every run. Thresholds are in seconds; the
/// names double as the report row labels.
const LATENCY_BUCKETS: [(&str, f64); 3] = [("< 1000ms", 1.0), ("< 100ms", 0.1), ("< 50ms", 0.05)];

/// Runs one full load session: open sources, dispatch, drain, report.
///
/// # Errors
///
/// Only setup failures surface here: unreadable job or payload source, an
/// unwritable output sink, or a client that cannot be built. Nothing has
/// been sent when one of these returns. Per-request failures are absorbed
/// into the statistics instead.
pub async fn run(args: VolleyArgs) -> AppResult<()> {
    let input = args
        .input
        .as_ref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingInput))?;
    let feed = UrlFeed::open(input, args.prefix.clone())?;

    let payloads = match (args.method, args.data_file.as_ref()) {
        (HttpMethod::Post, Some(path)) => Some(PayloadCursor::load(path, args.repeat_data)?),
        _ => None,
    };

    let recorder = Arc::new(Recorder::new(args.expected_status));
    for (name, threshold) in LATENCY_BUCKETS {
        let predicate: Predicate = Arc::new(move |value| value < threshold);
        recorder.register_predicate(name, predicate);
    }

    let sink = Arc::new(ResponseSink::from_output(&args.output, args.no_body)?);
    let fetcher = Arc::new(Fetcher::new(&args, Arc::clone(&recorder), sink)?);

    let options = DispatchOptions {
        limit: args.limit,
        chunk_size: args.chunk_size.get(),
        time_range_ms: args.time_range,
        min_distance_ms: args.min_distance,
        sequential: args.sequential,
    };
    info!(
        limit = options.limit,
        chunk_size = options.chunk_size,
        sequential = options.sequential,
        "dispatch starting"
    );
    let mut dispatcher = Dispatcher::new(options, feed, payloads);
    dispatcher.run(fetcher).await;
    info!(
        submitted = dispatcher.submitted(),
        "dispatch drained, reporting"
    );

    let total = recorder.total_snapshot();
    let success = recorder.success_snapshot();
    for line in summary::report_lines(&total, &success) {
        println!("{}", line);
    }

    if let Some(path) = args.latency_output.as_ref() {
        write_latency_export(path, &total, &success)?;
        info!("latency samples written to {}", path.display());
    }

    Ok(())
}
