use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor an explicit default is provided.
pub const DEFAULT_LOG_FILTER: &str = "warn";

static LOG_INIT: Once = Once::new();

/// Install the global `tracing` subscriber, once per process.
///
/// `RUST_LOG` wins when set; otherwise `default_value` is used, falling back
/// to [`DEFAULT_LOG_FILTER`]. Events are written to stderr so that command
/// output on stdout stays machine readable.
pub fn log_init(default_value: Option<&str>) {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(default_value.unwrap_or(DEFAULT_LOG_FILTER))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
        });
        tracing_setup(filter);
    });
}

fn tracing_setup(filter: EnvFilter) {
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .compact();

    // another subscriber may already be installed, e.g. by a test harness
    if tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .is_err()
    {
        debug!("a global tracing subscriber is already set");
    }
}
