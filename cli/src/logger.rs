//! Logging setup for the `docblox2md` binary.
//!
//! The library crates only emit `tracing` events; this installs the
//! subscriber that prints them to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// `--verbose` turns on debug output for the workspace crates; otherwise
/// `RUST_LOG` is honored, falling back to `info`.
pub fn init_logger(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("docblox2md=debug,renderer=debug,docblox=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
