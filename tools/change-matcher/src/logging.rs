//! Logging setup shared by change-matcher and dispatch-sender.
//!
//! Logs go to stderr so stdout stays free for machine-readable output.
//! `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  // try_init: a second call (e.g. from tests) keeps the first subscriber.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
