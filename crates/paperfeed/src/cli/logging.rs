//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter such as `paperfeed_feed=debug`.
pub const LOG_ENV: &str = "PAPERFEED_LOG";

/// Filter used for a verbosity count.
fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr subscriber.
///
/// `-v` flags take precedence over `PAPERFEED_LOG`, which takes precedence over `warn`.
pub fn init(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new(level(verbose))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level(0)))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
