//! Log output for the binary. The library only emits `tracing` events; this is
//! where they get a subscriber.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GCT_LOG";

/// Install the stderr subscriber. `GCT_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, re-entry) is harmless, so the error is dropped
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// The TUI owns the screen; only log when explicitly asked to.
pub fn init_for_tui(verbose: bool) {
    if std::env::var_os(LOG_ENV).is_some() {
        init(verbose);
    }
}
