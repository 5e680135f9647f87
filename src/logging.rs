// src/logging.rs
// =============================================================================
// Sets up tracing output for the binary.
//
// Logs go to stderr so stdout stays clean for tables and --json output.
// RUST_LOG wins if it is set; otherwise we log warnings, or everything from
// this crate at debug level with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,reddit_user_redirect=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
