// Logging setup: library crates log through `log`, the binary installs a
// tracing fmt subscriber on stderr that also receives those records.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter from RUST_LOG (default `warn`); `--verbose` forces `debug`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
