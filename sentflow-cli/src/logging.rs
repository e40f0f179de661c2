//! Logger setup
//!
//! The library crates log through `tracing`; its `log` feature forwards
//! records to whatever `log` backend is installed, here `env_logger`.

/// Map a `-v` count to a default filter. `RUST_LOG` still wins.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging based on verbosity level
pub fn init(verbose: u8, quiet: bool) {
    let level = if quiet { "error" } else { level_for(verbose) };
    // A second init in the same process (tests) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}
