//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g. `RUST_LOG=voxfield=debug`
/// to see per-pass statistics from the field generators.
///
/// # Example
/// ```no_run
/// voxfield::core::logging::init();
/// log::info!("Classifying grid");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}

/// Initialize logging, ignoring the error if a logger is already installed.
///
/// Handy for tools and tests that may call it more than once.
pub fn try_init() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
