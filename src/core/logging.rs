//! Logging initialization

/// Initialize logging for binaries and examples embedding this crate.
///
/// Uses env_logger with a default filter level of `info`; override with
/// the RUST_LOG environment variable.
///
/// # Example
/// ```
/// groundcover::core::logging::init();
/// log::info!("fields loaded");
/// ```
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
