//! Tracing utilities for the library

// Re-export the external tracing crate
pub use ::tracing::*;

/// Initialize tracing for test runs.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    // Set RUST_LOG if not already set
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "pg_testkit=debug,info");
    }
    let _ = ::tracing_subscriber::fmt()
        .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
