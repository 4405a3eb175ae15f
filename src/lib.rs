pub mod allergens;
pub mod config;
pub mod models;
pub mod profile;
pub mod recipes;
pub mod reminders;
pub mod resolve;
pub mod sources;
pub mod storage;
pub mod tracker;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding shell.
///
/// Honours RUST_LOG when set, otherwise uses the built-in default filter.
/// Call once at startup; calling twice panics (the global subscriber is
/// already installed).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Allerguard core starting v{}", config::APP_VERSION);
}
