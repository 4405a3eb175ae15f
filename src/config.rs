use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Allerguard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `tracing` filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,allerguard=debug"
}

/// Get the application data directory
/// ~/Allerguard/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Allerguard")
}

/// Directory holding the named preference records (profile, recent products,
/// reaction journal, medication list).
pub fn prefs_dir() -> PathBuf {
    app_data_dir().join("prefs")
}

/// Directory for bundled reference data (allergens.json).
pub fn resources_dir() -> PathBuf {
    app_data_dir().join("resources")
}
