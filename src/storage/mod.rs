//! Key-value preference storage.
//!
//! All persistent state in the app is a handful of named JSON records
//! (user profile, recent products, reaction journal, medication list).
//! Each record is one JSON file under a store directory.

mod prefs;

pub use prefs::{PrefStore, StorageError};
