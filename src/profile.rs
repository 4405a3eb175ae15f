//! User profile: display info plus the allergen list every scan is matched
//! against.
//!
//! The allergen list is free text, not a closed vocabulary; whatever the
//! user types is matched heuristically against product data. Stored as an
//! ordered list in a single named record.

use serde::{Deserialize, Serialize};

use crate::storage::{PrefStore, StorageError};

/// Seeded on the very first read so the allergens screen is not empty.
pub const DEFAULT_ALLERGENS: &[&str] = &["milk", "peanut"];

const KEY_ALLERGENS: &str = "user_allergens";
const KEY_USER: &str = "user_data";

/// Display info for the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub medical_notes: String,
}

/// The user's profile, persisted through the preference store.
pub struct UserProfile {
    store: PrefStore,
}

impl UserProfile {
    pub fn open(store: PrefStore) -> Self {
        Self { store }
    }

    /// The user's allergen list.
    ///
    /// The first read ever seeds and persists the default list; afterwards
    /// the stored list is returned verbatim. A malformed record re-seeds
    /// the defaults rather than erroring.
    pub fn allergens(&self) -> Vec<String> {
        if let Some(list) = self.store.get::<Vec<String>>(KEY_ALLERGENS) {
            return list;
        }

        let defaults: Vec<String> = DEFAULT_ALLERGENS.iter().map(|s| s.to_string()).collect();
        if let Err(e) = self.store.put(KEY_ALLERGENS, &defaults) {
            tracing::warn!(error = %e, "Could not persist default allergen list");
        }
        defaults
    }

    /// Add an allergen by name. Duplicates (case-insensitive) and blank
    /// names are ignored.
    pub fn add_allergen(&self, name: &str) -> Result<(), StorageError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let mut list = self.allergens();
        let needle = trimmed.to_lowercase();
        if list.iter().any(|a| a.to_lowercase() == needle) {
            return Ok(());
        }

        list.push(trimmed.to_string());
        tracing::debug!(allergen = trimmed, "Allergen added to profile");
        self.store.put(KEY_ALLERGENS, &list)
    }

    /// Remove an allergen by name, case-insensitively.
    pub fn remove_allergen(&self, name: &str) -> Result<(), StorageError> {
        let needle = name.trim().to_lowercase();
        let mut list = self.allergens();
        list.retain(|a| a.to_lowercase() != needle);
        self.store.put(KEY_ALLERGENS, &list)
    }

    /// Replace the whole allergen list (profile editing screen).
    pub fn set_allergens(&self, allergens: &[String]) -> Result<(), StorageError> {
        self.store.put(KEY_ALLERGENS, &allergens)
    }

    /// The user's display info; defaults when never saved.
    pub fn user(&self) -> UserInfo {
        self.store.get(KEY_USER).unwrap_or_default()
    }

    pub fn save_user(&self, user: &UserInfo) -> Result<(), StorageError> {
        self.store.put(KEY_USER, user)
    }

    /// Wipe profile data (both records).
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(KEY_ALLERGENS)?;
        self.store.remove(KEY_USER)
    }
}
