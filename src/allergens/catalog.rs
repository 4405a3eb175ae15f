//! Read-only allergen reference catalog.
//!
//! Shipped as a structured JSON asset (`allergens.json` in the resources
//! directory). Loading never fails: a missing or malformed asset falls back
//! to a small built-in default list per category, so the reference screens
//! always have content.

use std::path::Path;

use serde::Deserialize;

use crate::models::{AllergenCatalogEntry, AllergenCategory};

const ASSET_FILE: &str = "allergens.json";

/// The allergen reference catalog. Never mutated at runtime.
pub struct AllergenCatalog {
    entries: Vec<AllergenCatalogEntry>,
}

impl AllergenCatalog {
    /// Load the catalog from `allergens.json` under `resources_dir`,
    /// falling back to the built-in defaults on any problem.
    pub fn load(resources_dir: &Path) -> Self {
        let path = resources_dir.join(ASSET_FILE);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e,
                    "Allergen catalog asset unreadable, using built-in defaults");
                return Self::builtin();
            }
        };

        let parsed: CatalogFile = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e,
                    "Allergen catalog asset malformed, using built-in defaults");
                return Self::builtin();
            }
        };

        let entries: Vec<AllergenCatalogEntry> = parsed
            .categories
            .into_iter()
            .flat_map(|category_data| {
                let category = AllergenCategory::from_id(&category_data.id);
                category_data
                    .allergens
                    .into_iter()
                    .map(move |entry| entry.into_entry(category))
            })
            .collect();

        if entries.is_empty() {
            tracing::warn!(path = %path.display(),
                "Allergen catalog asset has no entries, using built-in defaults");
            return Self::builtin();
        }

        tracing::debug!(count = entries.len(), "Allergen catalog loaded from asset");
        Self { entries }
    }

    /// The built-in default catalog, a couple of entries per category.
    pub fn builtin() -> Self {
        let mut entries = Vec::new();

        let mut add = |id: &str, name: &str, category: AllergenCategory, description: &str| {
            entries.push(AllergenCatalogEntry {
                id: id.into(),
                name: name.into(),
                category,
                description: description.into(),
                symptoms: vec![],
                avoidance_recommendations: vec![],
                related_allergens: vec![],
                scientific_name: None,
            });
        };

        add("milk", "Milk", AllergenCategory::Food, "Allergy to cow's milk proteins");
        add("peanut", "Peanut", AllergenCategory::Food, "Allergy to peanuts");
        add("egg", "Egg", AllergenCategory::Food, "Allergy to hen's eggs");
        add("birch_pollen", "Birch pollen", AllergenCategory::Pollen, "Allergy to birch pollen");
        add("ragweed_pollen", "Ragweed pollen", AllergenCategory::Pollen, "Allergy to ragweed pollen");
        add("cat_dander", "Cat dander", AllergenCategory::Animal, "Allergy to cats");
        add("dog_dander", "Dog dander", AllergenCategory::Animal, "Allergy to dogs");
        add("bee_venom", "Bee venom", AllergenCategory::Insect, "Allergy to bee stings");
        add("penicillin", "Penicillin", AllergenCategory::Drug, "Allergy to penicillin antibiotics");
        add("mold_spores", "Mold spores", AllergenCategory::Mold, "Allergy to airborne mold spores");
        add("latex", "Latex", AllergenCategory::Latex, "Allergy to natural rubber latex");
        add("dust_mites", "Dust mites", AllergenCategory::Dust, "Allergy to house dust mites");
        add("nickel", "Nickel", AllergenCategory::Chemical, "Contact allergy to nickel");

        Self { entries }
    }

    /// All entries, in catalog order.
    pub fn all(&self) -> &[AllergenCatalogEntry] {
        &self.entries
    }

    /// Entries belonging to one category.
    pub fn by_category(&self, category: AllergenCategory) -> Vec<&AllergenCatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name and scientific name.
    pub fn search(&self, query: &str) -> Vec<&AllergenCatalogEntry> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.scientific_name
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Lookup by stable id.
    pub fn by_id(&self, id: &str) -> Option<&AllergenCatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct categories present, in catalog order.
    pub fn categories(&self) -> Vec<AllergenCategory> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category) {
                seen.push(entry.category);
            }
        }
        seen
    }
}

// ── Asset file shapes ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<CategoryData>,
}

#[derive(Debug, Deserialize)]
struct CategoryData {
    id: String,
    #[serde(default)]
    allergens: Vec<EntryData>,
}

#[derive(Debug, Deserialize)]
struct EntryData {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    avoidance_recommendations: Vec<String>,
    #[serde(default)]
    related_allergens: Vec<String>,
    #[serde(default)]
    scientific_name: Option<String>,
}

impl EntryData {
    fn into_entry(self, category: AllergenCategory) -> AllergenCatalogEntry {
        AllergenCatalogEntry {
            id: self.id,
            name: self.name,
            category,
            description: self.description,
            symptoms: self.symptoms,
            avoidance_recommendations: self.avoidance_recommendations,
            related_allergens: self.related_allergens,
            scientific_name: self.scientific_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ASSET: &str = r#"{
        "categories": [
            {
                "id": "FOOD",
                "allergens": [
                    {
                        "id": "milk",
                        "name": "Milk",
                        "description": "Cow's milk protein allergy",
                        "symptoms": ["Hives", "Digestive upset"],
                        "avoidance_recommendations": ["Check labels for casein and whey"],
                        "scientific_name": "Bos taurus casein"
                    },
                    {
                        "id": "peanut",
                        "name": "Peanut",
                        "description": "Peanut allergy",
                        "scientific_name": "Arachis hypogaea"
                    }
                ]
            },
            {
                "id": "POLLEN",
                "allergens": [
                    {
                        "id": "birch_pollen",
                        "name": "Birch pollen",
                        "description": "Spring pollen allergy"
                    }
                ]
            }
        ]
    }"#;

    fn write_asset(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ASSET_FILE), content).unwrap();
        dir
    }

    #[test]
    fn load_parses_asset_entries() {
        let dir = write_asset(SAMPLE_ASSET);
        let catalog = AllergenCatalog::load(dir.path());

        assert_eq!(catalog.all().len(), 3);
        let milk = catalog.by_id("milk").unwrap();
        assert_eq!(milk.category, AllergenCategory::Food);
        assert_eq!(milk.symptoms.len(), 2);
        assert_eq!(milk.scientific_name.as_deref(), Some("Bos taurus casein"));
    }

    #[test]
    fn load_missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AllergenCatalog::load(dir.path());
        assert_eq!(catalog.all().len(), AllergenCatalog::builtin().all().len());
        assert!(catalog.by_id("milk").is_some());
    }

    #[test]
    fn load_malformed_file_falls_back_to_builtin() {
        let dir = write_asset("{broken json");
        let catalog = AllergenCatalog::load(dir.path());
        assert_eq!(catalog.all().len(), AllergenCatalog::builtin().all().len());
    }

    #[test]
    fn load_empty_catalog_falls_back_to_builtin() {
        let dir = write_asset(r#"{"categories": []}"#);
        let catalog = AllergenCatalog::load(dir.path());
        assert!(!catalog.all().is_empty());
    }

    #[test]
    fn builtin_covers_every_category() {
        let catalog = AllergenCatalog::builtin();
        for category in [
            AllergenCategory::Food,
            AllergenCategory::Pollen,
            AllergenCategory::Animal,
            AllergenCategory::Insect,
            AllergenCategory::Drug,
            AllergenCategory::Mold,
            AllergenCategory::Latex,
            AllergenCategory::Dust,
            AllergenCategory::Chemical,
        ] {
            assert!(
                !catalog.by_category(category).is_empty(),
                "no builtin entry for {category}"
            );
        }
    }

    #[test]
    fn by_category_filters() {
        let dir = write_asset(SAMPLE_ASSET);
        let catalog = AllergenCatalog::load(dir.path());

        let food = catalog.by_category(AllergenCategory::Food);
        assert_eq!(food.len(), 2);
        assert!(catalog.by_category(AllergenCategory::Latex).is_empty());
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let dir = write_asset(SAMPLE_ASSET);
        let catalog = AllergenCatalog::load(dir.path());

        let hits = catalog.search("PEA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "peanut");
    }

    #[test]
    fn search_matches_scientific_name() {
        let dir = write_asset(SAMPLE_ASSET);
        let catalog = AllergenCatalog::load(dir.path());

        let hits = catalog.search("arachis");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "peanut");
    }

    #[test]
    fn search_empty_query_is_empty() {
        let catalog = AllergenCatalog::builtin();
        assert!(catalog.search("").is_empty());
    }

    #[test]
    fn by_id_missing_is_none() {
        let catalog = AllergenCatalog::builtin();
        assert!(catalog.by_id("kryptonite").is_none());
    }

    #[test]
    fn categories_lists_distinct_in_order() {
        let dir = write_asset(SAMPLE_ASSET);
        let catalog = AllergenCatalog::load(dir.path());
        assert_eq!(
            catalog.categories(),
            vec![AllergenCategory::Food, AllergenCategory::Pollen]
        );
    }

    #[test]
    fn unknown_category_id_maps_to_other() {
        let dir = write_asset(
            r#"{"categories": [{"id": "MYSTERY", "allergens": [
                {"id": "x", "name": "X", "description": "d"}
            ]}]}"#,
        );
        let catalog = AllergenCatalog::load(dir.path());
        assert_eq!(catalog.by_id("x").unwrap().category, AllergenCategory::Other);
    }
}
