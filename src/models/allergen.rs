use serde::{Deserialize, Serialize};

/// Closed set of allergen categories used by the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllergenCategory {
    Food,
    Pollen,
    Animal,
    Insect,
    Drug,
    Mold,
    Latex,
    Dust,
    Chemical,
    Other,
}

impl AllergenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Pollen => "pollen",
            Self::Animal => "animal",
            Self::Insect => "insect",
            Self::Drug => "drug",
            Self::Mold => "mold",
            Self::Latex => "latex",
            Self::Dust => "dust",
            Self::Chemical => "chemical",
            Self::Other => "other",
        }
    }

    /// Lenient parse for catalog asset identifiers. Unknown identifiers map
    /// to `Other` so a newer asset file never breaks an older build.
    pub fn from_id(id: &str) -> Self {
        match id.to_ascii_lowercase().as_str() {
            "food" => Self::Food,
            "pollen" => Self::Pollen,
            "animal" => Self::Animal,
            "insect" => Self::Insect,
            "drug" => Self::Drug,
            "mold" => Self::Mold,
            "latex" => Self::Latex,
            "dust" => Self::Dust,
            "chemical" => Self::Chemical,
            _ => Self::Other,
        }
    }

    /// Human-readable category label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food allergens",
            Self::Pollen => "Plant pollen",
            Self::Animal => "Animal allergens",
            Self::Insect => "Insect allergens",
            Self::Drug => "Drug allergens",
            Self::Mold => "Mold and fungi",
            Self::Latex => "Latex",
            Self::Dust => "Dust and dust mites",
            Self::Chemical => "Chemical substances",
            Self::Other => "Other allergens",
        }
    }
}

impl std::fmt::Display for AllergenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One read-only reference entry in the allergen catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergenCatalogEntry {
    pub id: String,
    pub name: String,
    pub category: AllergenCategory,
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub avoidance_recommendations: Vec<String>,
    #[serde(default)]
    pub related_allergens: Vec<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
}
