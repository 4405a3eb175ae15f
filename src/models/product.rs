use serde::{Deserialize, Serialize};

/// A resolved product, normalized from whichever source answered.
///
/// Immutable once constructed: a later lookup for the same barcode fully
/// replaces the cached copy rather than merging into it.
///
/// `allergens` and `ingredients` are independent fields. A source may declare
/// an allergen explicitly, or it may only be discoverable by scanning the
/// free-text ingredient list; allergen matching checks both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Nutrition grade letter (A through E) where the source provides one.
    #[serde(default)]
    pub nutrition_grade: Option<String>,
    #[serde(default)]
    pub nutrition: Option<NutritionFacts>,
}

/// Per-100g nutrition facts, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub energy: Option<f64>,
    pub proteins: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub sugars: Option<f64>,
    pub fiber: Option<f64>,
    pub salt: Option<f64>,
}

/// Outcome of resolving one barcode for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanResult {
    /// Product found and safe for this user's allergen profile.
    Success { product: Product },
    /// Product found but flagged; `warnings` is never empty here.
    ContainsAllergens {
        product: Product,
        warnings: Vec<String>,
    },
    /// Every attempted source explicitly reported no match.
    NotFound { message: String },
    /// All attempted sources failed transiently.
    NetworkError { message: String },
}

impl ScanResult {
    /// The resolved product, when one exists.
    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Success { product } | Self::ContainsAllergens { product, .. } => Some(product),
            Self::NotFound { .. } | Self::NetworkError { .. } => None,
        }
    }

    /// Allergen warnings; empty unless the variant is `ContainsAllergens`.
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::ContainsAllergens { warnings, .. } => warnings,
            _ => &[],
        }
    }
}
