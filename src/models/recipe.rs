use serde::{Deserialize, Serialize};

/// A recipe as returned by the recipe database, pared down to what the
/// browsing screens need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "readyInMinutes")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "extendedIngredients")]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
}
