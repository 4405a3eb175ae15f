//! Allergen-aware recipe browsing.
//!
//! Remote search runs with the user's allergens as intolerances and
//! ingredient exclusions, then a local filter re-checks titles and
//! ingredient names with the same loose substring matching the scanner
//! uses. When the remote search fails the bundled placeholder recipes are
//! served instead, filtered the same way, so the screen is never empty.

use crate::models::{Recipe, RecipeIngredient};
use crate::sources::spoonacular::RecipeSearch;

/// Recipe browsing over an injected search client.
pub struct RecipeBrowser {
    client: Box<dyn RecipeSearch>,
}

impl RecipeBrowser {
    pub fn new(client: Box<dyn RecipeSearch>) -> Self {
        Self { client }
    }

    /// Search recipes safe for the given allergen profile.
    pub fn safe_search(&self, query: &str, user_allergens: &[String]) -> Vec<Recipe> {
        match self.client.search(query, user_allergens, user_allergens) {
            Ok(found) => filter_allergen_free(found, user_allergens),
            Err(e) => {
                tracing::warn!(query, error = %e,
                    "Recipe search failed, serving placeholder recipes");
                let matching = placeholder_recipes()
                    .into_iter()
                    .filter(|r| {
                        query.trim().is_empty()
                            || r.title.to_lowercase().contains(&query.to_lowercase())
                    })
                    .collect();
                filter_allergen_free(matching, user_allergens)
            }
        }
    }

    /// Random recipe suggestions safe for the given allergen profile.
    pub fn safe_suggestions(&self, user_allergens: &[String], count: u32) -> Vec<Recipe> {
        match self.client.random(&[], count) {
            Ok(found) => filter_allergen_free(found, user_allergens),
            Err(e) => {
                tracing::warn!(error = %e,
                    "Random recipe fetch failed, serving placeholder recipes");
                filter_allergen_free(placeholder_recipes(), user_allergens)
            }
        }
    }
}

/// Drop every recipe whose title or ingredient names mention one of the
/// user's allergens, case-insensitively.
///
/// The remote service already filters by intolerance tags; this local pass
/// catches free-text mentions those tags miss, trading false positives for
/// recall like the product matcher does.
pub fn filter_allergen_free(recipes: Vec<Recipe>, user_allergens: &[String]) -> Vec<Recipe> {
    if user_allergens.is_empty() {
        return recipes;
    }

    recipes
        .into_iter()
        .filter(|recipe| {
            !user_allergens.iter().any(|allergen| {
                let needle = allergen.to_lowercase();
                recipe.title.to_lowercase().contains(&needle)
                    || recipe
                        .ingredients
                        .iter()
                        .any(|i| i.name.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Bundled fallback recipes for offline use.
pub fn placeholder_recipes() -> Vec<Recipe> {
    fn recipe(id: i64, title: &str, minutes: u32, ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            title: title.into(),
            image: None,
            ready_in_minutes: Some(minutes),
            servings: Some(2),
            summary: None,
            ingredients: ingredients
                .iter()
                .map(|name| RecipeIngredient {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    vec![
        recipe(
            -1,
            "Rice Porridge with Apples",
            25,
            &["rice", "water", "apple", "cinnamon"],
        ),
        recipe(
            -2,
            "Buckwheat with Vegetables",
            30,
            &["buckwheat", "carrot", "zucchini", "olive oil"],
        ),
        recipe(
            -3,
            "Oatmeal Cookies",
            40,
            &["oat flakes", "banana", "raisins"],
        ),
        recipe(
            -4,
            "Chicken and Rice Soup",
            45,
            &["chicken breast", "rice", "carrot", "onion"],
        ),
        recipe(
            -5,
            "Peanut Butter Toast",
            5,
            &["bread", "peanut butter"],
        ),
        recipe(
            -6,
            "Milk Pancakes",
            30,
            &["wheat flour", "milk", "egg", "sugar"],
        ),
    ]
}
