//! Recipe database client.
//!
//! Complex recipe search with allergen intolerances and ingredient
//! exclusions, plus random recipe suggestions for the browse screen.

use serde::Deserialize;

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};
use crate::models::Recipe;

const SERVICE: &str = "spoonacular";

/// Searches the recipe database; the seam the recipe browser mocks in tests.
pub trait RecipeSearch {
    /// Search recipes matching `query`, excluding the given intolerances and
    /// ingredients.
    fn search(
        &self,
        query: &str,
        intolerances: &[String],
        exclude_ingredients: &[String],
    ) -> Result<Vec<Recipe>, SourceError>;

    /// Random recipe suggestions, optionally constrained by tags.
    fn random(&self, tags: &[String], count: u32) -> Result<Vec<Recipe>, SourceError>;
}

/// Client for the recipe database.
pub struct RecipeClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl RecipeClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.to_string(),
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    pub fn default_public(api_key: &str) -> Self {
        Self::new("https://api.spoonacular.com", api_key, DEFAULT_TIMEOUT_SECS)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| SourceError::ResponseParsing {
            service: SERVICE.into(),
            detail: e.to_string(),
        })
    }
}

impl RecipeSearch for RecipeClient {
    fn search(
        &self,
        query: &str,
        intolerances: &[String],
        exclude_ingredients: &[String],
    ) -> Result<Vec<Recipe>, SourceError> {
        let mut params = vec![
            ("query", query.to_string()),
            ("addRecipeInformation", "true".to_string()),
        ];
        if !intolerances.is_empty() {
            params.push(("intolerances", intolerances.join(",")));
        }
        if !exclude_ingredients.is_empty() {
            params.push(("excludeIngredients", exclude_ingredients.join(",")));
        }

        let envelope: SearchEnvelope = self.get_json("/recipes/complexSearch", &params)?;
        Ok(envelope.results)
    }

    fn random(&self, tags: &[String], count: u32) -> Result<Vec<Recipe>, SourceError> {
        let mut params = vec![("number", count.to_string())];
        if !tags.is_empty() {
            params.push(("tags", tags.join(",")));
        }

        let envelope: RandomEnvelope = self.get_json("/recipes/random", &params)?;
        Ok(envelope.recipes)
    }
}

// ── Wire shapes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<Recipe>,
}

#[derive(Debug, Deserialize)]
struct RandomEnvelope {
    #[serde(default)]
    recipes: Vec<Recipe>,
}
