//! Global open product database client.
//!
//! The worldwide fallback for every barcode. Lookup responses use an
//! integer status flag: `status != 1` or a missing product body both mean
//! "no match". Allergen tags arrive as `"<locale>:<name>"` identifiers and
//! are normalized to display names before matching.

use serde::Deserialize;

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};
use crate::models::{NutritionFacts, Product};
use crate::resolve::types::{ProductSource, SourceOutcome};

const SERVICE: &str = "openfoodfacts";

/// Client for the global product database.
pub struct OpenFoodFactsClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    /// Public world endpoint with the default timeout.
    pub fn default_public() -> Self {
        Self::new("https://world.openfoodfacts.org", DEFAULT_TIMEOUT_SECS)
    }

    fn lookup(&self, barcode: &str) -> Result<LookupEnvelope, SourceError> {
        let url = format!("{}/api/v0/product/{barcode}.json", self.base_url);

        let response = self
            .client
            .get(&url)
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

    /// Free-text product search, first page.
    pub fn search(&self, terms: &str, page_size: u32) -> Result<Vec<Product>, SourceError> {
        let url = format!("{}/cgi/search.pl", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", terms),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page", "1"),
                ("page_size", &page_size.to_string()),
            ])
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        let envelope: SearchEnvelope =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(envelope
            .products
            .into_iter()
            .filter_map(|p| {
                let code = p.code.clone()?;
                map_product(p, &code)
            })
            .collect())
    }

    /// Products tagged as not containing the given allergen, first page.
    pub fn search_without_allergen(
        &self,
        allergen: &str,
        page_size: u32,
    ) -> Result<Vec<Product>, SourceError> {
        let url = format!("{}/cgi/search.pl", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("tagtype_0", "allergens"),
                ("tag_contains_0", "does_not_contain"),
                ("tag_0", allergen),
                ("action", "process"),
                ("json", "1"),
                ("page", "1"),
                ("page_size", &page_size.to_string()),
            ])
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        let envelope: SearchEnvelope =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(envelope
            .products
            .into_iter()
            .filter_map(|p| {
                let code = p.code.clone()?;
                map_product(p, &code)
            })
            .collect())
    }
}

impl ProductSource for OpenFoodFactsClient {
    fn name(&self) -> &str {
        SERVICE
    }

    /// The global database is the fallback for every barcode.
    fn covers(&self, _barcode: &str) -> bool {
        true
    }

    fn fetch(&self, barcode: &str) -> SourceOutcome {
        match self.lookup(barcode) {
            Ok(envelope) => match map_envelope(envelope, barcode) {
                Some(product) => SourceOutcome::Found(product),
                None => SourceOutcome::NotFound,
            },
            Err(e) => SourceOutcome::Error(e.to_string()),
        }
    }
}

// ── Wire shapes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LookupEnvelope {
    status: i64,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    product: Option<ApiProduct>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    products: Vec<ApiProduct>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiProduct {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<ApiIngredient>>,
    #[serde(default)]
    allergens_tags: Option<Vec<String>>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    nutrition_grades: Option<String>,
    #[serde(default)]
    nutriments: Option<ApiNutriments>,
}

#[derive(Debug, Deserialize)]
struct ApiIngredient {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNutriments {
    #[serde(default)]
    energy: Option<f64>,
    #[serde(default)]
    proteins: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
    #[serde(default)]
    carbohydrates: Option<f64>,
    #[serde(default)]
    sugars: Option<f64>,
    #[serde(default)]
    fiber: Option<f64>,
    #[serde(default)]
    salt: Option<f64>,
}

/// Map a lookup envelope onto the common product shape.
///
/// `None` means the database had no usable match for this barcode, which
/// includes a "found" status with a missing product body.
fn map_envelope(envelope: LookupEnvelope, requested_barcode: &str) -> Option<Product> {
    if envelope.status != 1 {
        return None;
    }
    let barcode = envelope
        .code
        .unwrap_or_else(|| requested_barcode.to_string());
    map_product(envelope.product?, &barcode)
}

fn map_product(api: ApiProduct, barcode: &str) -> Option<Product> {
    let ingredients = api
        .ingredients
        .unwrap_or_default()
        .into_iter()
        .filter_map(|i| i.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let allergens = api
        .allergens_tags
        .unwrap_or_default()
        .iter()
        .map(|tag| display_allergen(tag))
        .filter(|a| !a.is_empty())
        .collect();

    Some(Product {
        barcode: barcode.to_string(),
        name: api
            .product_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown product".to_string()),
        brand: api.brands,
        description: None,
        ingredients,
        allergens,
        image_url: api.image_url,
        nutrition_grade: api.nutrition_grades,
        nutrition: api.nutriments.map(|n| NutritionFacts {
            energy: n.energy,
            proteins: n.proteins,
            fat: n.fat,
            carbohydrates: n.carbohydrates,
            sugars: n.sugars,
            fiber: n.fiber,
            salt: n.salt,
        }),
    })
}

/// Turn a tag-style allergen identifier into a display name.
///
/// `"en:milk"` becomes `"milk"`, `"en:cow-milk"` becomes `"cow milk"`.
/// Tags without a locale prefix pass through unchanged.
fn display_allergen(tag: &str) -> String {
    let name = tag.split_once(':').map(|(_, rest)| rest).unwrap_or(tag);
    name.replace('-', " ").trim().to_string()
}
