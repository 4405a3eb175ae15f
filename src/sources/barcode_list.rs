//! Regional barcode registry client.
//!
//! Covers barcodes in the 460-469 country range; consulted before the
//! global database for those. The registry returns a loosely structured
//! envelope: `status != "success"` or an empty product list both mean "no
//! match", and any missing mandatory field in a product entry is treated
//! the same way rather than as an error.

use serde::Deserialize;

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};
use crate::models::Product;
use crate::resolve::types::{ProductSource, SourceOutcome};

/// Barcode prefix handled by the regional registry.
pub const REGIONAL_BARCODE_PREFIX: &str = "46";

const SERVICE: &str = "barcode-list";

/// Client for the regional barcode registry.
pub struct BarcodeListClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl BarcodeListClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    /// Public registry endpoint with the default timeout.
    pub fn default_public() -> Self {
        Self::new("https://barcode-list.ru", DEFAULT_TIMEOUT_SECS)
    }

    fn lookup(&self, barcode: &str) -> Result<RegistryEnvelope, SourceError> {
        let url = format!("{}/api/v1/barcode/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("barcode", barcode)])
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

impl ProductSource for BarcodeListClient {
    fn name(&self) -> &str {
        SERVICE
    }

    fn covers(&self, barcode: &str) -> bool {
        barcode.starts_with(REGIONAL_BARCODE_PREFIX)
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
struct RegistryEnvelope {
    status: String,
    #[serde(default)]
    products: Option<Vec<RegistryProduct>>,
}

#[derive(Debug, Deserialize)]
struct RegistryProduct {
    #[serde(default)]
    barcode: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    /// Free-text comma-separated ingredient list.
    #[serde(default)]
    ingredients: Option<String>,
    #[serde(default)]
    allergens: Option<Vec<String>>,
}

/// Map a registry envelope onto the common product shape.
///
/// `None` means the registry had no usable match for this barcode.
fn map_envelope(envelope: RegistryEnvelope, requested_barcode: &str) -> Option<Product> {
    if envelope.status != "success" {
        return None;
    }
    let entry = envelope.products?.into_iter().next()?;
    let name = entry.name?;

    let ingredients = entry
        .ingredients
        .map(|raw| split_ingredients(&raw))
        .unwrap_or_default();

    Some(Product {
        barcode: entry.barcode.unwrap_or_else(|| requested_barcode.to_string()),
        name,
        brand: entry.brand,
        description: entry.description,
        ingredients,
        allergens: entry.allergens.unwrap_or_default(),
        image_url: entry.image,
        nutrition_grade: None,
        nutrition: None,
    })
}

/// Split a free-text comma-separated ingredient list, trimming each entry.
fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
