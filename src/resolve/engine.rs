use crate::models::{Product, ScanResult};
use crate::resolve::cache::RecentProducts;
use crate::resolve::matching::allergen_warnings;
use crate::resolve::types::{ProductSource, SourceOutcome};
use crate::sources::barcode_list::BarcodeListClient;
use crate::sources::openfoodfacts::OpenFoodFactsClient;

/// Resolves barcodes to products across an ordered list of sources.
///
/// Sources are tried strictly sequentially in list order, skipping any
/// source whose coverage does not include the barcode, until one yields a
/// product. The recent-products cache is consulted first and treated as
/// authoritative; a cache hit makes no remote call at all.
pub struct ProductResolver {
    sources: Vec<Box<dyn ProductSource>>,
    cache: RecentProducts,
}

impl ProductResolver {
    /// Build a resolver from explicit source clients, highest priority first.
    pub fn new(sources: Vec<Box<dyn ProductSource>>, cache: RecentProducts) -> Self {
        Self { sources, cache }
    }

    /// Resolver wired to the public regional registry and the global
    /// database, in that priority order.
    pub fn with_default_sources(cache: RecentProducts) -> Self {
        Self::new(
            vec![
                Box::new(BarcodeListClient::default_public()),
                Box::new(OpenFoodFactsClient::default_public()),
            ],
            cache,
        )
    }

    /// Resolve one barcode for one user.
    ///
    /// Never panics and never propagates a transport error: every failure
    /// surfaces as a `ScanResult` variant.
    pub fn resolve(&mut self, barcode: &str, user_allergens: &[String]) -> ScanResult {
        if let Some(cached) = self.cache.get(barcode) {
            tracing::debug!(barcode, "Product served from recent cache");
            // Matching re-runs against the current allergen profile even for
            // cached products, so an edited profile affects old scans too.
            return self.classify(cached, user_allergens, false);
        }

        let mut saw_not_found = false;
        let mut last_error: Option<String> = None;
        let mut resolved: Option<Product> = None;

        for source in self.sources.iter().filter(|s| s.covers(barcode)) {
            match source.fetch(barcode) {
                SourceOutcome::Found(product) => {
                    tracing::info!(barcode, source = source.name(), product = %product.name,
                        "Product resolved");
                    resolved = Some(product);
                    break;
                }
                SourceOutcome::NotFound => {
                    tracing::debug!(barcode, source = source.name(), "Source reported no match");
                    saw_not_found = true;
                }
                SourceOutcome::Error(message) => {
                    tracing::warn!(barcode, source = source.name(), error = %message,
                        "Source query failed");
                    last_error = Some(message);
                }
            }
        }

        if let Some(product) = resolved {
            return self.classify(product, user_allergens, true);
        }

        // An explicit "no match" from any source outweighs transient errors
        // from the others.
        if saw_not_found {
            ScanResult::NotFound {
                message: "No product with this barcode was found in any database".into(),
            }
        } else {
            ScanResult::NetworkError {
                message: last_error
                    .unwrap_or_else(|| "Could not reach any product database".into()),
            }
        }
    }

    /// Products resolved recently, most recent first.
    pub fn recent_products(&self) -> &[Product] {
        self.cache.all()
    }

    /// Case-insensitive name/brand search over recently resolved products.
    pub fn search_recent(&self, query: &str) -> Vec<Product> {
        self.cache.search(query)
    }

    /// Recently resolved products free of the given allergen.
    pub fn recent_without_allergen(&self, allergen: &str) -> Vec<Product> {
        self.cache.without_allergen(allergen)
    }

    fn classify(
        &mut self,
        product: Product,
        user_allergens: &[String],
        freshly_resolved: bool,
    ) -> ScanResult {
        let warnings = allergen_warnings(&product, user_allergens);

        // Only freshly resolved products enter the cache; re-inserting a
        // cache hit would turn the FIFO bound into LRU-on-read.
        if freshly_resolved {
            if let Err(e) = self.cache.put(product.clone()) {
                tracing::warn!(barcode = %product.barcode, error = %e,
                    "Could not persist product into recent cache");
            }
        }

        if warnings.is_empty() {
            ScanResult::Success { product }
        } else {
            ScanResult::ContainsAllergens { product, warnings }
        }
    }
}
