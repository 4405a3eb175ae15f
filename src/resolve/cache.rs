use crate::models::Product;
use crate::storage::{PrefStore, StorageError};

/// Most entries the recent-products list holds.
pub const RECENT_CAP: usize = 20;

const RECENT_KEY: &str = "recent_products";

/// Bounded most-recent-first list of resolved products, persisted as one
/// named record.
///
/// A cached entry never expires on its own; only a fresh successful remote
/// fetch for the same barcode replaces it. Eviction is simple truncation
/// past the cap, not LRU-on-read: `get` does not reorder the list.
pub struct RecentProducts {
    store: PrefStore,
    items: Vec<Product>,
}

impl RecentProducts {
    /// Load the persisted list; malformed or missing data starts empty.
    pub fn load(store: PrefStore) -> Self {
        let items: Vec<Product> = store.get(RECENT_KEY).unwrap_or_default();
        Self { store, items }
    }

    /// Exact-barcode lookup.
    pub fn get(&self, barcode: &str) -> Option<Product> {
        self.items.iter().find(|p| p.barcode == barcode).cloned()
    }

    /// Upsert a freshly resolved product at the front.
    ///
    /// Any previous entry with the same barcode is removed first, then the
    /// list is truncated to the cap.
    pub fn put(&mut self, product: Product) -> Result<(), StorageError> {
        self.items.retain(|p| p.barcode != product.barcode);
        self.items.insert(0, product);
        self.items.truncate(RECENT_CAP);
        self.store.put(RECENT_KEY, &self.items)
    }

    /// All cached products, most recent first.
    pub fn all(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive name/brand search over the cached products.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.brand
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Cached products that mention the given allergen in neither their
    /// declared allergens nor their ingredient text.
    pub fn without_allergen(&self, allergen: &str) -> Vec<Product> {
        let needle = allergen.to_lowercase();
        self.items
            .iter()
            .filter(|p| {
                !p.allergens.iter().any(|a| a.to_lowercase().contains(&needle))
                    && !p.ingredients.iter().any(|i| i.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}
