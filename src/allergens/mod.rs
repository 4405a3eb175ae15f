//! Allergen reference data and supplemental remote info.

pub mod catalog;
pub mod enrichment;

pub use catalog::AllergenCatalog;
pub use enrichment::AllergenInfoService;
