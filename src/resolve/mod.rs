//! Barcode-driven product resolution.
//!
//! One scan flows: recent-products cache first, then the remote sources in
//! priority order, then allergen matching against the user's profile. The
//! priority order is an explicit ordered list of sources, not hard-coded
//! branching, so adding a third database is a one-line change.

pub mod cache;
pub mod engine;
pub mod matching;
pub mod types;

pub use cache::RecentProducts;
pub use engine::ProductResolver;
pub use matching::allergen_warnings;
pub use types::{ProductSource, SourceOutcome};
