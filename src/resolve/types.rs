use crate::models::Product;

/// What one source query produced.
///
/// `NotFound` means the source answered and explicitly reported no match.
/// `Error` covers transport failures, HTTP status >= 400, and malformed
/// response envelopes; the distinction decides whether the whole resolution
/// reports `NotFound` or `NetworkError` when every source comes up empty.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Found(Product),
    NotFound,
    Error(String),
}

/// A product database the resolver can query.
///
/// Implementations catch every failure at their own boundary and report it
/// as `SourceOutcome::Error`; `fetch` must never panic or propagate.
pub trait ProductSource {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Whether this source should be tried for the given barcode.
    /// Regional registries only cover their own prefix range.
    fn covers(&self, barcode: &str) -> bool;

    /// Query the source for one barcode.
    fn fetch(&self, barcode: &str) -> SourceOutcome;
}
