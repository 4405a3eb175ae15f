//! Remote lookup clients.
//!
//! One stateless typed client per external service, each constructed
//! explicitly with its base URL and injected where needed; no hidden
//! singletons. Every client uses a blocking HTTP client with explicit
//! timeouts and maps transport failures into `SourceError` at its own call
//! boundary.

pub mod barcode_list;
pub mod openfoodfacts;
pub mod pubmed;
pub mod spoonacular;
pub mod translation;
pub mod wikipedia;

use std::time::Duration;

/// Default connect/read timeout for all remote clients.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from a single remote query.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Cannot reach {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP error {status} from {service}")]
    Status { service: String, status: u16 },
    #[error("Malformed response from {service}: {detail}")]
    ResponseParsing { service: String, detail: String },
    #[error("HTTP transport error: {0}")]
    Transport(String),
}

/// Build the shared blocking HTTP client with the given timeout.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

/// Map a reqwest transport error to a `SourceError`.
pub(crate) fn map_transport(base_url: &str, timeout_secs: u64, e: reqwest::Error) -> SourceError {
    if e.is_connect() {
        SourceError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        SourceError::Timeout(timeout_secs)
    } else {
        SourceError::Transport(e.to_string())
    }
}

/// Trim a trailing slash so URL joins stay predictable.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://example.org/"),
            "https://example.org"
        );
        assert_eq!(
            normalize_base_url("https://example.org"),
            "https://example.org"
        );
    }

    #[test]
    fn source_error_messages_are_human_readable() {
        let e = SourceError::Status {
            service: "openfoodfacts".into(),
            status: 502,
        };
        assert_eq!(e.to_string(), "HTTP error 502 from openfoodfacts");

        let t = SourceError::Timeout(30);
        assert_eq!(t.to_string(), "Request timed out after 30s");
    }
}
