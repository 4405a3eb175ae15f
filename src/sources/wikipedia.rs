//! Encyclopedia extract client.
//!
//! Fetches the intro extract of the article matching a title. The query API
//! returns pages keyed by page id; the first page's extract is what the
//! allergen detail screen shows.

use std::collections::HashMap;

use serde::Deserialize;

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};

const SERVICE: &str = "wikipedia";

/// Client for the encyclopedia search service.
pub struct WikipediaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl WikipediaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    pub fn default_public() -> Self {
        Self::new("https://en.wikipedia.org", DEFAULT_TIMEOUT_SECS)
    }

    /// Plain-text intro extract for the article matching `title`, or `None`
    /// when no page carries an extract.
    pub fn summary_extract(&self, title: &str) -> Result<Option<String>, SourceError> {
        let url = format!("{}/w/api.php", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
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

        let parsed: QueryEnvelope =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(first_extract(parsed))
    }
}

// ── Wire shapes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    #[serde(default)]
    extract: Option<String>,
}

fn first_extract(envelope: QueryEnvelope) -> Option<String> {
    envelope
        .query?
        .pages
        .into_values()
        .find_map(|page| page.extract)
        .filter(|extract| !extract.trim().is_empty())
}
