//! Bibliographic search client for scientific allergen background.
//!
//! Two-step flow: a term search returns article ids, then a summary fetch
//! for the first id yields title/source/date. The summary endpoint returns
//! a map keyed by article id, so that part is decoded dynamically.

use std::collections::HashMap;

use serde::Deserialize;

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};

const SERVICE: &str = "pubmed";

/// Summary of one scientific article.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArticleSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub pubdate: String,
}

/// Client for the bibliographic search service.
pub struct PubMedClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl PubMedClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    pub fn default_public() -> Self {
        Self::new("https://eutils.ncbi.nlm.nih.gov", DEFAULT_TIMEOUT_SECS)
    }

    /// Find the first matching article for a search term and return its
    /// summary, or `None` when the search has no hits.
    pub fn first_article_summary(
        &self,
        term: &str,
    ) -> Result<Option<ArticleSummary>, SourceError> {
        let ids = self.search_ids(term)?;
        let Some(first_id) = ids.into_iter().next() else {
            return Ok(None);
        };
        self.article_summary(&first_id)
    }

    fn search_ids(&self, term: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/entrez/eutils/esearch.fcgi", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("db", "pubmed"), ("retmode", "json"), ("term", term)])
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        let parsed: SearchEnvelope =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(parsed.esearchresult.idlist)
    }

    fn article_summary(&self, id: &str) -> Result<Option<ArticleSummary>, SourceError> {
        let url = format!("{}/entrez/eutils/esummary.fcgi", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("db", "pubmed"), ("retmode", "json"), ("id", id)])
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        let parsed: SummaryEnvelope =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(extract_summary(parsed, id))
    }
}

// ── Wire shapes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    #[serde(default)]
    result: HashMap<String, serde_json::Value>,
}

/// Pull the summary for one article id out of the dynamic result map.
/// The map also carries a "uids" array entry, which simply never matches an
/// article id key.
fn extract_summary(envelope: SummaryEnvelope, id: &str) -> Option<ArticleSummary> {
    let value = envelope.result.get(id)?.clone();
    serde_json::from_value(value).ok()
}
