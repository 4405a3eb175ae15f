//! Supplemental remote info for allergen detail screens.
//!
//! Combines the bibliographic and encyclopedia clients behind one facade.
//! Both lookups degrade to a human-readable message on any failure; the
//! detail screen shows whatever string comes back and never handles errors.

use crate::sources::pubmed::PubMedClient;
use crate::sources::wikipedia::WikipediaClient;

/// Remote background info for a catalog entry.
pub struct AllergenInfoService {
    pubmed: PubMedClient,
    wikipedia: WikipediaClient,
}

impl AllergenInfoService {
    pub fn new(pubmed: PubMedClient, wikipedia: WikipediaClient) -> Self {
        Self { pubmed, wikipedia }
    }

    pub fn default_public() -> Self {
        Self::new(PubMedClient::default_public(), WikipediaClient::default_public())
    }

    /// Formatted summary of the first matching scientific article.
    pub fn literature_summary(&self, query: &str) -> String {
        let term = format!("allergen {query}");
        match self.pubmed.first_article_summary(&term) {
            Ok(Some(article)) => {
                let mut text = format!("Title: {}\n\nSource: {}", article.title, article.source);
                if !article.pubdate.is_empty() {
                    text.push_str(&format!("\n\nDate: {}", article.pubdate));
                }
                text
            }
            Ok(None) => format!("No scientific literature found for \"{query}\""),
            Err(e) => {
                tracing::warn!(query, error = %e, "Literature lookup failed");
                format!("Could not fetch scientific information: {e}")
            }
        }
    }

    /// Encyclopedia intro extract for the allergen.
    pub fn encyclopedia_summary(&self, query: &str) -> String {
        match self.wikipedia.summary_extract(query) {
            Ok(Some(extract)) => extract,
            Ok(None) => format!("No encyclopedia entry found for \"{query}\""),
            Err(e) => {
                tracing::warn!(query, error = %e, "Encyclopedia lookup failed");
                format!("Could not fetch encyclopedia information: {e}")
            }
        }
    }
}
