//! Batch text translation client.
//!
//! Used to localize product ingredient and allergen names for display.
//! Translation is best-effort: a failed or partial response falls back to
//! the untranslated source text, position by position, so display code
//! never has to handle a translation error.

use serde::{Deserialize, Serialize};

use super::{http_client, map_transport, normalize_base_url, SourceError, DEFAULT_TIMEOUT_SECS};

const SERVICE: &str = "translation";

/// Client for the cloud translation service.
pub struct TranslationClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl TranslationClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key,
            client: http_client(timeout_secs),
            timeout_secs,
        }
    }

    pub fn with_default_timeout(base_url: &str, api_key: Option<String>) -> Self {
        Self::new(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Translate a batch of texts. The response corresponds positionally to
    /// the input list.
    pub fn translate(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, SourceError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/translate", self.base_url);
        let body = TranslateRequest {
            source_language_code: source_language,
            target_language_code: target_language,
            texts,
            format: "PLAIN_TEXT",
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|e| map_transport(&self.base_url, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                service: SERVICE.into(),
                status: status.as_u16(),
            });
        }

        let parsed: TranslateResponse =
            response.json().map_err(|e| SourceError::ResponseParsing {
                service: SERVICE.into(),
                detail: e.to_string(),
            })?;

        Ok(parsed.translations.into_iter().map(|t| t.text).collect())
    }

    /// Translate a batch of texts, falling back to the source text for any
    /// position the service did not translate.
    pub fn translate_or_original(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Vec<String> {
        match self.translate(texts, source_language, target_language) {
            Ok(translated) => merge_translations(texts, translated),
            Err(e) => {
                tracing::warn!(error = %e, count = texts.len(),
                    "Translation failed, keeping source text");
                texts.to_vec()
            }
        }
    }
}

/// Positional merge: a missing or empty translation keeps the source text.
fn merge_translations(texts: &[String], translated: Vec<String>) -> Vec<String> {
    texts
        .iter()
        .enumerate()
        .map(|(i, original)| match translated.get(i) {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => original.clone(),
        })
        .collect()
}

// ── Wire shapes ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    #[serde(rename = "sourceLanguageCode")]
    source_language_code: &'a str,
    #[serde(rename = "targetLanguageCode")]
    target_language_code: &'a str,
    texts: &'a [String],
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
struct TranslationItem {
    text: String,
}
