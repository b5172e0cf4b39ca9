use std::time::Duration;

use dialog_qa::{LookupError, Translator};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::TranslatorConfig;
use crate::error::DbpediaError;

const API_VERSION: &str = "3.0";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Parse a Translator v3 `translate` response for a single input text.
pub fn parse_translation(body: &str) -> Result<String, DbpediaError> {
    let malformed = |reason: String| DbpediaError::Malformed {
        what: "translator",
        reason,
    };

    let results: Vec<TranslateResult> =
        serde_json::from_str(body).map_err(|error| malformed(error.to_string()))?;

    results
        .into_iter()
        .next()
        .and_then(|result| result.translations.into_iter().next())
        .map(|translation| translation.text)
        .ok_or_else(|| malformed("no translation in response".to_string()))
}

/// A [`Translator`] backed by the Microsoft Translator v3 REST API.
pub struct MicrosoftTranslator {
    config: TranslatorConfig,
    client: Client,
}

impl std::fmt::Debug for MicrosoftTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicrosoftTranslator")
            .field("endpoint", &self.config.endpoint)
            .field("region", &self.config.region)
            .finish_non_exhaustive()
    }
}

impl MicrosoftTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, DbpediaError> {
        if config.subscription_key.is_empty() {
            return Err(DbpediaError::MissingKey);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|error| DbpediaError::Client(error.to_string()))?;

        Ok(MicrosoftTranslator { config, client })
    }

    fn request(&self, text: &str, target: &str) -> Result<String, DbpediaError> {
        let url = &self.config.endpoint;
        let mut request = self
            .client
            .post(url)
            .query(&[("api-version", API_VERSION), ("to", target)])
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .json(&[TranslateRequest { text }]);
        if let Some(region) = &self.config.region {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = request
            .send()
            .map_err(|error| DbpediaError::from_reqwest(url, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DbpediaError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|error| DbpediaError::from_reqwest(url, error))?;
        parse_translation(&body)
    }
}

impl Translator for MicrosoftTranslator {
    fn translate(&self, text: &str, target: &str) -> Result<String, LookupError> {
        let translated = self.request(text, target)?;
        tracing::debug!(text, target, translated, "translated");
        Ok(translated)
    }
}
