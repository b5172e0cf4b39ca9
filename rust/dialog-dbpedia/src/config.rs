//! Configuration for the DBpedia and translation adapters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// DBpedia Lookup keyword search endpoint.
pub const LOOKUP_ENDPOINT: &str = "http://lookup.dbpedia.org/api/search/KeywordSearch";

/// DBpedia SPARQL endpoint.
pub const SPARQL_ENDPOINT: &str = "http://dbpedia.org/sparql";

/// Microsoft Translator v3 endpoint.
pub const TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com/translate";

/// Configuration for [`crate::DbpediaClient`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbpediaConfig {
    /// Keyword search endpoint of DBpedia Lookup
    pub lookup_endpoint: String,

    /// SPARQL endpoint
    pub sparql_endpoint: String,

    /// Timeout for lookup requests in seconds (default: 30)
    pub lookup_timeout_seconds: Option<u64>,

    /// Timeout for SPARQL requests in seconds (default: 60)
    pub sparql_timeout_seconds: Option<u64>,

    /// Literal values are kept only when untagged or tagged with one of these
    /// languages (default: ru, en)
    pub accepted_languages: Vec<String>,

    /// Language of property labels and comments (default: en)
    pub description_language: String,

    /// Properties that are never described
    pub property_blacklist: Vec<String>,

    /// Entries kept in the property description cache (default: 10 000)
    pub description_cache_capacity: usize,

    /// JSON object of property URI to description, loaded into the cache
    /// when the client is built
    pub descriptions_file: Option<PathBuf>,

    /// Custom headers sent with each request
    pub headers: Vec<(String, String)>,
}

impl Default for DbpediaConfig {
    fn default() -> Self {
        Self {
            lookup_endpoint: LOOKUP_ENDPOINT.to_string(),
            sparql_endpoint: SPARQL_ENDPOINT.to_string(),
            lookup_timeout_seconds: Some(30),
            sparql_timeout_seconds: Some(60),
            accepted_languages: vec!["ru".to_string(), "en".to_string()],
            description_language: "en".to_string(),
            property_blacklist: vec![
                "http://dbpedia.org/property/years".to_string(),
                "http://dbpedia.org/property/name".to_string(),
            ],
            description_cache_capacity: dialog_qa::DEFAULT_CAPACITY,
            descriptions_file: None,
            headers: Vec::new(),
        }
    }
}

impl DbpediaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lookup endpoint
    pub fn with_lookup_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.lookup_endpoint = endpoint.into();
        self
    }

    /// Set the SPARQL endpoint
    pub fn with_sparql_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sparql_endpoint = endpoint.into();
        self
    }

    /// Set the lookup request timeout
    pub fn with_lookup_timeout(mut self, seconds: u64) -> Self {
        self.lookup_timeout_seconds = Some(seconds);
        self
    }

    /// Set the SPARQL request timeout
    pub fn with_sparql_timeout(mut self, seconds: u64) -> Self {
        self.sparql_timeout_seconds = Some(seconds);
        self
    }

    /// Load property descriptions from a JSON file
    pub fn with_descriptions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptions_file = Some(path.into());
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// Configuration for [`crate::MicrosoftTranslator`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Translator v3 `translate` endpoint
    pub endpoint: String,

    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    pub subscription_key: String,

    /// Resource region, for regional and multi-service resources
    pub region: Option<String>,

    /// Timeout for requests in seconds (default: 30)
    pub timeout_seconds: Option<u64>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: TRANSLATOR_ENDPOINT.to_string(),
            subscription_key: String::new(),
            region: None,
            timeout_seconds: Some(30),
        }
    }
}

impl TranslatorConfig {
    pub fn new(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            ..Default::default()
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the resource region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}
