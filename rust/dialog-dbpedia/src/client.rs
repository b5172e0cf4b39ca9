use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use dialog_qa::{Cache, KnowledgeGraph, LookupError, PropertyMap, SearchHit};
use reqwest::blocking::{Client, RequestBuilder};

use crate::config::DbpediaConfig;
use crate::error::DbpediaError;
use crate::lookup::parse_search;
use crate::sparql::{
    SparqlResults, collect_description, collect_properties, describe_query, properties_query,
};

const SPARQL_RESULTS: &str = "application/sparql-results+json";

/// A [`KnowledgeGraph`] backed by DBpedia Lookup and the DBpedia SPARQL
/// endpoint.
///
/// Property descriptions rarely change, so they are cached for the lifetime
/// of the client and may be seeded from a JSON file.
///
/// ```no_run
/// use dialog_dbpedia::{DbpediaClient, DbpediaConfig};
/// use dialog_qa::KnowledgeGraph;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DbpediaClient::new(DbpediaConfig::new().with_sparql_timeout(20))?;
/// let hit = client.search("Pavlograd", None)?;
/// # Ok(())
/// # }
/// ```
pub struct DbpediaClient {
    config: DbpediaConfig,
    lookup: Client,
    sparql: Client,
    descriptions: Cache<String, String>,
}

impl std::fmt::Debug for DbpediaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbpediaClient")
            .field("config", &self.config)
            .field("descriptions", &self.descriptions)
            .finish_non_exhaustive()
    }
}

fn build_client(timeout_seconds: Option<u64>) -> Result<Client, DbpediaError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }
    builder
        .build()
        .map_err(|error| DbpediaError::Client(error.to_string()))
}

impl DbpediaClient {
    pub fn new(config: DbpediaConfig) -> Result<Self, DbpediaError> {
        let descriptions = Cache::new(config.description_cache_capacity)
            .map_err(|error| DbpediaError::Client(format!("description cache: {error}")))?;

        let client = DbpediaClient {
            lookup: build_client(config.lookup_timeout_seconds)?,
            sparql: build_client(config.sparql_timeout_seconds)?,
            descriptions,
            config,
        };

        if let Some(path) = client.config.descriptions_file.clone() {
            let count = client.load_descriptions(&path)?;
            tracing::info!(?path, count, "loaded property descriptions");
        }

        Ok(client)
    }

    pub fn config(&self) -> &DbpediaConfig {
        &self.config
    }

    /// Put known property descriptions into the cache.
    pub fn seed_descriptions<I, U, D>(&self, descriptions: I)
    where
        I: IntoIterator<Item = (U, D)>,
        U: Into<String>,
        D: Into<String>,
    {
        for (uri, description) in descriptions {
            self.descriptions.insert(uri.into(), description.into());
        }
    }

    /// Seed the description cache from a JSON object of URI to description.
    pub fn load_descriptions(&self, path: &Path) -> Result<usize, DbpediaError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| DbpediaError::DescriptionsFile {
                path: path.to_path_buf(),
                source,
            })?;
        let descriptions: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|source| DbpediaError::DescriptionsFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let count = descriptions.len();
        self.seed_descriptions(descriptions);
        Ok(count)
    }

    /// Number of cached property descriptions.
    pub fn cached_descriptions(&self) -> usize {
        self.descriptions.len()
    }

    fn with_headers(&self, mut builder: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.config.headers {
            builder = builder.header(key, value);
        }
        builder
    }

    fn fetch(&self, url: &str, builder: RequestBuilder) -> Result<String, DbpediaError> {
        let response = self
            .with_headers(builder)
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

        response
            .text()
            .map_err(|error| DbpediaError::from_reqwest(url, error))
    }

    fn keyword_search(&self, term: &str, class: &str) -> Result<Option<SearchHit>, DbpediaError> {
        let url = &self.config.lookup_endpoint;
        let request = self
            .lookup
            .get(url)
            .query(&[("QueryString", term), ("QueryClass", class), ("MaxHits", "1")])
            .header(reqwest::header::ACCEPT, "application/json");

        let hit = parse_search(&self.fetch(url, request)?)?;
        if hit.is_none() {
            tracing::debug!(term, class, "no lookup results");
        }
        Ok(hit)
    }

    /// Run a SPARQL query.
    pub fn query(&self, query: &str) -> Result<SparqlResults, DbpediaError> {
        let url = &self.config.sparql_endpoint;
        let request = self
            .sparql
            .get(url)
            .query(&[("query", query), ("format", SPARQL_RESULTS)])
            .header(reqwest::header::ACCEPT, SPARQL_RESULTS);

        tracing::trace!(query, "sparql");
        SparqlResults::parse(&self.fetch(url, request)?)
    }

    fn describe(&self, uri: &str) -> Result<String, DbpediaError> {
        if self.config.property_blacklist.iter().any(|listed| listed == uri) {
            return Ok(String::new());
        }

        self.descriptions
            .get_or_try_insert_with(uri.to_string(), |uri| {
                tracing::debug!(uri, "fetching property description");
                let results = self.query(&describe_query(uri))?;
                Ok(collect_description(
                    results,
                    &self.config.description_language,
                ))
            })
    }
}

impl KnowledgeGraph for DbpediaClient {
    fn search(&self, term: &str, class: Option<&str>) -> Result<Option<SearchHit>, LookupError> {
        Ok(self.keyword_search(term, class.unwrap_or_default())?)
    }

    fn entity_properties(&self, uri: &str, class: &str) -> Result<PropertyMap, LookupError> {
        let results = self.query(&properties_query(uri, class))?;
        Ok(collect_properties(results, &self.config.accepted_languages))
    }

    fn property_description(&self, uri: &str) -> Result<String, LookupError> {
        Ok(self.describe(uri)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn offline() -> DbpediaConfig {
        // Nothing listens here; any request fails fast.
        DbpediaConfig::new()
            .with_lookup_endpoint("http://127.0.0.1:9/lookup")
            .with_sparql_endpoint("http://127.0.0.1:9/sparql")
            .with_lookup_timeout(1)
            .with_sparql_timeout(1)
    }

    #[test]
    fn blacklisted_properties_describe_as_empty() {
        let client = DbpediaClient::new(offline()).unwrap();
        assert_eq!(
            client
                .property_description("http://dbpedia.org/property/years")
                .unwrap(),
            ""
        );
    }

    #[test]
    fn seeded_descriptions_are_served_from_the_cache() {
        let client = DbpediaClient::new(offline()).unwrap();
        client.seed_descriptions([("http://dbpedia.org/property/postalCode", "postal code")]);

        assert_eq!(
            client
                .property_description("http://dbpedia.org/property/postalCode")
                .unwrap(),
            "postal code"
        );
        assert_eq!(client.cached_descriptions(), 1);
    }

    #[test]
    fn unreachable_endpoints_are_transport_failures() {
        let client = DbpediaClient::new(offline()).unwrap();
        let error = client
            .property_description("http://dbpedia.org/ontology/areaTotal")
            .unwrap_err();
        assert!(matches!(
            error,
            LookupError::Transport(_) | LookupError::Timeout(_)
        ));
        assert_eq!(client.cached_descriptions(), 0);
    }

    #[test]
    fn it_loads_descriptions_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "http://dbpedia.org/property/areaTotalKm": "area total km" }}"#
        )
        .unwrap();

        let client = DbpediaClient::new(offline().with_descriptions_file(file.path())).unwrap();
        assert_eq!(
            client
                .property_description("http://dbpedia.org/property/areaTotalKm")
                .unwrap(),
            "area total km"
        );
    }

    #[test]
    fn broken_description_files_are_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        assert!(matches!(
            DbpediaClient::new(offline().with_descriptions_file(file.path())),
            Err(DbpediaError::DescriptionsFormat { .. })
        ));
        assert!(matches!(
            DbpediaClient::new(offline().with_descriptions_file("/nonexistent/descriptions.json")),
            Err(DbpediaError::DescriptionsFile { .. })
        ));
    }
}
