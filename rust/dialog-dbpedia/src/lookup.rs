//! DBpedia Lookup keyword search responses.

use dialog_qa::SearchHit;
use dialog_qa::entity::GRAPH_PREFIX;
use serde::Deserialize;

use crate::error::DbpediaError;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    uri: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    classes: Vec<LookupClass>,
}

#[derive(Debug, Deserialize)]
struct LookupClass {
    uri: String,
}

/// Parse a `KeywordSearch` JSON body into its first hit.
///
/// Only classes that link into DBpedia are kept; schema.org and other
/// vocabularies say nothing the graph can be queried with.
pub fn parse_search(body: &str) -> Result<Option<SearchHit>, DbpediaError> {
    let response: LookupResponse =
        serde_json::from_str(body).map_err(|error| DbpediaError::Malformed {
            what: "lookup",
            reason: error.to_string(),
        })?;

    Ok(response.results.into_iter().next().map(|result| SearchHit {
        uri: result.uri,
        name: result.label.unwrap_or_default(),
        description: result.description.unwrap_or_default(),
        classes: result
            .classes
            .into_iter()
            .map(|class| class.uri)
            .filter(|uri| uri.starts_with(GRAPH_PREFIX))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_the_first_hit() {
        let body = r#"{
            "results": [
                {
                    "uri": "http://dbpedia.org/resource/Pavlohrad",
                    "label": "Pavlohrad",
                    "description": "Pavlohrad is a city in Dnipropetrovsk Oblast, Ukraine.",
                    "refCount": 310,
                    "classes": [
                        { "uri": "http://dbpedia.org/ontology/City", "label": "city" },
                        { "uri": "http://schema.org/City", "label": "city" },
                        { "uri": "http://dbpedia.org/ontology/Settlement", "label": "settlement" }
                    ],
                    "categories": []
                },
                {
                    "uri": "http://dbpedia.org/resource/Pavlohrad_Raion",
                    "label": "Pavlohrad Raion",
                    "description": null,
                    "classes": []
                }
            ]
        }"#;

        let hit = parse_search(body).unwrap().unwrap();
        assert_eq!(
            hit,
            SearchHit {
                uri: "http://dbpedia.org/resource/Pavlohrad".into(),
                name: "Pavlohrad".into(),
                description: "Pavlohrad is a city in Dnipropetrovsk Oblast, Ukraine.".into(),
                classes: vec![
                    "http://dbpedia.org/ontology/City".into(),
                    "http://dbpedia.org/ontology/Settlement".into()
                ],
            }
        );
    }

    #[test]
    fn it_tolerates_missing_fields() {
        let body = r#"{ "results": [ { "uri": "http://dbpedia.org/resource/Atlantis", "description": null } ] }"#;
        let hit = parse_search(body).unwrap().unwrap();
        assert_eq!(hit.name, "");
        assert_eq!(hit.description, "");
        assert!(hit.classes.is_empty());
    }

    #[test]
    fn no_results_is_not_an_error() {
        assert_eq!(parse_search(r#"{ "results": [] }"#).unwrap(), None);
    }

    #[test]
    fn it_rejects_unexpected_bodies() {
        assert!(matches!(
            parse_search("<html>Service Unavailable</html>"),
            Err(DbpediaError::Malformed { what: "lookup", .. })
        ));
    }
}
