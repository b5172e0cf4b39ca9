//! SPARQL queries against DBpedia and their JSON results.

use std::collections::HashMap;

use dialog_qa::PropertyMap;
use dialog_qa::entity::GRAPH_PREFIX;
use serde::Deserialize;

use crate::error::DbpediaError;

/// Predicates whose objects describe a property.
pub const DESCRIPTION_PREDICATES: &[&str] = &[
    "http://www.w3.org/2000/01/rdf-schema#label",
    "http://www.w3.org/2000/01/rdf-schema#comment",
];

/// Separator between the parts of a property description.
pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// `application/sparql-results+json`.
#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub results: Bindings,
}

#[derive(Debug, Deserialize)]
pub struct Bindings {
    pub bindings: Vec<HashMap<String, Term>>,
}

/// One bound RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Term {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
    #[serde(rename = "xml:lang", alias = "lang", default)]
    pub language: Option<String>,
}

impl SparqlResults {
    pub fn parse(body: &str) -> Result<Self, DbpediaError> {
        serde_json::from_str(body).map_err(|error| DbpediaError::Malformed {
            what: "sparql",
            reason: error.to_string(),
        })
    }
}

/// Every property of the entity `uri` seen as an instance of `class`.
pub fn properties_query(uri: &str, class: &str) -> String {
    format!(
        "select distinct ?property ?subject ?obj\n\
         where {{\n\
         \x20    ?subject a <{class}> .\n\
         \x20    ?subject ?property ?obj .\n\
         \x20    FILTER(?subject=<{uri}>)\n\
         }}"
    )
}

pub fn describe_query(uri: &str) -> String {
    format!("DESCRIBE <{uri}>")
}

/// Group property values by property.
///
/// Only DBpedia properties are kept, since only they can be described, and
/// only objects without a language tag (links, numbers) or tagged with one of
/// `accepted_languages`.
pub fn collect_properties(results: SparqlResults, accepted_languages: &[String]) -> PropertyMap {
    let mut properties = PropertyMap::new();

    for mut binding in results.results.bindings {
        let (Some(property), Some(object)) = (binding.remove("property"), binding.remove("obj"))
        else {
            continue;
        };
        if !property.value.starts_with(GRAPH_PREFIX) {
            continue;
        }
        let accepted = match &object.language {
            None => true,
            Some(language) => accepted_languages.iter().any(|accepted| accepted == language),
        };
        if accepted {
            properties
                .entry(property.value)
                .or_default()
                .push(object.value);
        }
    }

    properties
}

/// Join the labels and comments in `language` of a `DESCRIBE` result.
pub fn collect_description(results: SparqlResults, language: &str) -> String {
    results
        .results
        .bindings
        .into_iter()
        .filter_map(|mut binding| {
            let predicate = binding.remove("p")?;
            let object = binding.remove("o")?;
            let described = DESCRIPTION_PREDICATES.contains(&predicate.value.as_str())
                && object.language.as_deref() == Some(language);
            described.then_some(object.value)
        })
        .collect::<Vec<_>>()
        .join(DESCRIPTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn languages() -> Vec<String> {
        vec!["ru".to_string(), "en".to_string()]
    }

    #[test]
    fn it_restricts_the_query_to_the_subject_and_class() {
        let query = properties_query(
            "http://dbpedia.org/resource/Pavlohrad",
            "http://dbpedia.org/ontology/Place",
        );
        assert!(query.starts_with("select distinct ?property ?subject ?obj"));
        assert!(query.contains("?subject a <http://dbpedia.org/ontology/Place> ."));
        assert!(query.contains("FILTER(?subject=<http://dbpedia.org/resource/Pavlohrad>)"));
        assert_eq!(
            describe_query("http://dbpedia.org/ontology/postalCode"),
            "DESCRIBE <http://dbpedia.org/ontology/postalCode>"
        );
    }

    #[test]
    fn it_groups_values_and_filters_languages() {
        let body = r#"{
            "head": { "vars": ["property", "subject", "obj"] },
            "results": { "bindings": [
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/ontology/postalCode" },
                    "obj": { "type": "literal", "value": "51400" }
                },
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/property/timezone" },
                    "obj": { "type": "uri", "value": "http://dbpedia.org/resource/Coordinated_Universal_Time" }
                },
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/property/timezone" },
                    "obj": { "type": "uri", "value": "http://dbpedia.org/resource/Eastern_Time_Zone" }
                },
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/ontology/abstract" },
                    "obj": { "type": "literal", "xml:lang": "de", "value": "Pawlohrad ist eine Stadt" }
                },
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/ontology/abstract" },
                    "obj": { "type": "literal", "xml:lang": "en", "value": "Pavlohrad is a city" }
                },
                {
                    "property": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
                    "obj": { "type": "literal", "xml:lang": "en", "value": "Pavlohrad" }
                },
                {
                    "property": { "type": "uri", "value": "http://dbpedia.org/ontology/elevation" }
                }
            ] }
        }"#;

        let properties = collect_properties(SparqlResults::parse(body).unwrap(), &languages());
        assert_eq!(
            properties.keys().collect::<Vec<_>>(),
            vec![
                "http://dbpedia.org/ontology/postalCode",
                "http://dbpedia.org/property/timezone",
                "http://dbpedia.org/ontology/abstract"
            ]
        );
        assert_eq!(
            properties["http://dbpedia.org/property/timezone"],
            vec![
                "http://dbpedia.org/resource/Coordinated_Universal_Time",
                "http://dbpedia.org/resource/Eastern_Time_Zone"
            ]
        );
        assert_eq!(
            properties["http://dbpedia.org/ontology/abstract"],
            vec!["Pavlohrad is a city"]
        );
    }

    #[test]
    fn it_joins_english_labels_and_comments() {
        let body = r#"{
            "results": { "bindings": [
                {
                    "s": { "type": "uri", "value": "http://dbpedia.org/ontology/country" },
                    "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
                    "o": { "type": "literal", "xml:lang": "en", "value": "country" }
                },
                {
                    "s": { "type": "uri", "value": "http://dbpedia.org/ontology/country" },
                    "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
                    "o": { "type": "literal", "xml:lang": "de", "value": "Land" }
                },
                {
                    "s": { "type": "uri", "value": "http://dbpedia.org/ontology/country" },
                    "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#range" },
                    "o": { "type": "uri", "value": "http://dbpedia.org/ontology/Country" }
                },
                {
                    "s": { "type": "uri", "value": "http://dbpedia.org/ontology/country" },
                    "p": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#comment" },
                    "o": { "type": "literal", "lang": "en", "value": "The country in which the settlement is located" }
                }
            ] }
        }"#;

        assert_eq!(
            collect_description(SparqlResults::parse(body).unwrap(), "en"),
            "country | The country in which the settlement is located"
        );
    }

    #[test]
    fn undescribed_properties_have_empty_descriptions() {
        let results = SparqlResults::parse(r#"{ "results": { "bindings": [] } }"#).unwrap();
        assert_eq!(collect_description(results, "en"), "");
    }

    #[test]
    fn it_rejects_non_json_results() {
        assert!(matches!(
            SparqlResults::parse("Virtuoso 37000 Error SP030"),
            Err(DbpediaError::Malformed { what: "sparql", .. })
        ));
    }
}
