//! Entities and their properties.
//!
//! An [`Entity`] is created from a search hit and loads its properties on
//! first use. Properties come from the first of the entity's classes that
//! yields any; the classes are tried in the order the graph listed them.

use nonempty::NonEmpty;

use crate::error::LookupError;
use crate::knowledge::{KnowledgeGraph, SearchHit};

/// Class every entity belongs to when the graph lists none.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

/// Property holding a link to the entity's picture.
pub const THUMBNAIL: &str = "http://dbpedia.org/ontology/thumbnail";

/// Prefix of links to other entities in the graph.
pub const GRAPH_PREFIX: &str = "http://dbpedia.org/";

/// Values that carry no information.
const BLANK_VALUES: &[&str] = &["*"];

/// One property of an entity with at least one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub uri: String,
    pub values: NonEmpty<String>,
    /// Empty when descriptions were not requested or the graph has none.
    pub description: String,
}

impl Property {
    /// `None` when `values` is empty.
    pub fn new(
        uri: impl Into<String>,
        values: Vec<String>,
        description: impl Into<String>,
    ) -> Option<Self> {
        Some(Property {
            uri: uri.into(),
            values: NonEmpty::from_vec(values)?,
            description: description.into(),
        })
    }

    /// The values as one answer string.
    ///
    /// Links into the graph are shown as the entity name they point to
    /// (`http://dbpedia.org/resource/New_York` → `New York`) and blank values
    /// are left out.
    pub fn formatted_values(&self) -> String {
        self.values
            .iter()
            .map(|value| display_value(value))
            .filter(|value| !BLANK_VALUES.contains(&value.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn display_value(value: &str) -> String {
    if value.starts_with(GRAPH_PREFIX) {
        let name = value.rsplit('/').next().unwrap_or(value);
        name.replace('_', " ")
    } else {
        value.to_string()
    }
}

/// A resolved entity of the knowledge graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub classes: NonEmpty<String>,
    describe_properties: bool,
    properties: Option<Vec<Property>>,
}

impl Entity {
    /// Build an entity from a search hit.
    ///
    /// With `describe_properties`, loading properties also fetches their
    /// descriptions.
    pub fn new(hit: SearchHit, describe_properties: bool) -> Self {
        let classes = NonEmpty::from_vec(hit.classes)
            .unwrap_or_else(|| NonEmpty::new(OWL_THING.to_string()));

        Entity {
            uri: hit.uri,
            name: hit.name,
            description: hit.description,
            classes,
            describe_properties,
            properties: None,
        }
    }

    /// Properties loaded so far, without touching the graph.
    pub fn loaded_properties(&self) -> &[Property] {
        self.properties.as_deref().unwrap_or_default()
    }

    /// The entity's properties, loaded from `graph` on first call.
    pub fn properties(&mut self, graph: &dyn KnowledgeGraph) -> Result<&[Property], LookupError> {
        if self.properties.is_none() {
            let loaded = self.load_properties(graph)?;
            tracing::debug!(uri = %self.uri, count = loaded.len(), "loaded entity properties");
            self.properties = Some(loaded);
        }
        Ok(self.loaded_properties())
    }

    fn load_properties(&self, graph: &dyn KnowledgeGraph) -> Result<Vec<Property>, LookupError> {
        for class in self.classes.iter() {
            let found = graph.entity_properties(&self.uri, class)?;

            let mut properties = Vec::with_capacity(found.len());
            for (uri, values) in found {
                let Some(values) = NonEmpty::from_vec(values) else {
                    continue;
                };
                let description = if self.describe_properties {
                    graph.property_description(&uri)?
                } else {
                    String::new()
                };
                properties.push(Property {
                    uri,
                    values,
                    description,
                });
            }

            if !properties.is_empty() {
                return Ok(properties);
            }
        }

        Ok(Vec::new())
    }

    /// Link to the entity's thumbnail, or an empty string.
    pub fn image(&mut self, graph: &dyn KnowledgeGraph) -> Result<String, LookupError> {
        let image = self
            .properties(graph)?
            .iter()
            .find(|property| property.uri == THUMBNAIL)
            .map(|property| property.values.first().clone())
            .unwrap_or_default();
        Ok(image)
    }
}
