//! Collaborator contracts: the knowledge graph and the translator.
//!
//! The question pipeline never talks to the network itself. It asks a
//! [`KnowledgeGraph`] for entities and their properties and a [`Translator`]
//! for text in another language, and treats every failure as a
//! [`LookupError`]. Implementations are expected to bound their own latency.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// The best match of a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub uri: String,
    pub name: String,
    pub description: String,
    /// Class URIs, most specific first. May be empty.
    pub classes: Vec<String>,
}

/// Property URI to its values, in the order the graph returned them.
pub type PropertyMap = IndexMap<String, Vec<String>>;

/// Read access to an entity knowledge graph.
pub trait KnowledgeGraph: Send + Sync {
    /// Find the entity best matching `term`, optionally restricted to a class.
    fn search(&self, term: &str, class: Option<&str>) -> Result<Option<SearchHit>, LookupError>;

    /// All properties of the entity `uri` seen as an instance of `class`.
    fn entity_properties(&self, uri: &str, class: &str) -> Result<PropertyMap, LookupError>;

    /// A human readable description of the property `uri`. Empty when the
    /// graph has none.
    fn property_description(&self, uri: &str) -> Result<String, LookupError>;
}

/// Machine translation.
pub trait Translator: Send + Sync {
    /// Translate `text` into the language with code `target` ("en", "ru").
    fn translate(&self, text: &str, target: &str) -> Result<String, LookupError>;
}

impl<K: KnowledgeGraph + ?Sized> KnowledgeGraph for Arc<K> {
    fn search(&self, term: &str, class: Option<&str>) -> Result<Option<SearchHit>, LookupError> {
        (**self).search(term, class)
    }

    fn entity_properties(&self, uri: &str, class: &str) -> Result<PropertyMap, LookupError> {
        (**self).entity_properties(uri, class)
    }

    fn property_description(&self, uri: &str) -> Result<String, LookupError> {
        (**self).property_description(uri)
    }
}

impl<T: Translator + ?Sized> Translator for Arc<T> {
    fn translate(&self, text: &str, target: &str) -> Result<String, LookupError> {
        (**self).translate(text, target)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target: &str) -> Result<String, LookupError> {
        (**self).translate(text, target)
    }
}

/// A translator that returns its input unchanged.
///
/// Useful when questions are already asked in the working language of the
/// knowledge graph, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _target: &str) -> Result<String, LookupError> {
        Ok(text.to_string())
    }
}
