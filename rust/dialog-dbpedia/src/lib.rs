//! DBpedia collaborators for [`dialog_qa`].
//!
//! - [`DbpediaClient`] implements [`dialog_qa::KnowledgeGraph`] with DBpedia
//!   Lookup for entity search and the DBpedia SPARQL endpoint for properties
//!   and property descriptions.
//! - [`MicrosoftTranslator`] implements [`dialog_qa::Translator`] with the
//!   Microsoft Translator v3 REST API.
//!
//! Both use blocking HTTP with per-request timeouts and report failures as
//! [`dialog_qa::LookupError`]. The `dialog-ask` binary wires them into a
//! [`dialog_qa::QaService`].

mod client;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod sparql;
mod translate;

pub use client::DbpediaClient;
pub use config::{DbpediaConfig, TranslatorConfig};
pub use error::DbpediaError;
pub use translate::{MicrosoftTranslator, parse_translation};
