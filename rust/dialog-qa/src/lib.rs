//! Question answering over an entity knowledge graph.
//!
//! This crate turns a natural-language question into an answer drawn from a
//! [`KnowledgeGraph`]. It does not talk to the network itself: the graph and
//! the [`Translator`] are collaborators supplied by the caller.
//!
//! A question goes through these steps:
//!
//! 1. **Categorize**: the [`QuestionCategorizer`] matches the question's shape
//!    against each [`QuestionKind`]'s patterns. "Павлоград" describes an
//!    entity, "Какой почтовый код Павлограда?" asks for one of its
//!    properties, anything else is wrong.
//! 2. **Resolve**: the subject of the question is found, translated into the
//!    graph's working language and looked up as an [`Entity`].
//! 3. **Rank**: for property questions the entity's properties are ranked by
//!    how similar their descriptions are to the question.
//! 4. **Answer**: the description or the best property's values, translated
//!    back into the language the caller asked for.
//!
//! [`QaService::ask`] wraps the pipeline, memoizes its responses and turns
//! every [`QuestionError`] into a localized message:
//!
//! ```
//! use dialog_qa::{
//!     IdentityTranslator, KnowledgeGraph, LookupError, PropertyMap, QaService, SearchHit,
//! };
//!
//! struct Empty;
//!
//! impl KnowledgeGraph for Empty {
//!     fn search(&self, _: &str, _: Option<&str>) -> Result<Option<SearchHit>, LookupError> {
//!         Ok(None)
//!     }
//!     fn entity_properties(&self, _: &str, _: &str) -> Result<PropertyMap, LookupError> {
//!         Ok(PropertyMap::new())
//!     }
//!     fn property_description(&self, _: &str) -> Result<String, LookupError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let service = QaService::new(Empty, IdentityTranslator).unwrap();
//! let response = service.ask("Atlantis", "en");
//! assert!(response.is_failure());
//! ```

pub mod cache;
pub mod categorize;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod knowledge;
pub mod message;
pub mod question;
pub mod service;

pub use cache::{Cache, DEFAULT_CAPACITY};
pub use categorize::QuestionCategorizer;
pub use config::QaConfig;
pub use context::Context;
pub use entity::{Entity, Property};
pub use error::{FailureKind, LookupError, QuestionError, ServiceError};
pub use knowledge::{IdentityTranslator, KnowledgeGraph, PropertyMap, SearchHit, Translator};
pub use question::{
    DescribeQuestion, PropertyQuestion, Question, QuestionKind, QuestionText, Subject,
    WrongQuestion,
};
pub use service::{AskResponse, CachedTranslator, QaService};
