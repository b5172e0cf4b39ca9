use dialog_nlp::{SimilarityRanker, SubjectFinder, Tokenizer};

use crate::config::QaConfig;
use crate::error::LookupError;
use crate::knowledge::{KnowledgeGraph, Translator};

/// Everything a question needs while it is being answered.
///
/// Owned by the service and lent to one request at a time; nothing in it is
/// mutated while answering.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a QaConfig,
    pub graph: &'a dyn KnowledgeGraph,
    pub translator: &'a dyn Translator,
    /// Question-mode tokenizer.
    pub tokenizer: &'a Tokenizer,
    pub subjects: &'a SubjectFinder,
    pub ranker: &'a SimilarityRanker,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl Context<'_> {
    pub fn working_language(&self) -> &str {
        &self.config.working_language
    }

    /// Translate `text` into `target`. Blank text is returned as is.
    pub fn translate(&self, text: &str, target: &str) -> Result<String, LookupError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        self.translator.translate(text, target)
    }

    /// Translate `text` into the working language of the knowledge graph.
    pub fn to_working_language(&self, text: &str) -> Result<String, LookupError> {
        self.translate(text, self.working_language())
    }

    /// Present `text`, written in the working language, in `language`.
    pub fn localize(&self, text: &str, language: &str) -> Result<String, LookupError> {
        if language == self.working_language() {
            Ok(text.to_string())
        } else {
            self.translate(text, language)
        }
    }
}
