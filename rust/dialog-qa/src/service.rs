//! The question answering service.
//!
//! [`QaService::ask`] is the one entry point: it takes a question and the
//! language to answer in and always produces an [`AskResponse`]. Failures
//! become a localized message carried in both `answer` and `error`, with the
//! failure kind alongside in `kind`.
//!
//! Responses are memoized per `(question, language)`. A response is stored
//! only when asking again could not change it: transient collaborator
//! failures, and failure messages that could not be translated, are
//! returned without being stored.

use std::sync::Arc;

use dialog_nlp::{Morphology, PatternMatcher, RuleMorphology, SimilarityRanker, SubjectFinder, Tokenizer};
use serde::{Deserialize, Serialize};

use crate::cache::Cache;
use crate::categorize::QuestionCategorizer;
use crate::config::QaConfig;
use crate::context::Context;
use crate::error::{FailureKind, LookupError, QuestionError, ServiceError};
use crate::knowledge::{KnowledgeGraph, Translator};
use crate::message;

/// What `ask` answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// The answer, or a message explaining why there is none.
    pub answer: String,
    /// Link to a picture of the entity; empty when there is none.
    pub image: String,
    /// The failure message, the same text as `answer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

impl AskResponse {
    pub fn answered(answer: impl Into<String>, image: impl Into<String>) -> Self {
        AskResponse {
            answer: answer.into(),
            image: image.into(),
            error: None,
            kind: None,
        }
    }

    pub fn failed(message: impl Into<String>, kind: FailureKind) -> Self {
        let message = message.into();
        AskResponse {
            answer: message.clone(),
            image: String::new(),
            error: Some(message),
            kind: Some(kind),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// A [`Translator`] that remembers its translations.
pub struct CachedTranslator<T> {
    inner: T,
    cache: Cache<(String, String), String>,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T, capacity: usize) -> Result<Self, ServiceError> {
        Ok(CachedTranslator {
            inner,
            cache: Cache::new(capacity)?,
        })
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Number of remembered translations.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<T: Translator> Translator for CachedTranslator<T> {
    fn translate(&self, text: &str, target: &str) -> Result<String, LookupError> {
        self.cache
            .get_or_try_insert_with((text.to_string(), target.to_string()), |(text, target)| {
                self.inner.translate(text, target)
            })
    }
}

/// Answers natural-language questions about the entities of a knowledge
/// graph.
pub struct QaService<K, T> {
    config: QaConfig,
    graph: K,
    translator: CachedTranslator<T>,
    categorizer: QuestionCategorizer,
    tokenizer: Tokenizer,
    subjects: SubjectFinder,
    ranker: SimilarityRanker,
    answers: Cache<(String, String), AskResponse>,
}

impl<K, T> std::fmt::Debug for QaService<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QaService")
            .field("config", &self.config)
            .field("answers", &self.answers)
            .finish_non_exhaustive()
    }
}

impl<K, T> QaService<K, T>
where
    K: KnowledgeGraph,
    T: Translator,
{
    /// A service with the default configuration.
    pub fn new(graph: K, translator: T) -> Result<Self, ServiceError> {
        Self::with_config(QaConfig::default(), graph, translator)
    }

    pub fn with_config(config: QaConfig, graph: K, translator: T) -> Result<Self, ServiceError> {
        Self::with_morphology(config, Arc::new(RuleMorphology::new()), graph, translator)
    }

    /// A service whose text processing uses `morphology`.
    pub fn with_morphology(
        config: QaConfig,
        morphology: Arc<dyn Morphology>,
        graph: K,
        translator: T,
    ) -> Result<Self, ServiceError> {
        let categorizer = QuestionCategorizer::new(PatternMatcher::new(morphology.clone()))?;
        let translator = CachedTranslator::new(translator, config.translation_cache_capacity)?;
        let answers = Cache::new(config.answer_cache_capacity)?;

        Ok(QaService {
            tokenizer: Tokenizer::question(morphology.clone()),
            subjects: SubjectFinder::new(morphology.clone()),
            ranker: SimilarityRanker::new(morphology),
            config,
            graph,
            translator,
            categorizer,
            answers,
        })
    }

    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    pub fn graph(&self) -> &K {
        &self.graph
    }

    pub fn translator(&self) -> &CachedTranslator<T> {
        &self.translator
    }

    pub fn categorizer(&self) -> &QuestionCategorizer {
        &self.categorizer
    }

    /// Number of memoized responses.
    pub fn cached_answers(&self) -> usize {
        self.answers.len()
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            config: &self.config,
            graph: &self.graph,
            translator: &self.translator,
            tokenizer: &self.tokenizer,
            subjects: &self.subjects,
            ranker: &self.ranker,
        }
    }

    /// Answer `question` in `language`.
    pub fn ask(&self, question: &str, language: &str) -> AskResponse {
        let key = (question.to_string(), language.to_string());
        self.answers
            .get_or_try_insert_with(key, |(question, language)| {
                let (response, memoizable) = self.respond(question, language);
                if memoizable { Ok(response) } else { Err(response) }
            })
            .unwrap_or_else(|response| response)
    }

    /// Answer `question` in `language`, keeping failures typed.
    ///
    /// Nothing is memoized on this path.
    pub fn answer(&self, question: &str, language: &str) -> Result<AskResponse, QuestionError> {
        let context = self.context();
        let mut question = self.categorizer.categorize(&context, question)?;
        let answer = question.answer(&context, language)?;
        let image = question.image(&context)?;
        tracing::info!(kind = ?question.kind(), language, "answered question");
        Ok(AskResponse::answered(answer, image))
    }

    fn respond(&self, question: &str, language: &str) -> (AskResponse, bool) {
        match self.answer(question, language) {
            Ok(response) => (response, true),
            Err(error) => {
                let kind = error.kind();
                tracing::warn!(question, language, %error, "question not answered");
                let (message, localized) = self.failure_message(kind, language);
                (
                    AskResponse::failed(message, kind),
                    localized && !kind.is_transient(),
                )
            }
        }
    }

    /// The user-facing message for `kind` in `language`, and whether it is
    /// actually in that language.
    ///
    /// Languages without a built-in message get the English one translated;
    /// when translation fails the English message is used as is.
    pub fn failure_message(&self, kind: FailureKind, language: &str) -> (String, bool) {
        if let Some(text) = message::builtin(kind, language) {
            return (text.to_string(), true);
        }

        let source = message::source(kind);
        match self.translator.translate(source, language) {
            Ok(text) => (text, true),
            Err(error) => {
                tracing::warn!(language, %error, "failure message not translated");
                (source.to_string(), false)
            }
        }
    }
}
