//! Error types for question answering.

use dialog_nlp::{Confidence, NlpError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A collaborator (knowledge graph or translator) could not answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request could not be sent or the service answered with an error
    #[error("Lookup transport failed: {0}")]
    Transport(String),

    /// The service did not answer in time
    #[error("Lookup timed out: {0}")]
    Timeout(String),

    /// The service answered with something that could not be understood
    #[error("Lookup response was malformed: {0}")]
    Malformed(String),
}

/// The ways answering a question can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestionError {
    /// No noun that could name the subject was found in the question
    #[error("No subject found in '{text}'")]
    SubjectNotFound { text: String },

    /// The subject does not resolve to an entity, or the entity has nothing
    /// to describe it with
    #[error("No entity found for '{subject}'")]
    EntityNotFound { subject: String },

    /// The entity has no properties that can be ranked
    #[error("Entity <{uri}> has no property descriptions")]
    EmptyPropertyDescriptions { uri: String },

    /// The best ranked property does not clear the confidence floor
    #[error("Best property <{property}> scored {confidence}, not above {floor}")]
    LowAnswerConfidence {
        property: String,
        confidence: Confidence,
        floor: f64,
    },

    /// The question did not match any known question pattern
    #[error("Question type not recognized: '{text}'")]
    UnknownQuestionType { text: String },

    /// A collaborator failed; retrying later may succeed
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] LookupError),
}

/// The kind of a [`QuestionError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    SubjectNotFound,
    EntityNotFound,
    EmptyPropertyDescriptions,
    LowAnswerConfidence,
    UnknownQuestionType,
    CollaboratorUnavailable,
}

impl FailureKind {
    /// Whether the failure may go away without the question changing.
    pub fn is_transient(&self) -> bool {
        matches!(self, FailureKind::CollaboratorUnavailable)
    }
}

impl QuestionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            QuestionError::SubjectNotFound { .. } => FailureKind::SubjectNotFound,
            QuestionError::EntityNotFound { .. } => FailureKind::EntityNotFound,
            QuestionError::EmptyPropertyDescriptions { .. } => {
                FailureKind::EmptyPropertyDescriptions
            }
            QuestionError::LowAnswerConfidence { .. } => FailureKind::LowAnswerConfidence,
            QuestionError::UnknownQuestionType { .. } => FailureKind::UnknownQuestionType,
            QuestionError::CollaboratorUnavailable(_) => FailureKind::CollaboratorUnavailable,
        }
    }
}

impl From<NlpError> for QuestionError {
    fn from(error: NlpError) -> Self {
        match error {
            NlpError::SubjectNotFound { text } => QuestionError::SubjectNotFound { text },
            // Patterns are compiled when the service is built, never while
            // answering; if one slips through the question is unclassifiable.
            NlpError::InvalidPattern { pattern, .. } => {
                QuestionError::UnknownQuestionType { text: pattern }
            }
        }
    }
}

/// Errors raised while building a [`crate::QaService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid question pattern: {0}")]
    Pattern(#[from] NlpError),

    #[error("Invalid cache capacity {capacity}: {reason}")]
    CacheCapacity { capacity: usize, reason: String },
}
