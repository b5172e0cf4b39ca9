//! Question variants.
//!
//! Every question is exactly one of three kinds:
//!
//! - [`DescribeQuestion`]: "Кто такой Линкольн", "Павлоград". The answer is
//!   the entity's description.
//! - [`PropertyQuestion`]: "Какой почтовый код Павлограда". The answer is the
//!   values of the entity property most similar to the question.
//! - [`WrongQuestion`]: anything else. It has no answer.
//!
//! Building a question does all the work that can fail on the way to the
//! entity: translation, subject extraction, entity search and, for property
//! questions, ranking. Answering only formats and translates.

use dialog_nlp::Ranking;

use crate::context::Context;
use crate::entity::{Entity, Property};
use crate::error::QuestionError;

/// The closed set of question kinds, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Describe,
    Property,
    Wrong,
}

impl QuestionKind {
    /// Declaration order; the first kind whose patterns match wins.
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Describe,
        QuestionKind::Property,
        QuestionKind::Wrong,
    ];

    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            QuestionKind::Describe => DescribeQuestion::PATTERNS,
            QuestionKind::Property => PropertyQuestion::PATTERNS,
            QuestionKind::Wrong => WrongQuestion::PATTERNS,
        }
    }

    /// Build a question of this kind.
    pub fn build(&self, context: &Context<'_>, text: &str) -> Result<Question, QuestionError> {
        Ok(match self {
            QuestionKind::Describe => Question::Describe(DescribeQuestion::new(context, text)?),
            QuestionKind::Property => Question::Property(PropertyQuestion::new(context, text)?),
            QuestionKind::Wrong => Question::Wrong(WrongQuestion::new(context, text)?),
        })
    }
}

/// The question as asked, in the working language, and as tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionText {
    pub original: String,
    pub translated: String,
    pub tokens: Vec<String>,
}

impl QuestionText {
    fn new(context: &Context<'_>, original: &str) -> Result<Self, QuestionError> {
        let translated = context.to_working_language(original)?;
        let tokens = context.tokenizer.tokenize(&translated);
        tracing::debug!(original, translated, ?tokens, "question text");

        Ok(QuestionText {
            original: original.to_string(),
            translated,
            tokens,
        })
    }
}

/// The subject of a question, as found and as searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub original: String,
    pub translated: String,
}

fn resolve(
    context: &Context<'_>,
    text: &str,
    describe_properties: bool,
) -> Result<(Subject, Entity), QuestionError> {
    let original = context.subjects.find(text)?;
    let translated = context.to_working_language(&original)?;

    let hit = context
        .graph
        .search(&translated, None)?
        .ok_or_else(|| QuestionError::EntityNotFound {
            subject: translated.clone(),
        })?;
    tracing::debug!(subject = %translated, uri = %hit.uri, "resolved subject");

    let entity = Entity::new(hit, describe_properties);
    Ok((
        Subject {
            original,
            translated,
        },
        entity,
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeQuestion {
    pub text: QuestionText,
    pub subject: Subject,
    pub entity: Entity,
}

impl DescribeQuestion {
    pub const PATTERNS: &'static [&'static str] = &[
        "NOUN",
        "кто такой NOUN",
        "кто такая NOUN",
        "что такое NOUN",
        "who is NOUN",
        "what is NOUN",
    ];

    pub fn new(context: &Context<'_>, text: &str) -> Result<Self, QuestionError> {
        let text = QuestionText::new(context, text)?;
        let (subject, entity) = resolve(context, &text.original, false)?;
        Ok(DescribeQuestion {
            text,
            subject,
            entity,
        })
    }

    pub fn answer(&self, context: &Context<'_>, language: &str) -> Result<String, QuestionError> {
        if self.entity.description.is_empty() {
            return Err(QuestionError::EntityNotFound {
                subject: self.subject.translated.clone(),
            });
        }
        Ok(context.localize(&self.entity.description, language)?)
    }

    pub fn image(&mut self, context: &Context<'_>) -> Result<String, QuestionError> {
        Ok(self.entity.image(context.graph)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuestion {
    pub text: QuestionText,
    pub subject: Subject,
    pub entity: Entity,
    /// Tokens of the subject, left out of the ranking.
    pub excluded: Vec<String>,
    pub ranking: Ranking,
}

impl PropertyQuestion {
    pub const PATTERNS: &'static [&'static str] = &["* NOUN"];

    pub fn new(context: &Context<'_>, text: &str) -> Result<Self, QuestionError> {
        let text = QuestionText::new(context, text)?;
        let (subject, mut entity) = resolve(context, &text.original, true)?;
        let excluded = context.tokenizer.tokenize(&subject.translated);

        let properties = entity.properties(context.graph)?;
        let descriptions: Vec<&str> = properties
            .iter()
            .map(|property| property.description.as_str())
            .collect();

        let ranking = context
            .ranker
            .rank(&text.translated, &excluded, &descriptions)
            .ok_or_else(|| QuestionError::EmptyPropertyDescriptions {
                uri: entity.uri.clone(),
            })?;

        if let Some(best) = entity.loaded_properties().get(ranking.best) {
            tracing::debug!(property = %best.uri, confidence = %ranking.confidence, "best property");
        }

        Ok(PropertyQuestion {
            text,
            subject,
            entity,
            excluded,
            ranking,
        })
    }

    /// The property the ranking chose.
    pub fn best_property(&self) -> Option<&Property> {
        self.entity.loaded_properties().get(self.ranking.best)
    }

    pub fn answer(&self, context: &Context<'_>, language: &str) -> Result<String, QuestionError> {
        let property = self
            .best_property()
            .ok_or_else(|| QuestionError::EmptyPropertyDescriptions {
                uri: self.entity.uri.clone(),
            })?;

        let floor = context.config.confidence_floor;
        if !self.ranking.confidence.exceeds(floor) {
            return Err(QuestionError::LowAnswerConfidence {
                property: property.uri.clone(),
                confidence: self.ranking.confidence,
                floor,
            });
        }

        Ok(context.localize(&property.formatted_values(), language)?)
    }

    pub fn image(&mut self, context: &Context<'_>) -> Result<String, QuestionError> {
        Ok(self.entity.image(context.graph)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrongQuestion {
    pub text: QuestionText,
}

impl WrongQuestion {
    pub const PATTERNS: &'static [&'static str] = &["*"];

    pub fn new(context: &Context<'_>, text: &str) -> Result<Self, QuestionError> {
        Ok(WrongQuestion {
            text: QuestionText::new(context, text)?,
        })
    }

    pub fn answer(&self) -> Result<String, QuestionError> {
        Err(QuestionError::UnknownQuestionType {
            text: self.text.original.clone(),
        })
    }
}

/// A categorized question.
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    Describe(DescribeQuestion),
    Property(PropertyQuestion),
    Wrong(WrongQuestion),
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Describe(_) => QuestionKind::Describe,
            Question::Property(_) => QuestionKind::Property,
            Question::Wrong(_) => QuestionKind::Wrong,
        }
    }

    pub fn text(&self) -> &QuestionText {
        match self {
            Question::Describe(question) => &question.text,
            Question::Property(question) => &question.text,
            Question::Wrong(question) => &question.text,
        }
    }

    /// The answer in `language`.
    pub fn answer(&self, context: &Context<'_>, language: &str) -> Result<String, QuestionError> {
        match self {
            Question::Describe(question) => question.answer(context, language),
            Question::Property(question) => question.answer(context, language),
            Question::Wrong(question) => question.answer(),
        }
    }

    /// A picture of the question's entity; empty when there is none.
    pub fn image(&mut self, context: &Context<'_>) -> Result<String, QuestionError> {
        match self {
            Question::Describe(question) => question.image(context),
            Question::Property(question) => question.image(context),
            Question::Wrong(_) => Ok(String::new()),
        }
    }
}
