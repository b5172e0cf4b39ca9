//! User-facing failure messages.
//!
//! Russian and English texts are built in. For any other language the
//! service translates the English text.

use crate::error::FailureKind;

/// Language of the messages other languages are translated from.
pub const SOURCE_LANGUAGE: &str = "en";

fn russian(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::EntityNotFound => {
            "Указанная сущность не была найдена. Пожалуйста, перефразируйте вопрос!"
        }
        FailureKind::SubjectNotFound => {
            "Указанная сущность не была распознана. Пожалуйста, перефразируйте вопрос!"
        }
        FailureKind::LowAnswerConfidence => {
            "Указанное свойство сущности не было найдено. Пожалуйста, перефразируйте вопрос!"
        }
        FailureKind::UnknownQuestionType => {
            "Тип вопроса не распознан. Спросите о какой-нибудь сущности либо её свойстве."
        }
        FailureKind::EmptyPropertyDescriptions => {
            "Указанная сущность не имеет свойств. Пожалуйста, задайте вопрос о другой сущности."
        }
        FailureKind::CollaboratorUnavailable => {
            "Сервис знаний временно недоступен. Пожалуйста, повторите попытку позже."
        }
    }
}

fn english(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::EntityNotFound => "The entity was not found. Please rephrase the question!",
        FailureKind::SubjectNotFound => {
            "The entity was not recognized. Please rephrase the question!"
        }
        FailureKind::LowAnswerConfidence => {
            "The property of the entity was not found. Please rephrase the question!"
        }
        FailureKind::UnknownQuestionType => {
            "The question type was not recognized. Ask about an entity or one of its properties."
        }
        FailureKind::EmptyPropertyDescriptions => {
            "The entity has no properties. Please ask about another entity."
        }
        FailureKind::CollaboratorUnavailable => {
            "The knowledge service is temporarily unavailable. Please try again later."
        }
    }
}

/// The built-in message for `kind` in `language`, if there is one.
pub fn builtin(kind: FailureKind, language: &str) -> Option<&'static str> {
    match language {
        "ru" => Some(russian(kind)),
        "en" => Some(english(kind)),
        _ => None,
    }
}

/// The message other languages are translated from.
pub fn source(kind: FailureKind) -> &'static str {
    english(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [FailureKind; 6] = [
        FailureKind::SubjectNotFound,
        FailureKind::EntityNotFound,
        FailureKind::EmptyPropertyDescriptions,
        FailureKind::LowAnswerConfidence,
        FailureKind::UnknownQuestionType,
        FailureKind::CollaboratorUnavailable,
    ];

    #[test]
    fn every_kind_has_a_distinct_message_per_builtin_language() {
        for language in ["ru", "en"] {
            let mut messages: Vec<&str> = KINDS
                .iter()
                .filter_map(|kind| builtin(*kind, language))
                .collect();
            assert_eq!(messages.len(), KINDS.len());
            messages.sort();
            messages.dedup();
            assert_eq!(messages.len(), KINDS.len());
        }
    }

    #[test]
    fn other_languages_have_no_builtin_message() {
        assert_eq!(builtin(FailureKind::EntityNotFound, "de"), None);
        assert_eq!(
            source(FailureKind::EntityNotFound),
            builtin(FailureKind::EntityNotFound, SOURCE_LANGUAGE).unwrap_or_default()
        );
    }
}
