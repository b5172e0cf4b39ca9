use dialog_nlp::{NlpError, Pattern, PatternMatcher};

use crate::context::Context;
use crate::error::QuestionError;
use crate::question::{Question, QuestionKind};

/// Picks the kind of a question by its patterns and builds it.
///
/// Kinds are tried in [`QuestionKind::ALL`] order and the first one with a
/// matching pattern wins, so a question that fits several kinds ("Кто такой
/// Линкольн" fits both Describe and Property) goes to the earliest. The
/// Wrong kind matches everything.
#[derive(Debug, Clone)]
pub struct QuestionCategorizer {
    matcher: PatternMatcher,
    kinds: Vec<(QuestionKind, Vec<Pattern>)>,
}

impl QuestionCategorizer {
    pub fn new(matcher: PatternMatcher) -> Result<Self, NlpError> {
        let mut kinds = Vec::with_capacity(QuestionKind::ALL.len());
        for kind in QuestionKind::ALL {
            let patterns = kind
                .patterns()
                .iter()
                .map(|pattern| Pattern::new(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            kinds.push((kind, patterns));
        }

        Ok(QuestionCategorizer { matcher, kinds })
    }

    /// Every kind with at least one matching pattern, in priority order.
    pub fn matching_kinds(&self, text: &str) -> Vec<QuestionKind> {
        self.kinds
            .iter()
            .filter(|(_, patterns)| {
                patterns
                    .iter()
                    .any(|pattern| self.matcher.matches(text, pattern))
            })
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// The kind of `text`.
    pub fn classify(&self, text: &str) -> QuestionKind {
        let text = capitalize_first(text.trim());
        self.kinds
            .iter()
            .find(|(_, patterns)| {
                patterns
                    .iter()
                    .any(|pattern| self.matcher.matches(&text, pattern))
            })
            .map(|(kind, _)| *kind)
            .unwrap_or(QuestionKind::Wrong)
    }

    /// Classify `text` and build the question.
    pub fn categorize(&self, context: &Context<'_>, text: &str) -> Result<Question, QuestionError> {
        let kind = self.classify(text);
        tracing::debug!(text, ?kind, "categorized question");
        kind.build(context, &capitalize_first(text.trim()))
    }
}

/// Uppercase the first character of `text`.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_nlp::RuleMorphology;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn categorizer() -> QuestionCategorizer {
        QuestionCategorizer::new(PatternMatcher::new(Arc::new(RuleMorphology::new())))
            .expect("built-in patterns compile")
    }

    #[test]
    fn it_capitalizes_the_first_letter_only() {
        assert_eq!(capitalize_first("павлоград"), "Павлоград");
        assert_eq!(capitalize_first("кто такой линкольн"), "Кто такой линкольн");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn bare_nouns_are_describe_questions() {
        let categorizer = categorizer();
        assert_eq!(categorizer.classify("Павлоград"), QuestionKind::Describe);
        assert_eq!(categorizer.classify(" павлоград? "), QuestionKind::Describe);
        assert_eq!(categorizer.classify("Что такое Киев?"), QuestionKind::Describe);
    }

    #[test]
    fn questions_ending_in_a_noun_are_property_questions() {
        let categorizer = categorizer();
        assert_eq!(
            categorizer.classify("Какой почтовый код Павлограда?"),
            QuestionKind::Property
        );
        assert_eq!(categorizer.classify("Кто мэр Павлограда?"), QuestionKind::Property);
        assert_eq!(
            categorizer.classify("В каком году родился Авраам Линкольн?"),
            QuestionKind::Property
        );
    }

    #[test]
    fn everything_else_is_wrong() {
        let categorizer = categorizer();
        assert_eq!(categorizer.classify("Павлоград а"), QuestionKind::Wrong);
        assert_eq!(categorizer.classify("Что такое быстрый"), QuestionKind::Wrong);
        assert_eq!(categorizer.classify(""), QuestionKind::Wrong);
        assert_eq!(categorizer.classify("?!"), QuestionKind::Wrong);
    }

    #[test]
    fn ties_resolve_to_the_first_declared_kind() {
        let categorizer = categorizer();
        assert_eq!(
            categorizer.matching_kinds("Кто такой Линкольн"),
            vec![
                QuestionKind::Describe,
                QuestionKind::Property,
                QuestionKind::Wrong
            ]
        );
        assert_eq!(categorizer.classify("Кто такой Линкольн"), QuestionKind::Describe);
    }

    #[test]
    fn every_input_gets_exactly_one_kind() {
        let categorizer = categorizer();
        for text in ["", "1940", "Как дела?", "Павлоград", "мэр", "Who is Lincoln?"] {
            let kinds = categorizer.matching_kinds(text);
            assert!(kinds.contains(&QuestionKind::Wrong));
            assert_eq!(categorizer.classify(text), kinds[0]);
        }
    }

    const NOUNS: &[&str] = &["Павлоград", "Москва", "Линкольн", "мэр", "код"];

    /// Words that are never nouns and never start a describe pattern.
    const LEADING: &[&str] = &[
        "какой", "кто", "где", "когда", "родился", "почтовый", "у", "очень",
    ];

    const VOCABULARY: &[&str] = &[
        "Павлоград", "мэр", "кто", "такой", "что", "такое", "какой", "родился", "быстрый", "в",
        "who", "is", "Lincoln", "?", "1940",
    ];

    proptest! {
        #[test]
        fn a_bare_noun_is_a_describe_question(noun in prop::sample::select(NOUNS)) {
            prop_assert_eq!(categorizer().classify(noun), QuestionKind::Describe);
        }

        #[test]
        fn a_noun_after_other_words_is_a_property_question(
            leading in prop::collection::vec(prop::sample::select(LEADING), 1..4),
            noun in prop::sample::select(NOUNS),
        ) {
            let text = format!("{} {noun}?", leading.join(" "));
            prop_assert_eq!(categorizer().classify(&text), QuestionKind::Property);
        }

        #[test]
        fn any_input_gets_the_first_matching_kind(
            words in prop::collection::vec(prop::sample::select(VOCABULARY), 0..6)
        ) {
            let categorizer = categorizer();
            let text = words.join(" ");
            let kinds = categorizer.matching_kinds(&capitalize_first(text.trim()));
            prop_assert!(kinds.contains(&QuestionKind::Wrong));
            prop_assert_eq!(categorizer.classify(&text), kinds[0]);
        }
    }
}
