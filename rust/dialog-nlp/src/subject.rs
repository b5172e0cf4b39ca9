//! Subject extraction.
//!
//! Factoid questions usually name their subject last: "Какой почтовый код
//! Павлограда", "В каком году родился Авраам Линкольн". The finder takes the
//! trailing noun, or the trailing pair of nouns when the first of the pair is
//! capitalized ("Авраам Линкольн"), and returns its lemma. This is a
//! heuristic; it has no notion of noun phrases.

use std::fmt;
use std::sync::Arc;

use crate::error::NlpError;
use crate::morphology::{Analysis, Morphology, PartOfSpeech, is_capitalized};
use crate::token::split_words;

#[derive(Clone)]
pub struct SubjectFinder {
    morphology: Arc<dyn Morphology>,
}

impl fmt::Debug for SubjectFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectFinder").finish_non_exhaustive()
    }
}

impl SubjectFinder {
    pub fn new(morphology: Arc<dyn Morphology>) -> Self {
        SubjectFinder { morphology }
    }

    /// Find the subject of `text`, lemmatized and lowercase.
    pub fn find(&self, text: &str) -> Result<String, NlpError> {
        let words = split_words(text);
        let analyses = self.morphology.analyze(&words);

        let tagged: Vec<(&str, Analysis)> = words
            .iter()
            .zip(analyses)
            .filter_map(|(word, analysis)| analysis.map(|analysis| (word.as_str(), analysis)))
            .collect();

        let is_noun = |index: usize| tagged[index].1.pos == PartOfSpeech::Noun;

        let subject = match tagged.len() {
            0 => None,
            length if length >= 2
                && is_noun(length - 2)
                && is_noun(length - 1)
                && is_capitalized(tagged[length - 2].0) =>
            {
                Some(format!(
                    "{} {}",
                    tagged[length - 2].1.lemma,
                    tagged[length - 1].1.lemma
                ))
            }
            length if is_noun(length - 1) => Some(tagged[length - 1].1.lemma.clone()),
            _ => None,
        };

        match subject {
            Some(subject) => {
                tracing::debug!(text, subject, "found subject");
                Ok(subject)
            }
            None => Err(NlpError::SubjectNotFound {
                text: text.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::RuleMorphology;
    use pretty_assertions::assert_eq;

    fn find(text: &str) -> Result<String, NlpError> {
        SubjectFinder::new(Arc::new(RuleMorphology::new())).find(text)
    }

    #[test]
    fn it_finds_a_trailing_noun_in_nominative() {
        assert_eq!(find("Какой почтовый код Павлограда?").unwrap(), "павлоград");
        assert_eq!(find("Кто мэр Москвы").unwrap(), "москва");
        assert_eq!(find("Павлоград").unwrap(), "павлоград");
    }

    #[test]
    fn it_keeps_acronyms_whole() {
        assert_eq!(find("Кто президент США?").unwrap(), "сша");
    }

    #[test]
    fn it_restores_dative_names() {
        assert_eq!(find("Сколько лет Путину?").unwrap(), "путин");
    }

    #[test]
    fn it_joins_a_capitalized_noun_pair() {
        assert_eq!(
            find("В каком году родился Авраам Линкольн?").unwrap(),
            "авраам линкольн"
        );
    }

    #[test]
    fn it_does_not_join_lowercase_noun_pairs() {
        assert_eq!(find("Кто мэр Павлограда").unwrap(), "павлоград");
    }

    #[test]
    fn it_fails_without_a_trailing_noun() {
        assert!(matches!(
            find("Что такое быстрый"),
            Err(NlpError::SubjectNotFound { .. })
        ));
        assert!(matches!(find("?"), Err(NlpError::SubjectNotFound { .. })));
        assert!(matches!(find(""), Err(NlpError::SubjectNotFound { .. })));
    }

    #[test]
    fn it_finds_english_subjects() {
        assert_eq!(find("Who is Abraham Lincoln?").unwrap(), "abraham lincoln");
        assert_eq!(find("What is the capital of Germany").unwrap(), "germany");
    }
}
