//! Question patterns and the matcher that checks them.
//!
//! A [`Pattern`] is a template such as `"Кто такой NOUN"` or `"* NOUN"`.
//! Words are literals compared case-insensitively, `NOUN` and `VERB` stand
//! for a run of nouns or verbs, and `*` matches anything, including nothing.
//! Patterns compile once into an anchored regex.
//!
//! Matching a question against a pattern with placeholders first reduces the
//! question to its *shape*: every word is tagged, consecutive nouns (or
//! consecutive verbs) collapse into one placeholder, and all other words
//! stay as lowercase literals.
//!
//! ```text
//! "Какой почтовый код Павлограда?"  ─►  "какой почтовый NOUN"
//! "В каком году родился Авраам Линкольн" ─► "в каком NOUN VERB NOUN"
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::NlpError;
use crate::morphology::Morphology;
use crate::token::split_words;

const PLACEHOLDERS: &[&str] = &["NOUN", "VERB"];
const WILDCARD: char = '*';

/// A compiled question template.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    placeholders: bool,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, NlpError> {
        let mut placeholders = false;
        let mut parts = Vec::new();

        for word in source.split_whitespace() {
            if PLACEHOLDERS.contains(&word) {
                placeholders = true;
                parts.push(word.to_string());
                continue;
            }

            let literal = word
                .to_lowercase()
                .split(WILDCARD)
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("(.*)");
            parts.push(literal);
        }

        let expression = format!("^{}$", parts.join(" "));
        let regex = Regex::new(&expression).map_err(|source_error| NlpError::InvalidPattern {
            pattern: source.to_string(),
            source: source_error,
        })?;

        Ok(Pattern {
            source: source.to_string(),
            regex,
            placeholders,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern mentions `NOUN` or `VERB`.
    pub fn has_placeholders(&self) -> bool {
        self.placeholders
    }

    /// Match an already prepared question form.
    pub fn is_match(&self, form: &str) -> bool {
        self.regex.is_match(form)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Checks questions against [`Pattern`]s.
#[derive(Clone)]
pub struct PatternMatcher {
    morphology: Arc<dyn Morphology>,
}

impl fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternMatcher").finish_non_exhaustive()
    }
}

fn trim_question(question: &str) -> &str {
    question
        .trim()
        .trim_end_matches(|ch: char| ch == '?' || ch == '!' || ch.is_whitespace())
}

impl PatternMatcher {
    pub fn new(morphology: Arc<dyn Morphology>) -> Self {
        PatternMatcher { morphology }
    }

    /// Reduce a question to its shape of literals and placeholders.
    pub fn shape(&self, question: &str) -> String {
        let words = split_words(trim_question(question));
        let analyses = self.morphology.analyze(&words);

        let mut parts: Vec<String> = Vec::with_capacity(words.len());
        let mut last_placeholder: Option<&str> = None;

        for (word, analysis) in words.iter().zip(analyses) {
            match analysis.and_then(|analysis| analysis.pos.placeholder()) {
                Some(placeholder) if last_placeholder == Some(placeholder) => {}
                Some(placeholder) => {
                    parts.push(placeholder.to_string());
                    last_placeholder = Some(placeholder);
                }
                None => {
                    parts.push(word.to_lowercase());
                    last_placeholder = None;
                }
            }
        }

        parts.join(" ")
    }

    /// The question as literal text: lowercase, single-spaced, no trailing
    /// `?` or `!`.
    pub fn normalize(question: &str) -> String {
        trim_question(question)
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn matches(&self, question: &str, pattern: &Pattern) -> bool {
        let form = if pattern.has_placeholders() {
            self.shape(question)
        } else {
            Self::normalize(question)
        };

        let matched = pattern.is_match(&form);
        tracing::trace!(question, %pattern, form, matched, "pattern match");
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::RuleMorphology;
    use pretty_assertions::assert_eq;

    fn matcher() -> PatternMatcher {
        PatternMatcher::new(Arc::new(RuleMorphology::new()))
    }

    fn matches(question: &str, pattern: &str) -> bool {
        let pattern = Pattern::new(pattern).expect("pattern compiles");
        matcher().matches(question, &pattern)
    }

    #[test]
    fn it_shapes_questions() {
        let matcher = matcher();
        assert_eq!(matcher.shape("Какой почтовый код Павлограда?"), "какой почтовый NOUN");
        assert_eq!(
            matcher.shape("В какому году родился Авраам Линкольн?"),
            "в какому NOUN VERB NOUN"
        );
        assert_eq!(matcher.shape(" Павлоград ! "), "NOUN");
    }

    #[test]
    fn describe_patterns_accept_bare_nouns() {
        assert!(matches("Павлоград", "NOUN"));
        assert!(matches("Павлоград?", "NOUN"));
        assert!(matches(" Павлоград ", "NOUN"));
        assert!(matches("Павлоград!", "NOUN"));
    }

    #[test]
    fn describe_patterns_accept_definition_questions() {
        assert!(matches("Кто такой Линкольн", "Кто такой NOUN"));
        assert!(matches("Что такое Киев", "Что такое NOUN"));
        assert!(matches("Who is Lincoln?", "who is NOUN"));
    }

    #[test]
    fn describe_patterns_reject_extra_words() {
        assert!(!matches("Павлоград а", "NOUN"));
        assert!(!matches("А кто такой Линкольн", "Кто такой NOUN"));
        assert!(!matches("Что такое быстрый", "Что такое NOUN"));
    }

    #[test]
    fn property_pattern_accepts_questions_ending_in_a_noun() {
        assert!(matches("Какой почтовый код Павлограда?", "* NOUN"));
        assert!(matches("Какой почтовый код Павлограда ?", "* NOUN"));
        assert!(matches("Какой вебсайт у Нью-Йорка?", "* NOUN"));
        assert!(matches("В какому году родился Авраам Линкольн?", "* NOUN"));
    }

    #[test]
    fn property_pattern_rejects_trailing_non_nouns() {
        assert!(!matches("Какой почтовый код Павлограда да?", "* NOUN"));
        assert!(!matches("В какому году родился быстрый?", "* NOUN"));
    }

    #[test]
    fn wildcard_matches_anything() {
        assert!(matches("", "*"));
        assert!(matches("Как дела?", "*"));
        assert!(matches("Павлоград а", "*"));
    }

    #[test]
    fn literal_patterns_match_normalized_text() {
        assert!(matches("  Hello   World! ", "hello world"));
        assert!(!matches("hello world again", "hello world"));
        assert!(matches("a+b (c)", "a+b (c)"));
    }
}
