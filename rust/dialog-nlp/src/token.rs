//! Tokenization: turning question and property text into normalized tokens.
//!
//! A [`Tokenizer`] runs a fixed pipeline over its input:
//!
//! ```text
//! text ─► split + lowercase ─► substitute ─► punctuation ─► tag, keep content
//!      ─► lemmas ─► blacklist ─► substitute ─► dedupe (question mode only)
//! ```
//!
//! Substitution happens twice. The first pass rewrites surface forms before
//! tagging ("who" → "name", "born" → "birth date") so that the tagger sees
//! words it can keep; the second pass catches words that only reach a
//! dictionary form after lemmatization ("heights" → "height" → "height
//! elevation").
//!
//! Questions and property descriptions are tokenized differently. Question
//! mode carries a synonym dictionary that maps question words onto the
//! vocabulary DBpedia property names use, and deduplicates its output.
//! Property mode has no dictionary and keeps repeated words.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::morphology::Morphology;

/// Characters deleted outright.
pub const PUNCTUATION_REMOVE: &str = "·：✔®№&▪-–—’◦…∙●“”•«»\"#'*+<=>?@^`{|}~";

/// Characters treated as word separators.
pub const PUNCTUATION_SEPARATE: &str = ",‚![]()/\\.;:_%$…";

const QUESTION_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("who", "name"),
    ("whom", "name"),
    ("whose", "name"),
    ("where", "country"),
    ("why", "reason"),
    ("when", "date"),
    ("site", "website"),
    ("mayor", "leader"),
    ("height", "height elevation"),
    ("supervisor", "doctoral advisor"),
    ("born", "birth date"),
    ("birthplace", "birth place"),
    ("population", "population total"),
    ("founded", "founded established"),
    ("humidity", "humidity precipitation"),
    ("description", "description abstract"),
];

/// Lemmas that carry no meaning for property matching.
const BLACKLIST: &[&str] = &["be", "do"];

/// Which kind of text a [`Tokenizer`] is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerMode {
    Question,
    Property,
}

/// Split text into words and standalone punctuation marks.
///
/// Letters and digits form words; a hyphen or apostrophe between two of them
/// stays inside the word ("Нью-Йорк", "o'clock"). Every other non-space
/// character becomes a token of its own, so "Павлограда?" yields
/// `["Павлограда", "?"]`.
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_alphanumeric() {
            current.push(ch);
            continue;
        }

        let joins = matches!(ch, '-' | '\'' | '’')
            && !current.is_empty()
            && chars.peek().is_some_and(|next| next.is_alphanumeric());
        if joins {
            current.push(ch);
            continue;
        }

        if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        if !ch.is_whitespace() {
            words.push(ch.to_string());
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Normalizes text into content-word lemmas.
#[derive(Clone)]
pub struct Tokenizer {
    mode: TokenizerMode,
    morphology: Arc<dyn Morphology>,
    substitutions: HashMap<String, Vec<String>>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("mode", &self.mode)
            .field("substitutions", &self.substitutions.len())
            .finish()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the built-in dictionary for `mode`.
    pub fn new(mode: TokenizerMode, morphology: Arc<dyn Morphology>) -> Self {
        let dictionary: &[(&str, &str)] = match mode {
            TokenizerMode::Question => QUESTION_SUBSTITUTIONS,
            TokenizerMode::Property => &[],
        };

        Tokenizer {
            mode,
            morphology,
            substitutions: HashMap::new(),
        }
        .with_substitutions(dictionary.iter().copied())
    }

    pub fn question(morphology: Arc<dyn Morphology>) -> Self {
        Self::new(TokenizerMode::Question, morphology)
    }

    pub fn property(morphology: Arc<dyn Morphology>) -> Self {
        Self::new(TokenizerMode::Property, morphology)
    }

    /// Replace the substitution dictionary.
    ///
    /// Each replacement is split on whitespace, so one word may expand into
    /// several tokens.
    pub fn with_substitutions<W, R>(mut self, entries: impl IntoIterator<Item = (W, R)>) -> Self
    where
        W: AsRef<str>,
        R: AsRef<str>,
    {
        self.substitutions = entries
            .into_iter()
            .map(|(word, replacement)| {
                let replacement = replacement
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect();
                (word.as_ref().to_lowercase(), replacement)
            })
            .collect();
        self
    }

    pub fn mode(&self) -> TokenizerMode {
        self.mode
    }

    /// Run the full pipeline over `text`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let words = split_words(&text.to_lowercase());
        let words = self.substitute(words);
        let words = handle_punctuation(&words);

        let lemmas = self
            .morphology
            .analyze(&words)
            .into_iter()
            .flatten()
            .filter(|analysis| analysis.pos.is_content())
            .map(|analysis| analysis.lemma)
            .filter(|lemma| !BLACKLIST.contains(&lemma.as_str()))
            .collect();

        let tokens = self.substitute(lemmas);
        let tokens = match self.mode {
            TokenizerMode::Question => unique(tokens),
            TokenizerMode::Property => tokens,
        };

        tracing::trace!(mode = ?self.mode, text, ?tokens, "tokenized");
        tokens
    }

    fn substitute(&self, words: Vec<String>) -> Vec<String> {
        let mut substituted = Vec::with_capacity(words.len());
        for word in words {
            match self.substitutions.get(&word) {
                Some(replacement) => substituted.extend(replacement.iter().cloned()),
                None => substituted.push(word),
            }
        }
        substituted
    }
}

fn handle_punctuation(words: &[String]) -> Vec<String> {
    let mut cleaned = String::new();
    for word in words {
        for ch in word.chars() {
            if PUNCTUATION_SEPARATE.contains(ch) {
                cleaned.push(' ');
            } else if !PUNCTUATION_REMOVE.contains(ch) {
                cleaned.push(ch);
            }
        }
        cleaned.push(' ');
    }
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Drop repeated tokens, keeping the first occurrence.
pub fn unique(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
