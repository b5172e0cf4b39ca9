//! Part-of-speech tagging and lemmatization.
//!
//! Every stage of the question pipeline that needs to know what a word *is*
//! goes through the [`Morphology`] trait: the tokenizer keeps content words
//! and replaces them with their lemmas, the pattern matcher collapses runs of
//! nouns and verbs into placeholders, and the subject finder looks for the
//! trailing noun phrase.
//!
//! Tagging works on whole sentences rather than single words so that an
//! analyzer can use the neighbouring words. The shipped [`RuleMorphology`]
//! relies on that to undo Russian case endings ("мэр Павлограда" →
//! "павлоград").
//!
//! ```text
//! words ──► script? ──► Cyrillic ──► russian::analyze
//!                  ├──► Latin    ──► english::analyze
//!                  └──► other    ──► untaggable (None)
//! ```
//!
//! Neither analyzer is a statistical tagger. They are suffix and lexicon
//! rules tuned for short factoid questions; anything smarter can be plugged
//! in by implementing [`Morphology`].

mod english;
mod russian;

use std::fmt;

/// Coarse grammatical category of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    /// Articles, demonstratives and pronominal adjectives ("the", "такой").
    Determiner,
    Preposition,
    Conjunction,
    Particle,
    /// Question adverbs: "how", "where", "где", "когда".
    Interrogative,
    /// Forms of be/do/have.
    Auxiliary,
    Modal,
}

impl PartOfSpeech {
    /// Content classes survive tokenization; everything else is dropped.
    ///
    /// Auxiliaries count as verbs here: they are kept, reduced to their lemma
    /// and then removed by the tokenizer blacklist, which is how a statistical
    /// tagger treats "is" or "does".
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun
                | PartOfSpeech::Verb
                | PartOfSpeech::Adjective
                | PartOfSpeech::Adverb
                | PartOfSpeech::Auxiliary
        )
    }

    /// Placeholder used in question patterns, for the classes that have one.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            PartOfSpeech::Noun => Some("NOUN"),
            PartOfSpeech::Verb => Some("VERB"),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Pronoun => "PRON",
            PartOfSpeech::Determiner => "DET",
            PartOfSpeech::Preposition => "PREP",
            PartOfSpeech::Conjunction => "CONJ",
            PartOfSpeech::Particle => "PRCL",
            PartOfSpeech::Interrogative => "WH",
            PartOfSpeech::Auxiliary => "AUX",
            PartOfSpeech::Modal => "MODAL",
        };
        write!(f, "{label}")
    }
}

/// The result of analyzing one word in its sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub pos: PartOfSpeech,
    /// Lowercase dictionary form.
    pub lemma: String,
}

impl Analysis {
    pub fn new(pos: PartOfSpeech, lemma: impl Into<String>) -> Self {
        Analysis {
            pos,
            lemma: lemma.into(),
        }
    }
}

/// A part-of-speech tagger and lemmatizer.
pub trait Morphology: Send + Sync {
    /// Analyze every word of a sentence, in order.
    ///
    /// The returned vector has the same length as `words`. Words that cannot
    /// be tagged (punctuation, numbers) yield `None`.
    fn analyze(&self, words: &[String]) -> Vec<Option<Analysis>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Cyrillic,
    Latin,
    Other,
}

fn script_of(word: &str) -> Script {
    let mut latin = false;
    for ch in word.chars() {
        if matches!(ch, '\u{0400}'..='\u{04FF}') {
            return Script::Cyrillic;
        }
        if ch.is_ascii_alphabetic() {
            latin = true;
        }
    }
    if latin { Script::Latin } else { Script::Other }
}

/// What an analyzer may know about the word before the current one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context<'a> {
    /// Zero-based position in the sentence.
    pub position: usize,
    /// The previous word that received an analysis, with that analysis.
    pub previous: Option<(&'a str, &'a Analysis)>,
}

/// Rule-based tagger for Russian and English text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleMorphology;

impl RuleMorphology {
    pub fn new() -> Self {
        RuleMorphology
    }
}

impl Morphology for RuleMorphology {
    fn analyze(&self, words: &[String]) -> Vec<Option<Analysis>> {
        let mut analyses: Vec<Option<Analysis>> = Vec::with_capacity(words.len());
        let mut previous: Option<usize> = None;

        for (position, word) in words.iter().enumerate() {
            let context = Context {
                position,
                previous: previous.and_then(|index| {
                    analyses[index]
                        .as_ref()
                        .map(|analysis| (words[index].as_str(), analysis))
                }),
            };

            let analysis = match script_of(word) {
                Script::Cyrillic => russian::analyze(word, context),
                Script::Latin => english::analyze(word, context),
                Script::Other => None,
            };

            if analysis.is_some() {
                previous = Some(position);
            }
            analyses.push(analysis);
        }

        analyses
    }
}

/// True when the word starts with an uppercase letter.
pub(crate) fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
