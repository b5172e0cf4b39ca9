//! Rule-based English analyzer.
//!
//! Closed classes come from a lexicon; `-ly` words are adverbs, `-ing`/`-ed`
//! words are verbs, a handful of derivational suffixes mark adjectives and
//! everything else is a noun. Lemmas strip inflection with the usual suffix
//! rules plus short irregular tables.

use super::{Analysis, Context, PartOfSpeech, is_capitalized};

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "who", "whom", "whose", "what",
    "which", "whoever", "whatever", "there",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about", "as",
    "than", "through", "over", "under", "between", "after", "before", "during", "without",
    "within", "per", "via", "since", "until", "upon", "against", "among", "around", "near",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "whether",
];

const INTERROGATIVES: &[&str] = &["how", "where", "when", "why"];

const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must",
];

const AUXILIARIES: &[(&str, &str)] = &[
    ("be", "be"),
    ("is", "be"),
    ("am", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("do", "do"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("have", "have"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "too", "only", "just", "often", "never", "always", "here", "now",
    "then", "again", "still", "already", "ever",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("made", "make"),
    ("went", "go"),
    ("gone", "go"),
    ("known", "know"),
    ("knew", "know"),
    ("died", "die"),
    ("led", "lead"),
    ("wrote", "write"),
    ("written", "write"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("became", "become"),
    ("began", "begin"),
    ("begun", "begin"),
    ("won", "win"),
    ("built", "build"),
    ("held", "hold"),
    ("taught", "teach"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "al", "ic", "ive", "ous", "ful", "less", "able", "ible", "ary", "ish",
];

/// Stem endings after which a stripped `-ed`/`-ing` lost a silent `e`.
/// The flag requires a consonant before the ending ("refin-" but not "join-").
const SILENT_E_ENDINGS: &[(&str, bool)] = &[
    ("at", false),
    ("iz", false),
    ("yz", false),
    ("ur", false),
    ("c", false),
    ("v", false),
    ("u", false),
    ("os", false),
    ("us", false),
    ("as", false),
    ("ib", false),
    ("in", true),
    ("ar", true),
    ("id", true),
];

fn lookup<'a>(table: &'a [(&str, &str)], word: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| *lemma)
}

pub(super) fn analyze(word: &str, context: Context<'_>) -> Option<Analysis> {
    let lower = word.to_lowercase();
    let lower = lower.as_str();

    if !lower.chars().any(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }

    if let Some(lemma) = lookup(AUXILIARIES, lower) {
        return Some(Analysis::new(PartOfSpeech::Auxiliary, lemma));
    }

    let closed = [
        (DETERMINERS, PartOfSpeech::Determiner),
        (PRONOUNS, PartOfSpeech::Pronoun),
        (PREPOSITIONS, PartOfSpeech::Preposition),
        (CONJUNCTIONS, PartOfSpeech::Conjunction),
        (INTERROGATIVES, PartOfSpeech::Interrogative),
        (MODALS, PartOfSpeech::Modal),
        (ADVERBS, PartOfSpeech::Adverb),
    ];
    for (lexicon, pos) in closed {
        if lexicon.contains(&lower) {
            return Some(Analysis::new(pos, lower));
        }
    }

    // Proper nouns keep their surface form: "Paris", "Athens".
    if context.position > 0 && is_capitalized(word) {
        return Some(Analysis::new(PartOfSpeech::Noun, lower));
    }

    if let Some(lemma) = lookup(IRREGULAR_VERBS, lower) {
        return Some(Analysis::new(PartOfSpeech::Verb, lemma));
    }

    let length = lower.len();
    let analysis = if length > 4 && lower.ends_with("ly") {
        Analysis::new(PartOfSpeech::Adverb, lower)
    } else if (length > 5 && lower.ends_with("ing")) || (length > 4 && lower.ends_with("ed")) {
        Analysis::new(PartOfSpeech::Verb, verb_lemma(lower))
    } else if length > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        Analysis::new(PartOfSpeech::Adjective, lower)
    } else {
        Analysis::new(PartOfSpeech::Noun, noun_lemma(lower))
    };

    Some(analysis)
}

fn noun_lemma(word: &str) -> String {
    if let Some(lemma) = lookup(IRREGULAR_NOUNS, word) {
        return lemma.to_string();
    }
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.len() > 1) {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if ["ss", "us", "is"].iter().any(|ending| word.ends_with(ending)) {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn is_vowel(ch: u8) -> bool {
    matches!(ch, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn verb_lemma(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        return if stem.len() == 1 {
            format!("{stem}ie")
        } else {
            format!("{stem}y")
        };
    }
    if let Some(stem) = word.strip_suffix("eed") {
        return format!("{stem}ee");
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return restore_stem(stem);
    }
    if let Some(stem) = word.strip_suffix("ed") {
        return restore_stem(stem);
    }
    word.to_string()
}

/// Undo consonant doubling or put back a silent `e` after stripping a suffix.
fn restore_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let length = bytes.len();
    if length < 2 {
        return stem.to_string();
    }

    let last = bytes[length - 1];
    let doubled = last == bytes[length - 2] && last.is_ascii_alphabetic();
    if doubled && !is_vowel(last) && !matches!(last, b'l' | b's' | b'z' | b'f') {
        return stem[..length - 1].to_string();
    }

    for (ending, needs_consonant) in SILENT_E_ENDINGS {
        if !stem.ends_with(ending) {
            continue;
        }
        let before = length.checked_sub(ending.len() + 1).map(|index| bytes[index]);
        if *needs_consonant && before.is_none_or(is_vowel) {
            continue;
        }
        return format!("{stem}e");
    }

    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::super::{Morphology, RuleMorphology};
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyze_sentence(text: &str) -> Vec<Option<Analysis>> {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        RuleMorphology.analyze(&words)
    }

    fn lemma(word: &str) -> String {
        analyze_sentence(word)
            .pop()
            .flatten()
            .map(|analysis| analysis.lemma)
            .unwrap_or_default()
    }

    #[test]
    fn it_reduces_auxiliaries_to_their_lemma() {
        for (form, expected) in [("is", "be"), ("were", "be"), ("does", "do"), ("has", "have")] {
            let analysis = analyze_sentence(form).pop().flatten();
            assert_eq!(
                analysis,
                Some(Analysis::new(PartOfSpeech::Auxiliary, expected))
            );
        }
    }

    #[test]
    fn it_lemmatizes_plural_nouns() {
        assert_eq!(lemma("concepts"), "concept");
        assert_eq!(lemma("questions"), "question");
        assert_eq!(lemma("cities"), "city");
        assert_eq!(lemma("churches"), "church");
        assert_eq!(lemma("census"), "census");
        assert_eq!(lemma("people"), "person");
    }

    #[test]
    fn it_lemmatizes_verb_forms() {
        assert_eq!(lemma("answering"), "answer");
        assert_eq!(lemma("located"), "locate");
        assert_eq!(lemma("refined"), "refine");
        assert_eq!(lemma("joined"), "join");
        assert_eq!(lemma("stopped"), "stop");
        assert_eq!(lemma("called"), "call");
        assert_eq!(lemma("studied"), "study");
        assert_eq!(lemma("died"), "die");
        assert_eq!(lemma("influenced"), "influence");
        assert_eq!(lemma("written"), "write");
    }

    #[test]
    fn it_keeps_adjectives_and_proper_nouns() {
        assert_eq!(lemma("postal"), "postal");
        assert_eq!(lemma("semantic"), "semantic");
        let analyses = analyze_sentence("capital of Athens");
        assert_eq!(
            analyses[2],
            Some(Analysis::new(PartOfSpeech::Noun, "athens"))
        );
    }

    #[test]
    fn it_drops_question_adverbs_from_content() {
        let analysis = analyze_sentence("how").pop().flatten();
        assert_eq!(
            analysis.map(|a| a.pos.is_content()),
            Some(false)
        );
    }
}
