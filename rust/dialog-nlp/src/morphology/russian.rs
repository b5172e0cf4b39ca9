//! Rule-based Russian analyzer.
//!
//! Closed word classes come from a small lexicon. Open classes are guessed
//! from endings: reflexive, infinitive, past and present verb forms, full
//! adjective endings, and nouns for everything else. Capitalized words past
//! the start of a sentence are proper nouns whatever their ending.
//!
//! Noun lemmas only undo the cases that show up around question subjects:
//! the genitive after a noun or a genitive preposition ("мэр Павлограда",
//! "вебсайт у Нью-Йорка"), the prepositional after "в"/"о"/"при", and the
//! dative of masculine names after an age word ("Сколько лет Путину").
//! Acronyms ("США", "ООН") are never declined.

use super::{Analysis, Context, PartOfSpeech, is_capitalized};

const PRONOUNS: &[&str] = &[
    "кто", "что", "кого", "чего", "кому", "чему", "кем", "чем", "ком", "чём", "я", "ты", "он",
    "она", "оно", "мы", "вы", "они", "его", "её", "ее", "их", "него", "неё", "нее", "них", "ему",
    "ей", "им", "нему", "ней", "ним", "меня", "тебя", "себя", "мне", "тебе", "себе", "нас", "вас",
];

const DETERMINERS: &[&str] = &[
    "какой", "какая", "какое", "какие", "какого", "какому", "каком", "каким", "какую", "каких",
    "такой", "такая", "такое", "такие", "такого", "такому", "таком", "таким", "такую", "таких",
    "который", "которая", "которое", "которые", "которого", "которому", "котором", "которым",
    "этот", "эта", "это", "эти", "этого", "этому", "этом", "тот", "та", "то", "те", "чей", "чья",
    "чьё", "чье", "чьи", "весь", "вся", "всё", "все", "свой", "мой", "твой", "наш", "ваш",
];

const PREPOSITIONS: &[&str] = &[
    "в", "во", "на", "у", "о", "об", "обо", "с", "со", "к", "ко", "по", "за", "из", "изо", "от",
    "до", "для", "при", "про", "под", "над", "без", "через", "около", "возле", "после", "перед",
    "между", "среди", "вокруг", "из-за", "из-под",
];

const GENITIVE_PREPOSITIONS: &[&str] = &[
    "у", "из", "изо", "от", "до", "для", "без", "около", "возле", "после", "среди", "вокруг",
    "из-за", "из-под",
];

const LOCATIVE_PREPOSITIONS: &[&str] = &["в", "во", "о", "об", "обо", "при"];

/// Words after which a noun is in the dative: "лет Путину".
const DATIVE_TRIGGERS: &[&str] = &["лет", "год", "года"];

const CONJUNCTIONS: &[&str] = &["и", "а", "но", "или", "либо", "чтобы", "если", "потому", "также", "тоже"];

const PARTICLES: &[&str] = &[
    "да", "же", "ли", "не", "ни", "бы", "ведь", "вот", "лишь", "только", "уж", "разве", "неужели",
];

const INTERROGATIVES: &[&str] = &["где", "когда", "как", "почему", "зачем", "куда", "откуда", "сколько"];

const ADVERBS: &[&str] = &["очень", "сейчас", "здесь", "там", "тогда", "давно", "впервые", "теперь"];

/// Verb forms the ending rules miss.
const VERBS: &[&str] = &["умер", "умерла", "умерло", "умерли", "вырос", "выросла", "есть"];

/// Nouns whose endings look like verb or adjective endings.
const NOUNS: &[&str] = &[
    "канал", "материал", "генерал", "капитал", "финал", "сериал", "идеал", "интервал", "сигнал",
    "гений", "критерий", "сценарий", "комментарий", "гербарий",
];

const REFLEXIVE_ENDINGS: &[&str] = &["ся", "сь"];
const INFINITIVE_ENDINGS: &[&str] = &["ть", "чь"];
const PAST_ENDINGS: &[&str] = &["ил", "ел", "ал", "ял", "ыл", "ул", "ёл"];
const PAST_INFLECTED_ENDINGS: &[&str] = &[
    "ила", "ела", "ала", "яла", "ыла", "ула", "ило", "ело", "ало", "яло", "ыло", "или", "ели",
    "али", "яли", "ыли", "ули",
];
const PRESENT_ENDINGS: &[&str] = &["ает", "яет", "еет", "ует", "ают", "яют", "еют", "уют", "ёт"];
const ADJECTIVE_ENDINGS: &[&str] = &[
    "ый", "ий", "ой", "ая", "яя", "ое", "ее", "ые", "ие", "ого", "его", "ому", "ему", "ым", "ыми",
    "ими", "ую", "юю", "ых", "их",
];
/// Verbal nouns and abstract nouns that share adjective endings.
const NOUN_ENDINGS: &[&str] = &["ние", "тие", "ствие", "ье"];

pub(super) fn analyze(word: &str, context: Context<'_>) -> Option<Analysis> {
    let lower = word.to_lowercase();
    let lower = lower.as_str();

    if !lower.chars().any(char::is_alphabetic) {
        return None;
    }

    let closed = [
        (PRONOUNS, PartOfSpeech::Pronoun),
        (DETERMINERS, PartOfSpeech::Determiner),
        (PREPOSITIONS, PartOfSpeech::Preposition),
        (CONJUNCTIONS, PartOfSpeech::Conjunction),
        (PARTICLES, PartOfSpeech::Particle),
        (INTERROGATIVES, PartOfSpeech::Interrogative),
        (ADVERBS, PartOfSpeech::Adverb),
    ];
    for (lexicon, pos) in closed {
        if lexicon.contains(&lower) {
            return Some(Analysis::new(pos, lower));
        }
    }

    let proper = context.position > 0 && is_capitalized(word);
    let pos = if proper || NOUNS.contains(&lower) {
        PartOfSpeech::Noun
    } else {
        guess_open_class(lower)
    };

    let lemma = match pos {
        PartOfSpeech::Noun => noun_lemma(word, lower, context),
        _ => lower.to_string(),
    };

    Some(Analysis::new(pos, lemma))
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

fn ends_with_any(word: &str, endings: &[&str], min_len: usize) -> bool {
    char_len(word) >= min_len && endings.iter().any(|ending| word.ends_with(ending))
}

fn guess_open_class(word: &str) -> PartOfSpeech {
    if VERBS.contains(&word)
        || ends_with_any(word, REFLEXIVE_ENDINGS, 4)
        || ends_with_any(word, INFINITIVE_ENDINGS, 4)
        || ends_with_any(word, PAST_ENDINGS, 3)
        || ends_with_any(word, PAST_INFLECTED_ENDINGS, 4)
        || ends_with_any(word, PRESENT_ENDINGS, 4)
    {
        return PartOfSpeech::Verb;
    }

    if ends_with_any(word, NOUN_ENDINGS, 4) {
        return PartOfSpeech::Noun;
    }

    if ends_with_any(word, ADJECTIVE_ENDINGS, 4) {
        return PartOfSpeech::Adjective;
    }

    PartOfSpeech::Noun
}

enum Case {
    Nominative,
    Genitive,
    Locative,
    Dative,
}

fn case_from(context: Context<'_>) -> Case {
    let Some((previous, analysis)) = context.previous else {
        return Case::Nominative;
    };
    let lower = previous.to_lowercase();
    match analysis.pos {
        PartOfSpeech::Noun if DATIVE_TRIGGERS.contains(&lower.as_str()) => Case::Dative,
        // "мэр Павлограда", but not "Авраам Линкольн"
        PartOfSpeech::Noun if !is_capitalized(previous) => Case::Genitive,
        PartOfSpeech::Preposition if GENITIVE_PREPOSITIONS.contains(&lower.as_str()) => {
            Case::Genitive
        }
        PartOfSpeech::Preposition if LOCATIVE_PREPOSITIONS.contains(&lower.as_str()) => {
            Case::Locative
        }
        _ => Case::Nominative,
    }
}

fn is_vowel(ch: char) -> bool {
    "аеёиоуыэюя".contains(ch)
}

/// Two or more letters, all uppercase: "США", "ООН".
fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|ch| ch.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|ch| ch.is_uppercase())
}

fn noun_lemma(surface: &str, word: &str, context: Context<'_>) -> String {
    if is_acronym(surface) {
        return word.to_string();
    }
    match case_from(context) {
        Case::Nominative => word.to_string(),
        Case::Genitive => genitive_to_nominative(word),
        Case::Locative => locative_to_nominative(word),
        Case::Dative => dative_to_nominative(word),
    }
}

fn split_last(word: &str) -> Option<(&str, char)> {
    let last = word.chars().last()?;
    Some((&word[..word.len() - last.len_utf8()], last))
}

fn genitive_to_nominative(word: &str) -> String {
    if char_len(word) < 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ии") {
        return format!("{stem}ия");
    }
    let Some((stem, last)) = split_last(word) else {
        return word.to_string();
    };
    let before = stem.chars().last().unwrap_or(' ');
    match last {
        'ы' => format!("{stem}а"),
        'и' if "гкхжшчщ".contains(before) => format!("{stem}а"),
        'я' if !is_vowel(before) => format!("{stem}ь"),
        'а' if !is_vowel(before) => stem.to_string(),
        _ => word.to_string(),
    }
}

fn locative_to_nominative(word: &str) -> String {
    if char_len(word) < 4 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ии") {
        return format!("{stem}ия");
    }
    match split_last(word) {
        Some((stem, 'е')) if stem.chars().last().is_some_and(|ch| !is_vowel(ch)) => {
            stem.to_string()
        }
        _ => word.to_string(),
    }
}

fn dative_to_nominative(word: &str) -> String {
    if char_len(word) < 4 {
        return word.to_string();
    }
    match split_last(word) {
        Some((stem, last)) if stem.chars().last().is_some_and(|ch| !is_vowel(ch)) => match last {
            'у' => stem.to_string(),
            'ю' => format!("{stem}ь"),
            _ => word.to_string(),
        },
        _ => word.to_string(),
    }
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

    fn pos_of(text: &str) -> Vec<PartOfSpeech> {
        analyze_sentence(text)
            .into_iter()
            .map(|analysis| analysis.map(|a| a.pos).unwrap_or(PartOfSpeech::Particle))
            .collect()
    }

    fn lemmas_of(text: &str) -> Vec<String> {
        analyze_sentence(text)
            .into_iter()
            .flatten()
            .map(|analysis| analysis.lemma)
            .collect()
    }

    #[test]
    fn it_tags_question_words_as_closed_classes() {
        use PartOfSpeech::*;
        assert_eq!(pos_of("Кто такой Линкольн"), vec![Pronoun, Determiner, Noun]);
        assert_eq!(pos_of("Где родился Ленин"), vec![Interrogative, Verb, Noun]);
    }

    #[test]
    fn it_recognizes_verb_forms() {
        use PartOfSpeech::*;
        assert_eq!(
            pos_of("родился был повлиял находится жить живёт умер"),
            vec![Verb, Verb, Verb, Verb, Verb, Verb, Verb]
        );
    }

    #[test]
    fn it_recognizes_adjectives_but_not_verbal_nouns() {
        use PartOfSpeech::*;
        assert_eq!(
            pos_of("почтовый научным быстрый население"),
            vec![Adjective, Adjective, Adjective, Noun]
        );
    }

    #[test]
    fn capitalized_words_inside_a_sentence_are_nouns() {
        use PartOfSpeech::*;
        assert_eq!(pos_of("на кого повлиял Толстой"), vec![Preposition, Pronoun, Verb, Noun]);
    }

    #[test]
    fn it_restores_nominative_after_a_noun() {
        assert_eq!(lemmas_of("мэр Павлограда"), vec!["мэр", "павлоград"]);
        assert_eq!(lemmas_of("руководитель Тьюринга"), vec!["руководитель", "тьюринг"]);
        assert_eq!(lemmas_of("мэр Москвы"), vec!["мэр", "москва"]);
        assert_eq!(lemmas_of("столица Германии"), vec!["столица", "германия"]);
    }

    #[test]
    fn it_restores_nominative_after_a_genitive_preposition() {
        assert_eq!(lemmas_of("у Нью-Йорка"), vec!["у", "нью-йорк"]);
    }

    #[test]
    fn it_restores_nominative_after_a_locative_preposition() {
        assert_eq!(lemmas_of("в Берлине"), vec!["в", "берлин"]);
    }

    #[test]
    fn it_keeps_name_pairs_in_nominative() {
        assert_eq!(lemmas_of("Авраам Линкольн"), vec!["авраам", "линкольн"]);
        assert_eq!(lemmas_of("Анна Каренина"), vec!["анна", "каренина"]);
    }

    #[test]
    fn it_restores_nominative_after_an_age_word() {
        assert_eq!(lemmas_of("лет Путину"), vec!["лет", "путин"]);
        assert_eq!(lemmas_of("лет Игорю"), vec!["лет", "игорь"]);
    }

    #[test]
    fn it_never_declines_acronyms() {
        assert_eq!(lemmas_of("президент США"), vec!["президент", "сша"]);
        assert_eq!(lemmas_of("в ООН"), vec!["в", "оон"]);
        assert_eq!(lemmas_of("мэр Павлограда"), vec!["мэр", "павлоград"]);
    }

    #[test]
    fn it_keeps_nominative_subjects_after_verbs() {
        assert_eq!(lemmas_of("находится Москва"), vec!["находится", "москва"]);
    }
}
