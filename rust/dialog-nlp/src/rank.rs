//! Similarity ranking of property descriptions against a question.
//!
//! The ranker fits a TF-IDF model on the property descriptions and projects
//! the question into the same space:
//!
//! - descriptions are tokenized in property mode, the question in question
//!   mode, and the excluded tokens (the subject of the question) are removed
//!   from both before any n-grams are built;
//! - terms are word n-grams of length 1 to 3;
//! - term frequency is sublinear, `1 + ln(tf)`;
//! - inverse document frequency is smoothed, `ln((1 + n) / (1 + df)) + 1`;
//! - every vector is L2-normalized, so the dot product is the cosine.
//!
//! Only description n-grams make up the vocabulary. A question term that no
//! description contains contributes nothing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::morphology::Morphology;
use crate::score::Confidence;
use crate::token::Tokenizer;

const DEFAULT_MAX_NGRAM: usize = 3;
const LOGGED_CANDIDATES: usize = 5;

/// The outcome of ranking a set of descriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Index of the best description; the lowest index wins ties.
    pub best: usize,
    /// Cosine similarity of the best description.
    pub confidence: Confidence,
    /// Cosine similarity of every description, in input order.
    pub scores: Vec<f64>,
}

/// Build the word n-grams of `tokens` for every length in `1..=max`.
pub fn ngrams(tokens: &[String], max: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for length in 1..=max {
        terms.extend(tokens.windows(length).map(|window| window.join(" ")));
    }
    terms
}

type SparseVector = HashMap<usize, f64>;

/// A TF-IDF vocabulary fitted on a set of documents.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    max_ngram: usize,
}

impl TfidfModel {
    /// Fit on tokenized documents. `None` when no document yields a term.
    pub fn fit(documents: &[Vec<String>], max_ngram: usize) -> Option<Self> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let terms: HashSet<String> = ngrams(document, max_ngram).into_iter().collect();
            for term in terms {
                let next = vocabulary.len();
                let index = *vocabulary.entry(term).or_insert(next);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[index] += 1;
            }
        }

        if vocabulary.is_empty() {
            return None;
        }

        let total = documents.len() as f64;
        let idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + total) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Some(TfidfModel {
            vocabulary,
            idf,
            max_ngram,
        })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project tokens into the fitted space. Unknown terms are ignored.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for term in ngrams(tokens, self.max_ngram) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_default() += 1;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, (1.0 + (tf as f64).ln()) * self.idf[index]))
            .collect();

        let norm = vector.values().map(|weight| weight * weight).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.values_mut().for_each(|weight| *weight /= norm);
        }
        vector
    }
}

fn cosine(left: &SparseVector, right: &SparseVector) -> f64 {
    let (small, large) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    small
        .iter()
        .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
        .sum()
}

/// Picks the property description closest to a question.
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    question: Tokenizer,
    property: Tokenizer,
    max_ngram: usize,
}

impl SimilarityRanker {
    /// A ranker with the built-in question and property tokenizers.
    pub fn new(morphology: Arc<dyn Morphology>) -> Self {
        Self::with_tokenizers(
            Tokenizer::question(morphology.clone()),
            Tokenizer::property(morphology),
        )
    }

    pub fn with_tokenizers(question: Tokenizer, property: Tokenizer) -> Self {
        SimilarityRanker {
            question,
            property,
            max_ngram: DEFAULT_MAX_NGRAM,
        }
    }

    pub fn with_max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram.max(1);
        self
    }

    /// Rank `descriptions` by similarity to `question`.
    ///
    /// Returns `None` when there are no descriptions or none of them has a
    /// token left after exclusion.
    pub fn rank<S: AsRef<str>>(
        &self,
        question: &str,
        excluded: &[String],
        descriptions: &[S],
    ) -> Option<Ranking> {
        if descriptions.is_empty() {
            return None;
        }

        let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
        let keep = |tokens: Vec<String>| -> Vec<String> {
            tokens
                .into_iter()
                .filter(|token| !excluded.contains(token.as_str()))
                .collect()
        };

        let documents: Vec<Vec<String>> = descriptions
            .iter()
            .map(|description| keep(self.property.tokenize(description.as_ref())))
            .collect();

        let Some(model) = TfidfModel::fit(&documents, self.max_ngram) else {
            tracing::debug!(question, "no rankable terms in property descriptions");
            return None;
        };

        let query = model.transform(&keep(self.question.tokenize(question)));
        let scores: Vec<f64> = documents
            .iter()
            .map(|document| cosine(&query, &model.transform(document)))
            .collect();

        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            let mut order: Vec<usize> = (0..scores.len()).collect();
            order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));
            for index in order.into_iter().take(LOGGED_CANDIDATES) {
                tracing::debug!(
                    index,
                    score = scores[index],
                    description = descriptions[index].as_ref(),
                    "candidate property"
                );
            }
        }

        Some(Ranking {
            best,
            confidence: Confidence::new(scores[best]),
            scores,
        })
    }
}
