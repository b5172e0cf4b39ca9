//! # Dialog NLP: question text processing
//!
//! The text layer of the question answering pipeline. Everything here is
//! pure and synchronous: no network access, no shared mutable state.
//!
//! ## Core Ideas
//!
//! - **Morphology is a seam**: every component that needs to know what a
//!   word is asks a [`Morphology`]. The shipped [`RuleMorphology`] tags
//!   Russian and English with lexicons and suffix rules.
//! - **Tokens are lemmas of content words**: a [`Tokenizer`] keeps nouns,
//!   verbs, adjectives and adverbs, maps question words onto the vocabulary
//!   of knowledge-graph property names, and drops everything else.
//! - **Questions have shapes**: a [`PatternMatcher`] collapses noun and verb
//!   runs into placeholders so that one [`Pattern`] covers many questions.
//! - **Properties are ranked, not parsed**: the [`SimilarityRanker`] picks
//!   the property whose description is most similar to the question.
//!
//! ## Architecture
//!
//! ```text
//! question ─► PatternMatcher ─► which kind of question
//!          ─► SubjectFinder  ─► what the question is about
//!          ─► Tokenizer      ─► what is asked about it
//!                               └─► SimilarityRanker ─► best property
//! ```

pub mod error;
pub mod morphology;
pub mod pattern;
pub mod rank;
pub mod score;
pub mod subject;
pub mod token;

pub use error::NlpError;
pub use morphology::{Analysis, Morphology, PartOfSpeech, RuleMorphology};
pub use pattern::{Pattern, PatternMatcher};
pub use rank::{Ranking, SimilarityRanker, TfidfModel};
pub use score::Confidence;
pub use subject::SubjectFinder;
pub use token::{Tokenizer, TokenizerMode};
