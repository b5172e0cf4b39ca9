//! Configuration for the question answering service.

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;

/// Configuration for [`crate::QaService`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Language the knowledge graph speaks; questions and subjects are
    /// translated into it (default: "en")
    pub working_language: String,

    /// A property answer is given only when its similarity is strictly above
    /// this value (default: 0.0001)
    pub confidence_floor: f64,

    /// Entries kept in the `ask` memoization cache (default: 10 000)
    pub answer_cache_capacity: usize,

    /// Entries kept in the translation cache (default: 10 000)
    pub translation_cache_capacity: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            working_language: "en".to_string(),
            confidence_floor: 0.0001,
            answer_cache_capacity: DEFAULT_CAPACITY,
            translation_cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl QaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working language of the knowledge graph
    pub fn with_working_language(mut self, language: impl Into<String>) -> Self {
        self.working_language = language.into();
        self
    }

    /// Set the confidence floor for property answers
    pub fn with_confidence_floor(mut self, floor: f64) -> Self {
        self.confidence_floor = floor;
        self
    }

    /// Set the capacity of the `ask` cache
    pub fn with_answer_cache_capacity(mut self, capacity: usize) -> Self {
        self.answer_cache_capacity = capacity;
        self
    }

    /// Set the capacity of the translation cache
    pub fn with_translation_cache_capacity(mut self, capacity: usize) -> Self {
        self.translation_cache_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_take_defaults() {
        let config: QaConfig = serde_json::from_str(r#"{ "confidence_floor": 0.05 }"#).unwrap();
        assert_eq!(config, QaConfig::new().with_confidence_floor(0.05));
        assert_eq!(config.working_language, "en");
        assert_eq!(config.answer_cache_capacity, 10_000);
    }
}
