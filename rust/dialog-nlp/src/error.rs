//! Error types for question text processing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("no subject noun found in '{text}'")]
    SubjectNotFound { text: String },

    #[error("pattern '{pattern}' does not compile: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
