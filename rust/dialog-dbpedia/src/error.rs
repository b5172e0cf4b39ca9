use std::path::PathBuf;

use dialog_qa::LookupError;
use thiserror::Error;

/// Errors raised while talking to DBpedia or the translation service.
#[derive(Debug, Error)]
pub enum DbpediaError {
    /// The HTTP client could not be built
    #[error("Could not build HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or its body could not be read
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The request did not complete within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The service answered with a non-success status
    #[error("Request to {url} failed with HTTP {status} - {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed {what} response: {reason}")]
    Malformed { what: &'static str, reason: String },

    /// The property descriptions file could not be read
    #[error("Could not read property descriptions from {path:?}: {source}")]
    DescriptionsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The property descriptions file is not a JSON object of strings
    #[error("Invalid property descriptions in {path:?}: {source}")]
    DescriptionsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No subscription key was configured for the translation service
    #[error("Translator subscription key is missing")]
    MissingKey,
}

impl DbpediaError {
    pub(crate) fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            DbpediaError::Timeout {
                url: url.to_string(),
            }
        } else {
            DbpediaError::Request {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

impl From<DbpediaError> for LookupError {
    fn from(error: DbpediaError) -> Self {
        match error {
            DbpediaError::Timeout { .. } => LookupError::Timeout(error.to_string()),
            DbpediaError::Malformed { .. } => LookupError::Malformed(error.to_string()),
            _ => LookupError::Transport(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_keeps_the_failure_class_across_the_boundary() {
        let timeout = LookupError::from(DbpediaError::Timeout {
            url: "http://dbpedia.org/sparql".into(),
        });
        assert!(matches!(timeout, LookupError::Timeout(_)));

        let malformed = LookupError::from(DbpediaError::Malformed {
            what: "lookup",
            reason: "missing field `results`".into(),
        });
        assert!(matches!(malformed, LookupError::Malformed(_)));

        let status = LookupError::from(DbpediaError::Status {
            url: "http://dbpedia.org/sparql".into(),
            status: 503,
            reason: "Service Unavailable".into(),
        });
        assert_eq!(
            status,
            LookupError::Transport(
                "Request to http://dbpedia.org/sparql failed with HTTP 503 - Service Unavailable"
                    .into()
            )
        );
    }
}
