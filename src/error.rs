//! Errors surfaced by the analysis engine

use thiserror::Error;

/// Failure while analyzing a speech.
///
/// Malformed or empty text never produces an error; only the external
/// linguistic scorer can fail.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("external scorer '{scorer}' failed: {message}")]
    ExternalScorer { scorer: String, message: String },
}

impl AnalysisError {
    pub fn external(scorer: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::ExternalScorer {
            scorer: scorer.into(),
            message: message.into(),
        }
    }
}
