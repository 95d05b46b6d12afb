//! Metric battery for speech analysis
//!
//! Every metric is a pure function of the cleaned text and returns a
//! sub-score in 1-50. Texts without words score the floor everywhere.

pub mod flow;
pub mod lexical;
pub mod semantic;
pub mod syntactic;
pub mod textual;

pub use flow::{CoherenceMetric, FluencyMetric};
pub use lexical::{
    LixMetric, NominalRatioMetric, OvixMetric, UniqueWordsMetric, WordLengthMetric,
};
pub use semantic::{
    AbstractionMetric, MetaphorMetric, ModalityMetric, QuestionMetric, SentimentMetric,
};
pub use syntactic::{
    ConjunctionMetric, PassiveVoiceMetric, SentenceLengthMetric, SubordinateClauseMetric,
};
pub use textual::{ParagraphStructureMetric, RepetitionMetric, TextLengthMetric};

use crate::{Metric, MAX_SUB_SCORE, MIN_SUB_SCORE};
use tracing::trace;

/// Trait for text metrics
pub trait TextMetric: Send + Sync {
    /// Which metric this computes
    fn metric(&self) -> Metric;

    /// Calculate the sub-score (1-50) for the cleaned text
    fn calculate(&self, text: &str) -> u8;
}

/// `max(1, min(50, round(raw * scale)))`; non-finite input maps to the floor
pub fn clamp_score(raw: f64, scale: f64) -> u8 {
    let scaled = raw * scale;
    if !scaled.is_finite() {
        trace!(raw, scale, "non-finite metric value, using floor");
        return MIN_SUB_SCORE;
    }
    scaled
        .round()
        .clamp(MIN_SUB_SCORE as f64, MAX_SUB_SCORE as f64) as u8
}

/// Hits per 1000 words
pub(crate) fn per_thousand(hits: usize, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    hits as f64 / words as f64 * 1000.0
}

/// All text-derived metrics (everything but the Sparv score)
pub fn standard_battery() -> Vec<Box<dyn TextMetric>> {
    vec![
        Box::new(LixMetric::new()),
        Box::new(OvixMetric::new()),
        Box::new(NominalRatioMetric::new()),
        Box::new(WordLengthMetric::new()),
        Box::new(SentenceLengthMetric::new()),
        Box::new(UniqueWordsMetric::new()),
        Box::new(SubordinateClauseMetric::new()),
        Box::new(PassiveVoiceMetric::new()),
        Box::new(ConjunctionMetric::new()),
        Box::new(SentimentMetric::new()),
        Box::new(AbstractionMetric::new()),
        Box::new(ModalityMetric::new()),
        Box::new(QuestionMetric::new()),
        Box::new(MetaphorMetric::new()),
        Box::new(TextLengthMetric::new()),
        Box::new(ParagraphStructureMetric::new()),
        Box::new(RepetitionMetric::new()),
        Box::new(CoherenceMetric::new()),
        Box::new(FluencyMetric::new()),
    ]
}
