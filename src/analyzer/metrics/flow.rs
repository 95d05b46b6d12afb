//! Discourse flow: cohesion markers and sentence rhythm

use super::{clamp_score, TextMetric};
use crate::parser::{sentence_word_counts, sentences, word_count, PhraseMatcher};
use crate::{Metric, MIN_SUB_SCORE};

pub const DISCOURSE_MARKERS: &[&str] = &[
    "dessutom", "därför", "således", "å andra sidan", "samtidigt", "dock", "emellertid",
];

/// Sentence-length variance that scores best
const IDEAL_VARIANCE: f64 = 25.0;

/// Discourse markers relative to sentence count
pub struct CoherenceMetric {
    markers: PhraseMatcher,
}

impl CoherenceMetric {
    pub fn new() -> Self {
        Self {
            markers: PhraseMatcher::new(DISCOURSE_MARKERS),
        }
    }
}

impl Default for CoherenceMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for CoherenceMetric {
    fn metric(&self) -> Metric {
        Metric::Coherence
    }

    fn calculate(&self, text: &str) -> u8 {
        let sentence_count = sentences(text).len();
        if word_count(text) == 0 || sentence_count == 0 {
            return MIN_SUB_SCORE;
        }
        let hits = self.markers.count(text);
        clamp_score(hits as f64 / sentence_count as f64 * 500.0, 1.0)
    }
}

/// Variation in sentence length
pub struct FluencyMetric;

impl FluencyMetric {
    pub fn new() -> Self {
        Self
    }

    /// Population variance of sentence word counts
    pub fn variance(counts: &[usize]) -> Option<f64> {
        if counts.is_empty() {
            return None;
        }
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<usize>() as f64 / n;
        Some(
            counts
                .iter()
                .map(|&c| (c as f64 - mean).powi(2))
                .sum::<f64>()
                / n,
        )
    }
}

impl Default for FluencyMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for FluencyMetric {
    fn metric(&self) -> Metric {
        Metric::Fluency
    }

    fn calculate(&self, text: &str) -> u8 {
        if word_count(text) == 0 {
            return MIN_SUB_SCORE;
        }
        match Self::variance(&sentence_word_counts(text)) {
            Some(var) => clamp_score(50.0 - (var - IDEAL_VARIANCE).abs(), 1.0),
            None => MIN_SUB_SCORE,
        }
    }
}
