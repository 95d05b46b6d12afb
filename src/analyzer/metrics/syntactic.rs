//! Syntactic metrics: sentence shape and clause markers

use super::{clamp_score, per_thousand, TextMetric};
use crate::parser::{sentences, word_count, PhraseMatcher};
use crate::{Metric, MIN_SUB_SCORE};

pub const SUBORDINATE_MARKERS: &[&str] = &[
    "att", "som", "när", "där", "vilket", "vilken", "eftersom", "medan",
];
pub const PASSIVE_MARKERS: &[&str] = &[
    "blev", "blir", "blivit", "varit", "gjorts", "sagts", "beslutats",
];
pub const CONJUNCTIONS: &[&str] = &[
    "och", "men", "eller", "samt", "utan", "för", "så", "fast", "både", "varken", "antingen",
];

/// Mean words per sentence
pub struct SentenceLengthMetric;

impl SentenceLengthMetric {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SentenceLengthMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for SentenceLengthMetric {
    fn metric(&self) -> Metric {
        Metric::SentenceLength
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        let sentence_count = sentences(text).len();
        if words == 0 || sentence_count == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(words as f64 / sentence_count as f64, 2.5)
    }
}

/// Subordinating markers per sentence
pub struct SubordinateClauseMetric {
    markers: PhraseMatcher,
}

impl SubordinateClauseMetric {
    pub fn new() -> Self {
        Self {
            markers: PhraseMatcher::new(SUBORDINATE_MARKERS),
        }
    }
}

impl Default for SubordinateClauseMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for SubordinateClauseMetric {
    fn metric(&self) -> Metric {
        Metric::SubordinateClauses
    }

    fn calculate(&self, text: &str) -> u8 {
        let sentence_count = sentences(text).len();
        if word_count(text) == 0 || sentence_count == 0 {
            return MIN_SUB_SCORE;
        }
        let hits = self.markers.count(text);
        clamp_score(hits as f64 / sentence_count as f64 * 100.0, 0.25)
    }
}

/// Passive auxiliaries and participles per 1000 words
pub struct PassiveVoiceMetric {
    markers: PhraseMatcher,
}

impl PassiveVoiceMetric {
    pub fn new() -> Self {
        Self {
            markers: PhraseMatcher::new(PASSIVE_MARKERS),
        }
    }
}

impl Default for PassiveVoiceMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for PassiveVoiceMetric {
    fn metric(&self) -> Metric {
        Metric::PassiveVoice
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(per_thousand(self.markers.count(text), words), 2.5)
    }
}

/// Conjunctions per 1000 words
pub struct ConjunctionMetric {
    conjunctions: PhraseMatcher,
}

impl ConjunctionMetric {
    pub fn new() -> Self {
        Self {
            conjunctions: PhraseMatcher::new(CONJUNCTIONS),
        }
    }
}

impl Default for ConjunctionMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for ConjunctionMetric {
    fn metric(&self) -> Metric {
        Metric::Conjunctions
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(per_thousand(self.conjunctions.count(text), words), 0.5)
    }
}
