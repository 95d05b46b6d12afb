//! Semantic metrics built on fixed Swedish word lists

use super::{clamp_score, per_thousand, TextMetric};
use crate::parser::{sentences, word_count, PhraseMatcher};
use crate::{Metric, MIN_SUB_SCORE};

pub const POSITIVE_WORDS: &[&str] = &[
    "bra", "god", "goda", "gott", "positiv", "positivt", "framgång", "möjlighet",
    "möjligheter", "stärka", "förbättra", "trygg", "trygghet", "hopp", "glädje", "utveckling",
    "välfärd", "tack",
];
pub const NEGATIVE_WORDS: &[&str] = &[
    "dålig", "dåligt", "problem", "kris", "hot", "misslyckande", "svag", "svaga", "oro",
    "farlig", "brist", "brister", "fel", "orättvis", "negativ", "negativt",
];
pub const ABSTRACT_WORDS: &[&str] = &[
    "samhälle", "samhället", "frihet", "demokrati", "ansvar", "rättvisa", "politik", "ekonomi",
    "framtid", "jämlikhet", "solidaritet", "värderingar", "principer", "idé", "idéer",
];
pub const CONCRETE_WORDS: &[&str] = &[
    "hus", "bil", "bilar", "skola", "skolan", "sjukhus", "väg", "vägar", "pengar", "kronor",
    "barn", "jobb", "polis", "bostad", "bostäder", "mat", "vatten",
];
pub const MODAL_WORDS: &[&str] = &[
    "kan", "kunde", "ska", "skall", "skulle", "bör", "borde", "måste", "får", "fick", "kanske",
    "troligen", "möjligen", "nog",
];
pub const METAPHOR_MARKERS: &[&str] = &[
    "som en", "som ett", "likt", "liksom", "bildligt", "så att säga", "på sätt och vis",
    "i grunden", "ett slags",
];

/// Ratio used when a text mentions neither abstract nor concrete terms
const NEUTRAL_ABSTRACTION_RATIO: f64 = 50.0;

/// Lexicon-based polarity, 25 for a neutral text
pub struct SentimentMetric {
    positive: PhraseMatcher,
    negative: PhraseMatcher,
}

impl SentimentMetric {
    pub fn new() -> Self {
        Self {
            positive: PhraseMatcher::new(POSITIVE_WORDS),
            negative: PhraseMatcher::new(NEGATIVE_WORDS),
        }
    }
}

impl Default for SentimentMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for SentimentMetric {
    fn metric(&self) -> Metric {
        Metric::Sentiment
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        let pos = self.positive.count(text) as f64;
        let neg = self.negative.count(text) as f64;
        clamp_score((pos - neg) / words as f64 + 0.1, 250.0)
    }
}

/// Share of abstract terms among abstract and concrete hits
pub struct AbstractionMetric {
    abstract_terms: PhraseMatcher,
    concrete_terms: PhraseMatcher,
}

impl AbstractionMetric {
    pub fn new() -> Self {
        Self {
            abstract_terms: PhraseMatcher::new(ABSTRACT_WORDS),
            concrete_terms: PhraseMatcher::new(CONCRETE_WORDS),
        }
    }
}

impl Default for AbstractionMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for AbstractionMetric {
    fn metric(&self) -> Metric {
        Metric::Abstraction
    }

    fn calculate(&self, text: &str) -> u8 {
        if word_count(text) == 0 {
            return MIN_SUB_SCORE;
        }
        let abs = self.abstract_terms.count(text);
        let conc = self.concrete_terms.count(text);
        let ratio = if abs + conc == 0 {
            NEUTRAL_ABSTRACTION_RATIO
        } else {
            abs as f64 / (abs + conc) as f64 * 100.0
        };
        clamp_score(ratio, 0.5)
    }
}

/// Modal verbs and hedges per 1000 words
pub struct ModalityMetric {
    modals: PhraseMatcher,
}

impl ModalityMetric {
    pub fn new() -> Self {
        Self {
            modals: PhraseMatcher::new(MODAL_WORDS),
        }
    }
}

impl Default for ModalityMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for ModalityMetric {
    fn metric(&self) -> Metric {
        Metric::Modality
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(per_thousand(self.modals.count(text), words), 1.0)
    }
}

/// Question marks relative to sentence count
pub struct QuestionMetric;

impl QuestionMetric {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuestionMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for QuestionMetric {
    fn metric(&self) -> Metric {
        Metric::Questions
    }

    fn calculate(&self, text: &str) -> u8 {
        let sentence_count = sentences(text).len();
        if word_count(text) == 0 || sentence_count == 0 {
            return MIN_SUB_SCORE;
        }
        let questions = text.matches('?').count();
        clamp_score(questions as f64 / sentence_count as f64 * 500.0, 1.0)
    }
}

/// Figurative markers per 1000 words
pub struct MetaphorMetric {
    markers: PhraseMatcher,
}

impl MetaphorMetric {
    pub fn new() -> Self {
        Self {
            markers: PhraseMatcher::new(METAPHOR_MARKERS),
        }
    }
}

impl Default for MetaphorMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for MetaphorMetric {
    fn metric(&self) -> Metric {
        Metric::Metaphors
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(per_thousand(self.markers.count(text), words), 2.0)
    }
}
