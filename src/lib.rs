//! Talscore: Readability Analyzer for Swedish Parliamentary Speeches
//!
//! This library scores speech transcripts with a battery of lexical metrics
//! (LIX, OVIX, nominal ratio and friends) and combines them into a single
//! 1-100 complexity score.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod summary;

pub use error::AnalysisError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker sentinel used when no name can be extracted
pub const UNKNOWN_SPEAKER: &str = "Okänd talare";
/// Party sentinel used when no party code can be extracted
pub const UNKNOWN_PARTY: &str = "Okänt parti";

/// Lowest sub-score a metric can produce
pub const MIN_SUB_SCORE: u8 = 1;
/// Highest sub-score a metric can produce
pub const MAX_SUB_SCORE: u8 = 50;

/// The result of analyzing one speech.
///
/// Records are created once by the engine. `with_source` and `with_date`
/// consume the record and hand back an adjusted copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Unique id: `analysis-<millis>-<random suffix>`
    pub id: String,
    /// File name as provided by the caller
    pub file_name: String,
    /// Speaker name, or `UNKNOWN_SPEAKER`
    pub speaker: String,
    /// Party code, or `UNKNOWN_PARTY`
    pub party: String,
    /// Time of analysis unless overridden by the caller
    pub date: DateTime<Utc>,
    /// Whitespace-delimited tokens in the cleaned text
    pub word_count: usize,
    /// Per-metric sub-scores (1-50 each)
    pub scores: ScoreBreakdown,
    /// Aggregated score (1-100)
    pub total_score: u8,
    /// Letter grade of the total score
    pub grade: Grade,
    /// Provenance tag such as "upload" or "riksdag-api"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Analysis {
    /// Tag the record with its provenance
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Replace the analysis time, e.g. with the speech's document date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Total score paired with its grade
    pub fn score(&self) -> Score {
        Score::new(self.total_score)
    }

    pub fn has_known_speaker(&self) -> bool {
        self.speaker != UNKNOWN_SPEAKER
    }

    pub fn has_known_party(&self) -> bool {
        self.party != UNKNOWN_PARTY
    }
}

/// Total score with grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Numeric score (1-100)
    pub value: u8,
    /// Letter grade (A-E)
    pub grade: Grade,
}

impl Score {
    pub fn new(value: u8) -> Self {
        let grade = Grade::from_score(value);
        Self { value, grade }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::new(0)
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            40..=49 => Grade::E,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::E => write!(f, "E"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Weight class of a metric in the aggregated score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    High,
    Normal,
    Low,
}

impl WeightClass {
    pub fn multiplier(self) -> f64 {
        match self {
            WeightClass::High => 1.5,
            WeightClass::Normal => 1.0,
            WeightClass::Low => 0.5,
        }
    }
}

impl std::fmt::Display for WeightClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightClass::High => write!(f, "high"),
            WeightClass::Normal => write!(f, "normal"),
            WeightClass::Low => write!(f, "low"),
        }
    }
}

/// The metrics making up the battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Lix,
    Ovix,
    NominalRatio,
    WordLength,
    SentenceLength,
    UniqueWords,
    SubordinateClauses,
    PassiveVoice,
    Conjunctions,
    Sentiment,
    Abstraction,
    Modality,
    Questions,
    Metaphors,
    TextLength,
    ParagraphStructure,
    Repetition,
    SparvScore,
    Coherence,
    Fluency,
}

impl Metric {
    /// Every metric, in report order
    pub const ALL: [Metric; 20] = [
        Metric::Lix,
        Metric::Ovix,
        Metric::NominalRatio,
        Metric::WordLength,
        Metric::SentenceLength,
        Metric::UniqueWords,
        Metric::SubordinateClauses,
        Metric::PassiveVoice,
        Metric::Conjunctions,
        Metric::Sentiment,
        Metric::Abstraction,
        Metric::Modality,
        Metric::Questions,
        Metric::Metaphors,
        Metric::TextLength,
        Metric::ParagraphStructure,
        Metric::Repetition,
        Metric::SparvScore,
        Metric::Coherence,
        Metric::Fluency,
    ];

    pub fn weight_class(self) -> WeightClass {
        use Metric::*;
        match self {
            Lix | Ovix | SentenceLength | SparvScore => WeightClass::High,
            NominalRatio | WordLength | SubordinateClauses | Conjunctions | Sentiment
            | Abstraction | TextLength | Coherence | Fluency => WeightClass::Normal,
            UniqueWords | PassiveVoice | Modality | Questions | Metaphors
            | ParagraphStructure | Repetition => WeightClass::Low,
        }
    }

    /// Swedish display label
    pub fn label(self) -> &'static str {
        match self {
            Metric::Lix => "LIX (Läsbarhet)",
            Metric::Ovix => "OVIX (Ordvariation)",
            Metric::NominalRatio => "Nominalkvot",
            Metric::WordLength => "Ordlängd",
            Metric::SentenceLength => "Meningslängd",
            Metric::UniqueWords => "Unika ord",
            Metric::SubordinateClauses => "Bisatsfrekvens",
            Metric::PassiveVoice => "Passiv röst",
            Metric::Conjunctions => "Konjunktioner",
            Metric::Sentiment => "Sentiment",
            Metric::Abstraction => "Abstraktion",
            Metric::Modality => "Modalitet",
            Metric::Questions => "Frågor",
            Metric::Metaphors => "Metaforer",
            Metric::TextLength => "Textlängd",
            Metric::ParagraphStructure => "Styckestruktur",
            Metric::Repetition => "Repetition",
            Metric::SparvScore => "Sparv-poäng",
            Metric::Coherence => "Koherens",
            Metric::Fluency => "Språkflyt",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Lix => write!(f, "lix"),
            Metric::Ovix => write!(f, "ovix"),
            Metric::NominalRatio => write!(f, "nominal-ratio"),
            Metric::WordLength => write!(f, "word-length"),
            Metric::SentenceLength => write!(f, "sentence-length"),
            Metric::UniqueWords => write!(f, "unique-words"),
            Metric::SubordinateClauses => write!(f, "subordinate-clauses"),
            Metric::PassiveVoice => write!(f, "passive-voice"),
            Metric::Conjunctions => write!(f, "conjunctions"),
            Metric::Sentiment => write!(f, "sentiment"),
            Metric::Abstraction => write!(f, "abstraction"),
            Metric::Modality => write!(f, "modality"),
            Metric::Questions => write!(f, "questions"),
            Metric::Metaphors => write!(f, "metaphors"),
            Metric::TextLength => write!(f, "text-length"),
            Metric::ParagraphStructure => write!(f, "paragraph-structure"),
            Metric::Repetition => write!(f, "repetition"),
            Metric::SparvScore => write!(f, "sparv-score"),
            Metric::Coherence => write!(f, "coherence"),
            Metric::Fluency => write!(f, "fluency"),
        }
    }
}

/// Sub-scores for every metric (each 1-50)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub lix: u8,
    pub ovix: u8,
    pub nominal_ratio: u8,
    pub word_length: u8,
    pub sentence_length: u8,
    pub unique_words: u8,
    pub subordinate_clauses: u8,
    pub passive_voice: u8,
    pub conjunctions: u8,
    pub sentiment: u8,
    pub abstraction: u8,
    pub modality: u8,
    pub questions: u8,
    pub metaphors: u8,
    pub text_length: u8,
    pub paragraph_structure: u8,
    pub repetition: u8,
    pub sparv_score: u8,
    pub coherence: u8,
    pub fluency: u8,
}

impl ScoreBreakdown {
    /// Breakdown with every metric at the same value (clamped to 1-50)
    pub fn uniform(value: u8) -> Self {
        let mut breakdown = Self::default();
        for metric in Metric::ALL {
            breakdown.set(metric, value);
        }
        breakdown
    }

    pub fn get(&self, metric: Metric) -> u8 {
        *self.slot(metric)
    }

    /// Set a sub-score; values are clamped into 1-50
    pub fn set(&mut self, metric: Metric, value: u8) {
        *self.slot_mut(metric) = value.clamp(MIN_SUB_SCORE, MAX_SUB_SCORE);
    }

    /// Builder-style `set`
    pub fn with(mut self, metric: Metric, value: u8) -> Self {
        self.set(metric, value);
        self
    }

    /// (metric, sub-score) pairs in report order
    pub fn entries(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    fn slot(&self, metric: Metric) -> &u8 {
        match metric {
            Metric::Lix => &self.lix,
            Metric::Ovix => &self.ovix,
            Metric::NominalRatio => &self.nominal_ratio,
            Metric::WordLength => &self.word_length,
            Metric::SentenceLength => &self.sentence_length,
            Metric::UniqueWords => &self.unique_words,
            Metric::SubordinateClauses => &self.subordinate_clauses,
            Metric::PassiveVoice => &self.passive_voice,
            Metric::Conjunctions => &self.conjunctions,
            Metric::Sentiment => &self.sentiment,
            Metric::Abstraction => &self.abstraction,
            Metric::Modality => &self.modality,
            Metric::Questions => &self.questions,
            Metric::Metaphors => &self.metaphors,
            Metric::TextLength => &self.text_length,
            Metric::ParagraphStructure => &self.paragraph_structure,
            Metric::Repetition => &self.repetition,
            Metric::SparvScore => &self.sparv_score,
            Metric::Coherence => &self.coherence,
            Metric::Fluency => &self.fluency,
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut u8 {
        match metric {
            Metric::Lix => &mut self.lix,
            Metric::Ovix => &mut self.ovix,
            Metric::NominalRatio => &mut self.nominal_ratio,
            Metric::WordLength => &mut self.word_length,
            Metric::SentenceLength => &mut self.sentence_length,
            Metric::UniqueWords => &mut self.unique_words,
            Metric::SubordinateClauses => &mut self.subordinate_clauses,
            Metric::PassiveVoice => &mut self.passive_voice,
            Metric::Conjunctions => &mut self.conjunctions,
            Metric::Sentiment => &mut self.sentiment,
            Metric::Abstraction => &mut self.abstraction,
            Metric::Modality => &mut self.modality,
            Metric::Questions => &mut self.questions,
            Metric::Metaphors => &mut self.metaphors,
            Metric::TextLength => &mut self.text_length,
            Metric::ParagraphStructure => &mut self.paragraph_structure,
            Metric::Repetition => &mut self.repetition,
            Metric::SparvScore => &mut self.sparv_score,
            Metric::Coherence => &mut self.coherence,
            Metric::Fluency => &mut self.fluency,
        }
    }
}

impl Default for ScoreBreakdown {
    /// Every metric at the floor value
    fn default() -> Self {
        Self {
            lix: MIN_SUB_SCORE,
            ovix: MIN_SUB_SCORE,
            nominal_ratio: MIN_SUB_SCORE,
            word_length: MIN_SUB_SCORE,
            sentence_length: MIN_SUB_SCORE,
            unique_words: MIN_SUB_SCORE,
            subordinate_clauses: MIN_SUB_SCORE,
            passive_voice: MIN_SUB_SCORE,
            conjunctions: MIN_SUB_SCORE,
            sentiment: MIN_SUB_SCORE,
            abstraction: MIN_SUB_SCORE,
            modality: MIN_SUB_SCORE,
            questions: MIN_SUB_SCORE,
            metaphors: MIN_SUB_SCORE,
            text_length: MIN_SUB_SCORE,
            paragraph_structure: MIN_SUB_SCORE,
            repetition: MIN_SUB_SCORE,
            sparv_score: MIN_SUB_SCORE,
            coherence: MIN_SUB_SCORE,
            fluency: MIN_SUB_SCORE,
        }
    }
}

/// Public API: analyze one speech with the default engine (random Sparv stand-in).
///
/// * `text` - raw speech text
/// * `file_name` - name used for the record and for speaker fallback
pub fn analyze_text(text: &str, file_name: &str) -> Result<Analysis, AnalysisError> {
    crate::analyzer::AnalysisEngine::new().analyze_text(text, file_name)
}
