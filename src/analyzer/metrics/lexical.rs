//! Lexical metrics: readability index, variation and word shape

use super::{clamp_score, TextMetric};
use crate::parser::{letter_count, normalized_words, sentences, words};
use crate::{Metric, MIN_SUB_SCORE};
use std::collections::HashSet;

const NOUN_SUFFIXES: &[&str] = &[
    "ning", "het", "else", "skap", "dom", "tion", "itet", "ism", "ande", "ende",
];
const VERB_SUFFIXES: &[&str] = &["erar", "erade", "ade", "ar", "er", "de", "te"];

/// Words with more letters than this count as long in LIX
const LIX_LONG_WORD: usize = 6;

/// LIX readability index
pub struct LixMetric;

impl LixMetric {
    pub fn new() -> Self {
        Self
    }

    /// Raw LIX value, `None` when the text has no words or sentences
    pub fn raw(text: &str) -> Option<f64> {
        let words = words(text);
        let sentence_count = sentences(text).len();
        if words.is_empty() || sentence_count == 0 {
            return None;
        }
        let long = words
            .iter()
            .filter(|w| letter_count(w) > LIX_LONG_WORD)
            .count();
        let n = words.len() as f64;
        Some(n / sentence_count as f64 + 100.0 * long as f64 / n)
    }
}

impl Default for LixMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for LixMetric {
    fn metric(&self) -> Metric {
        Metric::Lix
    }

    fn calculate(&self, text: &str) -> u8 {
        match Self::raw(text) {
            Some(lix) => clamp_score(lix, 0.8),
            None => MIN_SUB_SCORE,
        }
    }
}

/// OVIX word variation index
pub struct OvixMetric;

impl OvixMetric {
    pub fn new() -> Self {
        Self
    }

    /// Raw OVIX value, `None` for fewer than two tokens
    pub fn raw(text: &str) -> Option<f64> {
        let tokens = normalized_words(text);
        if tokens.len() <= 1 {
            return None;
        }
        let types: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let ln_tokens = (tokens.len() as f64).ln();
        let ln_types = (types.len() as f64).ln();
        Some(ln_tokens / (2.0 - ln_types / ln_tokens))
    }
}

impl Default for OvixMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for OvixMetric {
    fn metric(&self) -> Metric {
        Metric::Ovix
    }

    fn calculate(&self, text: &str) -> u8 {
        match Self::raw(text) {
            Some(ovix) => clamp_score(ovix, 6.0),
            None => MIN_SUB_SCORE,
        }
    }
}

/// Nominal ratio, approximated from Swedish noun and verb suffixes
pub struct NominalRatioMetric;

impl NominalRatioMetric {
    pub fn new() -> Self {
        Self
    }

    /// Count (noun-like, verb-like) words. Words under four letters are skipped
    /// and a noun suffix wins over a verb suffix.
    pub fn classify(text: &str) -> (usize, usize) {
        let mut nouns = 0;
        let mut verbs = 0;
        for word in normalized_words(text) {
            if letter_count(&word) < 4 {
                continue;
            }
            if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
                nouns += 1;
            } else if VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
                verbs += 1;
            }
        }
        (nouns, verbs)
    }
}

impl Default for NominalRatioMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for NominalRatioMetric {
    fn metric(&self) -> Metric {
        Metric::NominalRatio
    }

    fn calculate(&self, text: &str) -> u8 {
        if normalized_words(text).is_empty() {
            return MIN_SUB_SCORE;
        }
        let (nouns, verbs) = Self::classify(text);
        clamp_score(nouns as f64 / verbs.max(1) as f64 * 100.0, 0.3)
    }
}

/// Mean letters per word
pub struct WordLengthMetric;

impl WordLengthMetric {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordLengthMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for WordLengthMetric {
    fn metric(&self) -> Metric {
        Metric::WordLength
    }

    fn calculate(&self, text: &str) -> u8 {
        let lengths: Vec<usize> = words(text)
            .into_iter()
            .map(letter_count)
            .filter(|&n| n > 0)
            .collect();
        if lengths.is_empty() {
            return MIN_SUB_SCORE;
        }
        let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
        clamp_score(mean, 8.0)
    }
}

/// Share of distinct word forms (type/token ratio)
pub struct UniqueWordsMetric;

impl UniqueWordsMetric {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UniqueWordsMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for UniqueWordsMetric {
    fn metric(&self) -> Metric {
        Metric::UniqueWords
    }

    fn calculate(&self, text: &str) -> u8 {
        let tokens = normalized_words(text);
        if tokens.is_empty() {
            return MIN_SUB_SCORE;
        }
        let types: HashSet<&String> = tokens.iter().collect();
        clamp_score(types.len() as f64 / tokens.len() as f64 * 100.0, 0.5)
    }
}
