//! Textual metrics: length, paragraphing and repetition

use super::{clamp_score, TextMetric};
use crate::parser::{letter_count, normalized_words, paragraphs, sentences, word_count};
use crate::{Metric, MIN_SUB_SCORE};
use std::collections::HashMap;

/// Speech length with a plateau between 500 and 2000 words
pub struct TextLengthMetric;

impl TextLengthMetric {
    pub fn new() -> Self {
        Self
    }

    /// Unclamped score for a word count
    pub fn raw(words: usize) -> f64 {
        let w = words as f64;
        match words {
            0..=99 => w / 4.0,
            100..=499 => w / 10.0,
            500..=2000 => 50.0,
            2001..=5000 => 50.0 - (w - 2000.0) / 100.0,
            _ => 20.0 - (w - 5000.0) / 500.0,
        }
    }
}

impl Default for TextLengthMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for TextLengthMetric {
    fn metric(&self) -> Metric {
        Metric::TextLength
    }

    fn calculate(&self, text: &str) -> u8 {
        let words = word_count(text);
        if words == 0 {
            return MIN_SUB_SCORE;
        }
        clamp_score(Self::raw(words), 1.0)
    }
}

/// Sentences per paragraph, best between three and eight
pub struct ParagraphStructureMetric;

impl ParagraphStructureMetric {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParagraphStructureMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for ParagraphStructureMetric {
    fn metric(&self) -> Metric {
        Metric::ParagraphStructure
    }

    fn calculate(&self, text: &str) -> u8 {
        let paragraphs = paragraphs(text);
        let sentence_total: usize = paragraphs.iter().map(|p| sentences(p).len()).sum();
        if word_count(text) == 0 || sentence_total == 0 {
            return MIN_SUB_SCORE;
        }
        let avg = sentence_total as f64 / paragraphs.len() as f64;
        let raw = if (3.0..=8.0).contains(&avg) {
            50.0
        } else {
            50.0 - 5.0 * (avg - 5.5).abs()
        };
        clamp_score(raw, 1.0)
    }
}

/// Share of longer words that recur, best between 10 and 20 percent
pub struct RepetitionMetric;

impl RepetitionMetric {
    pub fn new() -> Self {
        Self
    }

    /// Percentage of distinct words over three letters that occur more than once
    pub fn repeated_share(text: &str) -> Option<f64> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in normalized_words(text) {
            if letter_count(&word) > 3 {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            return None;
        }
        let repeated = counts.values().filter(|&&n| n > 1).count();
        Some(repeated as f64 / counts.len() as f64 * 100.0)
    }
}

impl Default for RepetitionMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetric for RepetitionMetric {
    fn metric(&self) -> Metric {
        Metric::Repetition
    }

    fn calculate(&self, text: &str) -> u8 {
        let Some(share) = Self::repeated_share(text) else {
            return MIN_SUB_SCORE;
        };
        let raw = if (10.0..=20.0).contains(&share) {
            50.0
        } else {
            50.0 - 2.0 * (share - 15.0).abs()
        };
        clamp_score(raw, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::n_words;
    use super::*;

    #[test]
    fn test_text_length_bands() {
        let metric = TextLengthMetric::new();
        assert_eq!(metric.calculate(&n_words(50)), 13);
        assert_eq!(metric.calculate(&n_words(300)), 30);
        assert_eq!(metric.calculate(&n_words(1000)), 50);
        assert_eq!(metric.calculate(&n_words(3000)), 40);
        assert_eq!(metric.calculate(&n_words(6000)), 18);
    }

    #[test]
    fn test_text_length_very_long_speech_floors() {
        assert_eq!(TextLengthMetric::raw(20_000), -10.0);
        assert_eq!(clamp_score(TextLengthMetric::raw(20_000), 1.0), 1);
    }

    #[test]
    fn test_text_length_band_edges() {
        assert_eq!(TextLengthMetric::raw(500), 50.0);
        assert_eq!(TextLengthMetric::raw(2000), 50.0);
        assert_eq!(TextLengthMetric::raw(5000), 20.0);
    }

    #[test]
    fn test_paragraph_structure_plateau() {
        let metric = ParagraphStructureMetric::new();
        assert_eq!(metric.calculate("Ett. Två. Tre. Fyra. Fem."), 50);
        assert_eq!(
            metric.calculate("Ett. Två. Tre. Fyra.\n\nFem. Sex. Sju. Åtta. Nio. Tio."),
            50
        );
    }

    #[test]
    fn test_paragraph_structure_penalties() {
        let metric = ParagraphStructureMetric::new();
        // avg 1: 50 - 22.5
        assert_eq!(metric.calculate("Bara en mening."), 28);
        // avg 12: 50 - 32.5
        assert_eq!(metric.calculate(&"Mening. ".repeat(12)), 18);
    }

    #[test]
    fn test_repetition_peak() {
        let text = "budget budget skatter skolor vården polisen järnväg bostäder klimatet försvaret pensioner";
        assert_eq!(RepetitionMetric::repeated_share(text), Some(10.0));
        assert_eq!(RepetitionMetric::new().calculate(text), 50);
    }

    #[test]
    fn test_repetition_extremes() {
        let metric = RepetitionMetric::new();
        assert_eq!(metric.calculate("budget skatter skolor vården"), 20);
        assert_eq!(metric.calculate("ordet ordet ordet"), 1);
    }

    #[test]
    fn test_repetition_without_long_words() {
        assert_eq!(RepetitionMetric::repeated_share("en ett och"), None);
        assert_eq!(RepetitionMetric::new().calculate("en ett och"), 1);
    }
}
