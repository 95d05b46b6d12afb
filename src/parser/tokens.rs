//! Tokenization shared by the metric battery

use regex::Regex;
use std::sync::OnceLock;

fn sentence_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"))
}

fn paragraph_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"))
}

/// Whitespace-delimited tokens
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lower-case a token and trim surrounding punctuation
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Normalized tokens, with tokens that were pure punctuation dropped
pub fn normalized_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Number of alphabetic characters in a token
pub fn letter_count(word: &str) -> usize {
    word.chars().filter(|c| c.is_alphabetic()).count()
}

/// Sentences split on runs of `.`, `!` and `?`; blank fragments are dropped
pub fn sentences(text: &str) -> Vec<&str> {
    sentence_splitter()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Word count of every sentence, in order
pub fn sentence_word_counts(text: &str) -> Vec<usize> {
    sentences(text).into_iter().map(word_count).collect()
}

/// Paragraphs separated by blank lines
pub fn paragraphs(text: &str) -> Vec<&str> {
    paragraph_splitter()
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Case-insensitive, whole-word matcher for a fixed list of words or phrases
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    pattern: Regex,
}

impl PhraseMatcher {
    pub fn new(phrases: &[&str]) -> Self {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| {
                p.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect();
        let source = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
        Self {
            pattern: Regex::new(&source).expect("escaped phrase list is a valid pattern"),
        }
    }

    /// Number of non-overlapping occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}
