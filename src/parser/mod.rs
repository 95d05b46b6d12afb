//! Parser module for speech transcripts

pub mod speech;
pub mod tokens;

pub use speech::{extract_metadata, party_from_text, speaker_from_file_name, SpeechMetadata, PARTY_CODES};
pub use tokens::{
    letter_count, normalize_word, normalized_words, paragraphs, sentence_word_counts, sentences,
    word_count, words, PhraseMatcher,
};
