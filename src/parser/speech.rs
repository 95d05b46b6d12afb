//! Speaker and party extraction for speech transcripts

use crate::{UNKNOWN_PARTY, UNKNOWN_SPEAKER};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Party codes recognised when scanning free text
pub const PARTY_CODES: [&str; 8] = ["S", "M", "SD", "C", "V", "KD", "L", "MP"];

/// Metadata extracted from a speech, plus the text left for scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechMetadata {
    pub speaker: String,
    pub party: String,
    /// Text with the `Anf.` header removed
    pub cleaned_text: String,
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // the name ends at a party code, a colon or the end of the line
        Regex::new(
            r"(?m)Anf\.\s*\d+\s+(\p{Lu}[\p{L}\-]*(?:[ \t]+\p{Lu}[\p{L}\-]*){0,3})[ \t]*(?:\((\p{L}{1,3})\)|:|\r?$)",
        )
        .expect("header pattern is valid")
    })
}

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^_]+)_([^_]+)").expect("file name pattern is valid"))
}

fn party_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let mut codes = PARTY_CODES.to_vec();
        // longer codes first so "SD" is preferred over "S"
        codes.sort_by_key(|c| std::cmp::Reverse(c.len()));
        Regex::new(&format!(r"(?i)\b({})\b", codes.join("|"))).expect("party pattern is valid")
    })
}

/// Extract speaker and party, never failing.
///
/// Looks for an `Anf. <n> <Name> (<Party>)` header first. Without a party the
/// name must be followed by a colon or a line break. A header party outside
/// `PARTY_CODES` is discarded. Falls back to `<Given>_<Family>_...` in the file
/// name for the speaker and to a scan of the full text for a known party code.
pub fn extract_metadata(text: &str, file_name: &str) -> SpeechMetadata {
    let mut speaker = None;
    let mut party = None;
    let mut cleaned_text = text.trim().to_string();

    if let Some(caps) = header_pattern().captures(text) {
        speaker = caps.get(1).map(|m| m.as_str().trim().to_string());
        party = caps
            .get(2)
            .map(|m| m.as_str().to_uppercase())
            .filter(|code| PARTY_CODES.contains(&code.as_str()));
        if let Some(whole) = caps.get(0) {
            let mut rest = String::with_capacity(text.len());
            rest.push_str(&text[..whole.start()]);
            rest.push_str(&text[whole.end()..]);
            cleaned_text = rest.trim().to_string();
        }
        debug!(?speaker, ?party, "found speech header");
    }

    let speaker = speaker
        .or_else(|| speaker_from_file_name(file_name))
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
    let party = party
        .or_else(|| party_from_text(text))
        .unwrap_or_else(|| UNKNOWN_PARTY.to_string());

    SpeechMetadata {
        speaker,
        party,
        cleaned_text,
    }
}

/// `Anna_Andersson_2024-01-01.txt` -> `Anna Andersson`
pub fn speaker_from_file_name(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let caps = file_name_pattern().captures(stem)?;
    Some(format!("{} {}", &caps[1], &caps[2]))
}

/// First standalone party code in the text, upper-cased
pub fn party_from_text(text: &str) -> Option<String> {
    party_pattern()
        .captures(text)
        .map(|caps| caps[1].to_uppercase())
}
