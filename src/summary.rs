//! Batch summary over many analyzed speeches

use crate::{Analysis, Score, UNKNOWN_PARTY, UNKNOWN_SPEAKER};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Length of the top and bottom lists
pub const TOP_LIST_LEN: usize = 10;

/// Aggregate statistics from multiple speech analyses
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of speeches analyzed
    pub files_analyzed: usize,
    /// Mean total score, rounded
    pub average_score: Score,
    pub total_words: usize,
    /// Per-party statistics, best average first
    pub parties: Vec<PartyStats>,
    /// Per-speaker averages, best first
    pub speakers: Vec<SpeakerStats>,
    /// Highest total scores, best first
    pub top: Vec<Highlight>,
    /// Lowest total scores, worst first
    pub bottom: Vec<Highlight>,
    /// Most words
    pub longest: Option<Highlight>,
    /// Fewest words
    pub shortest: Option<Highlight>,
    /// Highest LIX sub-score
    pub most_complex: Option<Highlight>,
    /// Highest OVIX sub-score
    pub most_varied: Option<Highlight>,
}

/// Scores of one party's speeches
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyStats {
    pub party: String,
    /// Mean total score, rounded
    pub average: u8,
    pub count: usize,
    pub highest: u8,
    pub lowest: u8,
}

/// Scores of one speaker's speeches
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerStats {
    pub speaker: String,
    /// Party of the speaker's first speech
    pub party: String,
    /// Mean total score, rounded
    pub average: u8,
    pub count: usize,
}

/// A speech singled out in a summary, with the value it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub file_name: String,
    pub speaker: String,
    pub party: String,
    pub total_score: u8,
    pub value: usize,
}

impl Highlight {
    fn new(analysis: &Analysis, value: usize) -> Self {
        Self {
            id: analysis.id.clone(),
            file_name: analysis.file_name.clone(),
            speaker: analysis.speaker.clone(),
            party: analysis.party.clone(),
            total_score: analysis.total_score,
            value,
        }
    }

    fn by_score(analysis: &Analysis) -> Self {
        Self::new(analysis, analysis.total_score as usize)
    }
}

impl AggregateStats {
    pub fn from_analyses(results: &[Analysis]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let totals: Vec<u8> = results.iter().map(|r| r.total_score).collect();
        let average = rounded_mean(&totals);

        let mut by_score: Vec<&Analysis> = results.iter().collect();
        by_score.sort_by_key(|r| Reverse(r.total_score));
        let top = by_score
            .iter()
            .take(TOP_LIST_LEN)
            .map(|r| Highlight::by_score(r))
            .collect();
        by_score.sort_by_key(|r| r.total_score);
        let bottom = by_score
            .iter()
            .take(TOP_LIST_LEN)
            .map(|r| Highlight::by_score(r))
            .collect();

        // first occurrence wins ties
        let longest = results
            .iter()
            .rev()
            .max_by_key(|r| r.word_count)
            .map(|r| Highlight::new(r, r.word_count));
        let shortest = results
            .iter()
            .min_by_key(|r| r.word_count)
            .map(|r| Highlight::new(r, r.word_count));
        let most_complex = results
            .iter()
            .rev()
            .max_by_key(|r| r.scores.lix)
            .map(|r| Highlight::new(r, r.scores.lix as usize));
        let most_varied = results
            .iter()
            .rev()
            .max_by_key(|r| r.scores.ovix)
            .map(|r| Highlight::new(r, r.scores.ovix as usize));

        Self {
            files_analyzed: results.len(),
            average_score: Score::new(average),
            total_words: results.iter().map(|r| r.word_count).sum(),
            parties: party_stats(results),
            speakers: speaker_stats(results),
            top,
            bottom,
            longest,
            shortest,
            most_complex,
            most_varied,
        }
    }
}

/// Per-party statistics, sentinel party excluded, sorted by average descending
pub fn party_stats(results: &[Analysis]) -> Vec<PartyStats> {
    let mut groups: BTreeMap<&str, Vec<u8>> = BTreeMap::new();
    for r in results.iter().filter(|r| r.party != UNKNOWN_PARTY) {
        groups.entry(r.party.as_str()).or_default().push(r.total_score);
    }

    let mut stats: Vec<PartyStats> = groups
        .into_iter()
        .map(|(party, scores)| PartyStats {
            party: party.to_string(),
            average: rounded_mean(&scores),
            count: scores.len(),
            highest: scores.iter().copied().max().unwrap_or_default(),
            lowest: scores.iter().copied().min().unwrap_or_default(),
        })
        .collect();
    stats.sort_by_key(|p| Reverse(p.average));
    stats
}

/// Per-speaker averages, sentinel speaker excluded, sorted by average descending
pub fn speaker_stats(results: &[Analysis]) -> Vec<SpeakerStats> {
    let mut groups: BTreeMap<&str, (&str, Vec<u8>)> = BTreeMap::new();
    for r in results.iter().filter(|r| r.speaker != UNKNOWN_SPEAKER) {
        groups
            .entry(r.speaker.as_str())
            .or_insert_with(|| (r.party.as_str(), Vec::new()))
            .1
            .push(r.total_score);
    }

    let mut stats: Vec<SpeakerStats> = groups
        .into_iter()
        .map(|(speaker, (party, scores))| SpeakerStats {
            speaker: speaker.to_string(),
            party: party.to_string(),
            average: rounded_mean(&scores),
            count: scores.len(),
        })
        .collect();
    stats.sort_by_key(|s| Reverse(s.average));
    stats
}

/// Mean rounded half away from zero; 0 for no scores
fn rounded_mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|&s| s as u32).sum();
    (total as f64 / scores.len() as f64).round() as u8
}
