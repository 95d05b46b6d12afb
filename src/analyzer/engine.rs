//! Analysis engine - runs the metric battery and assembles records

use crate::parser::{extract_metadata, word_count};
use crate::summary::AggregateStats;
use crate::{Analysis, AnalysisError, Metric, ScoreBreakdown};
use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::metrics::{standard_battery, TextMetric};
use super::sparv::{RandomSparvScorer, SparvScorer};
use super::ScoreCalculator;

/// Provenance tag for files read from disk
pub const DEFAULT_SOURCE: &str = "upload";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// One unit of work in a single analysis
enum Job<'a> {
    Text(&'a dyn TextMetric),
    Sparv,
}

/// Main analysis engine that orchestrates all metrics
pub struct AnalysisEngine {
    metrics: Vec<Box<dyn TextMetric>>,
    sparv: Box<dyn SparvScorer>,
    /// Evaluate metrics with rayon
    parallel: bool,
    /// Source tag stamped by `analyze_file`
    source_tag: String,
}

impl AnalysisEngine {
    /// Create a new analysis engine with the random Sparv stand-in
    pub fn new() -> Self {
        Self {
            metrics: standard_battery(),
            sparv: Box::new(RandomSparvScorer::new()),
            parallel: true,
            source_tag: DEFAULT_SOURCE.to_string(),
        }
    }

    /// Replace the Sparv scorer
    pub fn with_sparv_scorer(mut self, scorer: Box<dyn SparvScorer>) -> Self {
        self.sparv = scorer;
        self
    }

    /// Evaluate metrics one after another on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the provenance tag used by `analyze_file`
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }

    /// Number of progress steps per analysis (text metrics plus Sparv)
    pub fn step_count(&self) -> usize {
        self.metrics.len() + 1
    }

    /// Analyze one speech
    pub fn analyze_text(&self, text: &str, file_name: &str) -> Result<Analysis, AnalysisError> {
        self.analyze_text_with_progress(text, file_name, &|_: u8| {})
    }

    /// Analyze one speech, reporting percent complete after each metric.
    ///
    /// Reported values never decrease and the last one is 100.
    pub fn analyze_text_with_progress(
        &self,
        text: &str,
        file_name: &str,
        on_progress: &(dyn Fn(u8) + Sync),
    ) -> Result<Analysis, AnalysisError> {
        let meta = extract_metadata(text, file_name);
        let cleaned = meta.cleaned_text.as_str();
        debug!(file = file_name, speaker = %meta.speaker, party = %meta.party, "analyzing speech");

        let steps = self.step_count();
        let completed = Mutex::new(0usize);
        let report = || {
            let mut done = completed.lock().unwrap_or_else(PoisonError::into_inner);
            *done += 1;
            // held while calling back so observers see values in order
            on_progress((*done * 100 / steps) as u8);
        };

        let run = |job: Job<'_>| -> Result<(Metric, u8), AnalysisError> {
            let outcome = match job {
                Job::Text(metric) => Ok((metric.metric(), metric.calculate(cleaned))),
                Job::Sparv => self
                    .sparv
                    .score(cleaned)
                    .map(|value| (Metric::SparvScore, value)),
            };
            report();
            outcome
        };

        let mut jobs: Vec<Job<'_>> = self.metrics.iter().map(|m| Job::Text(m.as_ref())).collect();
        jobs.push(Job::Sparv);

        let collected: Result<Vec<(Metric, u8)>, AnalysisError> = if self.parallel {
            jobs.into_par_iter().map(&run).collect()
        } else {
            jobs.into_iter().map(&run).collect()
        };
        let sub_scores = collected
            .inspect_err(|e| warn!(file = file_name, scorer = self.sparv.name(), "{e}"))?;

        let mut scores = ScoreBreakdown::default();
        for (metric, value) in sub_scores {
            debug!(%metric, value, "sub-score");
            scores.set(metric, value);
        }

        let score = ScoreCalculator::calculate(&scores);
        info!(file = file_name, total = score.value, grade = %score.grade, "speech analyzed");

        Ok(Analysis {
            id: generate_id(),
            file_name: file_name.to_string(),
            speaker: meta.speaker,
            party: meta.party,
            date: Utc::now(),
            word_count: word_count(cleaned),
            scores,
            total_score: score.value,
            grade: score.grade,
            source: None,
        })
    }

    /// Read a UTF-8 speech file and analyze it
    pub fn analyze_file(&self, path: &Path) -> Result<Analysis> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read speech file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let analysis = self
            .analyze_text(&text, &file_name)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        Ok(analysis.with_source(self.source_tag.clone()))
    }

    /// Analyze multiple speech files sequentially
    pub fn analyze_many(&self, paths: &[PathBuf]) -> Vec<Result<Analysis>> {
        paths.iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Analyze multiple speech files in parallel using rayon
    pub fn analyze_parallel(&self, paths: &[PathBuf]) -> Vec<Result<Analysis>> {
        paths.par_iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[Analysis]) -> AggregateStats {
        AggregateStats::from_analyses(results)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `analysis-<unix millis>-<9 base36 chars>`
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("analysis-{}-{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::sparv::FixedSparvScorer;
    use crate::{Grade, UNKNOWN_PARTY, UNKNOWN_SPEAKER};
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct FailingScorer;

    impl SparvScorer for FailingScorer {
        fn name(&self) -> &str {
            "sparv-remote"
        }

        fn score(&self, _text: &str) -> Result<u8, AnalysisError> {
            Err(AnalysisError::external("sparv-remote", "service unavailable"))
        }
    }

    struct WildScorer;

    impl SparvScorer for WildScorer {
        fn name(&self) -> &str {
            "wild"
        }

        fn score(&self, _text: &str) -> Result<u8, AnalysisError> {
            Ok(200)
        }
    }

    fn fixed_engine() -> AnalysisEngine {
        AnalysisEngine::new().with_sparv_scorer(Box::new(FixedSparvScorer(25)))
    }

    fn make_speech_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_repeated_word_end_to_end() {
        let text = vec!["ordet"; 50].join(". ");
        let analysis = fixed_engine().analyze_text(&text, "speech.txt").unwrap();

        assert_eq!(analysis.word_count, 50);
        assert_eq!(analysis.scores.lix, 1);
        assert_eq!(analysis.scores.ovix, 12);
        assert_eq!(analysis.scores.repetition, 1);
        assert_eq!(analysis.scores.word_length, 40);
        assert_eq!(analysis.scores.sentence_length, 3);
        assert_eq!(analysis.scores.text_length, 13);
        assert_eq!(analysis.scores.fluency, 25);
        assert_eq!(analysis.scores.sparv_score, 25);
        assert_eq!(analysis.speaker, UNKNOWN_SPEAKER);
        assert_eq!(analysis.party, UNKNOWN_PARTY);
    }

    #[test]
    fn test_empty_text_floors_every_metric() {
        let engine = AnalysisEngine::new().with_sparv_scorer(Box::new(FixedSparvScorer(1)));
        let analysis = engine.analyze_text("", "").unwrap();

        assert_eq!(analysis.word_count, 0);
        assert!(analysis.scores.entries().all(|(_, v)| v == 1));
        assert_eq!(analysis.total_score, 13);
        assert_eq!(analysis.grade, Grade::F);
    }

    #[test]
    fn test_header_is_stripped_before_scoring() {
        let analysis = fixed_engine()
            .analyze_text("Anf. 12 Anna Andersson (S) Herr talman! Jag yrkar bifall.", "x.txt")
            .unwrap();
        assert_eq!(analysis.speaker, "Anna Andersson");
        assert_eq!(analysis.party, "S");
        assert_eq!(analysis.word_count, 5);
    }

    #[test]
    fn test_fixed_scorer_is_deterministic() {
        let text = "Herr talman! Dessutom vill vi stärka välfärden. Vi kan inte vänta.";
        let engine = fixed_engine();
        let a = engine.analyze_text(text, "a.txt").unwrap();
        let b = engine.analyze_text(text, "a.txt").unwrap();
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.total_score, b.total_score);
        assert_eq!(a.word_count, b.word_count);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_seeded_scorer_is_deterministic() {
        let text = "Fru talman! Jobb och trygghet.";
        let a = AnalysisEngine::new()
            .with_sparv_scorer(Box::new(RandomSparvScorer::seeded(9)))
            .analyze_text(text, "x.txt")
            .unwrap();
        let b = AnalysisEngine::new()
            .with_sparv_scorer(Box::new(RandomSparvScorer::seeded(9)))
            .analyze_text(text, "x.txt")
            .unwrap();
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let text = "Herr talman! Vi måste göra mer för skolan. Varför väntar regeringen?\n\nTack.";
        let parallel = fixed_engine().analyze_text(text, "x.txt").unwrap();
        let sequential = fixed_engine().sequential().analyze_text(text, "x.txt").unwrap();
        assert_eq!(parallel.scores, sequential.scores);
        assert_eq!(parallel.total_score, sequential.total_score);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let seen = Mutex::new(Vec::new());
        let text = "Herr talman! Vi vill mer. Dessutom snabbare.";
        fixed_engine()
            .analyze_text_with_progress(text, "x.txt", &|p: u8| seen.lock().unwrap().push(p))
            .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 20);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.first(), Some(&5));
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn test_scorer_failure_propagates() {
        let engine = AnalysisEngine::new().with_sparv_scorer(Box::new(FailingScorer));
        let err = engine.analyze_text("Herr talman!", "x.txt").unwrap_err();
        assert!(err.to_string().contains("sparv-remote"));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[test]
    fn test_out_of_range_scorer_is_clamped() {
        let engine = AnalysisEngine::new().with_sparv_scorer(Box::new(WildScorer));
        let analysis = engine.analyze_text("Herr talman!", "x.txt").unwrap();
        assert_eq!(analysis.scores.sparv_score, 50);
    }

    #[test]
    fn test_id_format_and_uniqueness() {
        let ids: HashSet<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
        for id in &ids {
            let parts: Vec<&str> = id.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "analysis");
            assert!(parts[1].parse::<i64>().is_ok());
            assert_eq!(parts[2].len(), 9);
            assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_analyze_file_tags_source() {
        let file = make_speech_file("Anf. 3 Per Olsson (M) Herr talman! Sänk skatten.");
        let analysis = fixed_engine().analyze_file(file.path()).unwrap();
        assert_eq!(analysis.source.as_deref(), Some("upload"));
        assert_eq!(analysis.speaker, "Per Olsson");
        assert!(analysis.file_name.ends_with(".txt"));
    }

    #[test]
    fn test_analyze_file_custom_source_tag() {
        let file = make_speech_file("Herr talman!");
        let analysis = fixed_engine()
            .with_source_tag("riksdag-api")
            .analyze_file(file.path())
            .unwrap();
        assert_eq!(analysis.source.as_deref(), Some("riksdag-api"));
    }

    #[test]
    fn test_analyze_file_missing() {
        let err = fixed_engine()
            .analyze_file(Path::new("/nonexistent/speech.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read speech file"));
    }

    #[test]
    fn test_analyze_many_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("Anna_Andersson.txt");
        fs::write(&good, "Herr talman! Jag yrkar bifall.").unwrap();
        let missing = dir.path().join("missing.txt");

        let results = fixed_engine().analyze_many(&[good.clone(), missing.clone()]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().speaker, "Anna Andersson");
        assert!(results[1].is_err());

        let parallel = fixed_engine().analyze_parallel(&[good, missing]);
        assert!(parallel[0].is_ok());
        assert!(parallel[1].is_err());
    }

    #[test]
    fn test_default_engine() {
        let analysis = AnalysisEngine::default().analyze_text("Tack.", "x.txt").unwrap();
        assert!((1..=50).contains(&analysis.scores.sparv_score));
        assert!((1..=100).contains(&analysis.total_score));
    }
}
