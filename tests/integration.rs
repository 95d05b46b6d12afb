//! End-to-end tests through the public library API

use std::fs;
use std::path::{Path, PathBuf};
use talscore::analyzer::{AnalysisEngine, FixedSparvScorer, ScoreCalculator};
use talscore::config::load_config;
use talscore::reporter::{CsvReporter, JsonReporter};
use talscore::{Analysis, Grade, Metric, ScoreBreakdown, UNKNOWN_PARTY, UNKNOWN_SPEAKER};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn speech_fixtures() -> Vec<PathBuf> {
    vec![
        fixture("speeches/Anna_Andersson_2024-01-15.txt"),
        fixture("speeches/Per_Olsson_2024-01-16.txt"),
        fixture("speeches/anforande.txt"),
    ]
}

fn fixed_engine() -> AnalysisEngine {
    AnalysisEngine::new().with_sparv_scorer(Box::new(FixedSparvScorer(25)))
}

#[test]
fn test_header_speech_metadata() {
    let analysis = fixed_engine()
        .analyze_file(&fixture("speeches/Anna_Andersson_2024-01-15.txt"))
        .unwrap();

    assert_eq!(analysis.speaker, "Anna Andersson");
    assert_eq!(analysis.party, "S");
    assert_eq!(analysis.file_name, "Anna_Andersson_2024-01-15.txt");
    assert_eq!(analysis.source.as_deref(), Some("upload"));
    assert!(analysis.word_count > 50);
    assert!(analysis.id.starts_with("analysis-"));
}

#[test]
fn test_file_name_and_text_fallbacks() {
    let analysis = fixed_engine()
        .analyze_file(&fixture("speeches/Per_Olsson_2024-01-16.txt"))
        .unwrap();
    assert_eq!(analysis.speaker, "Per Olsson");
    assert_eq!(analysis.party, "M");

    let anonymous = fixed_engine()
        .analyze_file(&fixture("speeches/anforande.txt"))
        .unwrap();
    assert_eq!(anonymous.speaker, UNKNOWN_SPEAKER);
    assert_eq!(anonymous.party, UNKNOWN_PARTY);
    assert!(!anonymous.has_known_speaker());
}

#[test]
fn test_scores_stay_in_bounds() {
    let engine = fixed_engine();
    for path in speech_fixtures() {
        let analysis = engine.analyze_file(&path).unwrap();
        for (metric, value) in analysis.scores.entries() {
            assert!(
                (1..=50).contains(&value),
                "{metric} = {value} in {}",
                path.display()
            );
        }
        assert!((13..=82).contains(&analysis.total_score));
        assert_eq!(analysis.grade, Grade::from_score(analysis.total_score));
        assert_eq!(analysis.scores.sparv_score, 25);
    }
}

#[test]
fn test_total_matches_calculator() {
    let analysis = fixed_engine()
        .analyze_file(&fixture("speeches/Anna_Andersson_2024-01-15.txt"))
        .unwrap();
    let score = ScoreCalculator::calculate(&analysis.scores);
    assert_eq!(analysis.total_score, score.value);
    assert_eq!(analysis.grade, score.grade);
}

#[test]
fn test_same_text_same_scores_with_fixed_scorer() {
    let engine = fixed_engine();
    let path = fixture("speeches/anforande.txt");
    let a = engine.analyze_file(&path).unwrap();
    let b = engine.analyze_file(&path).unwrap();
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.total_score, b.total_score);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let files = speech_fixtures();
    let engine = fixed_engine();
    let parallel: Vec<Analysis> = engine
        .analyze_parallel(&files)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    let sequential: Vec<Analysis> = fixed_engine()
        .sequential()
        .analyze_many(&files)
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(parallel.len(), 3);
    for (p, s) in parallel.iter().zip(&sequential) {
        assert_eq!(p.file_name, s.file_name);
        assert_eq!(p.scores, s.scores);
    }
}

#[test]
fn test_aggregate_over_fixtures() {
    let engine = fixed_engine();
    let results: Vec<Analysis> = engine
        .analyze_many(&speech_fixtures())
        .into_iter()
        .map(Result::unwrap)
        .collect();
    let stats = AnalysisEngine::aggregate_stats(&results);

    assert_eq!(stats.files_analyzed, 3);
    assert_eq!(
        stats.total_words,
        results.iter().map(|r| r.word_count).sum::<usize>()
    );
    // the anonymous speech has no party and is left out of the party table
    let parties: Vec<&str> = stats.parties.iter().map(|p| p.party.as_str()).collect();
    assert_eq!(parties.len(), 2);
    assert!(parties.contains(&"S"));
    assert!(parties.contains(&"M"));
    assert_eq!(stats.top.len(), 3);
    assert!(stats.top[0].total_score >= stats.top[2].total_score);
    assert_eq!(
        stats.longest.as_ref().unwrap().file_name,
        "Anna_Andersson_2024-01-15.txt"
    );
}

#[test]
fn test_json_and_csv_exports() {
    let results: Vec<Analysis> = fixed_engine()
        .analyze_many(&speech_fixtures())
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let json = JsonReporter::new().report_many(&results);
    let back: Vec<Analysis> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, results);

    let csv = CsvReporter::new().report_many(&results);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Anna_Andersson_2024-01-15.txt,Anna Andersson,S,"));
    assert!(lines[3].contains(UNKNOWN_SPEAKER));
}

#[test]
fn test_config_drives_engine() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("base.json"),
        r#"{ "threshold": 55, "sparv": { "mode": "fixed", "value": 40 } }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(".talscorerc.json"),
        r#"{ "extends": "./base.json", "source": "riksdag-api" }"#,
    )
    .unwrap();

    let config = load_config(dir.path(), None).unwrap();
    assert_eq!(config.threshold, Some(55));

    let engine = AnalysisEngine::new()
        .with_sparv_scorer(config.sparv_scorer().unwrap())
        .with_source_tag(config.source_tag());
    let analysis = engine
        .analyze_file(&fixture("speeches/anforande.txt"))
        .unwrap();
    assert_eq!(analysis.scores.get(Metric::SparvScore), 40);
    assert_eq!(analysis.source.as_deref(), Some("riksdag-api"));
}

#[test]
fn test_library_entry_point() {
    let text = fs::read_to_string(fixture("speeches/anforande.txt")).unwrap();
    let analysis = talscore::analyze_text(&text, "anforande.txt").unwrap();
    assert_eq!(analysis.file_name, "anforande.txt");
    assert!(analysis.source.is_none());
    assert!((13..=82).contains(&analysis.total_score));
}

#[test]
fn test_recommendations_for_weak_speech() {
    let weak = ScoreBreakdown::uniform(5);
    let recs = ScoreCalculator::recommendations(&weak);
    assert!(!recs.is_empty());

    let strong = ScoreBreakdown::uniform(50);
    assert_eq!(ScoreCalculator::calculate(&strong).value, 82);
}
