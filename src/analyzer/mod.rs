//! Analyzer module - speech metrics, aggregation and the analysis engine

pub mod engine;
pub mod metrics;
pub mod scoring;
pub mod sparv;

pub use engine::AnalysisEngine;
pub use metrics::{clamp_score, standard_battery, TextMetric};
pub use scoring::{ScoreCalculator, ScoreStages};
pub use sparv::{FixedSparvScorer, RandomSparvScorer, SparvScorer};
