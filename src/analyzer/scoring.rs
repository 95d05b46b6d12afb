//! Weighted logistic aggregation of sub-scores

use crate::{Grade, Metric, Score, ScoreBreakdown, WeightClass, MAX_SUB_SCORE};

/// Weighted sum when every sub-score is at its maximum
pub const MAX_WEIGHTED_SUM: f64 = 925.0;

/// Steepness of the logistic curve around the midpoint
const LOGISTIC_STEEPNESS: f64 = 0.1;
const LOGISTIC_MIDPOINT: f64 = 50.0;

/// Tail compression thresholds and factors
const UPPER_TAIL: f64 = 75.0;
const UPPER_TAIL_FACTOR: f64 = 0.3;
const LOWER_TAIL: f64 = 25.0;
const LOWER_TAIL_FACTOR: f64 = 0.5;

/// Sub-scores below this trigger a recommendation
const RECOMMENDATION_THRESHOLD: u8 = 15;

/// Intermediate values of one aggregation, for verbose output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreStages {
    pub weighted: f64,
    pub normalized: f64,
    pub logistic: f64,
    pub compressed: f64,
    pub total: u8,
}

/// Calculator for the total speech score
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Total score (1-100) and grade for a breakdown
    pub fn calculate(breakdown: &ScoreBreakdown) -> Score {
        Score::new(Self::stages(breakdown).total)
    }

    /// Run every aggregation stage and keep the intermediates
    pub fn stages(breakdown: &ScoreBreakdown) -> ScoreStages {
        let weighted = Self::weighted_sum(breakdown);
        let normalized = Self::normalize(weighted);
        let logistic = Self::logistic(normalized);
        let compressed = Self::compress_tails(logistic);
        let total = compressed.clamp(1.0, 100.0).round() as u8;
        ScoreStages {
            weighted,
            normalized,
            logistic,
            compressed,
            total,
        }
    }

    /// Σ sub-score × class weight
    pub fn weighted_sum(breakdown: &ScoreBreakdown) -> f64 {
        breakdown
            .entries()
            .map(|(metric, value)| value as f64 * metric.weight_class().multiplier())
            .sum()
    }

    /// Weighted sum as a percentage of the maximum
    pub fn normalize(weighted: f64) -> f64 {
        weighted / MAX_WEIGHTED_SUM * 100.0
    }

    pub fn logistic(normalized: f64) -> f64 {
        100.0 / (1.0 + (-LOGISTIC_STEEPNESS * (normalized - LOGISTIC_MIDPOINT)).exp())
    }

    /// Squash values above 75 and below 25 towards the middle
    pub fn compress_tails(value: f64) -> f64 {
        if value > UPPER_TAIL {
            UPPER_TAIL + (value - UPPER_TAIL) * UPPER_TAIL_FACTOR
        } else if value < LOWER_TAIL {
            LOWER_TAIL - (LOWER_TAIL - value) * LOWER_TAIL_FACTOR
        } else {
            value
        }
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Exceptionell kvalitet",
            Grade::B => "Mycket hög kvalitet",
            Grade::C => "Hög kvalitet",
            Grade::D => "Godkänd kvalitet",
            Grade::E => "Grundläggande nivå",
            Grade::F => "Under godkänd nivå",
        }
    }

    /// Recommendations for high- and normal-weight metrics that score low
    pub fn recommendations(breakdown: &ScoreBreakdown) -> Vec<String> {
        let mut recs: Vec<String> = breakdown
            .entries()
            .filter(|(metric, value)| {
                metric.weight_class() != WeightClass::Low && *value < RECOMMENDATION_THRESHOLD
            })
            .filter_map(|(metric, _)| Self::hint(metric).map(str::to_string))
            .collect();

        if recs.is_empty() {
            recs.push("Anförandet håller god nivå genomgående.".to_string());
        }

        recs
    }

    fn hint(metric: Metric) -> Option<&'static str> {
        let hint = match metric {
            Metric::Lix => "Variera ordlängd och meningsbyggnad för en jämnare läsbarhet",
            Metric::Ovix => "Använd ett rikare ordförråd och undvik att upprepa samma ord",
            Metric::SentenceLength => "Bygg ut de korta meningarna till hela resonemang",
            Metric::NominalRatio => "Balansera substantiv och verb för en mer informationstät stil",
            Metric::WordLength => "Välj mer precisa ord i stället för korta vardagsord",
            Metric::SubordinateClauses => "Knyt ihop påståenden med bisatser för att visa samband",
            Metric::Conjunctions => "Binda samman leden med konjunktioner",
            Metric::Sentiment => "Lyft fram möjligheter och lösningar, inte bara problem",
            Metric::Abstraction => "Koppla konkreta exempel till övergripande principer",
            Metric::TextLength => "Anpassa längden: 500 till 2000 ord ger bäst resultat",
            Metric::Coherence => "Använd sambandsord som dessutom, därför och samtidigt",
            Metric::Fluency => "Blanda korta och långa meningar för bättre rytm",
            _ => return None,
        };
        Some(hint)
    }

    /// Highest possible total, reached when every sub-score is 50
    pub fn ceiling() -> u8 {
        Self::calculate(&ScoreBreakdown::uniform(MAX_SUB_SCORE)).value
    }
}
