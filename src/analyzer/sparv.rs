//! Stand-in for the Sparv linguistic annotation service
//!
//! The real service is remote and not bundled. Scorers here produce a
//! sub-score in 1-50; the engine clamps whatever a scorer returns.

use crate::{AnalysisError, MAX_SUB_SCORE, MIN_SUB_SCORE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// External linguistic scorer for the `sparvScore` metric
pub trait SparvScorer: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Score the cleaned speech text
    fn score(&self, text: &str) -> Result<u8, AnalysisError>;
}

/// Uniform random score, optionally reproducible per (seed, text).
///
/// Seeded scores depend only on SHA-256 and ChaCha8, so they stay the same
/// across toolchain upgrades.
#[derive(Debug, Clone, Default)]
pub struct RandomSparvScorer {
    seed: Option<u64>,
}

impl RandomSparvScorer {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// First 8 bytes of the SHA-256 of the text, big-endian
    fn text_hash(text: &str) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(prefix)
    }
}

impl SparvScorer for RandomSparvScorer {
    fn name(&self) -> &str {
        "sparv-random"
    }

    fn score(&self, text: &str) -> Result<u8, AnalysisError> {
        let range = MIN_SUB_SCORE..=MAX_SUB_SCORE;
        Ok(match self.seed {
            Some(seed) => {
                ChaCha8Rng::seed_from_u64(seed ^ Self::text_hash(text)).gen_range(range)
            }
            None => rand::thread_rng().gen_range(range),
        })
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy)]
pub struct FixedSparvScorer(pub u8);

impl SparvScorer for FixedSparvScorer {
    fn name(&self) -> &str {
        "sparv-fixed"
    }

    fn score(&self, _text: &str) -> Result<u8, AnalysisError> {
        Ok(self.0.clamp(MIN_SUB_SCORE, MAX_SUB_SCORE))
    }
}
