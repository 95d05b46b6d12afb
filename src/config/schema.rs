//! Config schema and deserialization

use crate::analyzer::engine::DEFAULT_SOURCE;
use crate::analyzer::{FixedSparvScorer, RandomSparvScorer, SparvScorer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the Sparv stand-in produces scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SparvMode {
    /// Uniform random, different on every run (default)
    #[default]
    Random,
    /// Random but reproducible for a given seed and text
    Seeded,
    /// Constant value
    Fixed,
}

/// Sparv scorer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SparvConfig {
    #[serde(default)]
    pub mode: SparvMode,

    /// Seed for `seeded` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Score for `fixed` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
}

impl SparvConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            mode: SparvMode::Seeded,
            seed: Some(seed),
            value: None,
        }
    }

    pub fn fixed(value: u8) -> Self {
        Self {
            mode: SparvMode::Fixed,
            seed: None,
            value: Some(value),
        }
    }

    /// Build the scorer this config describes
    pub fn build_scorer(&self) -> anyhow::Result<Box<dyn SparvScorer>> {
        Ok(match self.mode {
            SparvMode::Random => Box::new(RandomSparvScorer::new()),
            SparvMode::Seeded => {
                let seed = self
                    .seed
                    .ok_or_else(|| anyhow::anyhow!("sparv mode 'seeded' requires a \"seed\""))?;
                Box::new(RandomSparvScorer::seeded(seed))
            }
            SparvMode::Fixed => {
                let value = self
                    .value
                    .ok_or_else(|| anyhow::anyhow!("sparv mode 'fixed' requires a \"value\""))?;
                Box::new(FixedSparvScorer(value))
            }
        })
    }
}

/// Root config structure for .talscorerc.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum total score (exit 1 if below). Default: none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// File name suffixes to analyze (default: .txt)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_patterns: Vec<String>,

    /// Sparv stand-in settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparv: Option<SparvConfig>,

    /// Provenance tag for analyzed files (default: "upload")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_threshold: Option<u8>,
        cli_seed: Option<u64>,
        cli_fixed: Option<u8>,
    ) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if let Some(seed) = cli_seed {
            self.sparv = Some(SparvConfig::seeded(seed));
        }
        // a fixed score beats a seed when both are given
        if let Some(value) = cli_fixed {
            self.sparv = Some(SparvConfig::fixed(value));
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.sparv.is_none() {
            self.sparv = base.sparv;
        }
        if self.source.is_none() {
            self.source = base.source;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.file_patterns.is_empty() {
            self.file_patterns = base.file_patterns;
        }
    }

    /// Get file name patterns, defaulting to plain text files
    pub fn get_file_patterns(&self) -> Vec<&str> {
        if self.file_patterns.is_empty() {
            vec![".txt"]
        } else {
            self.file_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Whether a file name ends with one of the configured suffixes (case-insensitive)
    pub fn accepts_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
            return false;
        };
        self.get_file_patterns()
            .iter()
            .any(|p| name.ends_with(&p.to_lowercase()))
    }

    pub fn source_tag(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    /// Sparv scorer for this config (random when unset)
    pub fn sparv_scorer(&self) -> anyhow::Result<Box<dyn SparvScorer>> {
        self.sparv.clone().unwrap_or_default().build_scorer()
    }
}
