//! Analysis settings, loadable from a JSON file.

use crate::tokenizer::TokenizerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub tokenizer: TokenizerConfig,
    /// Rows kept per document when ranking by tf-idf.
    pub top_n: usize,
    /// Lowest rank (inclusive) used when fitting Zipf's law.
    pub zipf_min_rank: usize,
    /// Highest rank (exclusive) used when fitting Zipf's law.
    pub zipf_max_rank: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            top_n: 15,
            zipf_min_rank: 11,
            zipf_max_rank: 500,
        }
    }
}

impl ScoringConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: ScoringConfig = serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zipf_min_rank >= self.zipf_max_rank {
            anyhow::bail!("zipf_min_rank ({}) must be below zipf_max_rank ({})", self.zipf_min_rank, self.zipf_max_rank);
        }
        Ok(())
    }

    pub fn zipf_ranks(&self) -> Range<usize> {
        self.zipf_min_rank..self.zipf_max_rank
    }
}
