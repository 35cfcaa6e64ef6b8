//! Ensemble configuration files.
//!
//! An ensemble is described as JSON:
//!
//! ```json
//! {
//!   "outputs_root": "outputs/model-outputs",
//!   "models": [
//!     { "name": "trafilatura", "weight": 1.0 },
//!     { "name": "readability", "weight": 1.0 },
//!     { "name": "resiliparse" }
//!   ],
//!   "vote_threshold": 2.0,
//!   "ngram_size": 5
//! }
//! ```
//!
//! `weight` defaults to `1.0`, `vote_threshold` and `ngram_size` default to
//! [`VoteOptions::default`], and `outputs_root` defaults to the
//! `MODEL_OUTPUTS_PATH` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::ModelAnswerCache;
use crate::error::{Error, Result};
use crate::options::VoteOptions;

fn default_weight() -> f64 {
    1.0
}

fn default_threshold() -> f64 {
    VoteOptions::default().vote_threshold
}

fn default_ngram_size() -> usize {
    VoteOptions::default().ngram_size
}

/// One voting model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelSpec {
    /// Model name, matching `{model}.jsonl` output files.
    pub name: String,
    /// Vote weight.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Models, weights and voting parameters for one ensemble.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnsembleConfig {
    /// Root directory of model outputs.
    #[serde(default)]
    pub outputs_root: Option<PathBuf>,
    /// Voting models in evaluation order.
    pub models: Vec<ModelSpec>,
    /// Minimum weighted vote per token.
    #[serde(default = "default_threshold")]
    pub vote_threshold: f64,
    /// N-gram context length.
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
}

impl EnsembleConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Check the configuration the same way an extraction call would.
    pub fn validate(&self) -> Result<()> {
        self.vote_options().validate(&self.model_names(), &self.weights())
    }

    /// Model names in evaluation order.
    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Model weights in evaluation order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.models.iter().map(|m| m.weight).collect()
    }

    /// Voting parameters.
    #[must_use]
    pub fn vote_options(&self) -> VoteOptions {
        VoteOptions::new(self.vote_threshold, self.ngram_size)
    }

    /// Create an empty answer cache for this configuration's outputs root.
    #[must_use]
    pub fn cache(&self) -> ModelAnswerCache {
        match &self.outputs_root {
            Some(root) => ModelAnswerCache::new(root),
            None => ModelAnswerCache::from_env(),
        }
    }
}
