//! Engine configuration, loaded from a JSON file.
//!
//! Every field has a default, so `{}` is a valid config. Relative paths are
//! resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::{ExclusionPolicy, Ranker, ScoreWeights};

/// Largest accepted magnitude for any single term weight.
pub const MAX_WEIGHT_MAGNITUDE: i32 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Lexicon resource. `None` uses the bundled lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// History file. `None` keeps history in memory only.
    pub history_path: Option<PathBuf>,
    /// Maximum history entries kept; oldest evicted first.
    pub history_capacity: usize,
    /// Characters allowed between a term and its negation marker.
    pub negation_window: usize,
    /// Collections at least this large are scored in parallel.
    pub parallel_threshold: usize,
    pub weights: ScoreWeights,
    pub exclusion_policy: ExclusionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            history_path: None,
            history_capacity: 100,
            negation_window: 2,
            parallel_threshold: 512,
            weights: ScoreWeights::default(),
            exclusion_policy: ExclusionPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&raw)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        if w.excluded_ingredient > 0 {
            return Err(ConfigError::Invalid(format!(
                "weights.excluded_ingredient must not be positive (got {})",
                w.excluded_ingredient
            )));
        }
        for (name, value) in [
            ("ingredient", w.ingredient),
            ("cooking_method", w.cooking_method),
            ("category", w.category),
            ("adjective", w.adjective),
            ("keyword", w.keyword),
        ] {
            if value < 0 {
                return Err(ConfigError::Invalid(format!("weights.{name} must not be negative (got {value})")));
            }
        }
        for (name, value) in [
            ("ingredient", w.ingredient),
            ("excluded_ingredient", w.excluded_ingredient),
            ("cooking_method", w.cooking_method),
            ("category", w.category),
            ("adjective", w.adjective),
            ("keyword", w.keyword),
        ] {
            if value.unsigned_abs() > MAX_WEIGHT_MAGNITUDE.unsigned_abs() {
                return Err(ConfigError::Invalid(format!(
                    "weights.{name} must be within ±{MAX_WEIGHT_MAGNITUDE} (got {value})"
                )));
            }
        }
        if self.parallel_threshold == 0 {
            return Err(ConfigError::Invalid("parallel_threshold must be at least 1".to_string()));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.lexicon_path, &mut self.history_path].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn ranker(&self) -> Ranker {
        Ranker {
            weights: self.weights,
            exclusion_policy: self.exclusion_policy,
            parallel_threshold: self.parallel_threshold,
        }
    }
}
