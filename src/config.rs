//! Estimator configuration, persisted as TOML in
//! `$XDG_CONFIG_HOME/scopewise/config.toml`.
//!
//! Every field has a serde default, so a partial (or empty) file is valid.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::{DEFAULT_MAX_SIMILAR, DEFAULT_SIMILARITY_THRESHOLD};
use crate::team::DEFAULT_SKILL_MATCH_THRESHOLD;

/// Errors from config operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(scopewise::config::read),
        help("Ensure the config file exists, or create one with `scopewise config init`.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(scopewise::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config: {message}")]
    #[diagnostic(
        code(scopewise::config::serialize),
        help("A config value could not be encoded as TOML.")
    )]
    Serialize { message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(scopewise::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// When the optimistic and pessimistic bounds are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Derive both bounds from the final realistic figure, after the
    /// high-risk adjustment. Keeps `optimistic <= realistic <= pessimistic`.
    #[default]
    Recompute,
    /// Derive both bounds before the high-risk adjustment, as older estimates
    /// did. The bounds then ignore the adjustment, and a multiplier above 1.5
    /// reports `realistic > pessimistic`.
    Legacy,
}

/// Estimator tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Knowledge base JSON document; written with defaults if missing. The
    /// CLI resolves a relative path against the XDG data directory.
    #[serde(default = "default_knowledge_base_path")]
    pub knowledge_base_path: PathBuf,
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
    /// Look up similar historical projects.
    #[serde(default = "default_true")]
    pub use_historical_data: bool,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_max_similar_projects")]
    pub max_similar_projects: usize,
    #[serde(default = "default_skill_match_threshold")]
    pub skill_match_threshold: f64,
    /// Risk score above which hours are inflated.
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: f64,
    #[serde(default = "default_high_risk_multiplier")]
    pub high_risk_multiplier: f64,
    /// Deadlines closer than this raise a tight-deadline risk.
    #[serde(default = "default_tight_deadline_days")]
    pub tight_deadline_days: i64,
}

fn default_knowledge_base_path() -> PathBuf {
    PathBuf::from("data/estimation_knowledge.json")
}
fn default_true() -> bool {
    true
}
fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_max_similar_projects() -> usize {
    DEFAULT_MAX_SIMILAR
}
fn default_skill_match_threshold() -> f64 {
    DEFAULT_SKILL_MATCH_THRESHOLD
}
fn default_high_risk_threshold() -> f64 {
    0.6
}
fn default_high_risk_multiplier() -> f64 {
    1.3
}
fn default_tight_deadline_days() -> i64 {
    30
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: default_knowledge_base_path(),
            bounds_policy: BoundsPolicy::default(),
            use_historical_data: default_true(),
            similarity_threshold: default_similarity_threshold(),
            max_similar_projects: default_max_similar_projects(),
            skill_match_threshold: default_skill_match_threshold(),
            high_risk_threshold: default_high_risk_threshold(),
            high_risk_multiplier: default_high_risk_multiplier(),
            tight_deadline_days: default_tight_deadline_days(),
        }
    }
}

impl EstimatorConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
