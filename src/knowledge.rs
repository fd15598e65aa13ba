//! Estimation knowledge base: per-project-type baselines and per-feature hours.
//!
//! The document is JSON on disk (`data/estimation_knowledge.json` by default).
//! It is read once when an estimator is built; if the file is missing, the
//! built-in defaults are written there and used. A corrupt file is a hard
//! error so a hand-edited knowledge base never silently falls back.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KnowledgeBaseError, KnowledgeBaseResult};

/// Base hours used when the project type has no profile.
pub const DEFAULT_BASE_HOURS: u32 = 80;

/// Learning curve assumed for technologies without an entry.
pub const DEFAULT_LEARNING_CURVE: f64 = 0.5;

/// Baseline numbers for one kind of project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTypeProfile {
    pub base_hours: u32,
    #[serde(default = "default_multiplier")]
    pub complexity_multiplier: f64,
    #[serde(default)]
    pub common_features: Vec<String>,
    #[serde(default)]
    pub typical_roles: Vec<String>,
}

fn default_multiplier() -> f64 {
    1.0
}

/// The persisted estimation knowledge base.
///
/// Maps are ordered so feature lookup (first match wins) is deterministic
/// regardless of the key order in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub project_types: BTreeMap<String, ProjectTypeProfile>,
    #[serde(default)]
    pub feature_estimates: BTreeMap<String, u32>,
    #[serde(default)]
    pub technology_learning_curves: BTreeMap<String, f64>,
}

fn profile(base_hours: u32, multiplier: f64, features: &[&str], roles: &[&str]) -> ProjectTypeProfile {
    ProjectTypeProfile {
        base_hours,
        complexity_multiplier: multiplier,
        common_features: features.iter().map(|s| s.to_string()).collect(),
        typical_roles: roles.iter().map(|s| s.to_string()).collect(),
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        let project_types = BTreeMap::from([
            (
                "website".to_string(),
                profile(
                    40,
                    1.0,
                    &["responsive design", "contact form", "cms", "seo"],
                    &["frontend developer", "designer", "content creator"],
                ),
            ),
            (
                "web_app".to_string(),
                profile(
                    120,
                    1.5,
                    &["user authentication", "database", "api", "admin panel"],
                    &[
                        "frontend developer",
                        "backend developer",
                        "ui/ux designer",
                        "project manager",
                    ],
                ),
            ),
            (
                "mobile_app".to_string(),
                profile(
                    200,
                    1.8,
                    &["native ui", "api integration", "offline mode", "push notifications"],
                    &[
                        "mobile developer",
                        "backend developer",
                        "ui/ux designer",
                        "qa tester",
                    ],
                ),
            ),
            (
                "e-commerce".to_string(),
                profile(
                    160,
                    1.6,
                    &[
                        "product catalog",
                        "shopping cart",
                        "payment processing",
                        "order management",
                    ],
                    &[
                        "frontend developer",
                        "backend developer",
                        "ui/ux designer",
                        "payment specialist",
                    ],
                ),
            ),
        ]);

        let feature_estimates = [
            ("user_authentication", 16),
            ("payment_integration", 24),
            ("api_integration", 12),
            ("admin_panel", 32),
            ("responsive_design", 20),
            ("search_functionality", 16),
            ("real_time_features", 40),
            ("file_upload", 8),
            ("email_notifications", 12),
            ("social_login", 8),
            ("multi_language", 24),
            ("reporting_dashboard", 40),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let technology_learning_curves = [
            ("react", 0.8),
            ("vue", 0.6),
            ("angular", 1.0),
            ("django", 0.7),
            ("flask", 0.5),
            ("wordpress", 0.3),
            ("webflow", 0.2),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            project_types,
            feature_estimates,
            technology_learning_curves,
        }
    }
}

impl KnowledgeBase {
    /// Load the knowledge base, writing and returning the defaults if the file
    /// does not exist yet.
    pub fn load_or_init(path: &Path) -> KnowledgeBaseResult<Self> {
        if path.exists() {
            return Self::load(path);
        }
        let kb = Self::default();
        kb.save(path)?;
        tracing::info!(path = %path.display(), "wrote default estimation knowledge base");
        Ok(kb)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> KnowledgeBaseResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeBaseError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let kb: Self = serde_json::from_str(&content).map_err(|e| KnowledgeBaseError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            path = %path.display(),
            project_types = kb.project_types.len(),
            features = kb.feature_estimates.len(),
            "loaded estimation knowledge base"
        );
        Ok(kb)
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> KnowledgeBaseResult<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| KnowledgeBaseError::Serialize {
                message: e.to_string(),
            })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| KnowledgeBaseError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| KnowledgeBaseError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn project_type(&self, name: &str) -> Option<&ProjectTypeProfile> {
        self.project_types.get(name)
    }

    /// Base hours for a project type, [`DEFAULT_BASE_HOURS`] when unknown.
    pub fn base_hours(&self, project_type: &str) -> u32 {
        self.project_type(project_type)
            .map(|p| p.base_hours)
            .unwrap_or(DEFAULT_BASE_HOURS)
    }

    pub fn learning_curve(&self, technology: &str) -> f64 {
        self.technology_learning_curves
            .get(technology)
            .copied()
            .unwrap_or(DEFAULT_LEARNING_CURVE)
    }

    /// The first feature whose name (underscores read as spaces) occurs in
    /// the lower-cased text.
    pub fn matching_feature(&self, text_lower: &str) -> Option<(&str, u32)> {
        self.feature_estimates
            .iter()
            .find(|(name, _)| text_lower.contains(&name.replace('_', " ")))
            .map(|(name, hours)| (name.as_str(), *hours))
    }
}
