//! The estimation result and its component records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::RiskFactor;
use crate::history::SimilarProject;
use crate::team::TeamRecommendation;

/// Coarse difficulty band for a complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    /// `< 0.3` Easy, `< 0.6` Medium, `< 0.8` Hard, else Expert.
    pub fn from_complexity(complexity: f64) -> Self {
        if complexity < 0.3 {
            Self::Easy
        } else if complexity < 0.6 {
            Self::Medium
        } else if complexity < 0.8 {
            Self::Hard
        } else {
            Self::Expert
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Planning,
    Design,
    Development,
    Testing,
    Deployment,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Planning,
        Phase::Design,
        Phase::Development,
        Phase::Testing,
        Phase::Deployment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Design => "design",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Deployment => "deployment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Planning => "Requirements analysis, architecture planning, and project setup",
            Self::Design => "UI/UX design, wireframes, mockups, and design system creation",
            Self::Development => "Core development, feature implementation, and integration",
            Self::Testing => "Quality assurance, bug fixes, and performance optimization",
            Self::Deployment => "Production deployment, setup, and go-live activities",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Hours allotted to one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseAllocation {
    pub hours: u32,
    /// Whole-number percentage of the total, 0 to 100.
    pub percentage: u32,
    pub description: String,
}

/// Hours allotted to one skill category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAllocation {
    pub hours: u32,
    /// Percentage of the total, 0.0 to 100.0.
    pub percentage: f64,
    pub technologies: Vec<String>,
}

/// Per-technology analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechAnalysis {
    pub complexity: f64,
    pub difficulty: DifficultyLevel,
    pub learning_curve: f64,
    pub category: String,
}

/// A complete estimate. Created fresh on every call; the caller owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    pub project_name: String,
    pub project_type: String,
    pub total_hours: u32,
    pub optimistic_hours: u32,
    pub realistic_hours: u32,
    pub pessimistic_hours: u32,
    pub complexity_score: f64,
    pub difficulty_level: DifficultyLevel,
    pub confidence_level: f64,
    pub risk_factors: Vec<RiskFactor>,
    pub risk_score: f64,
    pub technologies: Vec<String>,
    pub tech_complexity: BTreeMap<String, TechAnalysis>,
    pub recommended_team_size: usize,
    pub recommended_roles: Vec<String>,
    pub team_members: Vec<TeamRecommendation>,
    pub phase_breakdown: BTreeMap<Phase, PhaseAllocation>,
    pub skill_breakdown: BTreeMap<String, SkillAllocation>,
    pub similar_projects: Vec<SimilarProject>,
    pub created_at: DateTime<Utc>,
}

impl ProjectEstimate {
    /// Whether `optimistic <= realistic <= pessimistic` holds.
    ///
    /// Always true under the default bounds policy. The legacy policy breaks
    /// it for high-risk projects when the risk multiplier exceeds 1.5.
    pub fn hours_ordered(&self) -> bool {
        self.optimistic_hours <= self.realistic_hours
            && self.realistic_hours <= self.pessimistic_hours
    }
}
