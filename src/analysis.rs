//! Complexity and risk analysis over a project description, its parsed
//! requirements, and its technology list.
//!
//! Risk checks are independent of each other; a project can trip any subset.
//! Each detected risk carries a fixed impact from [`RiskKind::impact`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::requirement::ProjectRequirement;
use crate::tech::TechComplexityTable;

/// Risk score reported when no risk factor is detected.
pub const BASELINE_RISK_SCORE: f64 = 0.2;

/// Neutral value for a complexity factor with no input signal.
const NEUTRAL_COMPLEXITY: f64 = 0.5;

const EXPERIMENTAL_KEYWORDS: &[&str] = &["complex", "sophisticated", "advanced"];

const COMPLEXITY_INDICATORS: &[&str] = &[
    "complex",
    "advanced",
    "sophisticated",
    "enterprise",
    "scalable",
    "high-performance",
    "real-time",
    "machine learning",
    "ai",
    "blockchain",
    "microservices",
    "distributed",
];

const FEATURE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "user_authentication",
        &["login", "signup", "authentication", "user accounts"],
    ),
    (
        "payment_integration",
        &["payment", "checkout", "stripe", "paypal", "billing"],
    ),
    (
        "api_integration",
        &["api", "integration", "third-party", "external service"],
    ),
    (
        "admin_panel",
        &["admin", "dashboard", "management", "control panel"],
    ),
    ("real_time", &["real-time", "live", "chat", "notifications"]),
    ("search", &["search", "filter", "find"]),
    ("file_upload", &["upload", "file", "image", "document"]),
    ("responsive", &["responsive", "mobile-friendly", "adaptive"]),
    (
        "multi_language",
        &["multi-language", "internationalization", "i18n"],
    ),
];

/// Project types in match order; the first type with a keyword hit wins.
pub const PROJECT_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "website",
        &["website", "site", "landing page", "portfolio", "blog"],
    ),
    (
        "web_app",
        &["web app", "web application", "dashboard", "platform", "system"],
    ),
    (
        "mobile_app",
        &["mobile app", "ios app", "android app", "mobile application"],
    ),
    (
        "e-commerce",
        &["e-commerce", "online store", "shop", "marketplace", "store"],
    ),
];

// ---------------------------------------------------------------------------
// Risk kinds
// ---------------------------------------------------------------------------

/// A named, statically weighted risk condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    NewTechnology,
    TightDeadline,
    ComplexIntegration,
    UnclearRequirements,
    LargeTeam,
    RemoteTeam,
    FirstTimeClient,
    ExperimentalFeatures,
    PerformanceCritical,
    SecuritySensitive,
}

impl RiskKind {
    /// Fixed impact weight in \[0.0, 1.0\].
    pub fn impact(self) -> f64 {
        match self {
            Self::NewTechnology => 0.3,
            Self::TightDeadline => 0.4,
            Self::ComplexIntegration => 0.5,
            Self::UnclearRequirements => 0.6,
            Self::LargeTeam => 0.2,
            Self::RemoteTeam => 0.1,
            Self::FirstTimeClient => 0.2,
            Self::ExperimentalFeatures => 0.7,
            Self::PerformanceCritical => 0.4,
            Self::SecuritySensitive => 0.5,
        }
    }

    /// Generic description of the condition, shown next to the
    /// project-specific one in reports.
    pub fn summary(self) -> &'static str {
        match self {
            Self::NewTechnology => "Using unfamiliar technology",
            Self::TightDeadline => "Very short timeline",
            Self::ComplexIntegration => "Multiple system integrations",
            Self::UnclearRequirements => "Ambiguous or changing requirements",
            Self::LargeTeam => "Coordination overhead with large team",
            Self::RemoteTeam => "Distributed team communication",
            Self::FirstTimeClient => "New client relationship",
            Self::ExperimentalFeatures => "Unproven or experimental functionality",
            Self::PerformanceCritical => "High performance requirements",
            Self::SecuritySensitive => "High security requirements",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewTechnology => "new_technology",
            Self::TightDeadline => "tight_deadline",
            Self::ComplexIntegration => "complex_integration",
            Self::UnclearRequirements => "unclear_requirements",
            Self::LargeTeam => "large_team",
            Self::RemoteTeam => "remote_team",
            Self::FirstTimeClient => "first_time_client",
            Self::ExperimentalFeatures => "experimental_features",
            Self::PerformanceCritical => "performance_critical",
            Self::SecuritySensitive => "security_sensitive",
        }
    }
}

impl std::fmt::Display for RiskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected risk with a project-specific description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub description: String,
    pub impact: f64,
}

impl RiskFactor {
    pub fn new(kind: RiskKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            impact: kind.impact(),
        }
    }
}

/// Mean impact of the detected risks, capped at 1.0; [`BASELINE_RISK_SCORE`]
/// when nothing was detected.
///
/// This averages rather than sums, so adding a low-impact risk can lower the
/// score.
pub fn calculate_risk_score(risks: &[RiskFactor]) -> f64 {
    if risks.is_empty() {
        return BASELINE_RISK_SCORE;
    }
    let total: f64 = risks.iter().map(|r| r.impact).sum();
    (total / risks.len().max(1) as f64).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

/// The three complexity signals and their weighted combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactors {
    pub technology_complexity: f64,
    pub requirement_complexity: f64,
    pub integration_complexity: f64,
    /// `0.4 * technology + 0.4 * requirement + 0.2 * integration`.
    pub overall_complexity: f64,
}

/// Complexity and risk analysis backed by a technology table.
#[derive(Debug, Clone, Copy)]
pub struct ProjectAnalyzer<'a> {
    table: &'a TechComplexityTable,
    tight_deadline_days: i64,
}

impl<'a> ProjectAnalyzer<'a> {
    pub fn new(table: &'a TechComplexityTable) -> Self {
        Self {
            table,
            tight_deadline_days: 30,
        }
    }

    /// Deadlines closer than this many days raise `tight_deadline`.
    pub fn with_tight_deadline_days(mut self, days: i64) -> Self {
        self.tight_deadline_days = days;
        self
    }

    /// Weighted mix of technology (0.4), requirement (0.4) and integration
    /// (0.2) complexity.
    ///
    /// The integration factor is `(technologies + 2 * "integration"
    /// mentions) / 10`, capped at 1.0, except that with no technologies and
    /// no mentions it is the neutral 0.5. Adding one technology to such a
    /// project therefore drops the factor from 0.5 to 0.1.
    pub fn analyze_complexity(
        &self,
        description: &str,
        requirements: &[ProjectRequirement],
        technologies: &[String],
    ) -> ComplexityFactors {
        let technology_complexity = mean(technologies.iter().map(|t| self.table.complexity_of(t)))
            .unwrap_or(NEUTRAL_COMPLEXITY);
        let requirement_complexity =
            mean(requirements.iter().map(|r| r.complexity)).unwrap_or(NEUTRAL_COMPLEXITY);

        let integration_mentions = description.to_lowercase().matches("integration").count();
        let integration_complexity = if technologies.is_empty() && integration_mentions == 0 {
            // No technologies and no integrations named: nothing to measure.
            NEUTRAL_COMPLEXITY
        } else {
            let indicators = technologies.len() + integration_mentions * 2;
            (indicators as f64 / 10.0).min(1.0)
        };

        let overall_complexity = (technology_complexity * 0.4
            + requirement_complexity * 0.4
            + integration_complexity * 0.2)
            .clamp(0.0, 1.0);

        ComplexityFactors {
            technology_complexity,
            requirement_complexity,
            integration_complexity,
            overall_complexity,
        }
    }

    /// Run every risk check. `now` anchors the deadline check.
    pub fn identify_risk_factors(
        &self,
        description: &str,
        requirements: &[ProjectRequirement],
        technologies: &[String],
        deadline: Option<&str>,
        now: NaiveDateTime,
    ) -> Vec<RiskFactor> {
        let mut risks = Vec::new();
        let desc_lower = description.to_lowercase();

        let complex_techs = self.table.count_complex(technologies);
        if complex_techs > 2 {
            risks.push(RiskFactor::new(
                RiskKind::NewTechnology,
                format!("Using {complex_techs} complex technologies"),
            ));
        }

        let unclear = requirements
            .iter()
            .filter(|r| r.risk_factors.contains(&RiskKind::UnclearRequirements))
            .count();
        if unclear > 0 {
            risks.push(RiskFactor::new(
                RiskKind::UnclearRequirements,
                format!("{unclear} unclear requirements identified"),
            ));
        }

        if EXPERIMENTAL_KEYWORDS.iter().any(|k| desc_lower.contains(k)) {
            risks.push(RiskFactor::new(
                RiskKind::ExperimentalFeatures,
                "Complex or advanced features required",
            ));
        }

        let integrations =
            desc_lower.matches("integration").count() + desc_lower.matches("api").count();
        if integrations > 2 {
            risks.push(RiskFactor::new(
                RiskKind::ComplexIntegration,
                format!("Multiple integrations required ({integrations})"),
            ));
        }

        if let Some(days) = deadline.and_then(|d| days_until(d, now)) {
            if days < self.tight_deadline_days {
                risks.push(RiskFactor::new(
                    RiskKind::TightDeadline,
                    format!("Only {days} days available"),
                ));
            }
        }

        risks
    }
}

/// Whole days from `now` until midnight of a `YYYY-MM-DD` deadline.
///
/// Returns `None` (and the deadline check is skipped) for anything that does
/// not parse.
pub fn days_until(deadline: &str, now: NaiveDateTime) -> Option<i64> {
    let date = match NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            tracing::debug!(deadline, error = %e, "ignoring unparsable deadline");
            return None;
        }
    };
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some((midnight - now).num_days())
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

// ---------------------------------------------------------------------------
// Description analysis
// ---------------------------------------------------------------------------

/// What a free-text project description reveals on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionAnalysis {
    /// Table technologies mentioned, in table order.
    pub technologies: Vec<String>,
    /// Feature families with a keyword hit.
    pub features: Vec<String>,
    pub complexity_indicators: Vec<String>,
    /// Project type named outright, if any.
    pub project_type: Option<String>,
}

pub fn analyze_description(description: &str, table: &TechComplexityTable) -> DescriptionAnalysis {
    let lower = description.to_lowercase();

    let features = FEATURE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(feature, _)| (*feature).to_string())
        .collect();

    let complexity_indicators = COMPLEXITY_INDICATORS
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| (*k).to_string())
        .collect();

    DescriptionAnalysis {
        technologies: table
            .mentioned_in(&lower)
            .into_iter()
            .map(str::to_string)
            .collect(),
        features,
        complexity_indicators,
        project_type: project_type_from_description(&lower).map(str::to_string),
    }
}

/// First project type whose keywords occur in the description.
pub fn project_type_from_description(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    PROJECT_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(project_type, _)| *project_type)
}
