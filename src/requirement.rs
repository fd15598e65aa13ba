//! Requirement parser: free-text requirement strings to scored records.
//!
//! Everything here is keyword scanning over the lower-cased text. Keyword
//! hits are additive and not capped before the final clamp: a requirement
//! that says "advanced custom real-time" collects three increments.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::RiskKind;
use crate::knowledge::KnowledgeBase;
use crate::tech::TechComplexityTable;

/// Starting complexity for every requirement.
pub const BASE_REQUIREMENT_COMPLEXITY: f64 = 0.5;

/// Hours for a requirement that names no known feature.
pub const BASE_REQUIREMENT_HOURS: u32 = 8;

/// Per-keyword complexity step.
const KEYWORD_STEP: f64 = 0.15;

/// Scale applied to a technology's distance from the neutral midpoint.
const TECH_WEIGHT: f64 = 0.3;

const HIGH_COMPLEXITY_KEYWORDS: &[&str] = &[
    "complex",
    "advanced",
    "sophisticated",
    "real-time",
    "ai",
    "machine learning",
    "custom",
];

const LOW_COMPLEXITY_KEYWORDS: &[&str] = &["simple", "basic", "standard", "typical", "normal"];

const SKILL_KEYWORDS: &[(&str, &[&str])] = &[
    ("frontend", &["frontend", "front-end", "ui", "interface", "client-side"]),
    ("backend", &["backend", "back-end", "server", "database", "api"]),
    ("design", &["design", "ui/ux", "visual", "graphics", "branding"]),
    ("mobile", &["mobile", "ios", "android", "app"]),
    ("devops", &["deployment", "hosting", "server", "cloud", "devops"]),
];

const RISK_KEYWORDS: &[(RiskKind, &[&str])] = &[
    (
        RiskKind::UnclearRequirements,
        &["maybe", "possibly", "might", "unclear", "tbd", "to be determined"],
    ),
    (
        RiskKind::NewTechnology,
        &["new", "latest", "cutting-edge", "experimental"],
    ),
    (
        RiskKind::ComplexIntegration,
        &["integrate", "third-party", "external", "api"],
    ),
    (
        RiskKind::PerformanceCritical,
        &["fast", "performance", "speed", "optimize", "scalable"],
    ),
    (
        RiskKind::SecuritySensitive,
        &["secure", "security", "authentication", "authorization", "encryption"],
    ),
];

/// One parsed requirement. Transient: built per estimation call and dropped
/// with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequirement {
    pub text: String,
    /// Heuristic complexity in \[0.0, 1.0\].
    pub complexity: f64,
    /// 1 (highest) to 5.
    pub priority: u8,
    pub estimated_hours: u32,
    pub required_skills: BTreeSet<String>,
    pub risk_factors: BTreeSet<RiskKind>,
}

impl ProjectRequirement {
    /// An unscored requirement with neutral complexity and priority 3.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            complexity: BASE_REQUIREMENT_COMPLEXITY,
            priority: 3,
            estimated_hours: 0,
            required_skills: BTreeSet::new(),
            risk_factors: BTreeSet::new(),
        }
    }
}

/// Turns requirement strings into [`ProjectRequirement`]s using the
/// technology table and the knowledge base's feature estimates.
#[derive(Debug, Clone, Copy)]
pub struct RequirementParser<'a> {
    table: &'a TechComplexityTable,
    knowledge: &'a KnowledgeBase,
}

impl<'a> RequirementParser<'a> {
    pub fn new(table: &'a TechComplexityTable, knowledge: &'a KnowledgeBase) -> Self {
        Self { table, knowledge }
    }

    /// Parse every requirement, preserving input order.
    pub fn parse<S: AsRef<str>>(&self, requirements: &[S]) -> Vec<ProjectRequirement> {
        requirements
            .iter()
            .map(|r| self.parse_one(r.as_ref()))
            .collect()
    }

    pub fn parse_one(&self, text: &str) -> ProjectRequirement {
        let mut requirement = ProjectRequirement::new(text);
        requirement.complexity = self.estimate_complexity(text);
        requirement.required_skills = self.extract_skills(text);
        requirement.risk_factors = self.identify_risks(text);
        requirement.estimated_hours = self.estimate_hours(text, requirement.complexity);
        requirement
    }

    /// Complexity in \[0.0, 1.0\] from keyword and technology hits.
    pub fn estimate_complexity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let mut complexity = BASE_REQUIREMENT_COMPLEXITY;

        for keyword in HIGH_COMPLEXITY_KEYWORDS {
            if lower.contains(keyword) {
                complexity += KEYWORD_STEP;
            }
        }
        for keyword in LOW_COMPLEXITY_KEYWORDS {
            if lower.contains(keyword) {
                complexity -= KEYWORD_STEP;
            }
        }
        for (tech, tech_complexity) in self.table.iter() {
            if lower.contains(tech) {
                complexity += (tech_complexity - 0.5) * TECH_WEIGHT;
            }
        }

        complexity.clamp(0.0, 1.0)
    }

    /// Technologies and skill categories the requirement calls for.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        let mut skills: BTreeSet<String> = self
            .table
            .mentioned_in(&lower)
            .into_iter()
            .map(str::to_string)
            .collect();

        for (skill, keywords) in SKILL_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                skills.insert((*skill).to_string());
            }
        }
        skills
    }

    pub fn identify_risks(&self, text: &str) -> BTreeSet<RiskKind> {
        let lower = text.to_lowercase();
        RISK_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Hours scaled by `0.5 + 1.5 * complexity`, from the first matching
    /// feature estimate or the 8-hour default. Truncated to whole hours.
    pub fn estimate_hours(&self, text: &str, complexity: f64) -> u32 {
        let multiplier = 0.5 + complexity * 1.5;
        let lower = text.to_lowercase();
        let base = self
            .knowledge
            .matching_feature(&lower)
            .map(|(_, hours)| hours)
            .unwrap_or(BASE_REQUIREMENT_HOURS);
        (f64::from(base) * multiplier) as u32
    }
}
