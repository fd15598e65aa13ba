//! Team recommender: which roles a project needs, and who on the roster
//! fills them best.

use serde::{Deserialize, Serialize};

use crate::knowledge::ProjectTypeProfile;
use crate::tech::role_for_technology;

/// Minimum skill match for a roster member to be recommended.
pub const DEFAULT_SKILL_MATCH_THRESHOLD: f64 = 0.3;

/// Hourly rate assumed for roles without a table entry.
pub const DEFAULT_HOURLY_RATE: f64 = 75.0;

const TECH_WEIGHT: f64 = 0.6;
const ROLE_WEIGHT: f64 = 0.4;

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "frontend developer",
        &["frontend", "react", "vue", "angular", "javascript", "html", "css"],
    ),
    (
        "backend developer",
        &["backend", "python", "java", "node.js", "api", "database"],
    ),
    (
        "ui/ux designer",
        &["ui", "ux", "design", "figma", "sketch", "user experience"],
    ),
    (
        "mobile developer",
        &["mobile", "ios", "android", "react native", "flutter"],
    ),
    (
        "devops engineer",
        &["devops", "aws", "docker", "kubernetes", "ci/cd"],
    ),
    (
        "project manager",
        &["project management", "scrum", "agile", "planning"],
    ),
    ("qa tester", &["testing", "qa", "quality assurance", "automation"]),
];

const ROLE_RATES: &[(&str, f64)] = &[
    ("frontend developer", 75.0),
    ("backend developer", 85.0),
    ("ui/ux designer", 70.0),
    ("mobile developer", 90.0),
    ("devops engineer", 95.0),
    ("project manager", 80.0),
    ("qa tester", 60.0),
    ("tech lead", 120.0),
    ("data scientist", 100.0),
];

/// Accepts either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Deserialize a field that historical data stores as either `"react"` or
/// `["react", "css"]`.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

/// A roster entry, owned by the data source and read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default = "unknown")]
    pub availability: String,
    #[serde(default = "unknown")]
    pub experience: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

impl TeamMember {
    pub fn new(name: impl Into<String>, skills: &[&str], hourly_rate: f64) -> Self {
        Self {
            name: name.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            hourly_rate,
            availability: "available".into(),
            experience: unknown(),
        }
    }
}

/// A role filled by a roster member or by a hiring placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecommendation {
    pub name: String,
    pub role: String,
    pub skill_match: f64,
    pub skills: Vec<String>,
    pub hourly_rate: f64,
    pub availability: String,
    pub experience: String,
}

impl TeamRecommendation {
    /// True when nobody on the roster qualified and the slot must be hired.
    pub fn is_placeholder(&self) -> bool {
        self.availability == "to_be_hired"
    }
}

/// Roles for a project: the type's typical roles, then one per technology
/// with a specialist role, then oversight roles for complex work.
/// Insertion-ordered, without duplicates.
pub fn recommend_roles(
    profile: Option<&ProjectTypeProfile>,
    technologies: &[String],
    complexity: f64,
) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    let mut push = |role: &str| {
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    };

    if let Some(profile) = profile {
        for role in &profile.typical_roles {
            push(role.as_str());
        }
    }
    for tech in technologies {
        if let Some(role) = role_for_technology(tech) {
            push(role);
        }
    }
    if complexity > 0.7 {
        push("project manager");
        push("qa tester");
    }
    if complexity > 0.8 {
        push("tech lead");
    }
    roles
}

/// How well a member's skills fit the project's technologies and a role.
///
/// `0.6 * (fraction of technologies the member lists)
///  + 0.4 * (fraction of the role's keywords found in any member skill)`.
/// An empty skill list scores 0.0; unknown roles contribute no role score.
pub fn calculate_skill_match(member_skills: &[String], technologies: &[String], role: &str) -> f64 {
    if member_skills.is_empty() {
        return 0.0;
    }

    let skills: Vec<String> = member_skills.iter().map(|s| s.to_lowercase()).collect();

    let tech_matches = technologies
        .iter()
        .filter(|t| skills.contains(&t.to_lowercase()))
        .count();
    let tech_score = tech_matches as f64 / technologies.len().max(1) as f64;

    let role_score = ROLE_KEYWORDS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, keywords)| {
            let hits = keywords
                .iter()
                .filter(|k| skills.iter().any(|s| s.contains(*k)))
                .count();
            hits as f64 / keywords.len() as f64
        })
        .unwrap_or(0.0);

    (tech_score * TECH_WEIGHT + role_score * ROLE_WEIGHT).clamp(0.0, 1.0)
}

/// Static hourly rate for a role.
pub fn estimate_hourly_rate(role: &str) -> f64 {
    ROLE_RATES
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_HOURLY_RATE)
}

/// One recommendation per role: the best-matching roster member above
/// `threshold`, or a `[Hire <Role>]` placeholder.
///
/// Ties keep the earlier roster entry. A member may fill several roles.
pub fn recommend_team_members(
    roles: &[String],
    technologies: &[String],
    roster: &[TeamMember],
    threshold: f64,
) -> Vec<TeamRecommendation> {
    roles
        .iter()
        .map(|role| {
            let best = roster
                .iter()
                .map(|m| (m, calculate_skill_match(&m.skills, technologies, role)))
                .filter(|(_, score)| *score > threshold)
                .fold(None::<(&TeamMember, f64)>, |best, candidate| match best {
                    Some(b) if b.1 >= candidate.1 => Some(b),
                    _ => Some(candidate),
                });

            match best {
                Some((member, skill_match)) => TeamRecommendation {
                    name: member.name.clone(),
                    role: role.clone(),
                    skill_match,
                    skills: member.skills.clone(),
                    hourly_rate: member.hourly_rate,
                    availability: member.availability.clone(),
                    experience: member.experience.clone(),
                },
                None => TeamRecommendation {
                    name: format!("[Hire {}]", title_case(role)),
                    role: role.clone(),
                    skill_match: 0.0,
                    skills: technologies.to_vec(),
                    hourly_rate: estimate_hourly_rate(role),
                    availability: "to_be_hired".into(),
                    experience: "required".into(),
                },
            }
        })
        .collect()
}

/// Capitalize the first letter of each alphabetic run ("ui/ux designer" →
/// "Ui/Ux Designer").
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
