//! Historical project similarity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::team::one_or_many;

/// Minimum similarity for a historical project to be reported.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Maximum number of similar projects reported.
pub const DEFAULT_MAX_SIMILAR: usize = 5;

/// A past project as the data source stores it.
///
/// Sources disagree on the name field, so both `project_name` and `name`
/// are kept; [`HistoricalProject::display_name`] picks one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default = "unknown_status")]
    pub status: String,
}

fn unknown_status() -> String {
    "unknown".to_string()
}

impl HistoricalProject {
    pub fn display_name(&self) -> &str {
        self.project_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown Project")
    }

    /// Text compared against a new description: the description, or the
    /// project name when there is none.
    fn comparison_text(&self) -> &str {
        if self.description.is_empty() {
            self.project_name.as_deref().unwrap_or("")
        } else {
            &self.description
        }
    }
}

/// A historical project judged similar to the one being estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProject {
    pub name: String,
    pub similarity: f64,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub status: String,
}

fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    a.intersection(b).count() as f64 / union.max(1) as f64
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// `0.6 * word overlap of the descriptions + 0.4 * technology overlap`,
/// both as Jaccard ratios.
pub fn project_similarity(description: &str, technologies: &[String], project: &HistoricalProject) -> f64 {
    let text_similarity = jaccard(&word_set(description), &word_set(project.comparison_text()));

    let tech_similarity = if technologies.is_empty() || project.technologies.is_empty() {
        0.0
    } else {
        let ours: HashSet<String> = technologies.iter().map(|t| t.to_lowercase()).collect();
        let theirs: HashSet<String> = project
            .technologies
            .iter()
            .map(|t| t.to_lowercase())
            .collect();
        jaccard(&ours, &theirs)
    };

    text_similarity * 0.6 + tech_similarity * 0.4
}

/// Projects above `threshold`, most similar first, at most `limit`.
pub fn find_similar_projects(
    description: &str,
    technologies: &[String],
    history: &[HistoricalProject],
    threshold: f64,
    limit: usize,
) -> Vec<SimilarProject> {
    let mut similar: Vec<SimilarProject> = history
        .iter()
        .filter_map(|project| {
            let similarity = project_similarity(description, technologies, project);
            (similarity > threshold).then(|| SimilarProject {
                name: project.display_name().to_string(),
                similarity,
                estimated_hours: project.estimated_hours,
                actual_hours: project.actual_hours,
                status: project.status.clone(),
            })
        })
        .collect();

    // Stable sort keeps source order among equal scores.
    similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    similar.truncate(limit);
    similar
}
