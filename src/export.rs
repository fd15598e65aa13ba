//! Rendering a [`ProjectEstimate`] as JSON or as a plain-text report.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{ExportError, ExportResult};
use crate::estimate::ProjectEstimate;
use crate::team::title_case;

/// Output format for [`export_estimate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Report,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "report" => Ok(Self::Report),
            _ => Err(ExportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Report => f.write_str("report"),
        }
    }
}

pub fn export_estimate(estimate: &ProjectEstimate, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Json => to_json(estimate),
        ExportFormat::Report => Ok(to_report(estimate)),
    }
}

/// Pretty-printed JSON of every field.
pub fn to_json(estimate: &ProjectEstimate) -> ExportResult<String> {
    serde_json::to_string_pretty(estimate).map_err(|e| ExportError::Serialize {
        message: e.to_string(),
    })
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.len()));
}

/// Human-readable report: summary, team, technologies, risks, phases and the
/// three most similar past projects. Empty sections are omitted.
pub fn to_report(estimate: &ProjectEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PROJECT ESTIMATION REPORT");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Project: {}", estimate.project_name);
    let _ = writeln!(
        out,
        "Generated: {}",
        estimate.created_at.format("%Y-%m-%d %H:%M")
    );

    heading(&mut out, "SUMMARY");
    let _ = writeln!(out, "Total Estimated Hours: {}", estimate.total_hours);
    let _ = writeln!(out, "  • Optimistic: {} hours", estimate.optimistic_hours);
    let _ = writeln!(out, "  • Realistic: {} hours", estimate.realistic_hours);
    let _ = writeln!(out, "  • Pessimistic: {} hours", estimate.pessimistic_hours);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Complexity: {} ({})",
        estimate.difficulty_level,
        percent(estimate.complexity_score)
    );
    let _ = writeln!(out, "Confidence: {}", percent(estimate.confidence_level));
    let _ = writeln!(out, "Risk Score: {}", percent(estimate.risk_score));

    heading(&mut out, "TEAM RECOMMENDATIONS");
    let _ = writeln!(out, "Team Size: {} people", estimate.recommended_team_size);
    let _ = writeln!(out, "Roles: {}", estimate.recommended_roles.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended Team Members:");
    for member in &estimate.team_members {
        let _ = writeln!(
            out,
            "  • {} - {} (${}/hr)",
            member.name, member.role, member.hourly_rate
        );
    }

    heading(&mut out, "TECHNOLOGY ANALYSIS");
    let _ = writeln!(out, "Technologies: {}", estimate.technologies.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Technology Complexity:");
    for (tech, analysis) in &estimate.tech_complexity {
        let _ = writeln!(
            out,
            "  • {tech}: {} (complexity: {})",
            analysis.difficulty,
            percent(analysis.complexity)
        );
    }

    if !estimate.risk_factors.is_empty() {
        heading(&mut out, "RISK FACTORS");
        for risk in &estimate.risk_factors {
            let _ = writeln!(
                out,
                "  • {}: {} (impact: {})",
                risk.kind.summary(),
                risk.description,
                percent(risk.impact)
            );
        }
    }

    if !estimate.phase_breakdown.is_empty() {
        heading(&mut out, "PHASE BREAKDOWN");
        for (phase, allocation) in &estimate.phase_breakdown {
            let _ = writeln!(
                out,
                "  • {}: {} hours ({}%)",
                title_case(phase.label()),
                allocation.hours,
                allocation.percentage
            );
        }
    }

    if !estimate.similar_projects.is_empty() {
        heading(&mut out, "SIMILAR PROJECTS");
        for project in estimate.similar_projects.iter().take(3) {
            let _ = writeln!(
                out,
                "  • {} (similarity: {})",
                project.name,
                percent(project.similarity)
            );
        }
    }

    out
}
