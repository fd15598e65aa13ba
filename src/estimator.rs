//! Estimate builder: runs the parser, analyzer, recommender and similarity
//! lookup over one project and assembles a [`ProjectEstimate`].
//!
//! The estimator holds its knowledge base, technology table and data source
//! for its whole lifetime. The knowledge base is read once, at construction.
//! Estimation itself never fails: every lookup has a default.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime, Utc};
use regex::Regex;

use crate::analysis::{
    analyze_description, calculate_risk_score, project_type_from_description, DescriptionAnalysis,
    ProjectAnalyzer,
};
use crate::config::{BoundsPolicy, EstimatorConfig};
use crate::error::KnowledgeBaseResult;
use crate::estimate::{
    DifficultyLevel, Phase, PhaseAllocation, ProjectEstimate, SkillAllocation, TechAnalysis,
};
use crate::history::find_similar_projects;
use crate::knowledge::KnowledgeBase;
use crate::requirement::RequirementParser;
use crate::source::{ProjectHistory, RosterProvider};
use crate::team::{recommend_roles, recommend_team_members, title_case};
use crate::tech::{category_of, TechComplexityTable};

/// Project type used when neither the description nor the technologies
/// say otherwise.
pub const DEFAULT_PROJECT_TYPE: &str = "website";

const OPTIMISTIC_FACTOR: f64 = 0.8;
const PESSIMISTIC_FACTOR: f64 = 1.5;

static PROJECT_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"project[:\s]+([^,\n\.]+)",
        r"build[ing]*\s+(?:a\s+)?([^,\n\.]+)",
        r"create[ing]*\s+(?:a\s+)?([^,\n\.]+)",
        r"develop[ing]*\s+(?:a\s+)?([^,\n\.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Technologies that imply a project type, checked in order.
const TYPE_FROM_TECHNOLOGY: &[(&str, &[&str])] = &[
    ("mobile_app", &["ios", "android", "react native", "flutter"]),
    ("e-commerce", &["shopify", "woocommerce", "magento"]),
    ("web_app", &["react", "vue", "angular", "django", "flask"]),
];

/// Whole-number phase percentages per project type.
const PHASE_TEMPLATES: &[(&str, [u32; 5])] = &[
    ("website", [15, 25, 45, 10, 5]),
    ("web_app", [20, 20, 40, 15, 5]),
    ("mobile_app", [15, 20, 45, 15, 5]),
    ("e-commerce", [20, 20, 35, 20, 5]),
];

/// Builds estimates from a knowledge base, a technology table and a data
/// source supplying the roster and project history.
pub struct ProjectEstimator<S> {
    knowledge: KnowledgeBase,
    table: TechComplexityTable,
    source: S,
    config: EstimatorConfig,
}

impl<S: RosterProvider + ProjectHistory> ProjectEstimator<S> {
    pub fn new(
        knowledge: KnowledgeBase,
        table: TechComplexityTable,
        source: S,
        config: EstimatorConfig,
    ) -> Self {
        Self {
            knowledge,
            table,
            source,
            config,
        }
    }

    /// Load (or initialize) the knowledge base named by the config and use the
    /// built-in technology table.
    pub fn from_config(config: EstimatorConfig, source: S) -> KnowledgeBaseResult<Self> {
        let knowledge = KnowledgeBase::load_or_init(&config.knowledge_base_path)?;
        Ok(Self::new(
            knowledge,
            TechComplexityTable::default(),
            source,
            config,
        ))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn table(&self) -> &TechComplexityTable {
        &self.table
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Estimate a project, measuring deadlines from the local clock.
    pub fn estimate_project(
        &self,
        description: &str,
        requirements: &[String],
        technologies: &[String],
        deadline: Option<&str>,
    ) -> ProjectEstimate {
        self.estimate_project_at(
            description,
            requirements,
            technologies,
            deadline,
            Local::now().naive_local(),
        )
    }

    /// Estimate a project with deadlines measured from `now`.
    ///
    /// When `technologies` is empty, the technologies named in the
    /// description are used instead.
    pub fn estimate_project_at(
        &self,
        description: &str,
        requirements: &[String],
        technologies: &[String],
        deadline: Option<&str>,
        now: NaiveDateTime,
    ) -> ProjectEstimate {
        let project_name = extract_project_name(description);

        let technologies = if technologies.is_empty() {
            self.analyze_description(description).technologies
        } else {
            technologies.to_vec()
        };

        let parsed = RequirementParser::new(&self.table, &self.knowledge).parse(requirements);
        let project_type = determine_project_type(description, &technologies);

        let analyzer = ProjectAnalyzer::new(&self.table)
            .with_tight_deadline_days(self.config.tight_deadline_days);
        let factors = analyzer.analyze_complexity(description, &parsed, &technologies);
        let complexity_score = factors.overall_complexity;

        let base_hours = parsed
            .iter()
            .map(|r| r.estimated_hours)
            .fold(self.knowledge.base_hours(project_type), u32::saturating_add);
        let complexity_multiplier = 1.0 + (complexity_score - 0.5);
        let realistic = round_hours(f64::from(base_hours) * complexity_multiplier);

        let risk_factors =
            analyzer.identify_risk_factors(description, &parsed, &technologies, deadline, now);
        let risk_score = calculate_risk_score(&risk_factors);
        let high_risk = risk_score > self.config.high_risk_threshold;
        let adjusted = if high_risk {
            round_hours(f64::from(realistic) * self.config.high_risk_multiplier)
        } else {
            realistic
        };

        let bounds_base = match self.config.bounds_policy {
            BoundsPolicy::Recompute => adjusted,
            BoundsPolicy::Legacy => realistic,
        };
        let optimistic_hours = round_hours(f64::from(bounds_base) * OPTIMISTIC_FACTOR);
        let pessimistic_hours = round_hours(f64::from(bounds_base) * PESSIMISTIC_FACTOR);
        let total_hours = adjusted;

        let recommended_roles = recommend_roles(
            self.knowledge.project_type(project_type),
            &technologies,
            complexity_score,
        );
        let team_members = recommend_team_members(
            &recommended_roles,
            &technologies,
            &self.source.team_members(),
            self.config.skill_match_threshold,
        );

        let similar_projects = if self.config.use_historical_data {
            find_similar_projects(
                description,
                &technologies,
                &self.source.all_projects(),
                self.config.similarity_threshold,
                self.config.max_similar_projects,
            )
        } else {
            Vec::new()
        };

        let confidence_level = self.calculate_confidence(
            complexity_score,
            risk_score,
            similar_projects.len(),
            &technologies,
        );

        let estimate = ProjectEstimate {
            project_name,
            project_type: project_type.to_string(),
            total_hours,
            optimistic_hours,
            realistic_hours: adjusted,
            pessimistic_hours,
            complexity_score,
            difficulty_level: DifficultyLevel::from_complexity(complexity_score),
            confidence_level,
            risk_factors,
            risk_score,
            tech_complexity: self.analyze_tech_complexity(&technologies),
            recommended_team_size: recommended_roles.len(),
            recommended_roles,
            team_members,
            phase_breakdown: create_phase_breakdown(project_type, total_hours),
            skill_breakdown: self.create_skill_breakdown(&technologies, total_hours),
            similar_projects,
            technologies,
            created_at: Utc::now(),
        };

        tracing::info!(
            project = %estimate.project_name,
            project_type,
            total_hours = estimate.total_hours,
            difficulty = %estimate.difficulty_level,
            risk_score = estimate.risk_score,
            confidence = estimate.confidence_level,
            high_risk,
            "estimate complete"
        );
        estimate
    }

    /// What the description alone reveals, against this estimator's table.
    pub fn analyze_description(&self, description: &str) -> DescriptionAnalysis {
        analyze_description(description, &self.table)
    }

    /// Hours per skill category, proportional to the summed complexity of the
    /// category's technologies. Empty when there are no technologies.
    pub fn create_skill_breakdown(
        &self,
        technologies: &[String],
        total_hours: u32,
    ) -> BTreeMap<String, SkillAllocation> {
        let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for tech in technologies {
            groups.entry(category_of(tech)).or_default().push(tech.clone());
        }

        let total_complexity: f64 = technologies
            .iter()
            .map(|t| self.table.complexity_of(t))
            .sum();

        groups
            .into_iter()
            .map(|(category, techs)| {
                let category_complexity: f64 =
                    techs.iter().map(|t| self.table.complexity_of(t)).sum();
                let share = category_complexity / total_complexity.max(1.0);
                let allocation = SkillAllocation {
                    hours: (f64::from(total_hours) * share) as u32,
                    percentage: share * 100.0,
                    technologies: techs,
                };
                (category.to_string(), allocation)
            })
            .collect()
    }

    /// Complexity, difficulty band, learning curve and category per
    /// technology.
    pub fn analyze_tech_complexity(&self, technologies: &[String]) -> BTreeMap<String, TechAnalysis> {
        technologies
            .iter()
            .map(|tech| {
                let complexity = self.table.complexity_of(tech);
                let analysis = TechAnalysis {
                    complexity,
                    difficulty: DifficultyLevel::from_complexity(complexity),
                    learning_curve: self.knowledge.learning_curve(&tech.trim().to_lowercase()),
                    category: category_of(tech).to_string(),
                };
                (tech.clone(), analysis)
            })
            .collect()
    }

    /// Self-reported certainty in \[0.3, 0.95\].
    ///
    /// Starts at 0.8, falls with complexity above the midpoint, with risk, and
    /// by 0.05 per technology above 0.7 complexity; rises by 0.1 when more
    /// than two similar projects were found.
    pub fn calculate_confidence(
        &self,
        complexity_score: f64,
        risk_score: f64,
        similar_projects: usize,
        technologies: &[String],
    ) -> f64 {
        let mut confidence = 0.8;
        confidence -= (complexity_score - 0.5) * 0.3;
        confidence -= risk_score * 0.2;
        if similar_projects > 2 {
            confidence += 0.1;
        }
        confidence -= self.table.count_complex(technologies) as f64 * 0.05;
        confidence.clamp(0.3, 0.95)
    }
}

fn round_hours(hours: f64) -> u32 {
    hours.round().max(0.0) as u32
}

/// A display name for the project.
///
/// Tries `project: <name>`, then `build/create/develop [a] <name>`; a match
/// is used only if it is 4 to 49 characters long. Otherwise the first four
/// words. Title-cased either way.
pub fn extract_project_name(description: &str) -> String {
    let lower = description.to_lowercase();
    for pattern in PROJECT_NAME_PATTERNS.iter() {
        if let Some(m) = pattern.captures(&lower).and_then(|c| c.get(1)) {
            let name = m.as_str().trim();
            let len = name.chars().count();
            if len > 3 && len < 50 {
                return title_case(name);
            }
        }
    }
    let words: Vec<&str> = description.split_whitespace().take(4).collect();
    title_case(&words.join(" "))
}

/// Project type from description keywords, then from the technologies,
/// then [`DEFAULT_PROJECT_TYPE`].
pub fn determine_project_type(description: &str, technologies: &[String]) -> &'static str {
    if let Some(project_type) = project_type_from_description(description) {
        return project_type;
    }
    let techs: Vec<String> = technologies.iter().map(|t| t.trim().to_lowercase()).collect();
    TYPE_FROM_TECHNOLOGY
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| techs.iter().any(|t| t == m)))
        .map(|(project_type, _)| *project_type)
        .unwrap_or(DEFAULT_PROJECT_TYPE)
}

/// Fixed phase split for the project type; unknown types use the website
/// template. Hours are truncated.
pub fn create_phase_breakdown(project_type: &str, total_hours: u32) -> BTreeMap<Phase, PhaseAllocation> {
    let percents = PHASE_TEMPLATES
        .iter()
        .find(|(t, _)| *t == project_type)
        .or_else(|| PHASE_TEMPLATES.iter().find(|(t, _)| *t == DEFAULT_PROJECT_TYPE))
        .map(|(_, p)| *p)
        .unwrap_or([15, 25, 45, 10, 5]);

    Phase::ALL
        .iter()
        .zip(percents)
        .map(|(phase, percentage)| {
            let allocation = PhaseAllocation {
                hours: (u64::from(total_hours) * u64::from(percentage) / 100) as u32,
                percentage,
                description: phase.description().to_string(),
            };
            (*phase, allocation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskKind;
    use crate::history::HistoricalProject;
    use crate::source::InMemorySource;
    use crate::tech::OTHER_CATEGORY;
    use chrono::NaiveDate;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn estimator(config: EstimatorConfig) -> ProjectEstimator<InMemorySource> {
        ProjectEstimator::new(
            KnowledgeBase::default(),
            TechComplexityTable::default(),
            InMemorySource::default(),
            config,
        )
    }

    #[test]
    fn project_name_from_patterns() {
        assert_eq!(
            extract_project_name("Project: Acme portal, phase two"),
            "Acme Portal"
        );
        assert_eq!(
            extract_project_name("We are developing a booking tool. Soon."),
            "Booking Tool"
        );
    }

    #[test]
    fn project_name_falls_back_to_first_words() {
        // The build match is exactly 50 characters and is rejected.
        assert_eq!(
            extract_project_name(
                "Build a responsive e-commerce website using React and Node.js with payment integration"
            ),
            "Build A Responsive E-Commerce"
        );
        assert_eq!(extract_project_name("Make a CV"), "Make A Cv");
        assert_eq!(extract_project_name(""), "");
    }

    #[test]
    fn project_type_inference() {
        assert_eq!(determine_project_type("A blog", &[]), "website");
        assert_eq!(
            determine_project_type("Inventory tool", &strings(&["Flutter"])),
            "mobile_app"
        );
        assert_eq!(
            determine_project_type("Inventory tool", &strings(&["magento", "react"])),
            "e-commerce"
        );
        assert_eq!(
            determine_project_type("Inventory tool", &strings(&["django"])),
            "web_app"
        );
        assert_eq!(determine_project_type("Inventory tool", &[]), DEFAULT_PROJECT_TYPE);
    }

    #[test]
    fn phase_breakdown_truncates_and_falls_back() {
        let phases = create_phase_breakdown("e-commerce", 121);
        assert_eq!(phases[&Phase::Development].hours, 42); // 121 * 35 / 100
        assert_eq!(phases[&Phase::Testing].percentage, 20);

        let unknown = create_phase_breakdown("spaceship", 100);
        let website = create_phase_breakdown("website", 100);
        assert_eq!(unknown, website);
        assert_eq!(unknown[&Phase::Design].hours, 25);
    }

    #[test]
    fn skill_breakdown_groups_by_category() {
        let est = estimator(EstimatorConfig::default());
        assert!(est.create_skill_breakdown(&[], 100).is_empty());

        let techs = strings(&["react", "css", "postgresql", "stripe"]);
        let breakdown = est.create_skill_breakdown(&techs, 100);
        // total complexity 0.6 + 0.2 + 0.5 + 0.5 = 1.8
        let frontend = &breakdown["frontend"];
        assert_eq!(frontend.technologies, strings(&["react", "css"]));
        assert!((frontend.percentage - 0.8 / 1.8 * 100.0).abs() < 1e-9);
        assert_eq!(frontend.hours, 44);
        assert_eq!(breakdown[OTHER_CATEGORY].technologies, strings(&["stripe"]));
    }

    #[test]
    fn small_complexity_sums_use_unit_denominator() {
        let est = estimator(EstimatorConfig::default());
        let breakdown = est.create_skill_breakdown(&strings(&["html"]), 100);
        assert_eq!(breakdown["frontend"].hours, 10);
    }

    #[test]
    fn confidence_is_clamped() {
        let est = estimator(EstimatorConfig::default());
        let many_complex = strings(&["kubernetes", "blockchain", "pytorch", "nlp", "tensorflow"]);
        assert_eq!(est.calculate_confidence(1.0, 1.0, 0, &many_complex), 0.3);
        assert_eq!(est.calculate_confidence(0.0, 0.0, 5, &[]), 0.95);
        let mid = est.calculate_confidence(0.5, 0.2, 0, &[]);
        assert!((mid - 0.76).abs() < 1e-12);
    }

    #[test]
    fn technologies_fall_back_to_description() {
        let est = estimator(EstimatorConfig::default());
        let estimate =
            est.estimate_project_at("A portfolio site on WordPress", &[], &[], None, now());
        assert_eq!(estimate.technologies, strings(&["wordpress"]));
        assert_eq!(estimate.tech_complexity["wordpress"].category, "cms");
        assert_eq!(estimate.tech_complexity["wordpress"].learning_curve, 0.3);
    }

    #[test]
    fn high_risk_bounds_policies() {
        // Experimental (0.7) and unclear requirements (0.6): risk 0.65.
        let description = "An advanced analytics portal";
        let requirements = strings(&["Reporting, maybe later"]);

        let recompute = estimator(EstimatorConfig::default()).estimate_project_at(
            description,
            &requirements,
            &[],
            None,
            now(),
        );
        assert!((recompute.risk_score - 0.65).abs() < 1e-12);
        assert!(recompute.hours_ordered());
        assert_eq!(recompute.total_hours, recompute.realistic_hours);

        let legacy = estimator(EstimatorConfig {
            bounds_policy: BoundsPolicy::Legacy,
            ..Default::default()
        })
        .estimate_project_at(description, &requirements, &[], None, now());
        assert_eq!(legacy.total_hours, recompute.total_hours);
        assert!(legacy.pessimistic_hours < recompute.pessimistic_hours);
        assert!(legacy
            .risk_factors
            .iter()
            .any(|r| r.kind == RiskKind::ExperimentalFeatures));
    }

    #[test]
    fn historical_lookup_can_be_disabled() {
        let history = vec![HistoricalProject {
            project_name: Some("Old Blog".into()),
            description: "personal blog".into(),
            ..Default::default()
        }];
        let source = InMemorySource::new(vec![], history);

        let on = ProjectEstimator::new(
            KnowledgeBase::default(),
            TechComplexityTable::default(),
            source.clone(),
            EstimatorConfig::default(),
        );
        assert_eq!(
            on.estimate_project_at("personal blog", &[], &[], None, now())
                .similar_projects
                .len(),
            1
        );

        let off = ProjectEstimator::new(
            KnowledgeBase::default(),
            TechComplexityTable::default(),
            source,
            EstimatorConfig {
                use_historical_data: false,
                ..Default::default()
            },
        );
        assert!(off
            .estimate_project_at("personal blog", &[], &[], None, now())
            .similar_projects
            .is_empty());
    }

    #[test]
    fn huge_feature_hours_saturate() {
        let mut kb = KnowledgeBase::default();
        kb.feature_estimates.insert("migration".into(), 3_000_000_000);
        let est = ProjectEstimator::new(
            kb,
            TechComplexityTable::default(),
            InMemorySource::default(),
            EstimatorConfig::default(),
        );

        let estimate = est.estimate_project_at(
            "Internal tool",
            &strings(&["data migration", "user migration"]),
            &[],
            None,
            now(),
        );
        assert!(estimate.total_hours > 3_000_000_000);
        assert_eq!(estimate.pessimistic_hours, u32::MAX);
        assert!(estimate.hours_ordered());
        for allocation in estimate.phase_breakdown.values() {
            assert!(allocation.hours <= estimate.total_hours);
        }
    }

    #[test]
    fn phase_hours_do_not_overflow() {
        let phases = create_phase_breakdown("website", u32::MAX);
        assert_eq!(phases[&Phase::Development].hours, (u64::from(u32::MAX) * 45 / 100) as u32);
    }
}
