//! Benchmarks for estimation.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scopewise::config::EstimatorConfig;
use scopewise::estimator::ProjectEstimator;
use scopewise::history::{find_similar_projects, HistoricalProject};
use scopewise::knowledge::KnowledgeBase;
use scopewise::source::InMemorySource;
use scopewise::team::TeamMember;
use scopewise::tech::TechComplexityTable;

const DESCRIPTION: &str =
    "Build a responsive e-commerce website using React and Node.js with payment integration";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn history(n: usize) -> Vec<HistoricalProject> {
    (0..n)
        .map(|i| HistoricalProject {
            project_name: Some(format!("Project {i}")),
            description: format!("online store number {i} with payment integration and search"),
            technologies: strings(&["react", "postgresql", "stripe"]),
            estimated_hours: 120.0 + i as f64,
            actual_hours: 140.0 + i as f64,
            status: "completed".into(),
            ..Default::default()
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let roster = vec![
        TeamMember::new("Ada", &["react", "javascript", "css"], 90.0),
        TeamMember::new("Bo", &["node.js", "postgresql", "api"], 85.0),
        TeamMember::new("Cy", &["figma", "design"], 70.0),
    ];
    let estimator = ProjectEstimator::new(
        KnowledgeBase::default(),
        TechComplexityTable::default(),
        InMemorySource::new(roster, history(200)),
        EstimatorConfig::default(),
    );
    let requirements = strings(&[
        "User authentication and accounts",
        "Product catalog pages",
        "Shopping cart functionality",
        "Stripe payment integration",
        "Order history page",
    ]);
    let techs = strings(&["react", "node.js", "express", "postgresql", "stripe"]);
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    c.bench_function("estimate_ecommerce_200_history", |bench| {
        bench.iter(|| {
            black_box(estimator.estimate_project_at(
                DESCRIPTION,
                &requirements,
                &techs,
                Some("2026-03-01"),
                now,
            ))
        })
    });
}

fn bench_similarity(c: &mut Criterion) {
    let projects = history(1_000);
    let techs = strings(&["react", "stripe"]);

    c.bench_function("similar_projects_1k", |bench| {
        bench.iter(|| black_box(find_similar_projects(DESCRIPTION, &techs, &projects, 0.3, 5)))
    });
}

criterion_group!(benches, bench_estimate, bench_similarity);
criterion_main!(benches);
