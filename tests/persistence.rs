//! On-disk state: the knowledge base document, the config file, and JSON
//! data source folders.

use std::path::Path;

use scopewise::config::{BoundsPolicy, EstimatorConfig};
use scopewise::error::{KnowledgeBaseError, ScopewiseError, SourceError};
use scopewise::estimator::ProjectEstimator;
use scopewise::knowledge::KnowledgeBase;
use scopewise::paths::ScopewisePaths;
use scopewise::source::{InMemorySource, JsonFolderSource, ProjectHistory, RosterProvider};

fn config_in(dir: &Path) -> EstimatorConfig {
    EstimatorConfig {
        knowledge_base_path: dir.join("data").join("estimation_knowledge.json"),
        ..Default::default()
    }
}

#[test]
fn estimator_writes_default_knowledge_base_on_first_use() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = config_in(dir.path());
    assert!(!config.knowledge_base_path.exists());

    let estimator = ProjectEstimator::from_config(config.clone(), InMemorySource::default()).unwrap();
    assert!(config.knowledge_base_path.exists());
    assert_eq!(estimator.knowledge(), &KnowledgeBase::default());

    let on_disk = KnowledgeBase::load(&config.knowledge_base_path).unwrap();
    assert_eq!(on_disk, KnowledgeBase::default());
}

#[test]
fn edited_knowledge_base_changes_estimates() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = config_in(dir.path());

    let mut kb = KnowledgeBase::default();
    if let Some(website) = kb.project_types.get_mut("website") {
        website.base_hours = 60;
    }
    kb.save(&config.knowledge_base_path).unwrap();

    let estimator = ProjectEstimator::from_config(config, InMemorySource::default()).unwrap();
    let estimate = estimator.estimate_project("Personal website", &[], &[], None);
    assert_eq!(estimate.total_hours, 60);
}

#[test]
fn corrupt_knowledge_base_fails_construction() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = config_in(dir.path());
    std::fs::create_dir_all(config.knowledge_base_path.parent().unwrap()).unwrap();
    std::fs::write(&config.knowledge_base_path, r#"{"project_types": [1, 2"#).unwrap();

    let err = ProjectEstimator::from_config(config, InMemorySource::default())
        .err()
        .unwrap();
    assert!(matches!(err, KnowledgeBaseError::Parse { .. }));

    let top: ScopewiseError = err.into();
    assert!(top.to_string().contains("not valid JSON"));
}

#[test]
fn config_file_round_trip_under_xdg_layout() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = ScopewisePaths::rooted(dir.path());
    paths.ensure_dirs().unwrap();

    let config = EstimatorConfig {
        bounds_policy: BoundsPolicy::Legacy,
        max_similar_projects: 3,
        ..config_in(dir.path())
    };
    config.save(&paths.config_file()).unwrap();

    let loaded = EstimatorConfig::load_or_default(&paths.config_file()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn relative_knowledge_base_path_lives_in_data_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = ScopewisePaths::rooted(dir.path());
    paths.ensure_dirs().unwrap();

    let mut config = EstimatorConfig::default();
    assert!(config.knowledge_base_path.is_relative());
    config.knowledge_base_path = paths.data_path(&config.knowledge_base_path);

    ProjectEstimator::from_config(config, InMemorySource::default()).unwrap();
    assert!(paths
        .data_dir
        .join("data")
        .join("estimation_knowledge.json")
        .is_file());
}

#[test]
fn folder_source_feeds_the_estimator() {
    let dir = tempfile::TempDir::new().unwrap();
    let sources = dir.path().join("sources");
    std::fs::create_dir_all(&sources).unwrap();
    std::fs::write(
        sources.join("team_members.json"),
        r#"[
            {"name": "Ada", "skills": ["react", "frontend", "javascript", "html", "css"], "hourly_rate": 90, "availability": "available"},
            {"name": "Bo", "skills": "python", "hourly_rate": 70}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        sources.join("history.json"),
        r#"[
            {"project_name": "Studio Portfolio", "description": "portfolio website for a photo studio", "technologies": "react", "estimated_hours": 60, "actual_hours": 72, "status": "completed"},
            {"task_name": "ignored", "status": "open"}
        ]"#,
    )
    .unwrap();
    std::fs::write(sources.join("broken.json"), "[{").unwrap();

    let source = JsonFolderSource::load(&sources).unwrap();
    assert_eq!(source.team_members().len(), 2);
    assert_eq!(source.all_projects().len(), 1);

    let estimator = ProjectEstimator::from_config(config_in(dir.path()), source).unwrap();
    let estimate = estimator.estimate_project(
        "Portfolio website for a photo studio",
        &[],
        &["react".to_string()],
        None,
    );

    let frontend = estimate
        .team_members
        .iter()
        .find(|m| m.role == "frontend developer")
        .unwrap();
    assert_eq!(frontend.name, "Ada");
    assert_eq!(estimate.similar_projects.len(), 1);
    assert_eq!(estimate.similar_projects[0].name, "Studio Portfolio");
    assert_eq!(estimate.similar_projects[0].actual_hours, 72.0);
}

#[test]
fn missing_source_folder_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = JsonFolderSource::load(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, SourceError::NotFound { .. }));
}
