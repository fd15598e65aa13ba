// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # scopewise
//!
//! Heuristic software project estimation. Given a free-text project
//! description, optional requirement strings, a technology list and an
//! optional deadline, scopewise produces optimistic, realistic and
//! pessimistic hour figures together with a complexity score, risk factors,
//! a confidence level, team recommendations, phase and skill breakdowns, and
//! the most similar past projects.
//!
//! ## Architecture
//!
//! - **Technology table** (`tech`): complexity per technology, skill categories
//! - **Knowledge base** (`knowledge`): per-type base hours and feature hours, persisted as JSON
//! - **Requirement parser** (`requirement`): keyword scoring of requirement strings
//! - **Analyzer** (`analysis`): complexity factors and risk detection
//! - **Team recommender** (`team`): roles, roster matching, hourly rates
//! - **History** (`history`): similarity against past projects
//! - **Estimator** (`estimator`): orchestrates the above into a `ProjectEstimate`
//!
//! ## Library usage
//!
//! ```no_run
//! use scopewise::config::EstimatorConfig;
//! use scopewise::estimator::ProjectEstimator;
//! use scopewise::source::InMemorySource;
//!
//! let estimator =
//!     ProjectEstimator::from_config(EstimatorConfig::default(), InMemorySource::default()).unwrap();
//! let estimate = estimator.estimate_project(
//!     "Build a portfolio website",
//!     &["Contact form".to_string()],
//!     &["webflow".to_string()],
//!     None,
//! );
//! println!("{} hours ({})", estimate.total_hours, estimate.difficulty_level);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod estimate;
pub mod estimator;
pub mod export;
pub mod history;
pub mod knowledge;
pub mod paths;
pub mod requirement;
pub mod source;
pub mod team;
pub mod tech;
