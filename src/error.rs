//! Rich diagnostic error types for scopewise.
//!
//! Estimation itself never fails on caller input: missing requirements,
//! unknown technologies, and unparsable deadlines all degrade to baseline
//! values. The errors here cover the edges that touch the filesystem or the
//! outside world: the knowledge base document, data source folders, and
//! export formats.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::paths::PathError;

/// Top-level error type for scopewise.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ScopewiseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    KnowledgeBase(#[from] KnowledgeBaseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}

/// Convenience alias for top-level operations.
pub type ScopewiseResult<T> = std::result::Result<T, ScopewiseError>;

// ---------------------------------------------------------------------------
// Knowledge base errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base: {path}")]
    #[diagnostic(
        code(scopewise::knowledge::read),
        help("Check that the file is readable. Delete it to have the default knowledge base recreated.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge base is not valid JSON: {path}: {message}")]
    #[diagnostic(
        code(scopewise::knowledge::parse),
        help(
            "The estimation knowledge base is corrupt. Fix the JSON by hand, or \
             move the file away and run `scopewise kb init` to write the defaults."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to write knowledge base: {path}")]
    #[diagnostic(
        code(scopewise::knowledge::write),
        help("Ensure the data directory exists and you have write permissions.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize knowledge base: {message}")]
    #[diagnostic(code(scopewise::knowledge::serialize))]
    Serialize { message: String },
}

pub type KnowledgeBaseResult<T> = std::result::Result<T, KnowledgeBaseError>;

// ---------------------------------------------------------------------------
// Data source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("data source folder not found: {path}")]
    #[diagnostic(
        code(scopewise::source::not_found),
        help("Point --sources at a directory containing project and team JSON files.")
    )]
    NotFound { path: String },

    #[error("failed to list data source folder: {path}")]
    #[diagnostic(
        code(scopewise::source::read_dir),
        help("Check the directory permissions.")
    )]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("unsupported export format: \"{format}\"")]
    #[diagnostic(
        code(scopewise::export::unsupported_format),
        help("Supported formats are `json` and `report`.")
    )]
    UnsupportedFormat { format: String },

    #[error("failed to serialize estimate: {message}")]
    #[diagnostic(code(scopewise::export::serialize))]
    Serialize { message: String },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;
